//! Error types for the decision runner.
//!
//! The taxonomy mirrors how failures are handled: oracle transport
//! failures and malformed responses are per-agent events (the agent
//! skips its tick), while template and configuration errors are setup
//! problems surfaced at startup.

/// Errors that can occur while producing a decision.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The oracle could not be reached or returned a non-success status.
    #[error("oracle error: {0}")]
    Oracle(String),

    /// The oracle call exceeded its deadline and was aborted.
    #[error("oracle call timed out after {seconds}s")]
    Timeout {
        /// The deadline that was exceeded.
        seconds: u64,
    },

    /// The oracle responded, but the payload was malformed or missing a
    /// required field. The raw text is retained for diagnostics.
    #[error("invalid oracle decision: {reason}")]
    Decision {
        /// What was wrong with the payload.
        reason: String,
        /// The raw oracle text, for diagnostics.
        raw: String,
    },

    /// A prompt template could not be loaded or rendered.
    #[error("template error: {0}")]
    Template(String),

    /// The runner configuration is invalid or incomplete.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RunnerError {
    /// The raw oracle text, when this error retains one.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Decision { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
