//! Configuration for the decision runner.
//!
//! Oracle credentials and endpoints come from environment variables so
//! they stay out of the YAML world config and out of snapshots.

use std::time::Duration;

use crate::error::RunnerError;

/// Supported oracle providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Local Ollama generate API.
    Ollama,
    /// OpenAI-compatible chat completions API.
    OpenAi,
    /// Anthropic Messages API.
    Anthropic,
    /// Canned responses, no network (tests and offline runs).
    Scripted,
}

impl Provider {
    /// Parse a provider selector string.
    pub fn parse(raw: &str) -> Result<Self, RunnerError> {
        match raw.trim().to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" | "deepseek" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "scripted" | "offline" => Ok(Self::Scripted),
            other => Err(RunnerError::Config(format!("unknown provider: {other}"))),
        }
    }

    /// The selector string persisted in snapshots.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Scripted => "scripted",
        }
    }
}

/// Complete runner configuration.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Which backend to talk to.
    pub provider: Provider,
    /// Base API URL.
    pub base_url: String,
    /// API key (unused by Ollama).
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Per-call deadline. On expiry the call is aborted and the agent
    /// skips its tick.
    pub timeout: Duration,
    /// Directory containing the prompt templates.
    pub templates_dir: String,
}

impl OracleConfig {
    /// Load configuration from environment variables.
    ///
    /// - `ORACLE_PROVIDER` -- ollama | openai | anthropic | scripted
    ///   (default `ollama`)
    /// - `ORACLE_BASE_URL` -- API base URL (default
    ///   `http://localhost:11434`)
    /// - `ORACLE_API_KEY` -- API key (default empty)
    /// - `ORACLE_MODEL` -- model name (default `llama3`)
    /// - `ORACLE_TIMEOUT_SECS` -- per-call deadline (default 30)
    /// - `TEMPLATES_DIR` -- prompt template directory (default
    ///   `templates`)
    pub fn from_env() -> Result<Self, RunnerError> {
        let provider = Provider::parse(
            &std::env::var("ORACLE_PROVIDER").unwrap_or_else(|_| "ollama".to_owned()),
        )?;
        let base_url = std::env::var("ORACLE_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:11434".to_owned());
        let api_key = std::env::var("ORACLE_API_KEY").unwrap_or_default();
        let model = std::env::var("ORACLE_MODEL").unwrap_or_else(|_| "llama3".to_owned());
        let timeout_secs: u64 = std::env::var("ORACLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_owned())
            .parse()
            .map_err(|e| RunnerError::Config(format!("invalid ORACLE_TIMEOUT_SECS: {e}")))?;
        let templates_dir =
            std::env::var("TEMPLATES_DIR").unwrap_or_else(|_| "templates".to_owned());

        Ok(Self {
            provider,
            base_url,
            api_key,
            model,
            timeout: Duration::from_secs(timeout_secs),
            templates_dir,
        })
    }
}
