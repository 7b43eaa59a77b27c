//! Error types for the holdout-agents crate.
//!
//! All operations that can fail return typed errors rather than
//! panicking. Expected steady-state failures (an item the agent does not
//! hold, a proposal id that does not resolve) are errors here so callers
//! can degrade them to logged no-ops.

use holdout_types::{AgentId, ProposalId};

/// Errors that can occur during agent state operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Agent name already exists in the roster.
    #[error("duplicate agent name: {0}")]
    DuplicateName(String),

    /// Agent with the given id was not found in the roster.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// Attempted to remove more of an item than the agent holds.
    #[error("missing item: wanted {requested} of {item} but only have {available}")]
    MissingItem {
        /// The item name.
        item: String,
        /// The quantity requested.
        requested: u32,
        /// The quantity actually held.
        available: u32,
    },

    /// A money change would take the balance below zero.
    #[error("insufficient funds: balance {balance}, change {change}")]
    InsufficientFunds {
        /// Current balance.
        balance: i64,
        /// The attempted change.
        change: i64,
    },

    /// No pending proposal with the given id.
    #[error("unknown proposal: {0}")]
    UnknownProposal(ProposalId),
}
