//! The action contract between the decision side (rules or oracle) and
//! the state-transition engine.
//!
//! A decision for one agent on one tick is an [`ActionResponse`]: the
//! chosen action with its typed parameters, plus the agent's reported
//! plan, mood, and vitals. The action kind determines which parameters
//! are required; the response parser in `holdout-runner` rejects
//! payloads missing a required field before anything here is built.

use serde::{Deserialize, Serialize};

use crate::enums::{ActionKind, Mood, ProposalKind};
use crate::ids::{HostileId, ProposalId};

/// Action-specific parameters, one variant per [`ActionKind`].
///
/// Agents and the oracle refer to other agents and locations by display
/// name; the resolver translates names to ids through the roster index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionParameters {
    /// Parameters for [`ActionKind::Move`].
    Move {
        /// Name of an existing location to head toward.
        destination: String,
    },
    /// Parameters for [`ActionKind::Wait`].
    Wait,
    /// Parameters for [`ActionKind::Scavenge`].
    Scavenge,
    /// Parameters for [`ActionKind::AttackHostile`].
    AttackHostile {
        /// The hostile to attack.
        target: HostileId,
    },
    /// Parameters for [`ActionKind::SendMessage`].
    SendMessage {
        /// Recipient agent's name.
        recipient: String,
        /// Message body.
        content: String,
    },
    /// Parameters for [`ActionKind::GiveItem`].
    GiveItem {
        /// Recipient agent's name.
        recipient: String,
        /// Inventory item to hand over (one unit).
        item: String,
    },
    /// Parameters for [`ActionKind::Propose`].
    Propose {
        /// Recipient agent's name.
        recipient: String,
        /// The kind of joint action proposed.
        kind: ProposalKind,
        /// Free-text detail; names the location for exploration and
        /// meeting proposals.
        content: String,
    },
    /// Parameters for [`ActionKind::RespondToProposal`].
    RespondToProposal {
        /// The pending proposal being answered.
        proposal: ProposalId,
        /// `true` to accept, `false` to reject.
        accept: bool,
    },
}

impl ActionParameters {
    /// The action kind these parameters belong to.
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Move { .. } => ActionKind::Move,
            Self::Wait => ActionKind::Wait,
            Self::Scavenge => ActionKind::Scavenge,
            Self::AttackHostile { .. } => ActionKind::AttackHostile,
            Self::SendMessage { .. } => ActionKind::SendMessage,
            Self::GiveItem { .. } => ActionKind::GiveItem,
            Self::Propose { .. } => ActionKind::Propose,
            Self::RespondToProposal { .. } => ActionKind::RespondToProposal,
        }
    }
}

/// One agent's arbitrated decision for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    /// The chosen action.
    pub kind: ActionKind,
    /// Typed parameters for the action.
    pub parameters: ActionParameters,
    /// The agent's stated short-term plan (may be empty).
    pub plan: String,
    /// The agent's reported mood.
    pub mood: Mood,
    /// The agent's reported energy level, clamped on application.
    pub energy: f64,
    /// Optional reported happiness, clamped on application.
    pub happiness: Option<f64>,
    /// Optional reported hunger, clamped on application.
    pub hunger: Option<f64>,
}

impl ActionResponse {
    /// Build a response from parameters, deriving the kind.
    pub fn new(parameters: ActionParameters, plan: impl Into<String>, mood: Mood, energy: f64) -> Self {
        Self {
            kind: parameters.kind(),
            parameters,
            plan: plan.into(),
            mood,
            energy,
            happiness: None,
            hunger: None,
        }
    }

    /// Build a forced wait, the shape every rule-engine override uses.
    pub fn forced_wait(plan: impl Into<String>, mood: Mood, energy: f64) -> Self {
        Self::new(ActionParameters::Wait, plan, mood, energy)
    }
}
