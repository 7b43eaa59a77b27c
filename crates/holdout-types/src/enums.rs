//! Enumeration types shared across the Holdout workspace.

use serde::{Deserialize, Serialize};

/// The closed action vocabulary an agent (or the rule engine) may choose
/// from each tick.
///
/// The oracle contract uses the kebab-case serde names verbatim; any
/// other string is invalid and must be rejected by the response parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Begin moving toward a named location.
    Move,
    /// Stay put and recover a little energy.
    Wait,
    /// Search the current location's resource table for supplies.
    Scavenge,
    /// Attack a hostile entity with the equipped weapon.
    AttackHostile,
    /// Send a text message to another agent.
    SendMessage,
    /// Hand one unit of an inventory item to another agent.
    GiveItem,
    /// Propose a joint action to another agent.
    Propose,
    /// Accept or reject a pending proposal.
    RespondToProposal,
}

impl ActionKind {
    /// Kebab-case wire name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Wait => "wait",
            Self::Scavenge => "scavenge",
            Self::AttackHostile => "attack-hostile",
            Self::SendMessage => "send-message",
            Self::GiveItem => "give-item",
            Self::Propose => "propose",
            Self::RespondToProposal => "respond-to-proposal",
        }
    }
}

impl core::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An agent's reported mood.
///
/// Moods are cosmetic context for the oracle prompt; they never gate
/// behavior, so unknown strings from the oracle degrade to [`Mood::Neutral`]
/// instead of failing the decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Cheerful.
    Happy,
    /// Baseline state.
    #[default]
    Neutral,
    /// Energized.
    Excited,
    /// Reflective.
    Thoughtful,
    /// Satisfied.
    Content,
    /// Low energy.
    Tired,
    /// Seeking company.
    Social,
    /// In a making mood.
    Creative,
}

impl Mood {
    /// Parse a mood string case-insensitively, returning `None` for
    /// values outside the closed set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "happy" => Some(Self::Happy),
            "neutral" => Some(Self::Neutral),
            "excited" => Some(Self::Excited),
            "thoughtful" => Some(Self::Thoughtful),
            "content" => Some(Self::Content),
            "tired" => Some(Self::Tired),
            "social" => Some(Self::Social),
            "creative" => Some(Self::Creative),
            _ => None,
        }
    }
}

/// The kind of joint action a proposal asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalKind {
    /// Travel together to a named location and search it.
    JointExploration,
    /// Converge on the nearest hostile and fight it together.
    JointCombat,
    /// Meet at a named location to talk.
    Meeting,
}

impl ProposalKind {
    /// Kebab-case wire name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JointExploration => "joint-exploration",
            Self::JointCombat => "joint-combat",
            Self::Meeting => "meeting",
        }
    }
}

impl core::fmt::Display for ProposalKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a proposal. `Accepted` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Waiting in the recipient's pending list.
    Pending,
    /// The recipient agreed; the joint action was triggered.
    Accepted,
    /// The recipient declined.
    Rejected,
}

impl ProposalStatus {
    /// Whether this status is terminal (no further transitions allowed).
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

/// Whether a weapon strikes in close quarters or at distance.
///
/// Purely descriptive today: range and damage live on the weapon itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    /// Close-quarters weapon.
    Melee,
    /// Projectile weapon.
    Ranged,
}

/// Category tag for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationKind {
    /// An agent's residence.
    Home,
    /// Large store with food stock.
    Supermarket,
    /// Small store with mixed supplies.
    GeneralStore,
    /// Open public space.
    Park,
    /// Workplace.
    Work,
    /// Public library.
    Library,
    /// Cafe.
    Cafe,
    /// The settlement's fortified base. The only kind with health; its
    /// destruction ends the simulation.
    Base,
    /// Anything else.
    Other,
}
