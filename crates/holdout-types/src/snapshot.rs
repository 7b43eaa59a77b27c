//! Serializable world-snapshot records.
//!
//! The snapshot is the contract with an external persistence collaborator:
//! the storage medium is out of scope, only the record shape is specified.
//! Per agent it carries every live field except the raw memory log (the
//! current summarized text stands in for it) and the oracle handle, which
//! is reconstructed from the provider selector on load.
//!
//! Every optional field has a serde default so older or hand-edited
//! snapshots load with sensible values; the loader in `holdout-engine`
//! re-attaches each agent to its location by name lookup.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::enums::Mood;
use crate::ids::AgentId;
use crate::structs::{Hostile, Job, Message, Proposal, Weapon};

/// Default energy for records missing the field.
const fn default_energy() -> f64 {
    100.0
}

/// Default happiness for records missing the field.
const fn default_happiness() -> f64 {
    50.0
}

/// Default hunger for records missing the field.
const fn default_hunger() -> f64 {
    50.0
}

/// Default walking speed for records missing the field.
const fn default_speed() -> f64 {
    2.0
}

/// One agent, flattened for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Agent id.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Personality text.
    #[serde(default)]
    pub personality: String,
    /// The summarized memory text (the raw log is not persisted).
    #[serde(default)]
    pub memory: String,
    /// Long-term goals.
    #[serde(default)]
    pub goals: Vec<String>,
    /// Current location name; the loader snaps position to this
    /// location's coordinates.
    pub location_name: String,
    /// Occupation.
    #[serde(default)]
    pub job: Option<Job>,
    /// Cash on hand.
    #[serde(default)]
    pub money: i64,
    /// Happiness vital.
    #[serde(default = "default_happiness")]
    pub happiness: f64,
    /// Hunger vital.
    #[serde(default = "default_hunger")]
    pub hunger: f64,
    /// Fear vital.
    #[serde(default)]
    pub fear: f64,
    /// Short-term plan text.
    #[serde(default)]
    pub plan: String,
    /// Equipped weapon.
    #[serde(default)]
    pub weapon: Option<Weapon>,
    /// Position x.
    #[serde(default)]
    pub x: f64,
    /// Position y.
    #[serde(default)]
    pub y: f64,
    /// Pending movement target x, if traveling.
    #[serde(default)]
    pub target_x: Option<f64>,
    /// Pending movement target y, if traveling.
    #[serde(default)]
    pub target_y: Option<f64>,
    /// Pending movement destination name, if traveling to a location.
    #[serde(default)]
    pub target_location_name: Option<String>,
    /// Walking speed.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Energy vital.
    #[serde(default = "default_energy")]
    pub energy: f64,
    /// Reported mood.
    #[serde(default)]
    pub mood: Mood,
    /// Relationship strengths by agent id.
    #[serde(default)]
    pub relationships: BTreeMap<AgentId, f64>,
    /// Recent received messages.
    #[serde(default)]
    pub messages: VecDeque<Message>,
    /// Carried items.
    #[serde(default)]
    pub inventory: BTreeMap<String, u32>,
    /// Proposals still awaiting a response.
    #[serde(default)]
    pub pending_proposals: Vec<Proposal>,
}

/// The complete persisted simulation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldRecord {
    /// All living agents.
    pub agents: Vec<AgentRecord>,
    /// All live hostiles.
    #[serde(default)]
    pub hostiles: Vec<Hostile>,
    /// The tick counter at save time.
    #[serde(default)]
    pub tick: u64,
    /// The active oracle provider selector (e.g. "ollama").
    #[serde(default)]
    pub provider: String,
}
