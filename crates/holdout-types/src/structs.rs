//! Core entity structs: agents, hostiles, locations, proposals, messages.
//!
//! These are plain data carriers. The behavioral rules that mutate them
//! (vital clamps, inventory invariants, proposal transitions) live in the
//! `holdout-agents` and `holdout-engine` crates.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{LocationKind, Mood, ProposalKind, ProposalStatus, WeaponKind};
use crate::ids::{AgentId, HostileId, ProposalId};

/// A point on the 2D map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Construct a position from coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line (Euclidean) distance to another position.
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An agent's occupation. Salary is paid by systems outside the core
/// tick loop; it is carried here because the oracle prompt mentions it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job title.
    pub name: String,
    /// Pay per work shift.
    pub salary: i64,
}

/// A weapon an agent can carry and attack hostiles with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Display name, e.g. "pistol".
    pub name: String,
    /// Damage dealt per successful attack.
    pub damage: f64,
    /// Maximum attack distance in map units.
    pub range: f64,
    /// Melee or ranged.
    pub kind: WeaponKind,
}

/// A text message delivered to another agent's bounded inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The sending agent.
    pub sender: AgentId,
    /// The receiving agent.
    pub recipient: AgentId,
    /// Message body.
    pub content: String,
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,
}

/// A structured request for joint action between two agents.
///
/// Created by a `propose` action, consumed from the recipient's pending
/// list when answered, and never mutated after reaching a terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique id, issued from the world's monotonic counter.
    pub id: ProposalId,
    /// The proposing agent.
    pub sender: AgentId,
    /// The agent being asked.
    pub recipient: AgentId,
    /// What kind of joint action is requested.
    pub kind: ProposalKind,
    /// Free-text detail (for exploration/meeting proposals this names
    /// the location to converge on).
    pub content: String,
    /// Lifecycle state.
    pub status: ProposalStatus,
    /// When the proposal was created.
    pub created_at: DateTime<Utc>,
}

/// One entry in an agent's raw action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// What the agent did.
    pub action: String,
    /// The tick it happened on.
    pub tick: u64,
    /// Wall-clock timestamp.
    pub timestamp: DateTime<Utc>,
    /// Situation note recorded alongside the action (location, vitals).
    pub context: String,
}

/// An agent's memory: an append-only action log plus the text the oracle
/// last summarized it into.
///
/// Summarization replaces the raw log with the summary; the log then
/// starts accumulating again, so "most recent known state" ordering is
/// preserved across compressions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLog {
    /// Raw entries since the last summarization.
    pub entries: Vec<MemoryEntry>,
    /// Oracle-produced summary of everything before `entries`.
    pub summary: String,
}

/// Where an agent is currently headed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementTarget {
    /// Destination x coordinate.
    pub x: f64,
    /// Destination y coordinate.
    pub y: f64,
    /// Destination location name, when the target is a known location
    /// (joint-combat relocation targets a hostile's bare coordinates).
    pub location_name: Option<String>,
}

/// A simulated inhabitant of the world.
///
/// Vitals (`energy`, `happiness`, `hunger`, `fear`) are clamped to
/// [0, 100] by the mutation helpers in `holdout-agents`; nothing in the
/// workspace writes them directly. An agent is removed from the world
/// when its energy reaches 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique id.
    pub id: AgentId,
    /// Display name, unique within the roster.
    pub name: String,
    /// Free-text personality, used only as oracle context.
    pub personality: String,
    /// Vitality; doubles as hit points against hostiles.
    pub energy: f64,
    /// Contentment.
    pub happiness: f64,
    /// Need for food; rises every tick.
    pub hunger: f64,
    /// Threat response; rises near hostiles, decays when safe.
    pub fear: f64,
    /// Reported mood.
    pub mood: Mood,
    /// Cash on hand. Guarded to never drop below zero.
    pub money: i64,
    /// Current map position.
    pub position: Position,
    /// Pending movement destination, if any.
    pub movement_target: Option<MovementTarget>,
    /// Map units moved per tick.
    pub speed: f64,
    /// Name of the location the agent is currently at (or was last at,
    /// while traveling).
    pub location_name: String,
    /// Occupation, if employed.
    pub job: Option<Job>,
    /// Equipped weapon, if armed.
    pub weapon: Option<Weapon>,
    /// Carried items. Quantities are always positive; zero-quantity
    /// entries are removed on decrement.
    pub inventory: BTreeMap<String, u32>,
    /// Relationship strength toward other agents, clamped to [-100, 100].
    pub relationships: BTreeMap<AgentId, f64>,
    /// Bounded inbox of recent messages (oldest dropped beyond capacity).
    pub messages: VecDeque<Message>,
    /// Proposals awaiting this agent's response.
    pub pending_proposals: Vec<Proposal>,
    /// Long-term goals, free text.
    pub goals: Vec<String>,
    /// Current short-term plan, free text.
    pub plan: String,
    /// Action log and summarized history.
    pub memory: MemoryLog,
}

impl Agent {
    /// Create an agent with default vitals (full energy, mid happiness
    /// and hunger, no fear, 500 money, walking speed 2).
    pub fn new(id: AgentId, name: impl Into<String>, personality: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            personality: personality.into(),
            energy: 100.0,
            happiness: 50.0,
            hunger: 50.0,
            fear: 0.0,
            mood: Mood::Neutral,
            money: 500,
            position: Position::default(),
            movement_target: None,
            speed: 2.0,
            location_name: String::new(),
            job: None,
            weapon: None,
            inventory: BTreeMap::new(),
            relationships: BTreeMap::new(),
            messages: VecDeque::new(),
            pending_proposals: Vec::new(),
            goals: Vec::new(),
            plan: String::new(),
            memory: MemoryLog::default(),
        }
    }

    /// Whether the agent is still alive (energy above zero).
    pub const fn is_alive(&self) -> bool {
        self.energy > 0.0
    }
}

/// An adversarial entity that pursues agents and the base.
///
/// Health only ever decreases. Defeated hostiles (health <= 0) are
/// filtered out at the end of the tick, after all damage for that tick
/// has been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    /// Unique id.
    pub id: HostileId,
    /// Current map position.
    pub position: Position,
    /// Remaining health. May go negative mid-tick.
    pub health: f64,
    /// The agent currently being pursued, re-resolved by lookup each
    /// tick since targets can die.
    pub target: Option<AgentId>,
    /// Map units moved per tick.
    pub speed: f64,
}

impl Hostile {
    /// Whether the hostile has been defeated.
    pub const fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }
}

/// One row of a location's scavenge table.
///
/// Rows are evaluated in insertion order; the first successful
/// probability draw wins and ends the scavenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Item granted on a successful draw.
    pub item: String,
    /// Probability in [0, 1] that a scavenge finds this item.
    pub spawn_chance: f64,
    /// Maximum quantity granted per find (uniform in 1..=max).
    pub max_quantity: u32,
}

/// A named, static place on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique display name; agents and the oracle refer to locations
    /// by this name.
    pub name: String,
    /// Anchor position agents travel to.
    pub position: Position,
    /// Footprint width.
    pub width: f64,
    /// Footprint height.
    pub height: f64,
    /// Category tag.
    pub kind: LocationKind,
    /// Owning agent for private property, if any.
    pub owner: Option<AgentId>,
    /// Scavengeable resources, in insertion order.
    pub resources: Vec<ResourceSpec>,
    /// Structure health; present only on [`LocationKind::Base`]. When it
    /// reaches 0 the simulation halts.
    pub health: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_agent_has_default_vitals() {
        let agent = Agent::new(AgentId::new(1), "Alice", "curious");
        assert!((agent.energy - 100.0).abs() < f64::EPSILON);
        assert!((agent.hunger - 50.0).abs() < f64::EPSILON);
        assert_eq!(agent.money, 500);
        assert!(agent.is_alive());
        assert!(agent.inventory.is_empty());
    }

    #[test]
    fn hostile_defeated_at_zero_or_below() {
        let mut hostile = Hostile {
            id: HostileId::new(1),
            position: Position::default(),
            health: 100.0,
            target: None,
            speed: 5.0,
        };
        assert!(!hostile.is_defeated());
        hostile.health = 0.0;
        assert!(hostile.is_defeated());
        hostile.health = -5.0;
        assert!(hostile.is_defeated());
    }

    #[test]
    fn agent_roundtrips_through_serde() {
        let mut agent = Agent::new(AgentId::new(3), "Bob", "wary");
        agent.inventory.insert("water".to_owned(), 2);
        agent.relationships.insert(AgentId::new(1), 15.0);
        let json = serde_json::to_string(&agent).unwrap_or_default();
        let restored: Result<Agent, _> = serde_json::from_str(&json);
        assert_eq!(restored.ok(), Some(agent));
    }
}
