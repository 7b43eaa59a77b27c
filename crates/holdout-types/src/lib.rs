//! Shared type definitions for the Holdout simulation.
//!
//! This crate is the single source of truth for the data shapes used
//! across the Holdout workspace: entity structs, typed identifiers, the
//! decision contract, and the persisted snapshot records.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for entity identifiers
//! - [`enums`] -- Enumeration types (actions, moods, proposals, locations)
//! - [`structs`] -- Core entity structs (agents, hostiles, locations)
//! - [`actions`] -- The rule/oracle action contract
//! - [`snapshot`] -- Serializable world-snapshot records

pub mod actions;
pub mod enums;
pub mod ids;
pub mod snapshot;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::{ActionParameters, ActionResponse};
pub use enums::{ActionKind, LocationKind, Mood, ProposalKind, ProposalStatus, WeaponKind};
pub use ids::{AgentId, HostileId, ProposalId};
pub use snapshot::{AgentRecord, WorldRecord};
pub use structs::{
    Agent, Hostile, Job, Location, MemoryEntry, MemoryLog, Message, MovementTarget, Position,
    Proposal, ResourceSpec, Weapon,
};
