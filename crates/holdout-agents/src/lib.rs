//! Agent state, vitals, and social mechanics for the Holdout simulation.
//!
//! This crate is the logic layer for agents -- everything that operates
//! on agent state without touching I/O. It sits between `holdout-types`
//! (data structures) and the engine/runner crates (orchestration and
//! oracle access).
//!
//! # Modules
//!
//! - [`config`] -- Tunable vital-mechanics parameters ([`VitalsConfig`])
//! - [`error`] -- Error types for all agent operations ([`AgentError`])
//! - [`inventory`] -- Item and money operations with their invariants
//! - [`memory`] -- Action log, oracle-summarized history, prompt context
//! - [`movement`] -- Constant-speed stepping toward a movement target
//! - [`proposal`] -- Proposal lifecycle (create, queue, terminal resolution)
//! - [`roster`] -- Id-keyed agent store with name index ([`Roster`])
//! - [`social`] -- Relationships and the bounded message inbox
//! - [`vitals`] -- Clamped stat mutations, passive decay, consumption, fear
//!
//! [`VitalsConfig`]: config::VitalsConfig
//! [`AgentError`]: error::AgentError
//! [`Roster`]: roster::Roster

pub mod config;
pub mod error;
pub mod inventory;
pub mod memory;
pub mod movement;
pub mod proposal;
pub mod roster;
pub mod social;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use config::VitalsConfig;
pub use error::AgentError;
pub use roster::{AgentSeed, Roster};
