//! World clock, tick cycle, and action resolution for the Holdout
//! simulation.
//!
//! This crate owns the 10-step tick cycle that drives the simulation:
//! halt check, fear update, the concurrent decision barrier, sequential
//! action resolution, passive vitals, movement, agent removal, hostile
//! advancement, hostile filtering/spawning, and the clock advance.
//!
//! # Modules
//!
//! - [`clock`] -- Tick counter and the derived night window
//! - [`config`] -- YAML configuration loading into typed structs
//! - [`decision`] -- [`DecisionSource`] contract and the scripted stub
//! - [`hostiles`] -- Hostile AI: targeting, pursuit, attacks, spawning
//! - [`resolver`] -- One handler per action kind
//! - [`scheduler`] -- Interval-driven re-ticking, outside the pure step
//! - [`snapshot`] -- World record conversion for persistence
//! - [`tick`] -- The 10-step tick cycle
//! - [`world`] -- The [`WorldState`] owned by the tick cycle
//!
//! [`DecisionSource`]: decision::DecisionSource
//! [`WorldState`]: world::WorldState

pub mod clock;
pub mod config;
pub mod decision;
pub mod hostiles;
pub mod resolver;
pub mod scheduler;
pub mod snapshot;
pub mod tick;
pub mod world;

// Re-export the types most callers need at crate root.
pub use clock::{NightConfig, WorldClock, night_at};
pub use config::{HostileConfig, SimulationConfig, WorldSettings};
pub use decision::{DecisionOutcome, DecisionProvenance, DecisionSource, ScriptedDecisionSource};
pub use scheduler::TickScheduler;
pub use tick::{HaltReason, TickOutcome, TickSummary, check_halt, run_tick};
pub use world::WorldState;
