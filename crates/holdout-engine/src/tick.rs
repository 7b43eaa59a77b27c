//! The tick cycle: one discrete simulation step, in strict order.
//!
//! 1. Halt check (base destroyed / no agents) -- terminal, not an error.
//! 2. Fear update from hostile proximity (read-only between agents).
//! 3. Decision collection for all agents **concurrently**, awaited as a
//!    barrier: no agent's mutation is visible to another agent's decision
//!    within the same tick.
//! 4. Sequential action application in roster order.
//! 5. Passive vitals (hunger rise, happiness drift, auto-consumption).
//! 6. Movement advancement.
//! 7. Removal of agents whose energy reached 0.
//! 8. Hostile advancement and collision resolution (damage both ways).
//! 9. Defeated-hostile filtering, then a possible spawn.
//! 10. Clock advance. Rescheduling lives in the scheduler, outside this
//!     pure step.

use std::collections::BTreeMap;

use holdout_agents::{movement, vitals};
use holdout_types::{ActionKind, AgentId, HostileId};
use rand::Rng;
use tracing::{info, warn};

use crate::clock::ClockError;
use crate::config::SimulationConfig;
use crate::decision::{DecisionOutcome, DecisionProvenance, DecisionSource};
use crate::hostiles::{self, HostileReport};
use crate::resolver;
use crate::world::WorldState;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}

/// Why the simulation stopped scheduling ticks. These are defined end
/// states, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The base's health reached 0.
    BaseDestroyed,
    /// No agents remain in the world.
    NoAgentsRemain,
}

/// One applied (or degraded) action in the tick log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    /// The action kind.
    pub kind: ActionKind,
    /// Which decision source produced it.
    pub provenance: DecisionProvenance,
    /// Whether the handler had its intended effect.
    pub applied: bool,
    /// Human-readable outcome.
    pub detail: String,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    /// The tick number that was executed (pre-advance).
    pub tick: u64,
    /// Applied actions by agent.
    pub actions: BTreeMap<AgentId, ActionRecord>,
    /// Agents whose decision failed, with the failure reason. They
    /// skipped their action; everyone else proceeded.
    pub skipped: BTreeMap<AgentId, String>,
    /// Agents removed this tick (energy reached 0).
    pub removed_agents: Vec<AgentId>,
    /// What the hostile phase did.
    pub hostile_report: HostileReport,
    /// Hostiles filtered out at end of tick.
    pub defeated_hostiles: Vec<HostileId>,
    /// A hostile spawned this tick, if the cadence elapsed.
    pub spawned_hostile: Option<HostileId>,
}

/// The result of attempting one tick.
#[derive(Debug)]
pub enum TickOutcome {
    /// The tick ran; here is what happened.
    Completed(Box<TickSummary>),
    /// A terminal state was reached; no tick ran and none should be
    /// scheduled.
    Halted(HaltReason),
}

/// Check the terminal conditions without running anything.
pub fn check_halt(world: &WorldState) -> Option<HaltReason> {
    if world.base_health().is_some_and(|h| h <= 0.0) {
        return Some(HaltReason::BaseDestroyed);
    }
    if world.roster.is_empty() {
        return Some(HaltReason::NoAgentsRemain);
    }
    None
}

/// Execute one complete tick of the simulation.
///
/// This is the engine's main entry point. The decision source is awaited
/// once for the whole roster (step 3); everything else is synchronous
/// and strictly ordered.
pub async fn run_tick<S: DecisionSource>(
    world: &mut WorldState,
    config: &SimulationConfig,
    source: &mut S,
    rng: &mut impl Rng,
) -> Result<TickOutcome, TickError> {
    // --- Step 1: terminal-state check ---
    if let Some(reason) = check_halt(world) {
        info!(?reason, "simulation halted");
        return Ok(TickOutcome::Halted(reason));
    }

    let tick = world.clock.tick();
    let mut summary = TickSummary {
        tick,
        ..TickSummary::default()
    };

    // --- Step 2: fear update from hostile proximity ---
    update_fear_for_all(world, config);

    // --- Step 3: decision barrier (the only concurrent phase) ---
    let decisions = source.collect_decisions(world).await;

    // --- Step 4: sequential action application in roster order ---
    let order: Vec<AgentId> = world.roster.order().to_vec();
    for agent_id in &order {
        match decisions.get(agent_id) {
            Some(DecisionOutcome::Decided {
                provenance,
                response,
            }) => {
                let outcome =
                    resolver::apply(world, &config.vitals, *agent_id, response, rng);
                summary.actions.insert(
                    *agent_id,
                    ActionRecord {
                        kind: response.kind,
                        provenance: *provenance,
                        applied: outcome.applied,
                        detail: outcome.detail,
                    },
                );
            }
            Some(DecisionOutcome::Failed { reason, raw }) => {
                warn!(
                    tick,
                    agent_id = %agent_id,
                    reason = %reason,
                    raw = raw.as_deref().unwrap_or(""),
                    "decision failed; agent skips this tick"
                );
                summary.skipped.insert(*agent_id, reason.clone());
            }
            None => {}
        }
    }

    // --- Step 5: passive vitals and consumption ---
    for agent_id in &order {
        if let Some(agent) = world.roster.get_mut(*agent_id) {
            let _ = vitals::passive_tick(agent, &config.vitals);
        }
    }

    // --- Step 6: movement advancement ---
    for agent_id in &order {
        if let Some(agent) = world.roster.get_mut(*agent_id) {
            let _ = movement::advance(agent);
        }
    }

    // --- Step 7: remove agents whose energy reached 0 ---
    for agent_id in &order {
        let dead = world.roster.get(*agent_id).is_some_and(|a| !a.is_alive());
        if dead && world.roster.remove(*agent_id).is_some() {
            info!(tick, agent_id = %agent_id, "agent removed (energy depleted)");
            summary.removed_agents.push(*agent_id);
        }
    }

    // --- Step 8: hostile advancement and collisions ---
    summary.hostile_report = hostiles::advance_hostiles(world, &config.hostiles);

    // --- Step 9: filter defeated hostiles, then maybe spawn ---
    summary.defeated_hostiles = hostiles::filter_defeated(world);
    summary.spawned_hostile = hostiles::maybe_spawn(world, &config.hostiles, rng);

    // --- Step 10: advance the clock ---
    world.clock.advance()?;

    Ok(TickOutcome::Completed(Box::new(summary)))
}

/// Step 2: fear rises near hostiles and decays in quiet ticks.
fn update_fear_for_all(world: &mut WorldState, config: &SimulationConfig) {
    let hostile_positions: Vec<_> = world.hostiles.iter().map(|h| h.position).collect();
    let order: Vec<AgentId> = world.roster.order().to_vec();
    for agent_id in order {
        if let Some(agent) = world.roster.get_mut(agent_id) {
            let nearby = hostile_positions
                .iter()
                .filter(|p| agent.position.distance_to(**p) < config.vitals.hostile_proximity_radius)
                .count();
            vitals::update_fear(agent, nearby, &config.vitals);
        }
    }
}
