//! The tick scheduler: re-runs the pure tick step on a configurable
//! delay.
//!
//! Kept outside the tick cycle so `run_tick` stays synchronously
//! testable without waiting on real time. The scheduler is the only
//! place that sleeps between ticks.

use std::time::Duration;

use rand::Rng;
use tracing::info;

use crate::config::SimulationConfig;
use crate::decision::DecisionSource;
use crate::tick::{self, HaltReason, TickError, TickOutcome};
use crate::world::WorldState;

/// Drives repeated ticks with a fixed delay between them.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    delay: Duration,
}

impl TickScheduler {
    /// A scheduler that waits `delay` between ticks.
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Run ticks until a terminal state, or until `max_ticks` ticks have
    /// completed when a cap is given.
    ///
    /// Returns the halt reason if the simulation reached a terminal
    /// state, `None` if the cap stopped it first.
    pub async fn run<S: DecisionSource>(
        &self,
        world: &mut WorldState,
        config: &SimulationConfig,
        source: &mut S,
        rng: &mut (impl Rng + Send),
        max_ticks: Option<u64>,
    ) -> Result<Option<HaltReason>, TickError> {
        let mut completed: u64 = 0;
        loop {
            match tick::run_tick(world, config, source, rng).await? {
                TickOutcome::Halted(reason) => return Ok(Some(reason)),
                TickOutcome::Completed(summary) => {
                    info!(
                        tick = summary.tick,
                        actions = summary.actions.len(),
                        skipped = summary.skipped.len(),
                        hostiles = world.hostiles.len(),
                        "tick completed"
                    );
                }
            }
            completed = completed.saturating_add(1);
            if max_ticks.is_some_and(|cap| completed >= cap) {
                return Ok(None);
            }
            tokio::time::sleep(self.delay).await;
        }
    }
}
