//! Vital mechanics: clamped stat adjustments, per-tick passive decay,
//! automatic consumption, and fear dynamics.
//!
//! All four vitals (`energy`, `happiness`, `hunger`, `fear`) live in
//! [0, 100]. Nothing in the workspace writes them directly; every
//! mutation goes through the clamping helpers here, so no error path can
//! leave a vital outside its range.

use holdout_types::{ActionResponse, Agent};
use holdout_world::catalog;
use tracing::debug;

use crate::config::VitalsConfig;
use crate::inventory;

/// Lower and upper bound for every vital stat.
const STAT_MIN: f64 = 0.0;
/// Upper bound for every vital stat.
const STAT_MAX: f64 = 100.0;

/// Clamp a raw value into the vital stat range.
fn clamp_stat(value: f64) -> f64 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Add a (possibly negative) delta to the agent's energy, clamped.
pub fn adjust_energy(agent: &mut Agent, delta: f64) {
    agent.energy = clamp_stat(agent.energy + delta);
}

/// Add a (possibly negative) delta to the agent's happiness, clamped.
pub fn adjust_happiness(agent: &mut Agent, delta: f64) {
    agent.happiness = clamp_stat(agent.happiness + delta);
}

/// Add a (possibly negative) delta to the agent's hunger, clamped.
pub fn adjust_hunger(agent: &mut Agent, delta: f64) {
    agent.hunger = clamp_stat(agent.hunger + delta);
}

/// Add a (possibly negative) delta to the agent's fear, clamped.
pub fn adjust_fear(agent: &mut Agent, delta: f64) {
    agent.fear = clamp_stat(agent.fear + delta);
}

/// Apply the self-reported fields of a decision to the agent: plan, mood,
/// energy, and (when present) happiness and hunger, all clamped.
///
/// The decision source is authoritative for these values; the clamp is
/// the only guard between an oracle's arithmetic and the agent's state.
pub fn apply_reported(agent: &mut Agent, response: &ActionResponse) {
    agent.plan = response.plan.clone();
    agent.mood = response.mood;
    agent.energy = clamp_stat(response.energy);
    if let Some(happiness) = response.happiness {
        agent.happiness = clamp_stat(happiness);
    }
    if let Some(hunger) = response.hunger {
        agent.hunger = clamp_stat(hunger);
    }
}

/// What the passive phase consumed on the agent's behalf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassiveOutcome {
    /// Food eaten automatically, if any.
    pub ate: Option<&'static str>,
    /// Medical item used automatically, if any.
    pub treated: Option<&'static str>,
}

/// Advance one agent's passive vitals by one tick.
///
/// Order of operations:
/// 1. Hunger rises by `hunger_rate`.
/// 2. Happiness decays while hunger is high, recovers a little while
///    fear is low.
/// 3. If hunger crossed the eat threshold and food is held, the best
///    held food is eaten (hunger recovery plus any happiness bonus).
/// 4. If energy is at or below the medical threshold and a medical item
///    is held, it is used.
pub fn passive_tick(agent: &mut Agent, config: &VitalsConfig) -> PassiveOutcome {
    adjust_hunger(agent, config.hunger_rate);

    if agent.hunger >= config.unhappy_hunger_threshold {
        adjust_happiness(agent, -config.happiness_decay);
    }
    if agent.fear < config.calm_fear_threshold {
        adjust_happiness(agent, config.calm_happiness_recovery);
    }

    let mut outcome = PassiveOutcome::default();

    if agent.hunger >= config.eat_threshold
        && let Some(food) = catalog::best_food_in_inventory(&agent.inventory)
        && inventory::consume(agent, food.name, 1).is_ok()
    {
        adjust_hunger(agent, -food.hunger_recovery);
        if food.happiness_bonus > 0.0 {
            adjust_happiness(agent, food.happiness_bonus);
        }
        debug!(agent_id = %agent.id, food = food.name, "ate automatically (hungry)");
        outcome.ate = Some(food.name);
    }

    if agent.energy <= config.medical_threshold
        && let Some(medical) = catalog::medical_in_inventory(&agent.inventory)
        && inventory::consume(agent, medical.name, 1).is_ok()
    {
        adjust_energy(agent, medical.energy_recovery);
        debug!(agent_id = %agent.id, item = medical.name, "used medical item (low energy)");
        outcome.treated = Some(medical.name);
    }

    outcome
}

/// Update an agent's fear from hostile proximity.
///
/// Fear rises by `fear_per_hostile` for each hostile within the
/// proximity radius, and decays by `fear_decay` on ticks with none
/// nearby. Read-only with respect to every other agent.
pub fn update_fear(agent: &mut Agent, nearby_hostiles: usize, config: &VitalsConfig) {
    if nearby_hostiles == 0 {
        adjust_fear(agent, -config.fear_decay);
    } else {
        let count = u32::try_from(nearby_hostiles).unwrap_or(u32::MAX);
        adjust_fear(agent, config.fear_per_hostile * f64::from(count));
    }
}
