//! Deterministic rule overrides evaluated before the oracle.
//!
//! A matching rule short-circuits oracle consultation entirely: the rule
//! response is used verbatim, in microseconds instead of a network
//! round-trip. Rules are pure functions of the agent and world -- no
//! side effects, no suspension -- checked in fixed priority order with
//! first match winning.
//!
//! Rule responses echo the agent's current energy so that applying the
//! response is a vitals no-op; the wait handler's recovery is the only
//! energy effect of a forced wait.

use holdout_agents::{Roster, social};
use holdout_types::{ActionResponse, Agent, Mood};
use holdout_world::LocationSet;
use tracing::info;

/// Energy at or below which an agent is forced to rest.
const FORCED_REST_ENERGY: f64 = 20.0;

/// Relationship strength below which entering private property is
/// denied.
const PRIVATE_ACCESS_THRESHOLD: f64 = 20.0;

/// Happiness lost when night suppresses a noisy plan.
const NOISE_SUPPRESSION_PENALTY: f64 = 5.0;

/// Plan keywords that count as noise during the night window.
const NOISE_KEYWORDS: &[&str] = &["sing", "party", "shout", "loud"];

/// Evaluate the rule table for one agent.
///
/// Returns a forced response if a rule fires, `None` to defer to the
/// oracle. Priority order:
///
/// 1. **Exhaustion**: energy <= 20 -- forced wait, mood tired.
/// 2. **Private property**: the plan is to move to a privately-owned
///    location whose owner the agent barely knows -- forced wait,
///    movement denied.
/// 3. **Night noise**: night tick and the plan mentions a noisy
///    activity -- forced wait with a happiness penalty.
pub fn decide(
    agent: &Agent,
    roster: &Roster,
    locations: &LocationSet,
    tick: u64,
    is_night: bool,
) -> Option<ActionResponse> {
    // Rule 1: too exhausted to do anything but rest.
    if agent.energy <= FORCED_REST_ENERGY {
        info!(
            agent_id = %agent.id,
            tick,
            energy = agent.energy,
            rule = "forced_rest",
            "rule engine: forcing a rest (energy depleted)"
        );
        return Some(ActionResponse::forced_wait(
            "Too exhausted to act; resting to recover energy.",
            Mood::Tired,
            agent.energy,
        ));
    }

    // Rule 2: deny movement onto private property the agent is not
    // welcome at. The plan text is the tell: the oracle states movement
    // intentions there before the move is issued.
    if let Some(owner_name) = private_move_denial(agent, roster, locations) {
        info!(
            agent_id = %agent.id,
            tick,
            owner = %owner_name,
            rule = "private_property",
            "rule engine: denying movement onto private property (low relationship)"
        );
        return Some(ActionResponse::forced_wait(
            format!("Decided against visiting {owner_name}'s place uninvited."),
            Mood::Neutral,
            agent.energy,
        ));
    }

    // Rule 3: no noise at night.
    if is_night && plan_is_noisy(&agent.plan) {
        info!(
            agent_id = %agent.id,
            tick,
            rule = "night_noise",
            "rule engine: suppressing noisy plan during the night window"
        );
        let mut response = ActionResponse::forced_wait(
            "It is night; staying quiet until morning.",
            Mood::Thoughtful,
            agent.energy,
        );
        response.happiness = Some(agent.happiness - NOISE_SUPPRESSION_PENALTY);
        return Some(response);
    }

    None
}

/// Check rule 2: the plan names a move to a privately-owned location
/// whose owner's relationship with this agent is below the threshold.
/// Returns the owner's name when the rule fires.
fn private_move_denial(agent: &Agent, roster: &Roster, locations: &LocationSet) -> Option<String> {
    let plan = agent.plan.to_lowercase();
    if !plan.contains("move") {
        return None;
    }
    for location in locations.iter() {
        let Some(owner_id) = location.owner else {
            continue;
        };
        if owner_id == agent.id {
            continue;
        }
        if !plan.contains(&location.name.to_lowercase()) {
            continue;
        }
        if social::relationship(agent, owner_id) < PRIVATE_ACCESS_THRESHOLD {
            let owner_name = roster
                .get(owner_id)
                .map_or_else(|| owner_id.to_string(), |owner| owner.name.clone());
            return Some(owner_name);
        }
    }
    None
}

/// Whether the plan mentions a noisy activity.
fn plan_is_noisy(plan: &str) -> bool {
    let plan = plan.to_lowercase();
    NOISE_KEYWORDS.iter().any(|keyword| plan.contains(keyword))
}
