//! Hostile-entity AI: target acquisition, pursuit, attacks, spawn
//! cadence, and deferred removal.
//!
//! Removal semantics are deliberate: a hostile whose health drops to or
//! below zero during a tick still gets to act that same tick. All damage
//! is applied first; a single filter pass at the end of the tick removes
//! the defeated. Attack checks use the pre-move distance, then the
//! hostile steps toward its target.

use holdout_types::{Agent, AgentId, Hostile, HostileId, Position};
use rand::Rng;
use tracing::{debug, info};

use crate::config::HostileConfig;
use crate::world::WorldState;

/// What the hostile phase did this tick, for the tick summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostileReport {
    /// Agents struck, with the energy damage dealt to each.
    pub struck_agents: Vec<(HostileId, AgentId)>,
    /// Total damage dealt to the base this tick.
    pub base_damage: f64,
    /// Counter-attacks landed by armed agents.
    pub counter_attacks: Vec<(AgentId, HostileId)>,
}

/// Advance every hostile one tick: re-acquire targets, attack, pursue.
///
/// For each hostile the nearest live agent and the base are candidate
/// targets; the hostile moves toward whichever is closer. Strikes land
/// on the chosen agent within `attack_range` and on the base within the
/// larger `base_attack_range`. A struck agent holding a weapon that
/// reaches the hostile retaliates immediately (damage both ways).
pub fn advance_hostiles(world: &mut WorldState, config: &HostileConfig) -> HostileReport {
    let mut report = HostileReport::default();
    let tick = world.clock.tick();

    let base_position = world.locations.base().map(|b| b.position);
    let WorldState {
        roster,
        hostiles,
        locations,
        ..
    } = world;

    let mut base_damage = 0.0;

    for hostile in hostiles.iter_mut() {
        // Re-resolve the target each tick; last tick's target may be dead.
        let nearest = roster
            .iter()
            .filter(|a| a.is_alive())
            .map(|a| (a.id, a.position.distance_to(hostile.position)))
            .min_by(|(_, da), (_, db)| da.partial_cmp(db).unwrap_or(core::cmp::Ordering::Equal));
        hostile.target = nearest.map(|(id, _)| id);

        let base_distance = base_position.map(|p| p.distance_to(hostile.position));

        // Strike the chosen agent if already in range (pre-move distance).
        if let Some((agent_id, distance)) = nearest
            && distance <= config.attack_range
            && let Some(agent) = roster.get_mut(agent_id)
        {
            strike_agent(hostile, agent, config, tick, &mut report);
        }

        // Gnaw on the base when close enough, whichever target was nearer.
        if let Some(distance) = base_distance
            && distance <= config.base_attack_range
        {
            base_damage += config.base_attack_damage;
            debug!(tick, hostile_id = %hostile.id, "hostile damaged the base");
        }

        // Pursue the nearer of agent and base.
        let destination = match (nearest, base_distance.zip(base_position)) {
            (Some((agent_id, agent_distance)), Some((bd, bp))) => {
                if agent_distance <= bd {
                    roster.get(agent_id).map(|a| a.position)
                } else {
                    Some(bp)
                }
            }
            (Some((agent_id, _)), None) => roster.get(agent_id).map(|a| a.position),
            (None, Some((_, bp))) => Some(bp),
            (None, None) => None,
        };
        if let Some(destination) = destination {
            hostile.position = step_toward(hostile.position, destination, hostile.speed);
        }
    }

    if base_damage > 0.0
        && let Some(base) = locations.base_mut()
        && let Some(health) = base.health.as_mut()
    {
        *health -= base_damage;
        report.base_damage = base_damage;
        info!(tick, base_damage, base_health = *health, "base took damage");
    }

    report
}

/// Deal attack damage to an agent and resolve the counter-attack.
fn strike_agent(
    hostile: &mut Hostile,
    agent: &mut Agent,
    config: &HostileConfig,
    tick: u64,
    report: &mut HostileReport,
) {
    holdout_agents::vitals::adjust_energy(agent, -config.attack_damage);
    report.struck_agents.push((hostile.id, agent.id));
    info!(
        tick,
        hostile_id = %hostile.id,
        agent_id = %agent.id,
        damage = config.attack_damage,
        energy = agent.energy,
        "hostile struck an agent"
    );

    // Damage both ways: an armed agent in weapon reach retaliates.
    if let Some(weapon) = &agent.weapon {
        let distance = agent.position.distance_to(hostile.position);
        if distance <= weapon.range {
            hostile.health -= weapon.damage;
            report.counter_attacks.push((agent.id, hostile.id));
            info!(
                tick,
                agent_id = %agent.id,
                hostile_id = %hostile.id,
                damage = weapon.damage,
                hostile_health = hostile.health,
                "agent counter-attacked"
            );
        }
    }
}

/// One constant-speed step from `from` toward `to`.
fn step_toward(from: Position, to: Position, speed: f64) -> Position {
    let distance = from.distance_to(to);
    if distance <= speed || distance <= 0.0 {
        return to;
    }
    let fraction = speed / distance;
    Position::new(
        from.x + (to.x - from.x) * fraction,
        from.y + (to.y - from.y) * fraction,
    )
}

/// Advance the spawn cadence; spawn one hostile on a random map edge
/// when the randomized interval elapses, then re-roll the interval.
pub fn maybe_spawn(
    world: &mut WorldState,
    config: &HostileConfig,
    rng: &mut impl Rng,
) -> Option<HostileId> {
    world.spawn_counter = world.spawn_counter.saturating_add(1);
    if world.spawn_counter < world.next_spawn_at {
        return None;
    }

    let id = world.issue_hostile_id();
    let position = world.bounds.random_edge_position(rng);
    world.hostiles.push(Hostile {
        id,
        position,
        health: config.spawn_health,
        target: None,
        speed: config.speed,
    });
    world.spawn_counter = 0;
    world.next_spawn_at = if config.spawn_interval_max > config.spawn_interval_min {
        rng.random_range(config.spawn_interval_min..config.spawn_interval_max)
    } else {
        config.spawn_interval_min.max(1)
    };
    info!(hostile_id = %id, ?position, next_in = world.next_spawn_at, "hostile spawned at map edge");
    Some(id)
}

/// Remove defeated hostiles. Called once at the end of the tick, after
/// all damage for the tick has been applied.
pub fn filter_defeated(world: &mut WorldState) -> Vec<HostileId> {
    let defeated: Vec<HostileId> = world
        .hostiles
        .iter()
        .filter(|h| h.is_defeated())
        .map(|h| h.id)
        .collect();
    if !defeated.is_empty() {
        world.hostiles.retain(|h| !h.is_defeated());
        info!(count = defeated.len(), "defeated hostiles removed at end of tick");
    }
    defeated
}
