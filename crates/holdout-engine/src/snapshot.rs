//! World snapshot conversion: live state to persisted records and back.
//!
//! The storage medium belongs to an external collaborator; this module
//! only converts. Saving flattens each agent into an [`AgentRecord`]
//! (the raw memory log is replaced by its rendered summary text).
//! Loading rebuilds agents with defaults for missing optional fields and
//! re-attaches each agent to its current location by name lookup,
//! snapping the position to that location's coordinates.

use holdout_agents::{AgentError, memory};
use holdout_types::{Agent, AgentRecord, MovementTarget, Position, WorldRecord};
use holdout_world::{LocationSet, MapBounds};
use tracing::warn;

use crate::clock::{ClockError, NightConfig, WorldClock};
use crate::world::WorldState;

/// Errors that can occur while restoring a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The record could not be serialized or deserialized.
    #[error("snapshot serialization failed: {source}")]
    Serde {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// An agent record could not be adopted (duplicate name or id).
    #[error("agent restore failed: {source}")]
    Agent {
        /// The underlying roster error.
        #[from]
        source: AgentError,
    },

    /// The clock could not be reconstructed.
    #[error("clock restore failed: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}

/// Flatten the live world into a persistable record.
pub fn save(world: &WorldState) -> WorldRecord {
    let agents = world.roster.iter().map(agent_to_record).collect();
    WorldRecord {
        agents,
        hostiles: world.hostiles.clone(),
        tick: world.clock.tick(),
        provider: world.provider.clone(),
    }
}

/// Serialize the live world to a JSON string.
pub fn to_json(world: &WorldState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(&save(world))?)
}

/// Rebuild a world from a record, against a freshly-seeded location set.
pub fn restore(
    record: &WorldRecord,
    locations: LocationSet,
    bounds: MapBounds,
    night: NightConfig,
) -> Result<WorldState, SnapshotError> {
    let clock = WorldClock::from_parts(record.tick, night)?;
    let mut world = WorldState::new(clock, locations, bounds);
    world.provider = record.provider.clone();

    for agent_record in &record.agents {
        let agent = record_to_agent(agent_record, &world.locations);
        world.roster.adopt(agent)?;
    }

    for hostile in &record.hostiles {
        world.adopt_hostile_id(hostile.id);
        world.hostiles.push(hostile.clone());
    }

    Ok(world)
}

/// Deserialize and restore a world from a JSON string.
pub fn from_json(
    json: &str,
    locations: LocationSet,
    bounds: MapBounds,
    night: NightConfig,
) -> Result<WorldState, SnapshotError> {
    let record: WorldRecord = serde_json::from_str(json)?;
    restore(&record, locations, bounds, night)
}

/// Flatten one agent. The memory log is rendered to its context text;
/// the oracle handle is not an agent field and needs no exclusion here.
fn agent_to_record(agent: &Agent) -> AgentRecord {
    AgentRecord {
        id: agent.id,
        name: agent.name.clone(),
        personality: agent.personality.clone(),
        memory: memory::context(&agent.memory),
        goals: agent.goals.clone(),
        location_name: agent.location_name.clone(),
        job: agent.job.clone(),
        money: agent.money,
        happiness: agent.happiness,
        hunger: agent.hunger,
        fear: agent.fear,
        plan: agent.plan.clone(),
        weapon: agent.weapon.clone(),
        x: agent.position.x,
        y: agent.position.y,
        target_x: agent.movement_target.as_ref().map(|t| t.x),
        target_y: agent.movement_target.as_ref().map(|t| t.y),
        target_location_name: agent
            .movement_target
            .as_ref()
            .and_then(|t| t.location_name.clone()),
        speed: agent.speed,
        energy: agent.energy,
        mood: agent.mood,
        relationships: agent.relationships.clone(),
        messages: agent.messages.clone(),
        inventory: agent.inventory.clone(),
        pending_proposals: agent.pending_proposals.clone(),
    }
}

/// Rebuild one agent, re-attaching it to its location by name.
fn record_to_agent(record: &AgentRecord, locations: &LocationSet) -> Agent {
    let mut agent = Agent::new(record.id, record.name.clone(), record.personality.clone());
    agent.goals = record.goals.clone();
    agent.location_name = record.location_name.clone();
    agent.job = record.job.clone();
    agent.money = record.money.max(0);
    agent.happiness = record.happiness.clamp(0.0, 100.0);
    agent.hunger = record.hunger.clamp(0.0, 100.0);
    agent.fear = record.fear.clamp(0.0, 100.0);
    agent.plan = record.plan.clone();
    agent.weapon = record.weapon.clone();
    agent.speed = record.speed;
    agent.energy = record.energy.clamp(0.0, 100.0);
    agent.mood = record.mood;
    agent.relationships = record.relationships.clone();
    agent.messages = record.messages.clone();
    agent.inventory = record.inventory.clone();
    agent.pending_proposals = record.pending_proposals.clone();
    memory::apply_summary(&mut agent.memory, record.memory.clone());

    // Re-attach to the current location; fall back to the raw saved
    // coordinates if the location no longer exists.
    if let Some(location) = locations.get(&record.location_name) {
        agent.position = location.position;
    } else {
        warn!(
            agent_id = %record.id,
            location = %record.location_name,
            "saved location not found; keeping raw coordinates"
        );
        agent.position = Position::new(record.x, record.y);
    }

    if let (Some(x), Some(y)) = (record.target_x, record.target_y) {
        agent.movement_target = Some(MovementTarget {
            x,
            y,
            location_name: record.target_location_name.clone(),
        });
    }

    agent
}
