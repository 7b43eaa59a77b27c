//! Incremental movement toward a pending target.
//!
//! A move action only sets the target; the actual position changes here,
//! one constant-speed step per tick, so travel takes time and hostiles
//! can intercept. Arrival snaps to the destination, adopts its location
//! name, and clears the target.

use holdout_types::{Agent, Position};
use tracing::debug;

/// Advance an agent one step toward its movement target.
///
/// Returns `true` if the agent arrived this step. No-op for agents
/// without a pending target.
pub fn advance(agent: &mut Agent) -> bool {
    let Some(target) = agent.movement_target.clone() else {
        return false;
    };
    let destination = Position::new(target.x, target.y);
    let distance = agent.position.distance_to(destination);

    if distance <= agent.speed {
        agent.position = destination;
        if let Some(name) = target.location_name {
            debug!(agent_id = %agent.id, location = %name, "arrived at destination");
            agent.location_name = name;
        }
        agent.movement_target = None;
        return true;
    }

    let fraction = agent.speed / distance;
    agent.position.x += (destination.x - agent.position.x) * fraction;
    agent.position.y += (destination.y - agent.position.y) * fraction;
    false
}
