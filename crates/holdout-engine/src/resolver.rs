//! The action resolver: one handler per action kind, applied sequentially
//! in roster order.
//!
//! Handlers mutate world state and produce a log entry. Failure paths
//! (unknown recipient, missing item, out-of-range attack) are expected
//! steady-state events, not faults: they degrade to a no-op whose only
//! effect is the diagnostic entry. A failed action never corrupts agent
//! vitals.

use holdout_agents::{VitalsConfig, inventory, memory, proposal, social, vitals};
use holdout_types::{
    ActionParameters, ActionResponse, AgentId, HostileId, MovementTarget, ProposalId,
    ProposalKind, ProposalStatus,
};
use rand::Rng;
use tracing::{info, warn};

use crate::world::WorldState;

/// What applying one action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Whether the action had its intended effect (`false` for no-ops).
    pub applied: bool,
    /// Human-readable description for the tick log.
    pub detail: String,
}

impl ActionOutcome {
    fn applied(detail: impl Into<String>) -> Self {
        Self {
            applied: true,
            detail: detail.into(),
        }
    }

    fn noop(detail: impl Into<String>) -> Self {
        Self {
            applied: false,
            detail: detail.into(),
        }
    }
}

/// Apply one agent's arbitrated action to the world.
///
/// The response's self-reported plan/mood/vitals are applied (clamped)
/// first, then the action handler runs. The applied action is appended
/// to the agent's memory log.
pub fn apply(
    world: &mut WorldState,
    config: &VitalsConfig,
    agent_id: AgentId,
    response: &ActionResponse,
    rng: &mut impl Rng,
) -> ActionOutcome {
    let tick = world.clock.tick();

    let Some(agent) = world.roster.get_mut(agent_id) else {
        return ActionOutcome::noop(format!("agent {agent_id} no longer exists"));
    };
    vitals::apply_reported(agent, response);

    let outcome = match &response.parameters {
        ActionParameters::Move { destination } => handle_move(world, agent_id, destination),
        ActionParameters::Wait => handle_wait(world, config, agent_id),
        ActionParameters::Scavenge => handle_scavenge(world, agent_id, rng),
        ActionParameters::AttackHostile { target } => handle_attack(world, agent_id, *target),
        ActionParameters::SendMessage { recipient, content } => {
            handle_send_message(world, agent_id, recipient, content)
        }
        ActionParameters::GiveItem { recipient, item } => {
            handle_give_item(world, agent_id, recipient, item)
        }
        ActionParameters::Propose {
            recipient,
            kind,
            content,
        } => handle_propose(world, agent_id, recipient, *kind, content),
        ActionParameters::RespondToProposal { proposal, accept } => {
            handle_respond(world, agent_id, *proposal, *accept)
        }
    };

    if let Some(agent) = world.roster.get_mut(agent_id) {
        memory::record_action(agent, outcome.detail.clone(), tick);
    }

    if outcome.applied {
        info!(tick, agent_id = %agent_id, action = %response.kind, detail = %outcome.detail, "action applied");
    } else {
        warn!(tick, agent_id = %agent_id, action = %response.kind, detail = %outcome.detail, "action degraded to no-op");
    }
    outcome
}

/// Set the movement target; the position changes incrementally each tick.
fn handle_move(world: &mut WorldState, agent_id: AgentId, destination: &str) -> ActionOutcome {
    let Some(location) = world.locations.get(destination) else {
        return ActionOutcome::noop(format!("move target {destination} does not exist"));
    };
    let target = MovementTarget {
        x: location.position.x,
        y: location.position.y,
        location_name: Some(location.name.clone()),
    };
    let Some(agent) = world.roster.get_mut(agent_id) else {
        return ActionOutcome::noop("agent vanished mid-resolution");
    };
    agent.movement_target = Some(target);
    ActionOutcome::applied(format!("started moving toward {destination}"))
}

/// Recover a little energy.
fn handle_wait(world: &mut WorldState, config: &VitalsConfig, agent_id: AgentId) -> ActionOutcome {
    let Some(agent) = world.roster.get_mut(agent_id) else {
        return ActionOutcome::noop("agent vanished mid-resolution");
    };
    vitals::adjust_energy(agent, config.wait_recovery);
    ActionOutcome::applied("rested and recovered some energy")
}

/// Draw against the current location's resource table.
fn handle_scavenge(
    world: &mut WorldState,
    agent_id: AgentId,
    rng: &mut impl Rng,
) -> ActionOutcome {
    let Some(agent) = world.roster.get(agent_id) else {
        return ActionOutcome::noop("agent vanished mid-resolution");
    };
    let location_name = agent.location_name.clone();
    let Some(location) = world.locations.get(&location_name) else {
        return ActionOutcome::noop(format!("current location {location_name} is unknown"));
    };
    if location.resources.is_empty() {
        return ActionOutcome::noop(format!("{location_name} has nothing to scavenge"));
    }
    let found = holdout_world::scavenge(location, rng);
    match found {
        Some((item, quantity)) => {
            if let Some(agent) = world.roster.get_mut(agent_id) {
                inventory::grant(agent, &item, quantity);
            }
            ActionOutcome::applied(format!("found {quantity} {item} at {location_name}"))
        }
        None => ActionOutcome::noop(format!("searched {location_name} but found nothing")),
    }
}

/// Deal weapon damage if the target is within range; removal of defeated
/// hostiles is deferred to the end-of-tick filter.
fn handle_attack(world: &mut WorldState, agent_id: AgentId, target: HostileId) -> ActionOutcome {
    let Some(agent) = world.roster.get(agent_id) else {
        return ActionOutcome::noop("agent vanished mid-resolution");
    };
    let Some(weapon) = agent.weapon.clone() else {
        return ActionOutcome::noop("attacked with no weapon equipped; no damage dealt");
    };
    let position = agent.position;
    let Some(hostile) = world.hostile_mut(target) else {
        return ActionOutcome::noop(format!("hostile {target} not found"));
    };
    let distance = position.distance_to(hostile.position);
    if distance > weapon.range {
        // Out-of-range attacks must not silently succeed.
        return ActionOutcome::noop(format!(
            "hostile {target} is out of range ({distance:.1} > {:.1}); no damage dealt",
            weapon.range
        ));
    }
    hostile.health -= weapon.damage;
    let remaining = hostile.health;
    ActionOutcome::applied(format!(
        "hit hostile {target} with {} for {:.0} damage (health now {remaining:.0})",
        weapon.name, weapon.damage
    ))
}

/// Deliver a message and strengthen the sender's bond to the recipient.
fn handle_send_message(
    world: &mut WorldState,
    agent_id: AgentId,
    recipient: &str,
    content: &str,
) -> ActionOutcome {
    let Some(recipient_id) = world.roster.id_by_name(recipient) else {
        return ActionOutcome::noop(format!("message recipient {recipient} is unknown"));
    };
    if recipient_id == agent_id {
        return ActionOutcome::noop("cannot send a message to oneself");
    }
    let message = social::compose_message(agent_id, recipient_id, content);
    if let Some(target) = world.roster.get_mut(recipient_id) {
        social::deliver_message(target, message);
    }
    if let Some(sender) = world.roster.get_mut(agent_id) {
        social::adjust_relationship(sender, recipient_id, social::MESSAGE_RELATIONSHIP_BONUS);
    }
    ActionOutcome::applied(format!("sent a message to {recipient}"))
}

/// Transfer exactly one unit of an item.
fn handle_give_item(
    world: &mut WorldState,
    agent_id: AgentId,
    recipient: &str,
    item: &str,
) -> ActionOutcome {
    let Some(recipient_id) = world.roster.id_by_name(recipient) else {
        return ActionOutcome::noop(format!("item recipient {recipient} is unknown"));
    };
    if recipient_id == agent_id {
        return ActionOutcome::noop("cannot give an item to oneself");
    }
    {
        let Some(sender) = world.roster.get_mut(agent_id) else {
            return ActionOutcome::noop("agent vanished mid-resolution");
        };
        if inventory::consume(sender, item, 1).is_err() {
            return ActionOutcome::noop(format!("does not hold any {item} to give"));
        }
    }
    if let Some(target) = world.roster.get_mut(recipient_id) {
        inventory::grant(target, item, 1);
    }
    ActionOutcome::applied(format!("gave one {item} to {recipient}"))
}

/// Create a proposal and queue it on the recipient.
fn handle_propose(
    world: &mut WorldState,
    agent_id: AgentId,
    recipient: &str,
    kind: ProposalKind,
    content: &str,
) -> ActionOutcome {
    let Some(recipient_id) = world.roster.id_by_name(recipient) else {
        return ActionOutcome::noop(format!("proposal recipient {recipient} is unknown"));
    };
    if recipient_id == agent_id {
        return ActionOutcome::noop("cannot propose to oneself");
    }
    let id = world.issue_proposal_id();
    let new_proposal = proposal::create(id, agent_id, recipient_id, kind, content);
    if let Some(target) = world.roster.get_mut(recipient_id) {
        proposal::enqueue(target, new_proposal);
    }
    ActionOutcome::applied(format!("proposed {kind} to {recipient}"))
}

/// Resolve a pending proposal, notify the sender, and trigger the joint
/// action on acceptance.
fn handle_respond(
    world: &mut WorldState,
    agent_id: AgentId,
    proposal_id: ProposalId,
    accept: bool,
) -> ActionOutcome {
    let resolved = {
        let Some(agent) = world.roster.get_mut(agent_id) else {
            return ActionOutcome::noop("agent vanished mid-resolution");
        };
        match proposal::respond(agent, proposal_id, accept) {
            Ok(p) => p,
            Err(_) => {
                return ActionOutcome::noop(format!(
                    "no pending proposal {proposal_id} to respond to"
                ));
            }
        }
    };

    // Notify the sender with a synthetic message.
    let responder_name = world
        .roster
        .get(agent_id)
        .map(|a| a.name.clone())
        .unwrap_or_default();
    let verdict = if accept { "accepted" } else { "rejected" };
    let note = social::compose_message(
        agent_id,
        resolved.sender,
        format!("{responder_name} {verdict} your {} proposal.", resolved.kind),
    );
    if let Some(sender) = world.roster.get_mut(resolved.sender) {
        social::deliver_message(sender, note);
    }

    if resolved.status != ProposalStatus::Accepted {
        return ActionOutcome::applied(format!("rejected {} proposal {proposal_id}", resolved.kind));
    }

    match resolved.kind {
        ProposalKind::JointExploration | ProposalKind::Meeting => {
            let destination = world
                .locations
                .iter()
                .find(|l| resolved.content.contains(&l.name))
                .map(|l| (l.name.clone(), l.position));
            match destination {
                Some((name, position)) => {
                    relocate_pair(world, agent_id, resolved.sender, position.x, position.y, Some(name.clone()));
                    ActionOutcome::applied(format!(
                        "accepted {}; both heading to {name}",
                        resolved.kind
                    ))
                }
                None => ActionOutcome::applied(format!(
                    "accepted {} but no known location is named in it",
                    resolved.kind
                )),
            }
        }
        ProposalKind::JointCombat => {
            let responder_position = world
                .roster
                .get(agent_id)
                .map(|a| a.position)
                .unwrap_or_default();
            let target = world
                .nearest_live_hostile(responder_position)
                .map(|h| (h.id, h.position));
            match target {
                Some((hostile_id, position)) => {
                    relocate_pair(world, agent_id, resolved.sender, position.x, position.y, None);
                    ActionOutcome::applied(format!(
                        "accepted joint combat; both converging on hostile {hostile_id}"
                    ))
                }
                None => ActionOutcome::applied(
                    "accepted joint combat but no hostile is left to fight",
                ),
            }
        }
    }
}

/// Point two agents' movement targets at the same destination.
fn relocate_pair(
    world: &mut WorldState,
    first: AgentId,
    second: AgentId,
    x: f64,
    y: f64,
    location_name: Option<String>,
) {
    for id in [first, second] {
        if let Some(agent) = world.roster.get_mut(id) {
            agent.movement_target = Some(MovementTarget {
                x,
                y,
                location_name: location_name.clone(),
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::clock::{NightConfig, WorldClock};
    use holdout_agents::AgentSeed;
    use holdout_types::{Hostile, HostileId, Location, LocationKind, Mood, Position};
    use holdout_world::{LocationExt, LocationSet, MapBounds, catalog};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn test_world() -> WorldState {
        let mut locations = LocationSet::new();
        locations
            .insert(Location::new(
                "home",
                LocationKind::Home,
                Position::new(50.0, 50.0),
                40.0,
                40.0,
            ))
            .unwrap();
        locations
            .insert(
                Location::new(
                    "supermarket",
                    LocationKind::Supermarket,
                    Position::new(200.0, 100.0),
                    60.0,
                    40.0,
                )
                .with_resource("bread", 1.0, 2),
            )
            .unwrap();
        locations
            .insert(
                Location::new(
                    "base",
                    LocationKind::Base,
                    Position::new(250.0, 200.0),
                    80.0,
                    80.0,
                )
                .with_health(500.0),
            )
            .unwrap();

        let mut world = WorldState::new(
            WorldClock::new(NightConfig::default()).unwrap(),
            locations,
            MapBounds::new(500.0, 400.0),
        );

        let mut alice = AgentSeed::new("Alice", "curious");
        alice.location_name = "home".to_owned();
        alice.weapon = catalog::weapon_by_name("pistol");
        let alice_id = world.roster.spawn(alice).unwrap();
        if let Some(a) = world.roster.get_mut(alice_id) {
            a.position = Position::new(50.0, 50.0);
        }

        let mut bob = AgentSeed::new("Bob", "wary");
        bob.location_name = "supermarket".to_owned();
        let bob_id = world.roster.spawn(bob).unwrap();
        if let Some(b) = world.roster.get_mut(bob_id) {
            b.position = Position::new(200.0, 100.0);
        }

        world
    }

    fn response(parameters: ActionParameters) -> ActionResponse {
        ActionResponse::new(parameters, "test plan", Mood::Neutral, 80.0)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn move_sets_target_without_teleporting() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::Move {
                destination: "supermarket".to_owned(),
            }),
            &mut rng(),
        );
        assert!(outcome.applied);
        let agent = world.roster.get(alice).unwrap();
        assert_eq!(agent.position, Position::new(50.0, 50.0));
        assert_eq!(
            agent.movement_target.as_ref().and_then(|t| t.location_name.as_deref()),
            Some("supermarket")
        );
        // Location name updates on arrival, not on intent.
        assert_eq!(agent.location_name, "home");
    }

    #[test]
    fn move_to_unknown_location_is_a_noop() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::Move {
                destination: "mall".to_owned(),
            }),
            &mut rng(),
        );
        assert!(!outcome.applied);
        assert!(world.roster.get(alice).unwrap().movement_target.is_none());
    }

    #[test]
    fn wait_recovers_energy() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let mut r = response(ActionParameters::Wait);
        r.energy = 40.0;
        let _ = apply(&mut world, &VitalsConfig::default(), alice, &r, &mut rng());
        // Reported energy 40 applied first, then +5 wait recovery.
        assert_eq!(world.roster.get(alice).unwrap().energy, 45.0);
    }

    #[test]
    fn scavenge_grants_at_most_one_item_kind() {
        let mut world = test_world();
        let bob = AgentId::new(2);
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            bob,
            &response(ActionParameters::Scavenge),
            &mut rng(),
        );
        assert!(outcome.applied);
        let agent = world.roster.get(bob).unwrap();
        let bread = agent.inventory.get("bread").copied().unwrap_or(0);
        assert!((1..=2).contains(&bread));
        assert_eq!(agent.inventory.len(), 1);
    }

    #[test]
    fn scavenge_without_resources_finds_nothing() {
        let mut world = test_world();
        let alice = AgentId::new(1); // at "home", which stocks nothing
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::Scavenge),
            &mut rng(),
        );
        assert!(!outcome.applied);
        assert!(world.roster.get(alice).unwrap().inventory.is_empty());
    }

    #[test]
    fn give_item_transfers_exactly_one_unit() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let bob = AgentId::new(2);
        if let Some(a) = world.roster.get_mut(alice) {
            inventory::grant(a, "water", 2);
        }
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::GiveItem {
                recipient: "Bob".to_owned(),
                item: "water".to_owned(),
            }),
            &mut rng(),
        );
        assert!(outcome.applied);
        assert_eq!(world.roster.get(alice).unwrap().inventory.get("water"), Some(&1));
        assert_eq!(world.roster.get(bob).unwrap().inventory.get("water"), Some(&1));
    }

    #[test]
    fn give_absent_item_is_a_logged_noop() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let bob = AgentId::new(2);
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::GiveItem {
                recipient: "Bob".to_owned(),
                item: "bread".to_owned(),
            }),
            &mut rng(),
        );
        assert!(!outcome.applied);
        assert!(world.roster.get(bob).unwrap().inventory.is_empty());
    }

    #[test]
    fn attack_in_range_damages_without_removing() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        world.hostiles.push(Hostile {
            id: HostileId::new(1),
            position: Position::new(60.0, 50.0), // 10 units from Alice, pistol range 50
            health: 15.0,
            target: Some(alice),
            speed: 5.0,
        });
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::AttackHostile {
                target: HostileId::new(1),
            }),
            &mut rng(),
        );
        assert!(outcome.applied);
        let hostile = world.hostile(HostileId::new(1)).unwrap();
        // 15 - 20 pistol damage: lethal, but still present until the
        // end-of-tick filter.
        assert_eq!(hostile.health, -5.0);
    }

    #[test]
    fn attack_out_of_range_deals_zero_damage() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        world.hostiles.push(Hostile {
            id: HostileId::new(1),
            position: Position::new(450.0, 380.0),
            health: 100.0,
            target: Some(alice),
            speed: 5.0,
        });
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::AttackHostile {
                target: HostileId::new(1),
            }),
            &mut rng(),
        );
        assert!(!outcome.applied);
        assert_eq!(world.hostile(HostileId::new(1)).unwrap().health, 100.0);
    }

    #[test]
    fn attack_without_weapon_leaves_hostile_unharmed() {
        let mut world = test_world();
        let bob = AgentId::new(2); // unarmed
        world.hostiles.push(Hostile {
            id: HostileId::new(1),
            position: Position::new(200.0, 101.0),
            health: 100.0,
            target: Some(bob),
            speed: 5.0,
        });
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            bob,
            &response(ActionParameters::AttackHostile {
                target: HostileId::new(1),
            }),
            &mut rng(),
        );
        assert!(!outcome.applied);
        assert_eq!(world.hostile(HostileId::new(1)).unwrap().health, 100.0);
    }

    #[test]
    fn send_message_delivers_and_strengthens_sender_bond() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let bob = AgentId::new(2);
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::SendMessage {
                recipient: "Bob".to_owned(),
                content: "stay safe out there".to_owned(),
            }),
            &mut rng(),
        );
        assert!(outcome.applied);
        let bob_agent = world.roster.get(bob).unwrap();
        assert_eq!(bob_agent.messages.len(), 1);
        assert_eq!(
            bob_agent.messages.front().map(|m| m.content.as_str()),
            Some("stay safe out there")
        );
        let alice_agent = world.roster.get(alice).unwrap();
        assert_eq!(social::relationship(alice_agent, bob), 5.0);
    }

    #[test]
    fn propose_queues_on_recipient_with_no_relationship_check() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let bob = AgentId::new(2);
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::Propose {
                recipient: "Bob".to_owned(),
                kind: ProposalKind::JointExploration,
                content: "let's search the supermarket together".to_owned(),
            }),
            &mut rng(),
        );
        assert!(outcome.applied);
        let pending = &world.roster.get(bob).unwrap().pending_proposals;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending.first().map(|p| p.sender), Some(alice));
        assert_eq!(pending.first().map(|p| p.status), Some(ProposalStatus::Pending));
    }

    #[test]
    fn accepted_exploration_relocates_both_participants() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let bob = AgentId::new(2);
        let _ = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::Propose {
                recipient: "Bob".to_owned(),
                kind: ProposalKind::JointExploration,
                content: "meet me at the supermarket".to_owned(),
            }),
            &mut rng(),
        );
        let proposal_id = world
            .roster
            .get(bob)
            .unwrap()
            .pending_proposals
            .first()
            .map(|p| p.id)
            .unwrap();

        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            bob,
            &response(ActionParameters::RespondToProposal {
                proposal: proposal_id,
                accept: true,
            }),
            &mut rng(),
        );
        assert!(outcome.applied);

        for id in [alice, bob] {
            let target = world.roster.get(id).unwrap().movement_target.clone();
            assert_eq!(
                target.and_then(|t| t.location_name),
                Some("supermarket".to_owned()),
                "agent {id} should be heading to the supermarket"
            );
        }
        // Proposal is gone from Bob's pending list and Alice was notified.
        assert!(world.roster.get(bob).unwrap().pending_proposals.is_empty());
        assert_eq!(world.roster.get(alice).unwrap().messages.len(), 1);
    }

    #[test]
    fn accepted_joint_combat_converges_on_nearest_hostile() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let bob = AgentId::new(2);
        world.hostiles.push(Hostile {
            id: HostileId::new(3),
            position: Position::new(300.0, 300.0),
            health: 100.0,
            target: None,
            speed: 5.0,
        });
        let _ = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::Propose {
                recipient: "Bob".to_owned(),
                kind: ProposalKind::JointCombat,
                content: "help me fight".to_owned(),
            }),
            &mut rng(),
        );
        let proposal_id = world
            .roster
            .get(bob)
            .unwrap()
            .pending_proposals
            .first()
            .map(|p| p.id)
            .unwrap();
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            bob,
            &response(ActionParameters::RespondToProposal {
                proposal: proposal_id,
                accept: true,
            }),
            &mut rng(),
        );
        assert!(outcome.applied);
        let target = world.roster.get(bob).unwrap().movement_target.clone().unwrap();
        assert_eq!(target.x, 300.0);
        assert!(target.location_name.is_none());
    }

    #[test]
    fn rejected_proposal_notifies_sender_without_relocation() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let bob = AgentId::new(2);
        let _ = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::Propose {
                recipient: "Bob".to_owned(),
                kind: ProposalKind::Meeting,
                content: "meet at home".to_owned(),
            }),
            &mut rng(),
        );
        let proposal_id = world
            .roster
            .get(bob)
            .unwrap()
            .pending_proposals
            .first()
            .map(|p| p.id)
            .unwrap();
        let _ = apply(
            &mut world,
            &VitalsConfig::default(),
            bob,
            &response(ActionParameters::RespondToProposal {
                proposal: proposal_id,
                accept: false,
            }),
            &mut rng(),
        );
        assert!(world.roster.get(bob).unwrap().movement_target.is_none());
        assert!(world.roster.get(alice).unwrap().movement_target.is_none());
        let note = world.roster.get(alice).unwrap().messages.front().cloned().unwrap();
        assert!(note.content.contains("rejected"));
    }

    #[test]
    fn responding_to_unknown_proposal_is_a_noop() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let outcome = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::RespondToProposal {
                proposal: holdout_types::ProposalId::new(999),
                accept: true,
            }),
            &mut rng(),
        );
        assert!(!outcome.applied);
    }

    #[test]
    fn every_action_is_recorded_in_memory() {
        let mut world = test_world();
        let alice = AgentId::new(1);
        let _ = apply(
            &mut world,
            &VitalsConfig::default(),
            alice,
            &response(ActionParameters::Wait),
            &mut rng(),
        );
        let entries = &world.roster.get(alice).unwrap().memory.entries;
        assert_eq!(entries.len(), 1);
    }
}
