//! The decision arbiter: rule engine first, oracle second, never both.
//!
//! Implements the engine's [`DecisionSource`] contract. Per agent per
//! tick the action comes from exactly one of {rule, oracle}: a matching
//! rule is used verbatim and the oracle is not consulted for that agent
//! that tick. Oracle consultations for different agents run
//! concurrently -- the only true concurrency in the system -- and each
//! carries its own deadline, so one slow call cannot stall the tick and
//! one failed call only skips its own agent.

use std::collections::BTreeMap;
use std::time::Duration;

use futures::future::join_all;
use holdout_agents::memory;
use holdout_engine::{DecisionOutcome, DecisionProvenance, DecisionSource, WorldState};
use holdout_types::{ActionKind, ActionResponse, Agent, AgentId};
use tracing::{debug, info, warn};

use crate::config::OracleConfig;
use crate::error::RunnerError;
use crate::oracle::{OracleClient, create_client};
use crate::parse;
use crate::prompt::{PromptEngine, RenderedPrompt};
use crate::rule_engine;

/// Base radius within which hostiles appear in the prompt.
const HOSTILE_VISIBILITY_RADIUS: f64 = 100.0;

/// Extra reach added to an equipped weapon's range when widening the
/// hostile-visibility radius: an armed agent should hear about threats
/// it could engage.
const WEAPON_AWARENESS_MARGIN: f64 = 20.0;

/// Raw memory entries an agent accumulates before summarization kicks in.
const SUMMARIZE_AFTER_ENTRIES: usize = 12;

/// System prompt for memory summarization requests.
const SUMMARY_SYSTEM: &str = "You compress an agent's action history into a short \
paragraph. Keep concrete facts (places, people, items, threats) and drop routine \
repetition. Respond with the summary text only.";

/// The hybrid rule/oracle decision arbiter.
pub struct DecisionArbiter {
    oracle: OracleClient,
    prompts: PromptEngine,
    timeout: Duration,
}

impl DecisionArbiter {
    /// Build an arbiter from runner configuration.
    pub fn new(config: &OracleConfig) -> Result<Self, RunnerError> {
        Ok(Self {
            oracle: create_client(config),
            prompts: PromptEngine::new(&config.templates_dir)?,
            timeout: config.timeout,
        })
    }

    /// Assemble an arbiter from parts (tests inject a scripted oracle).
    pub const fn from_parts(
        oracle: OracleClient,
        prompts: PromptEngine,
        timeout: Duration,
    ) -> Self {
        Self {
            oracle,
            prompts,
            timeout,
        }
    }

    /// The backend in use.
    pub const fn oracle(&self) -> &OracleClient {
        &self.oracle
    }

    /// Decide one agent's action: rules first, oracle on no match.
    async fn decide_agent(
        &self,
        world: &WorldState,
        agent: &Agent,
    ) -> Result<(DecisionProvenance, ActionResponse), RunnerError> {
        let tick = world.clock.tick();

        if let Some(response) = rule_engine::decide(
            agent,
            &world.roster,
            &world.locations,
            tick,
            world.clock.is_night(),
        ) {
            return Ok((DecisionProvenance::Rule, response));
        }

        let view = build_prompt_view(world, agent);
        let prompt = self.prompts.render(&view)?;

        debug!(agent_id = %agent.id, tick, backend = self.oracle.name(), "consulting the oracle");
        let raw = tokio::time::timeout(self.timeout, self.oracle.complete(&prompt))
            .await
            .map_err(|_elapsed| RunnerError::Timeout {
                seconds: self.timeout.as_secs(),
            })??;

        let response = parse::parse_response(&raw, &world.locations)?;
        info!(
            agent_id = %agent.id,
            tick,
            action = %response.kind,
            "oracle decision validated"
        );
        Ok((DecisionProvenance::Oracle, response))
    }

    /// Compress the memory of every agent whose raw log has grown past
    /// the threshold, replacing the log with oracle-produced summary
    /// text. Failures are logged and skipped; summarization is
    /// maintenance, not part of the tick contract.
    pub async fn summarize_memories(&self, world: &mut WorldState) {
        let candidates: Vec<AgentId> = world
            .roster
            .iter()
            .filter(|a| a.memory.entries.len() >= SUMMARIZE_AFTER_ENTRIES)
            .map(|a| a.id)
            .collect();

        for agent_id in candidates {
            let Some(agent) = world.roster.get(agent_id) else {
                continue;
            };
            let prompt = RenderedPrompt {
                system: SUMMARY_SYSTEM.to_owned(),
                user: format!(
                    "Agent {} action history:\n{}",
                    agent.name,
                    memory::context(&agent.memory)
                ),
            };
            let result =
                tokio::time::timeout(self.timeout, self.oracle.complete(&prompt)).await;
            match result {
                Ok(Ok(summary)) => {
                    if let Some(agent) = world.roster.get_mut(agent_id) {
                        memory::apply_summary(&mut agent.memory, summary.trim());
                        info!(agent_id = %agent_id, "memory summarized");
                    }
                }
                Ok(Err(error)) => {
                    warn!(agent_id = %agent_id, %error, "memory summarization failed; keeping raw log");
                }
                Err(_elapsed) => {
                    warn!(agent_id = %agent_id, "memory summarization timed out; keeping raw log");
                }
            }
        }
    }
}

impl DecisionSource for DecisionArbiter {
    async fn collect_decisions(
        &mut self,
        world: &WorldState,
    ) -> BTreeMap<AgentId, DecisionOutcome> {
        let arbiter = &*self;
        let futures = world.roster.iter().map(|agent| async move {
            let outcome = match arbiter.decide_agent(world, agent).await {
                Ok((provenance, response)) => DecisionOutcome::Decided {
                    provenance,
                    response,
                },
                Err(error) => {
                    warn!(agent_id = %agent.id, %error, "decision failed");
                    DecisionOutcome::Failed {
                        reason: error.to_string(),
                        raw: error.raw().map(ToOwned::to_owned),
                    }
                }
            };
            (agent.id, outcome)
        });

        // The barrier: every agent settles before any mutation begins.
        join_all(futures).await.into_iter().collect()
    }
}

/// Assemble the prompt view for one agent: vitals, surroundings, social
/// context, visible threats, and the closed action menu.
fn build_prompt_view(world: &WorldState, agent: &Agent) -> serde_json::Value {
    let threat_radius = agent.weapon.as_ref().map_or(HOSTILE_VISIBILITY_RADIUS, |w| {
        HOSTILE_VISIBILITY_RADIUS.max(w.range + WEAPON_AWARENESS_MARGIN)
    });

    let hostiles: Vec<serde_json::Value> = world
        .hostiles
        .iter()
        .filter(|h| !h.is_defeated())
        .filter_map(|h| {
            let distance = agent.position.distance_to(h.position);
            (distance <= threat_radius).then(|| {
                serde_json::json!({
                    "id": h.id.into_inner(),
                    "distance": format!("{distance:.0}"),
                    "health": format!("{:.0}", h.health),
                })
            })
        })
        .collect();

    let others: Vec<serde_json::Value> = world
        .roster
        .iter()
        .filter(|other| other.id != agent.id)
        .map(|other| {
            let threatened = world.hostiles.iter().any(|h| {
                !h.is_defeated()
                    && other.position.distance_to(h.position) < HOSTILE_VISIBILITY_RADIUS
            });
            serde_json::json!({
                "name": other.name,
                "location": other.location_name,
                "threatened": threatened,
            })
        })
        .collect();

    let locations: Vec<serde_json::Value> = world
        .locations
        .iter()
        .map(|l| {
            let owner_name = l
                .owner
                .and_then(|id| world.roster.get(id))
                .map(|a| a.name.clone());
            serde_json::json!({
                "name": l.name,
                "kind": format!("{:?}", l.kind),
                "owner": owner_name,
                "has_resources": !l.resources.is_empty(),
            })
        })
        .collect();

    let messages: Vec<serde_json::Value> = agent
        .messages
        .iter()
        .map(|m| {
            let from = world
                .roster
                .get(m.sender)
                .map_or_else(|| m.sender.to_string(), |a| a.name.clone());
            serde_json::json!({"from": from, "content": m.content})
        })
        .collect();

    let proposals: Vec<serde_json::Value> = agent
        .pending_proposals
        .iter()
        .map(|p| {
            let from = world
                .roster
                .get(p.sender)
                .map_or_else(|| p.sender.to_string(), |a| a.name.clone());
            serde_json::json!({
                "id": p.id.into_inner(),
                "kind": p.kind.as_str(),
                "from": from,
                "content": p.content,
            })
        })
        .collect();

    let allowed_actions: Vec<&str> = [
        ActionKind::Move,
        ActionKind::Wait,
        ActionKind::Scavenge,
        ActionKind::AttackHostile,
        ActionKind::SendMessage,
        ActionKind::GiveItem,
        ActionKind::Propose,
        ActionKind::RespondToProposal,
    ]
    .iter()
    .map(|k| k.as_str())
    .collect();

    serde_json::json!({
        "tick": world.clock.tick(),
        "is_night": world.clock.is_night(),
        "name": agent.name,
        "personality": agent.personality,
        "energy": format!("{:.0}", agent.energy),
        "happiness": format!("{:.0}", agent.happiness),
        "hunger": format!("{:.0}", agent.hunger),
        "fear": format!("{:.0}", agent.fear),
        "mood": format!("{:?}", agent.mood),
        "money": agent.money,
        "location": agent.location_name,
        "plan": agent.plan,
        "goals": agent.goals,
        "weapon": agent.weapon.as_ref().map(|w| serde_json::json!({
            "name": w.name,
            "damage": w.damage,
            "range": w.range,
        })),
        "inventory": agent.inventory,
        "memory": memory::context(&agent.memory),
        "locations": locations,
        "agents": others,
        "hostiles": hostiles,
        "messages": messages,
        "pending_proposals": proposals,
        "allowed_actions": allowed_actions,
    })
}
