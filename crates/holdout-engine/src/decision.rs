//! The decision-source contract between the tick cycle and whatever
//! produces agent decisions.
//!
//! During step 3 of the tick the engine hands the (immutable) world to a
//! [`DecisionSource`] and awaits one outcome per agent. The source may
//! be the hybrid rule/oracle arbiter in `holdout-runner`, or a scripted
//! stub for tests and offline runs. Awaiting the whole map at once is
//! the tick's synchronization barrier: no agent's mutation becomes
//! visible to another agent's decision within the same tick.

use std::collections::BTreeMap;

use holdout_types::{ActionResponse, AgentId};

use crate::world::WorldState;

/// Where a decision came from, for logs and the at-most-one-source
/// invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionProvenance {
    /// A deterministic rule fired; the oracle was not consulted.
    Rule,
    /// The oracle produced the decision.
    Oracle,
    /// A scripted source (tests, offline runs).
    Scripted,
}

impl DecisionProvenance {
    /// Human-readable label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rule => "rule",
            Self::Oracle => "oracle",
            Self::Scripted => "scripted",
        }
    }
}

/// The per-agent result of the decision phase.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionOutcome {
    /// A validated decision was produced.
    Decided {
        /// Which side of the arbiter produced it.
        provenance: DecisionProvenance,
        /// The validated response.
        response: ActionResponse,
    },
    /// The decision failed (oracle error, timeout, or invalid response).
    /// The agent skips its action this tick; everyone else proceeds.
    Failed {
        /// Human-readable failure description.
        reason: String,
        /// The raw oracle text, retained for diagnostics when available.
        raw: Option<String>,
    },
}

/// A source of agent decisions.
///
/// `collect_decisions` is called once per tick with the world snapshot
/// for that tick; implementations may fan out per-agent work internally
/// (the arbiter runs one oracle call per agent concurrently) but must
/// not resolve until every agent has settled.
pub trait DecisionSource {
    /// Collect one decision outcome per living agent for this tick.
    fn collect_decisions(
        &mut self,
        world: &WorldState,
    ) -> impl Future<Output = BTreeMap<AgentId, DecisionOutcome>> + Send;
}

/// A scripted decision source: pops one pre-built decision map per tick.
///
/// Agents without an entry in the popped map simply skip the tick, which
/// makes idle-world tests trivial to express.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisionSource {
    ticks: Vec<BTreeMap<AgentId, DecisionOutcome>>,
}

impl ScriptedDecisionSource {
    /// A source that never decides anything (every agent idles).
    pub const fn idle() -> Self {
        Self { ticks: Vec::new() }
    }

    /// A source that replays the given per-tick decision maps in order,
    /// then idles.
    pub const fn replay(ticks: Vec<BTreeMap<AgentId, DecisionOutcome>>) -> Self {
        Self { ticks }
    }
}

impl DecisionSource for ScriptedDecisionSource {
    async fn collect_decisions(
        &mut self,
        _world: &WorldState,
    ) -> BTreeMap<AgentId, DecisionOutcome> {
        if self.ticks.is_empty() {
            BTreeMap::new()
        } else {
            self.ticks.remove(0)
        }
    }
}
