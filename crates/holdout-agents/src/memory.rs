//! Agent memory: the append-only action log and its summarized history.
//!
//! The raw log grows one entry per applied action. Summarization is
//! delegated to the oracle: the runner renders the log, asks the oracle
//! to compress it, and calls [`apply_summary`] with the result, which
//! replaces the raw entries while keeping "most recent known state"
//! ordering intact (the summary always describes strictly older events
//! than any live entry).

use chrono::Utc;
use holdout_types::{Agent, MemoryEntry, MemoryLog};

/// Append an action to the agent's memory log, capturing the vitals and
/// location at the time as context.
pub fn record_action(agent: &mut Agent, action: impl Into<String>, tick: u64) {
    let context = format!(
        "at {}, energy {:.0}, mood {:?}, happiness {:.0}, hunger {:.0}",
        agent.location_name, agent.energy, agent.mood, agent.happiness, agent.hunger,
    );
    agent.memory.entries.push(MemoryEntry {
        action: action.into(),
        tick,
        timestamp: Utc::now(),
        context,
    });
}

/// Replace the raw log with an oracle-produced summary.
///
/// The previous summary is folded into the new one by the oracle (it sees
/// both when summarizing), so only the latest text is kept.
pub fn apply_summary(memory: &mut MemoryLog, summary: impl Into<String>) {
    memory.summary = summary.into();
    memory.entries.clear();
}

/// Render the memory as prompt context: the summary first, then the raw
/// entries in order.
pub fn context(memory: &MemoryLog) -> String {
    let mut sections = Vec::new();
    if !memory.summary.is_empty() {
        sections.push(format!("[summarized history]\n{}", memory.summary));
    }
    if !memory.entries.is_empty() {
        let recent = memory
            .entries
            .iter()
            .map(|e| format!("[tick {}] {} ({})", e.tick, e.action, e.context))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("[recent actions]\n{recent}"));
    }
    if sections.is_empty() {
        "No actions recorded yet.".to_owned()
    } else {
        sections.join("\n\n")
    }
}
