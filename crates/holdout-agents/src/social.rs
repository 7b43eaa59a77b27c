//! Relationships and the bounded message inbox.

use chrono::Utc;
use holdout_types::{Agent, AgentId, Message};

/// Maximum messages retained in an agent's inbox; the oldest is dropped
/// beyond this.
pub const MESSAGE_BUFFER_CAPACITY: usize = 5;

/// Relationship strength gained by the sender toward the recipient when
/// a message is delivered.
pub const MESSAGE_RELATIONSHIP_BONUS: f64 = 5.0;

/// Lower bound of relationship strength.
const RELATIONSHIP_MIN: f64 = -100.0;
/// Upper bound of relationship strength.
const RELATIONSHIP_MAX: f64 = 100.0;

/// Relationship strength from `agent` toward another agent (0 when none
/// has been recorded).
pub fn relationship(agent: &Agent, other: AgentId) -> f64 {
    agent.relationships.get(&other).copied().unwrap_or(0.0)
}

/// Add a (possibly negative) delta to a relationship, clamped to
/// [-100, 100].
pub fn adjust_relationship(agent: &mut Agent, other: AgentId, delta: f64) {
    let updated = (relationship(agent, other) + delta).clamp(RELATIONSHIP_MIN, RELATIONSHIP_MAX);
    agent.relationships.insert(other, updated);
}

/// Build a message from one agent to another, stamped now.
pub fn compose_message(sender: AgentId, recipient: AgentId, content: impl Into<String>) -> Message {
    Message {
        sender,
        recipient,
        content: content.into(),
        timestamp: Utc::now(),
    }
}

/// Push a message into the recipient's inbox, dropping the oldest entry
/// beyond the buffer capacity.
pub fn deliver_message(recipient: &mut Agent, message: Message) {
    recipient.messages.push_back(message);
    while recipient.messages.len() > MESSAGE_BUFFER_CAPACITY {
        recipient.messages.pop_front();
    }
}
