//! Inventory and wallet operations.
//!
//! Invariant: the inventory map never holds a zero or negative quantity
//! -- entries are removed the moment their count reaches zero. Money
//! never drops below zero; changes that would are rejected.

use holdout_types::Agent;

use crate::error::AgentError;

/// Quantity of an item the agent holds (zero when absent).
pub fn quantity(agent: &Agent, item: &str) -> u32 {
    agent.inventory.get(item).copied().unwrap_or(0)
}

/// Whether the agent holds at least `wanted` units of an item.
pub fn has(agent: &Agent, item: &str, wanted: u32) -> bool {
    quantity(agent, item) >= wanted
}

/// Add items to the inventory.
pub fn grant(agent: &mut Agent, item: &str, amount: u32) {
    if amount == 0 {
        return;
    }
    let entry = agent.inventory.entry(item.to_owned()).or_insert(0);
    *entry = entry.saturating_add(amount);
}

/// Remove items from the inventory.
///
/// Fails without mutating anything when the agent holds fewer than
/// `amount`; on success a depleted entry is removed from the map.
pub fn consume(agent: &mut Agent, item: &str, amount: u32) -> Result<(), AgentError> {
    let available = quantity(agent, item);
    if available < amount {
        return Err(AgentError::MissingItem {
            item: item.to_owned(),
            requested: amount,
            available,
        });
    }
    let remaining = available.saturating_sub(amount);
    if remaining == 0 {
        agent.inventory.remove(item);
    } else if let Some(entry) = agent.inventory.get_mut(item) {
        *entry = remaining;
    }
    Ok(())
}

/// Apply a signed change to the agent's money.
///
/// Rejects (without mutating) any change that would take the balance
/// below zero.
pub fn change_money(agent: &mut Agent, change: i64) -> Result<(), AgentError> {
    let updated = agent.money.checked_add(change).ok_or(
        AgentError::InsufficientFunds {
            balance: agent.money,
            change,
        },
    )?;
    if updated < 0 {
        return Err(AgentError::InsufficientFunds {
            balance: agent.money,
            change,
        });
    }
    agent.money = updated;
    Ok(())
}
