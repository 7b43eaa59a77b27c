//! Oracle response extraction and schema validation.
//!
//! The oracle returns raw text that should contain a JSON object.
//! Extraction tries a fenced code block first, then falls back to the
//! first balanced curly-brace span. Validation is strict: the action
//! tag must come from the closed vocabulary and every field that tag
//! requires must be present -- reject rather than coerce, keeping the
//! raw payload in the error for diagnostics. The only coercion allowed
//! is numeric-looking strings for numeric fields, a common oracle tic.

use holdout_types::{ActionParameters, ActionKind, ActionResponse, HostileId, Mood, ProposalId, ProposalKind};
use holdout_world::LocationSet;
use tracing::warn;

use crate::error::RunnerError;

/// The flat JSON shape the oracle is asked to produce.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RawOracleResponse {
    action: Option<String>,
    plan: Option<String>,
    mood: Option<serde_json::Value>,
    energy: Option<serde_json::Value>,
    happiness: Option<serde_json::Value>,
    hunger: Option<serde_json::Value>,
    target_location: Option<String>,
    target_id: Option<serde_json::Value>,
    recipient: Option<String>,
    message: Option<String>,
    item: Option<String>,
    proposal_type: Option<String>,
    proposal_content: Option<String>,
    proposal_id: Option<serde_json::Value>,
    response: Option<String>,
}

/// Parse and validate a raw oracle response into a typed
/// [`ActionResponse`].
///
/// `locations` is consulted to validate move targets: a move to a
/// location name that does not exist is a decision error, not a
/// runtime no-op.
pub fn parse_response(
    raw: &str,
    locations: &LocationSet,
) -> Result<ActionResponse, RunnerError> {
    let payload = extract_payload(raw)?;
    let parsed: RawOracleResponse = serde_json::from_str(&payload)
        .map_err(|e| decision(format!("payload is not a JSON object: {e}"), raw))?;

    let action_tag = parsed
        .action
        .as_deref()
        .ok_or_else(|| decision("missing required field 'action'", raw))?;
    let kind = parse_action_kind(action_tag)
        .ok_or_else(|| decision(format!("unknown action: {action_tag}"), raw))?;

    let plan = parsed
        .plan
        .clone()
        .ok_or_else(|| decision("missing required field 'plan'", raw))?;

    let mood_value = parsed
        .mood
        .as_ref()
        .ok_or_else(|| decision("missing required field 'mood'", raw))?;
    let mood_str = mood_value
        .as_str()
        .ok_or_else(|| decision("'mood' must be a string", raw))?;
    let mood = Mood::parse(mood_str).unwrap_or_else(|| {
        warn!(mood = mood_str, "unknown mood from oracle; defaulting to neutral");
        Mood::Neutral
    });

    let energy = parsed
        .energy
        .as_ref()
        .and_then(coerce_f64)
        .ok_or_else(|| decision("'energy' must be numeric", raw))?;

    let parameters = build_parameters(kind, &parsed, locations, raw)?;

    let mut response = ActionResponse::new(parameters, plan, mood, energy);
    response.happiness = parsed.happiness.as_ref().and_then(coerce_f64);
    response.hunger = parsed.hunger.as_ref().and_then(coerce_f64);
    Ok(response)
}

/// Build typed parameters, enforcing the per-action required fields.
fn build_parameters(
    kind: ActionKind,
    parsed: &RawOracleResponse,
    locations: &LocationSet,
    raw: &str,
) -> Result<ActionParameters, RunnerError> {
    match kind {
        ActionKind::Wait => Ok(ActionParameters::Wait),
        ActionKind::Scavenge => Ok(ActionParameters::Scavenge),
        ActionKind::Move => {
            let destination = parsed
                .target_location
                .clone()
                .ok_or_else(|| decision("move requires 'target_location'", raw))?;
            if !locations.contains(&destination) {
                return Err(decision(
                    format!("move target '{destination}' is not a known location"),
                    raw,
                ));
            }
            Ok(ActionParameters::Move { destination })
        }
        ActionKind::AttackHostile => {
            let target = parsed
                .target_id
                .as_ref()
                .and_then(coerce_u32)
                .ok_or_else(|| decision("attack-hostile requires a numeric 'target_id'", raw))?;
            Ok(ActionParameters::AttackHostile {
                target: HostileId::new(target),
            })
        }
        ActionKind::SendMessage => {
            let recipient = parsed
                .recipient
                .clone()
                .ok_or_else(|| decision("send-message requires 'recipient'", raw))?;
            let content = parsed
                .message
                .clone()
                .ok_or_else(|| decision("send-message requires 'message'", raw))?;
            Ok(ActionParameters::SendMessage { recipient, content })
        }
        ActionKind::GiveItem => {
            let recipient = parsed
                .recipient
                .clone()
                .ok_or_else(|| decision("give-item requires 'recipient'", raw))?;
            let item = parsed
                .item
                .clone()
                .ok_or_else(|| decision("give-item requires 'item'", raw))?;
            Ok(ActionParameters::GiveItem { recipient, item })
        }
        ActionKind::Propose => {
            let kind_tag = parsed
                .proposal_type
                .as_deref()
                .ok_or_else(|| decision("propose requires 'proposal_type'", raw))?;
            let proposal_kind = parse_proposal_kind(kind_tag)
                .ok_or_else(|| decision(format!("unknown proposal type: {kind_tag}"), raw))?;
            let recipient = parsed
                .recipient
                .clone()
                .ok_or_else(|| decision("propose requires 'recipient'", raw))?;
            let content = parsed
                .proposal_content
                .clone()
                .ok_or_else(|| decision("propose requires 'proposal_content'", raw))?;
            Ok(ActionParameters::Propose {
                recipient,
                kind: proposal_kind,
                content,
            })
        }
        ActionKind::RespondToProposal => {
            let proposal = parsed
                .proposal_id
                .as_ref()
                .and_then(coerce_u64)
                .ok_or_else(|| {
                    decision("respond-to-proposal requires a numeric 'proposal_id'", raw)
                })?;
            let verdict = parsed
                .response
                .as_deref()
                .ok_or_else(|| decision("respond-to-proposal requires 'response'", raw))?;
            let accept = match verdict.trim().to_lowercase().as_str() {
                "accept" | "accepted" | "yes" => true,
                "reject" | "rejected" | "no" => false,
                other => {
                    return Err(decision(
                        format!("'response' must be accept or reject, got {other}"),
                        raw,
                    ));
                }
            };
            Ok(ActionParameters::RespondToProposal {
                proposal: ProposalId::new(proposal),
                accept,
            })
        }
    }
}

/// Parse an action tag case-insensitively, accepting snake_case and
/// spaced aliases for the kebab-case vocabulary.
fn parse_action_kind(tag: &str) -> Option<ActionKind> {
    let normalized = tag.trim().to_lowercase().replace(['_', ' '], "-");
    match normalized.as_str() {
        "move" => Some(ActionKind::Move),
        "wait" => Some(ActionKind::Wait),
        "scavenge" => Some(ActionKind::Scavenge),
        "attack-hostile" => Some(ActionKind::AttackHostile),
        "send-message" => Some(ActionKind::SendMessage),
        "give-item" => Some(ActionKind::GiveItem),
        "propose" => Some(ActionKind::Propose),
        "respond-to-proposal" => Some(ActionKind::RespondToProposal),
        _ => None,
    }
}

/// Parse a proposal kind with the same normalization as action tags.
fn parse_proposal_kind(tag: &str) -> Option<ProposalKind> {
    let normalized = tag.trim().to_lowercase().replace(['_', ' '], "-");
    match normalized.as_str() {
        "joint-exploration" => Some(ProposalKind::JointExploration),
        "joint-combat" => Some(ProposalKind::JointCombat),
        "meeting" => Some(ProposalKind::Meeting),
        _ => None,
    }
}

/// Coerce a JSON value to f64, accepting numbers and numeric strings.
fn coerce_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coerce a JSON value to u32, accepting numbers and numeric strings.
fn coerce_u32(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coerce a JSON value to u64, accepting numbers and numeric strings.
fn coerce_u64(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Extract the structured payload from raw oracle text.
///
/// First attempt: a fenced code block. Fallback: the first balanced
/// curly-brace span.
fn extract_payload(text: &str) -> Result<String, RunnerError> {
    if let Some(block) = extract_fenced_block(text)
        && block.trim_start().starts_with('{')
    {
        return Ok(block.trim().to_owned());
    }
    if let Some(span) = extract_braced_span(text) {
        return Ok(span.to_owned());
    }
    Err(decision("no JSON object found in oracle response", text))
}

/// Extract the body of the first fenced code block (```json or bare).
fn extract_fenced_block(text: &str) -> Option<&str> {
    let fence_at = text.find("```")?;
    let after_fence = text.get(fence_at.checked_add(3)?..)?;
    // Skip the info string (e.g. "json") up to the newline.
    let body_at = after_fence.find('\n')?;
    let body = after_fence.get(body_at.checked_add(1)?..)?;
    let end = body.find("```")?;
    body.get(..end)
}

/// Extract the first balanced `{ ... }` span, tracking strings so
/// braces inside values do not miscount.
fn extract_braced_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth: u32 = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text.get(start..)?.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth = depth.saturating_add(1),
            '}' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = start
                        .checked_add(offset)?
                        .checked_add(c.len_utf8())?;
                    return text.get(start..end);
                }
            }
            _ => {}
        }
    }
    None
}

/// Build a decision error retaining the raw payload.
fn decision(reason: impl Into<String>, raw: &str) -> RunnerError {
    RunnerError::Decision {
        reason: reason.into(),
        raw: raw.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use holdout_types::{Location, LocationKind, Position};
    use holdout_world::LocationExt;

    fn known_locations() -> LocationSet {
        let mut locations = LocationSet::new();
        locations
            .insert(Location::new(
                "supermarket",
                LocationKind::Supermarket,
                Position::new(200.0, 100.0),
                60.0,
                40.0,
            ))
            .ok();
        locations
    }

    #[test]
    fn parse_valid_move() {
        let raw = r#"{"action": "move", "plan": "restock food", "mood": "neutral", "energy": 75, "target_location": "supermarket"}"#;
        let response = parse_response(raw, &known_locations()).unwrap();
        assert_eq!(response.kind, ActionKind::Move);
        assert!(matches!(
            response.parameters,
            ActionParameters::Move { ref destination } if destination == "supermarket"
        ));
        assert_eq!(response.energy, 75.0);
    }

    #[test]
    fn parse_move_to_unknown_location_is_rejected() {
        let raw = r#"{"action": "move", "plan": "explore", "mood": "excited", "energy": 80, "target_location": "mall"}"#;
        let result = parse_response(raw, &known_locations());
        assert!(matches!(result, Err(RunnerError::Decision { .. })));
        if let Err(e) = result {
            assert_eq!(e.raw(), Some(raw));
        }
    }

    #[test]
    fn parse_from_fenced_block() {
        let raw = "Here is my decision:\n```json\n{\"action\": \"wait\", \"plan\": \"rest\", \"mood\": \"tired\", \"energy\": 30}\n```\nI am resting.";
        let response = parse_response(raw, &known_locations()).unwrap();
        assert_eq!(response.kind, ActionKind::Wait);
        assert_eq!(response.mood, Mood::Tired);
    }

    #[test]
    fn parse_from_prose_with_braced_span() {
        let raw = "I think the best choice is {\"action\": \"scavenge\", \"plan\": \"find supplies\", \"mood\": \"content\", \"energy\": 60} given the situation.";
        let response = parse_response(raw, &known_locations()).unwrap();
        assert_eq!(response.kind, ActionKind::Scavenge);
    }

    #[test]
    fn braces_inside_strings_do_not_break_extraction() {
        let raw = r#"{"action": "send-message", "plan": "say hi", "mood": "social", "energy": 70, "recipient": "Bob", "message": "use {caution} out there"}"#;
        let response = parse_response(raw, &known_locations()).unwrap();
        assert!(matches!(
            response.parameters,
            ActionParameters::SendMessage { ref content, .. } if content.contains("{caution}")
        ));
    }

    #[test]
    fn numeric_looking_strings_are_coerced() {
        let raw = r#"{"action": "wait", "plan": "rest", "mood": "tired", "energy": "42", "hunger": "55"}"#;
        let response = parse_response(raw, &known_locations()).unwrap();
        assert_eq!(response.energy, 42.0);
        assert_eq!(response.hunger, Some(55.0));
    }

    #[test]
    fn unknown_action_is_rejected_with_raw_retained() {
        let raw = r#"{"action": "teleport", "plan": "cheat", "mood": "excited", "energy": 90}"#;
        let result = parse_response(raw, &known_locations());
        assert!(matches!(result, Err(RunnerError::Decision { .. })));
        if let Err(e) = result {
            assert!(e.raw().unwrap_or("").contains("teleport"));
        }
    }

    #[test]
    fn missing_plan_is_rejected() {
        let raw = r#"{"action": "wait", "mood": "neutral", "energy": 50}"#;
        assert!(parse_response(raw, &known_locations()).is_err());
    }

    #[test]
    fn empty_plan_is_allowed() {
        let raw = r#"{"action": "wait", "plan": "", "mood": "neutral", "energy": 50}"#;
        let response = parse_response(raw, &known_locations()).unwrap();
        assert_eq!(response.plan, "");
    }

    #[test]
    fn non_string_mood_is_rejected() {
        let raw = r#"{"action": "wait", "plan": "rest", "mood": 3, "energy": 50}"#;
        assert!(parse_response(raw, &known_locations()).is_err());
    }

    #[test]
    fn unknown_mood_degrades_to_neutral() {
        let raw = r#"{"action": "wait", "plan": "rest", "mood": "vengeful", "energy": 50}"#;
        let response = parse_response(raw, &known_locations()).unwrap();
        assert_eq!(response.mood, Mood::Neutral);
    }

    #[test]
    fn non_numeric_energy_is_rejected() {
        let raw = r#"{"action": "wait", "plan": "rest", "mood": "tired", "energy": "plenty"}"#;
        assert!(parse_response(raw, &known_locations()).is_err());
    }

    #[test]
    fn attack_requires_numeric_target() {
        let raw = r#"{"action": "attack-hostile", "plan": "fight", "mood": "excited", "energy": 70}"#;
        assert!(parse_response(raw, &known_locations()).is_err());

        let raw = r#"{"action": "attack_hostile", "plan": "fight", "mood": "excited", "energy": 70, "target_id": "4"}"#;
        let response = parse_response(raw, &known_locations()).unwrap();
        assert!(matches!(
            response.parameters,
            ActionParameters::AttackHostile { target } if target == HostileId::new(4)
        ));
    }

    #[test]
    fn propose_requires_type_recipient_and_content() {
        let raw = r#"{"action": "propose", "plan": "team up", "mood": "social", "energy": 70, "proposal_type": "joint exploration", "recipient": "Bob", "proposal_content": "let's search the supermarket"}"#;
        let response = parse_response(raw, &known_locations()).unwrap();
        assert!(matches!(
            response.parameters,
            ActionParameters::Propose { kind: ProposalKind::JointExploration, .. }
        ));

        let missing = r#"{"action": "propose", "plan": "team up", "mood": "social", "energy": 70, "recipient": "Bob"}"#;
        assert!(parse_response(missing, &known_locations()).is_err());
    }

    #[test]
    fn respond_accepts_verdict_aliases() {
        let raw = r#"{"action": "respond-to-proposal", "plan": "join them", "mood": "happy", "energy": 70, "proposal_id": 2, "response": "Accepted"}"#;
        let response = parse_response(raw, &known_locations()).unwrap();
        assert!(matches!(
            response.parameters,
            ActionParameters::RespondToProposal { accept: true, .. }
        ));

        let raw = r#"{"action": "respond-to-proposal", "plan": "decline", "mood": "neutral", "energy": 70, "proposal_id": 2, "response": "maybe"}"#;
        assert!(parse_response(raw, &known_locations()).is_err());
    }

    #[test]
    fn garbage_text_is_rejected() {
        let result = parse_response("I will gather some wood now.", &known_locations());
        assert!(matches!(result, Err(RunnerError::Decision { .. })));
    }
}
