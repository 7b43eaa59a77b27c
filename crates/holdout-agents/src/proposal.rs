//! Proposal lifecycle: creation, queueing, and terminal resolution.
//!
//! The state machine is `pending -> accepted` or `pending -> rejected`,
//! terminal in both cases. No re-proposal or expiry is modeled: a
//! proposal waits in the recipient's pending list until answered, and
//! concurrent proposals to the same recipient are all retained.

use chrono::Utc;
use holdout_types::{Agent, AgentId, Proposal, ProposalId, ProposalKind, ProposalStatus};

use crate::error::AgentError;

/// Build a pending proposal stamped now.
pub fn create(
    id: ProposalId,
    sender: AgentId,
    recipient: AgentId,
    kind: ProposalKind,
    content: impl Into<String>,
) -> Proposal {
    Proposal {
        id,
        sender,
        recipient,
        kind,
        content: content.into(),
        status: ProposalStatus::Pending,
        created_at: Utc::now(),
    }
}

/// Queue a proposal in the recipient's pending list.
pub fn enqueue(recipient: &mut Agent, proposal: Proposal) {
    recipient.pending_proposals.push(proposal);
}

/// Resolve a pending proposal by id.
///
/// Removes it from the agent's pending list, marks it with its terminal
/// status, and returns it so the caller can notify the sender and
/// trigger any joint action. Once removed the proposal can never
/// reappear -- there is no path back into any pending list.
pub fn respond(agent: &mut Agent, id: ProposalId, accept: bool) -> Result<Proposal, AgentError> {
    let index = agent
        .pending_proposals
        .iter()
        .position(|p| p.id == id)
        .ok_or(AgentError::UnknownProposal(id))?;
    let mut proposal = agent.pending_proposals.remove(index);
    proposal.status = if accept {
        ProposalStatus::Accepted
    } else {
        ProposalStatus::Rejected
    };
    Ok(proposal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: u32) -> Agent {
        Agent::new(AgentId::new(id), format!("agent-{id}"), "test")
    }

    fn pending(id: u64, recipient: &mut Agent) -> ProposalId {
        let proposal_id = ProposalId::new(id);
        let proposal = create(
            proposal_id,
            AgentId::new(99),
            recipient.id,
            ProposalKind::Meeting,
            "meet at the \"park\"",
        );
        assert_eq!(proposal.status, ProposalStatus::Pending);
        enqueue(recipient, proposal);
        proposal_id
    }

    #[test]
    fn accept_is_terminal_and_removes_from_pending() {
        let mut a = agent(1);
        let id = pending(1, &mut a);
        let resolved = respond(&mut a, id, true);
        assert!(resolved.is_ok());
        if let Ok(p) = resolved {
            assert_eq!(p.status, ProposalStatus::Accepted);
            assert!(p.status.is_terminal());
        }
        assert!(a.pending_proposals.is_empty());
        // A second response to the same id fails: the proposal is gone.
        assert!(matches!(
            respond(&mut a, id, false),
            Err(AgentError::UnknownProposal(_))
        ));
    }

    #[test]
    fn reject_is_terminal() {
        let mut a = agent(1);
        let id = pending(2, &mut a);
        let resolved = respond(&mut a, id, false);
        assert_eq!(resolved.map(|p| p.status).ok(), Some(ProposalStatus::Rejected));
        assert!(a.pending_proposals.is_empty());
    }

    #[test]
    fn concurrent_proposals_are_all_retained() {
        let mut a = agent(1);
        let first = pending(3, &mut a);
        let second = pending(4, &mut a);
        assert_eq!(a.pending_proposals.len(), 2);

        // Answering one leaves the other untouched.
        assert!(respond(&mut a, first, true).is_ok());
        assert_eq!(a.pending_proposals.len(), 1);
        assert_eq!(
            a.pending_proposals.first().map(|p| p.id),
            Some(second)
        );
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut a = agent(1);
        assert!(matches!(
            respond(&mut a, ProposalId::new(77), true),
            Err(AgentError::UnknownProposal(_))
        ));
    }
}
