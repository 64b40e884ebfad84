use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{PipelineEntity, TransitionRequest, owned};
use super::status::PipelineStatus;
use crate::error::PipelineError;

/// Why a transition was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    AlreadyInStatus,
    PendingItems { count: usize },
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::AlreadyInStatus => write!(f, "already in status"),
            DenyReason::PendingItems { .. } => {
                write!(f, "pending checklist items block advancement")
            }
        }
    }
}

/// The result of evaluating a requested transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn reason(&self) -> Option<&DenyReason> {
        match self {
            Decision::Allowed => None,
            Decision::Denied(reason) => Some(reason),
        }
    }
}

/// How pending checklist items gate transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatingPolicy {
    /// Any pending item blocks every move, in any direction.
    #[default]
    Strict,
    /// Pending items do not block a move into a terminal status
    /// (rejecting or withdrawing a record with an incomplete checklist).
    TerminalBypass,
}

/// Decides and applies status transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionValidator {
    policy: GatingPolicy,
}

impl TransitionValidator {
    pub fn new(policy: GatingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> GatingPolicy {
        self.policy
    }

    /// Evaluate `entity.status → target`.
    ///
    /// - Same status is never a transition.
    /// - Pending items block the move, unless the policy is
    ///   [`GatingPolicy::TerminalBypass`] and `target` is terminal.
    /// - Terminal statuses do not block moving out.
    pub fn can_transition<S: PipelineStatus>(&self, entity: &PipelineEntity<S>, target: S) -> Decision {
        if entity.status == target {
            return Decision::Denied(DenyReason::AlreadyInStatus);
        }

        let bypass = self.policy == GatingPolicy::TerminalBypass && target.is_terminal();
        if !entity.pending_items.is_empty() && !bypass {
            return Decision::Denied(DenyReason::PendingItems {
                count: entity.pending_items.len(),
            });
        }

        Decision::Allowed
    }

    /// Validate and apply a transition to the local entity.
    ///
    /// On success the entity enters `target` with every item of the new
    /// checklist pending and the time-in-status counter at zero. The returned
    /// request is what the caller persists.
    pub fn apply<S: PipelineStatus>(
        &self,
        entity: &mut PipelineEntity<S>,
        target: S,
        now: DateTime<Utc>,
    ) -> Result<TransitionRequest, PipelineError> {
        if let Decision::Denied(reason) = self.can_transition(entity, target) {
            return Err(PipelineError::InvalidTransition {
                entity_id: entity.id.clone(),
                from: entity.status.key().to_string(),
                to: target.key().to_string(),
                reason,
            });
        }

        entity.status = target;
        entity.pending_items = owned(target.checklist());
        entity.days_in_status = 0;

        Ok(TransitionRequest {
            entity_id: entity.id.clone(),
            new_status: target.key().to_string(),
            status_entered_at: now,
        })
    }
}
