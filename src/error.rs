use thiserror::Error;

use crate::api::ApiError;
use crate::pipeline::{DenyReason, PipelineKind};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Cannot move {entity_id} from {from} to {to}: {reason}")]
    InvalidTransition {
        entity_id: String,
        from: String,
        to: String,
        reason: DenyReason,
    },

    #[error("Checklist item not defined for {entity_id} in status {status}: {item}")]
    UnknownChecklistItem {
        entity_id: String,
        status: String,
        item: String,
    },

    #[error("Unknown status '{status}' for pipeline {pipeline}")]
    UnknownStatus {
        pipeline: PipelineKind,
        status: String,
    },

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Backend API error: {0}")]
    Api(#[from] ApiError),
}
