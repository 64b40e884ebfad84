mod checklist;
mod entity;
mod kind;
pub mod registry;
mod status;
mod tracker;
mod transition;

pub use entity::{Entity, EntityRecord, PendingItemsRequest, PipelineEntity, TransitionRequest};
pub use kind::{PipelineKind, StatusColor};
pub use status::{
    AlocacaoStatus, CedenteStatus, MonitoramentoStatus, PipelineStatus, ProspeccaoStatus,
};
pub use tracker::PendingItemTracker;
pub use transition::{Decision, DenyReason, GatingPolicy, TransitionValidator};
