//! Colaborador externo: a API REST que é o sistema de registro.
//!
//! O núcleo nunca faz chamadas de rede; ele apenas produz os payloads que
//! o [`PipelineWorkflow`](crate::workflow::PipelineWorkflow) envia por meio
//! de uma implementação de [`PipelineApi`].

pub mod client;
pub mod error;

pub use client::HttpPipelineApi;
pub use error::ApiError;

use crate::pipeline::{EntityRecord, PendingItemsRequest, PipelineKind, TransitionRequest};

/// Operações do backend usadas pelos pipelines.
#[allow(async_fn_in_trait)]
pub trait PipelineApi {
    /// Lista os registros de um pipeline.
    async fn fetch_entities(&self, kind: PipelineKind) -> Result<Vec<EntityRecord>, ApiError>;

    /// Persiste o novo status de uma entidade.
    async fn persist_transition(
        &self,
        kind: PipelineKind,
        req: &TransitionRequest,
    ) -> Result<(), ApiError>;

    /// Persiste os itens pendentes de uma entidade.
    async fn persist_pending_items(
        &self,
        kind: PipelineKind,
        req: &PendingItemsRequest,
    ) -> Result<(), ApiError>;
}
