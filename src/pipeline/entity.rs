use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kind::{PipelineKind, StatusColor};
use super::status::{
    AlocacaoStatus, CedenteStatus, MonitoramentoStatus, PipelineStatus, ProspeccaoStatus,
};
use crate::error::PipelineError;

/// Registro como chega da API, com o status ainda em forma textual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub pending_items: Vec<String>,
    #[serde(default)]
    pub days_in_status: u32,
}

/// Pedido de persistência de uma transição aceita.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    pub entity_id: String,
    pub new_status: String,
    pub status_entered_at: DateTime<Utc>,
}

/// Pedido de persistência dos itens pendentes de uma entidade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingItemsRequest {
    pub entity_id: String,
    pub pending_items: Vec<String>,
}

/// Um registro acompanhado em um pipeline.
///
/// `pending_items` é sempre um subconjunto, sem repetições e na ordem do
/// checklist, de `status.checklist()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineEntity<S> {
    pub id: String,
    pub status: S,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub pending_items: Vec<String>,
    #[serde(default)]
    pub days_in_status: u32,
}

impl<S: PipelineStatus> PipelineEntity<S> {
    /// Cria uma entidade recém-cadastrada com todo o checklist pendente.
    pub fn new(status: S, assigned_to: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            status,
            assigned_to,
            pending_items: owned(status.checklist()),
            days_in_status: 0,
        }
    }

    /// Converte um registro da API.
    ///
    /// Itens fora do checklist do status são descartados (estado antigo da
    /// interface), repetições removidas e a ordem normalizada.
    pub fn from_record(record: EntityRecord) -> Result<Self, PipelineError> {
        let status = S::from_key(&record.status).ok_or_else(|| PipelineError::UnknownStatus {
            pipeline: S::KIND,
            status: record.status.clone(),
        })?;

        let checklist = status.checklist();
        for item in &record.pending_items {
            if !checklist.contains(&item.as_str()) {
                tracing::warn!(
                    entity_id = %record.id,
                    status = %status,
                    item = %item,
                    "dropping pending item outside the status checklist"
                );
            }
        }
        let pending_items = checklist
            .iter()
            .filter(|c| record.pending_items.iter().any(|p| p == *c))
            .map(|c| c.to_string())
            .collect();

        Ok(Self {
            id: record.id,
            status,
            assigned_to: record.assigned_to,
            pending_items,
            days_in_status: record.days_in_status,
        })
    }

    /// Itens concluídos e total do checklist do status atual.
    pub fn checklist_progress(&self) -> (usize, usize) {
        let total = self.status.checklist().len();
        (total.saturating_sub(self.pending_items.len()), total)
    }
}

pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Entidade de qualquer um dos quatro pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pipeline", rename_all = "snake_case")]
pub enum Entity {
    Cedente(PipelineEntity<CedenteStatus>),
    Prospeccao(PipelineEntity<ProspeccaoStatus>),
    Alocacao(PipelineEntity<AlocacaoStatus>),
    Monitoramento(PipelineEntity<MonitoramentoStatus>),
}

macro_rules! each_entity {
    ($self:expr, $e:ident => $body:expr) => {
        match $self {
            Entity::Cedente($e) => $body,
            Entity::Prospeccao($e) => $body,
            Entity::Alocacao($e) => $body,
            Entity::Monitoramento($e) => $body,
        }
    };
}

impl Entity {
    pub fn from_record(kind: PipelineKind, record: EntityRecord) -> Result<Self, PipelineError> {
        Ok(match kind {
            PipelineKind::Cedentes => Entity::Cedente(PipelineEntity::from_record(record)?),
            PipelineKind::Prospeccao => Entity::Prospeccao(PipelineEntity::from_record(record)?),
            PipelineKind::Alocacao => Entity::Alocacao(PipelineEntity::from_record(record)?),
            PipelineKind::Monitoramento => {
                Entity::Monitoramento(PipelineEntity::from_record(record)?)
            }
        })
    }

    pub fn kind(&self) -> PipelineKind {
        match self {
            Entity::Cedente(_) => PipelineKind::Cedentes,
            Entity::Prospeccao(_) => PipelineKind::Prospeccao,
            Entity::Alocacao(_) => PipelineKind::Alocacao,
            Entity::Monitoramento(_) => PipelineKind::Monitoramento,
        }
    }

    pub fn id(&self) -> &str {
        each_entity!(self, e => &e.id)
    }

    pub fn status_key(&self) -> &'static str {
        each_entity!(self, e => e.status.key())
    }

    pub fn status_label(&self) -> &'static str {
        each_entity!(self, e => e.status.label())
    }

    pub fn status_color(&self) -> StatusColor {
        each_entity!(self, e => e.status.color())
    }

    pub fn assigned_to(&self) -> Option<&str> {
        each_entity!(self, e => e.assigned_to.as_deref())
    }

    pub fn pending_items(&self) -> &[String] {
        each_entity!(self, e => &e.pending_items)
    }

    pub fn days_in_status(&self) -> u32 {
        each_entity!(self, e => e.days_in_status)
    }

    pub fn is_terminal(&self) -> bool {
        each_entity!(self, e => e.status.is_terminal())
    }

    pub fn checklist(&self) -> &'static [&'static str] {
        each_entity!(self, e => e.status.checklist())
    }

    pub fn checklist_progress(&self) -> (usize, usize) {
        each_entity!(self, e => e.checklist_progress())
    }
}

impl<S: PipelineStatus> From<PipelineEntity<S>> for Entity {
    fn from(entity: PipelineEntity<S>) -> Self {
        S::wrap(entity)
    }
}
