//! Consultas aos registros por chave textual.
//!
//! Os registros tipados ficam em [`PipelineStatus`]; aqui ficam as consultas
//! feitas a partir da chave crua recebida da API. Chaves desconhecidas nunca
//! falham: o rótulo volta a ser a própria chave, o checklist é vazio e o
//! status não é terminal.

use std::borrow::Cow;

use serde::Serialize;

use super::kind::{PipelineKind, StatusColor};
use super::status::{
    AlocacaoStatus, CedenteStatus, MonitoramentoStatus, PipelineStatus, ProspeccaoStatus,
};

/// Visão de um status independente do pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub color: StatusColor,
    pub terminal: bool,
    pub checklist: &'static [&'static str],
}

impl StatusInfo {
    fn of<S: PipelineStatus>(status: S) -> Self {
        Self {
            key: status.key(),
            label: status.label(),
            color: status.color(),
            terminal: status.is_terminal(),
            checklist: status.checklist(),
        }
    }
}

fn collect<S: PipelineStatus>() -> Vec<StatusInfo> {
    S::ALL.iter().copied().map(StatusInfo::of).collect()
}

fn find<S: PipelineStatus>(key: &str) -> Option<StatusInfo> {
    S::from_key(key).map(StatusInfo::of)
}

/// Todos os status de um pipeline, na ordem de exibição.
pub fn statuses(kind: PipelineKind) -> Vec<StatusInfo> {
    match kind {
        PipelineKind::Cedentes => collect::<CedenteStatus>(),
        PipelineKind::Prospeccao => collect::<ProspeccaoStatus>(),
        PipelineKind::Alocacao => collect::<AlocacaoStatus>(),
        PipelineKind::Monitoramento => collect::<MonitoramentoStatus>(),
    }
}

pub fn lookup(kind: PipelineKind, key: &str) -> Option<StatusInfo> {
    match kind {
        PipelineKind::Cedentes => find::<CedenteStatus>(key),
        PipelineKind::Prospeccao => find::<ProspeccaoStatus>(key),
        PipelineKind::Alocacao => find::<AlocacaoStatus>(key),
        PipelineKind::Monitoramento => find::<MonitoramentoStatus>(key),
    }
}

pub fn label_of(kind: PipelineKind, key: &str) -> Cow<'static, str> {
    match lookup(kind, key) {
        Some(info) => Cow::Borrowed(info.label),
        None => Cow::Owned(key.to_string()),
    }
}

pub fn checklist_of(kind: PipelineKind, key: &str) -> &'static [&'static str] {
    lookup(kind, key).map(|info| info.checklist).unwrap_or(&[])
}

pub fn is_terminal(kind: PipelineKind, key: &str) -> bool {
    lookup(kind, key).is_some_and(|info| info.terminal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve() {
        assert_eq!(label_of(PipelineKind::Cedentes, "due_diligence"), "Due Diligence");
        assert_eq!(checklist_of(PipelineKind::Alocacao, "fund_selection").len(), 3);
        assert!(is_terminal(PipelineKind::Alocacao, "withdrawn"));
        assert!(!is_terminal(PipelineKind::Alocacao, "term_sheet"));
    }

    #[test]
    fn unknown_keys_degrade_gracefully() {
        assert_eq!(label_of(PipelineKind::Cedentes, "em_revisao"), "em_revisao");
        assert!(checklist_of(PipelineKind::Cedentes, "em_revisao").is_empty());
        assert!(!is_terminal(PipelineKind::Cedentes, "em_revisao"));
    }

    #[test]
    fn keys_do_not_cross_pipelines() {
        assert!(lookup(PipelineKind::Cedentes, "fund_selection").is_none());
        assert!(lookup(PipelineKind::Alocacao, "fund_selection").is_some());
    }

    #[test]
    fn statuses_are_in_display_order() {
        let keys: Vec<_> = statuses(PipelineKind::Cedentes).iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![
                "lead",
                "due_diligence",
                "documentacao_pendente",
                "cedente_ativo",
                "bloqueado_desistencia"
            ]
        );
    }
}
