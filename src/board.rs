//! Quadro Kanban de um pipeline.
//!
//! Agrupa registros crus por status, na ordem do registro. Status
//! desconhecidos viram colunas extras no fim, rotuladas pela própria chave,
//! para que nenhum registro válido do backend deixe de aparecer.

use serde::Serialize;

use crate::pipeline::registry;
use crate::pipeline::{EntityRecord, PipelineKind, StatusColor};

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub id: String,
    pub assigned_to: Option<String>,
    pub pending: usize,
    pub checklist_len: usize,
    pub days_in_status: u32,
    pub stale: bool,
}

impl Card {
    /// Itens concluídos do checklist do status atual.
    pub fn done(&self) -> usize {
        self.checklist_len.saturating_sub(self.pending)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub key: String,
    pub label: String,
    /// `None` para status fora do registro.
    pub color: Option<StatusColor>,
    pub terminal: bool,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Board {
    pub kind: PipelineKind,
    pub columns: Vec<Column>,
}

impl Board {
    pub fn from_records(kind: PipelineKind, records: &[EntityRecord], stale_after_days: u32) -> Self {
        let mut columns: Vec<Column> = registry::statuses(kind)
            .into_iter()
            .map(|info| Column {
                key: info.key.to_string(),
                label: info.label.to_string(),
                color: Some(info.color),
                terminal: info.terminal,
                cards: Vec::new(),
            })
            .collect();

        for record in records {
            let checklist = registry::checklist_of(kind, &record.status);
            // Conta itens do checklist, não entradas: o backend pode repetir itens.
            let pending = checklist
                .iter()
                .filter(|item| record.pending_items.iter().any(|p| p == *item))
                .count();
            let terminal = registry::is_terminal(kind, &record.status);
            let card = Card {
                id: record.id.clone(),
                assigned_to: record.assigned_to.clone(),
                pending,
                checklist_len: checklist.len(),
                days_in_status: record.days_in_status,
                stale: !terminal && record.days_in_status >= stale_after_days,
            };

            match columns.iter_mut().find(|c| c.key == record.status) {
                Some(column) => column.cards.push(card),
                None => columns.push(Column {
                    key: record.status.clone(),
                    label: registry::label_of(kind, &record.status).into_owned(),
                    color: None,
                    terminal: false,
                    cards: vec![card],
                }),
            }
        }

        Self { kind, columns }
    }

    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    pub fn stale_cards(&self) -> impl Iterator<Item = &Card> {
        self.columns.iter().flat_map(|c| c.cards.iter()).filter(|card| card.stale)
    }
}
