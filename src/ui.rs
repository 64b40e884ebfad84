//! Interface de terminal — spinner e saída colorida.
//!
//! Usa `indicatif` para o spinner durante chamadas ao backend e `console`
//! para estilizar status, quadros e decisões de transição.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::board::Board;
use crate::pipeline::registry::StatusInfo;
use crate::pipeline::{Decision, Entity, PipelineEntity, PipelineKind, PipelineStatus, StatusColor};

/// Mapeia a cor do registro para um estilo de terminal.
pub fn status_style(color: StatusColor) -> Style {
    let style = Style::new().bold();
    match color {
        StatusColor::Gray => style.dim(),
        StatusColor::Blue => style.blue(),
        StatusColor::Cyan => style.cyan(),
        StatusColor::Yellow => style.yellow(),
        StatusColor::Magenta => style.magenta(),
        StatusColor::Green => style.green(),
        StatusColor::Red => style.red(),
    }
}

/// Spinner exibido enquanto o backend responde.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.into());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

pub fn success(message: &str) {
    println!("  {} {message}", Style::new().green().bold().apply_to("✓"));
}

/// Erros vão para stderr, para não se misturar à saída normal.
pub fn failure(message: &str) {
    eprintln!("{}", failure_line(message));
}

/// Dica complementar a um erro, também em stderr.
pub fn failure_hint(message: &str) {
    eprintln!("{}", hint_line(message));
}

pub fn hint(message: &str) {
    println!("{}", hint_line(message));
}

fn failure_line(message: &str) -> String {
    format!("  {} {message}", Style::new().red().bold().apply_to("✗"))
}

fn hint_line(message: &str) -> String {
    format!("    {}", Style::new().dim().apply_to(message))
}

/// Lista os status de um pipeline com seus checklists.
pub fn print_statuses(kind: PipelineKind, statuses: &[StatusInfo]) {
    println!("{}", Style::new().bold().apply_to(format!("── {} ──", kind.label())));
    for info in statuses {
        let marker = if info.terminal { " (terminal)" } else { "" };
        println!(
            "{} {}{marker}",
            status_style(info.color).apply_to(info.label),
            Style::new().dim().apply_to(format!("[{}]", info.key)),
        );
        for (i, item) in info.checklist.iter().enumerate() {
            println!("    {}. {item}", i + 1);
        }
    }
}

/// Imprime o quadro Kanban coluna a coluna.
pub fn print_board(board: &Board) {
    let yellow = Style::new().yellow();
    println!(
        "{}",
        Style::new()
            .bold()
            .apply_to(format!("── {} ({} registros) ──", board.kind.label(), board.total_cards()))
    );
    let stale = board.stale_cards().count();
    if stale > 0 {
        println!("{}", yellow.apply_to(format!("{stale} parados há muito tempo ⚠")));
    }
    for column in &board.columns {
        let header = format!("{} ({})", column.label, column.cards.len());
        let style = column.color.map(status_style).unwrap_or_else(|| Style::new().italic());
        println!();
        println!("{}", style.apply_to(header));
        for card in &column.cards {
            let owner = card.assigned_to.as_deref().unwrap_or("—");
            let progress = if card.checklist_len == 0 {
                String::new()
            } else {
                format!("  {}/{} itens", card.done(), card.checklist_len)
            };
            let days = format!("{}d", card.days_in_status);
            let days = if card.stale {
                yellow.apply_to(format!("{days} ⚠")).to_string()
            } else {
                days
            };
            println!("  • {}  [{owner}]  {days}{progress}", card.id);
        }
    }
}

/// Detalhe de uma entidade com o checklist do status atual.
pub fn print_entity(entity: &Entity) {
    let (done, total) = entity.checklist_progress();
    let marker = if entity.is_terminal() { " (terminal)" } else { "" };
    println!(
        "{}  {}{marker} {}  {}d no status  {done}/{total} itens",
        Style::new().bold().apply_to(entity.id()),
        status_style(entity.status_color()).apply_to(entity.status_label()),
        Style::new().dim().apply_to(format!("[{}/{}]", entity.kind(), entity.status_key())),
        entity.days_in_status(),
    );
    if let Some(owner) = entity.assigned_to() {
        hint(&format!("responsável: {owner}"));
    }
    for (i, item) in entity.checklist().iter().enumerate() {
        let pending = entity.pending_items().iter().any(|p| p == item);
        let mark = if pending {
            Style::new().yellow().apply_to("☐")
        } else {
            Style::new().green().apply_to("☑")
        };
        println!("    {mark} {}. {item}", i + 1);
    }
}

pub fn print_decision<S: PipelineStatus>(entity: &PipelineEntity<S>, target: S, decision: &Decision) {
    let transition = format!("{} → {}", entity.status.label(), target.label());
    match decision.reason() {
        None => success(&format!("{transition}: permitido")),
        Some(reason) => {
            println!("  {} {transition}: bloqueado ({reason})", Style::new().red().bold().apply_to("✗"));
            for item in &entity.pending_items {
                hint(&format!("pendente: {item}"));
            }
        }
    }
}
