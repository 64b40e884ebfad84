//! Interface de linha de comando baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] e flags globais
//! (--config, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::pipeline::PipelineKind;

/// fidc — pipelines de cedentes, prospecção, alocação e monitoramento.
#[derive(Debug, Parser)]
#[command(name = "fidc", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Arquivo de configuração (padrão: ./fidc.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Pipeline aceito pela CLI, mapeado para [`PipelineKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PipelineArg {
    Cedentes,
    Prospeccao,
    Alocacao,
    Monitoramento,
}

impl From<PipelineArg> for PipelineKind {
    fn from(arg: PipelineArg) -> Self {
        match arg {
            PipelineArg::Cedentes => PipelineKind::Cedentes,
            PipelineArg::Prospeccao => PipelineKind::Prospeccao,
            PipelineArg::Alocacao => PipelineKind::Alocacao,
            PipelineArg::Monitoramento => PipelineKind::Monitoramento,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista os status de um pipeline e seus checklists.
    Statuses { pipeline: PipelineArg },

    /// Mostra o quadro Kanban de um pipeline.
    Board { pipeline: PipelineArg },

    /// Mostra uma entidade e o checklist do status atual.
    Show { pipeline: PipelineArg, id: String },

    /// Verifica se uma transição seria permitida, sem persistir nada.
    Check {
        pipeline: PipelineArg,
        id: String,
        /// Status de destino (chave, ex.: fund_selection).
        target: String,
    },

    /// Move uma entidade para outro status.
    Advance {
        pipeline: PipelineArg,
        id: String,
        /// Status de destino. Se omitido, usa o próximo status do caminho principal.
        target: Option<String>,
    },

    /// Marca um item do checklist como concluído.
    Complete {
        pipeline: PipelineArg,
        id: String,
        /// Posição (1, 2, ...) ou texto exato do item.
        item: String,
    },

    /// Reabre um item do checklist.
    Reopen {
        pipeline: PipelineArg,
        id: String,
        /// Posição (1, 2, ...) ou texto exato do item.
        item: String,
    },

    /// Executa a demonstração local das regras de transição.
    Demo,
}
