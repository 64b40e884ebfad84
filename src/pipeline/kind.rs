use std::fmt;

use serde::{Deserialize, Serialize};

/// Os quatro pipelines acompanhados pela gestora do FIDC.
///
/// Cada pipeline possui seu próprio conjunto de status; valores de um
/// pipeline nunca são aceitos em outro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineKind {
    Cedentes,
    Prospeccao,
    Alocacao,
    Monitoramento,
}

impl PipelineKind {
    /// Segmento de caminho usado pela API REST (`{base}/{segmento}`).
    pub fn path_segment(self) -> &'static str {
        match self {
            PipelineKind::Cedentes => "cedentes",
            PipelineKind::Prospeccao => "prospeccao",
            PipelineKind::Alocacao => "alocacao",
            PipelineKind::Monitoramento => "monitoramento",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PipelineKind::Cedentes => "Cedentes",
            PipelineKind::Prospeccao => "Prospecção",
            PipelineKind::Alocacao => "Alocação",
            PipelineKind::Monitoramento => "Monitoramento",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Cor de exibição de um status no quadro Kanban.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Gray,
    Blue,
    Cyan,
    Yellow,
    Magenta,
    Green,
    Red,
}
