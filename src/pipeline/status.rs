use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::checklist;
use super::entity::{Entity, PipelineEntity};
use super::kind::{PipelineKind, StatusColor};

/// Comportamento comum aos enums de status dos quatro pipelines.
///
/// `ALL` lista todos os status na ordem de exibição; `PATH` é o caminho
/// principal de avanço; `TERMINAL` são os status sem avanço esperado.
pub trait PipelineStatus:
    Copy + Eq + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + 'static
{
    const KIND: PipelineKind;
    const ALL: &'static [Self];
    const PATH: &'static [Self];
    const TERMINAL: &'static [Self];

    /// Chave usada no fio (`"due_diligence"`, `"fund_selection"`...).
    fn key(self) -> &'static str;

    fn label(self) -> &'static str;

    fn color(self) -> StatusColor;

    /// Itens de checklist exigidos para deixar este status.
    fn checklist(self) -> &'static [&'static str];

    /// Envolve uma entidade tipada na variante correspondente de [`Entity`].
    fn wrap(entity: PipelineEntity<Self>) -> Entity;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }

    fn is_terminal(self) -> bool {
        Self::TERMINAL.contains(&self)
    }

    /// Próximo status no caminho principal. `None` para terminais e estados laterais.
    fn next(self) -> Option<Self> {
        if self.is_terminal() {
            return None;
        }
        let pos = Self::PATH.iter().position(|s| *s == self)?;
        Self::PATH.get(pos + 1).copied()
    }
}

/// Onboarding de cedentes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CedenteStatus {
    Lead,
    DueDiligence,
    DocumentacaoPendente,
    CedenteAtivo,
    BloqueadoDesistencia,
}

impl PipelineStatus for CedenteStatus {
    const KIND: PipelineKind = PipelineKind::Cedentes;
    const ALL: &'static [Self] = &[
        Self::Lead,
        Self::DueDiligence,
        Self::DocumentacaoPendente,
        Self::CedenteAtivo,
        Self::BloqueadoDesistencia,
    ];
    const PATH: &'static [Self] = &[
        Self::Lead,
        Self::DueDiligence,
        Self::DocumentacaoPendente,
        Self::CedenteAtivo,
    ];
    const TERMINAL: &'static [Self] = &[Self::CedenteAtivo, Self::BloqueadoDesistencia];

    fn key(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::DueDiligence => "due_diligence",
            Self::DocumentacaoPendente => "documentacao_pendente",
            Self::CedenteAtivo => "cedente_ativo",
            Self::BloqueadoDesistencia => "bloqueado_desistencia",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::DueDiligence => "Due Diligence",
            Self::DocumentacaoPendente => "Documentação Pendente",
            Self::CedenteAtivo => "Cedente Ativo",
            Self::BloqueadoDesistencia => "Bloqueado / Desistência",
        }
    }

    fn color(self) -> StatusColor {
        match self {
            Self::Lead => StatusColor::Gray,
            Self::DueDiligence => StatusColor::Blue,
            Self::DocumentacaoPendente => StatusColor::Yellow,
            Self::CedenteAtivo => StatusColor::Green,
            Self::BloqueadoDesistencia => StatusColor::Red,
        }
    }

    fn checklist(self) -> &'static [&'static str] {
        checklist::cedente(self)
    }

    fn wrap(entity: PipelineEntity<Self>) -> Entity {
        Entity::Cedente(entity)
    }
}

/// Prospecção de recebíveis (leads de operações).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProspeccaoStatus {
    Novo,
    Qualificacao,
    AnaliseCredito,
    PropostaEnviada,
    Negociacao,
    Convertido,
    Perdido,
}

impl PipelineStatus for ProspeccaoStatus {
    const KIND: PipelineKind = PipelineKind::Prospeccao;
    const ALL: &'static [Self] = &[
        Self::Novo,
        Self::Qualificacao,
        Self::AnaliseCredito,
        Self::PropostaEnviada,
        Self::Negociacao,
        Self::Convertido,
        Self::Perdido,
    ];
    const PATH: &'static [Self] = &[
        Self::Novo,
        Self::Qualificacao,
        Self::AnaliseCredito,
        Self::PropostaEnviada,
        Self::Negociacao,
        Self::Convertido,
    ];
    const TERMINAL: &'static [Self] = &[Self::Convertido, Self::Perdido];

    fn key(self) -> &'static str {
        match self {
            Self::Novo => "novo",
            Self::Qualificacao => "qualificacao",
            Self::AnaliseCredito => "analise_credito",
            Self::PropostaEnviada => "proposta_enviada",
            Self::Negociacao => "negociacao",
            Self::Convertido => "convertido",
            Self::Perdido => "perdido",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Novo => "Novo",
            Self::Qualificacao => "Qualificação",
            Self::AnaliseCredito => "Análise de Crédito",
            Self::PropostaEnviada => "Proposta Enviada",
            Self::Negociacao => "Negociação",
            Self::Convertido => "Convertido",
            Self::Perdido => "Perdido",
        }
    }

    fn color(self) -> StatusColor {
        match self {
            Self::Novo => StatusColor::Gray,
            Self::Qualificacao => StatusColor::Blue,
            Self::AnaliseCredito => StatusColor::Cyan,
            Self::PropostaEnviada => StatusColor::Magenta,
            Self::Negociacao => StatusColor::Yellow,
            Self::Convertido => StatusColor::Green,
            Self::Perdido => StatusColor::Red,
        }
    }

    fn checklist(self) -> &'static [&'static str] {
        checklist::prospeccao(self)
    }

    fn wrap(entity: PipelineEntity<Self>) -> Entity {
        Entity::Prospeccao(entity)
    }
}

/// Alocação de recebíveis em fundos (matching).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlocacaoStatus {
    Lead,
    FundSelection,
    TermSheet,
    Documentation,
    Allocated,
    Rejected,
    Withdrawn,
    Superseded,
}

impl PipelineStatus for AlocacaoStatus {
    const KIND: PipelineKind = PipelineKind::Alocacao;
    const ALL: &'static [Self] = &[
        Self::Lead,
        Self::FundSelection,
        Self::TermSheet,
        Self::Documentation,
        Self::Allocated,
        Self::Rejected,
        Self::Withdrawn,
        Self::Superseded,
    ];
    const PATH: &'static [Self] = &[
        Self::Lead,
        Self::FundSelection,
        Self::TermSheet,
        Self::Documentation,
        Self::Allocated,
    ];
    const TERMINAL: &'static [Self] = &[
        Self::Allocated,
        Self::Rejected,
        Self::Withdrawn,
        Self::Superseded,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::FundSelection => "fund_selection",
            Self::TermSheet => "term_sheet",
            Self::Documentation => "documentation",
            Self::Allocated => "allocated",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
            Self::Superseded => "superseded",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::FundSelection => "Seleção de Fundo",
            Self::TermSheet => "Term Sheet",
            Self::Documentation => "Documentação",
            Self::Allocated => "Alocado",
            Self::Rejected => "Rejeitado",
            Self::Withdrawn => "Desistência",
            Self::Superseded => "Substituído",
        }
    }

    fn color(self) -> StatusColor {
        match self {
            Self::Lead => StatusColor::Gray,
            Self::FundSelection => StatusColor::Blue,
            Self::TermSheet => StatusColor::Magenta,
            Self::Documentation => StatusColor::Yellow,
            Self::Allocated => StatusColor::Green,
            Self::Rejected => StatusColor::Red,
            Self::Withdrawn | Self::Superseded => StatusColor::Gray,
        }
    }

    fn checklist(self) -> &'static [&'static str] {
        checklist::alocacao(self)
    }

    fn wrap(entity: PipelineEntity<Self>) -> Entity {
        Entity::Alocacao(entity)
    }
}

/// Monitoramento de compliance da carteira.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoramentoStatus {
    Regular,
    Alerta,
    EmAnalise,
    PlanoAcao,
    Regularizado,
    EscaladoComite,
}

impl PipelineStatus for MonitoramentoStatus {
    const KIND: PipelineKind = PipelineKind::Monitoramento;
    const ALL: &'static [Self] = &[
        Self::Regular,
        Self::Alerta,
        Self::EmAnalise,
        Self::PlanoAcao,
        Self::Regularizado,
        Self::EscaladoComite,
    ];
    const PATH: &'static [Self] = &[
        Self::Regular,
        Self::Alerta,
        Self::EmAnalise,
        Self::PlanoAcao,
        Self::Regularizado,
    ];
    const TERMINAL: &'static [Self] = &[Self::Regularizado, Self::EscaladoComite];

    fn key(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Alerta => "alerta",
            Self::EmAnalise => "em_analise",
            Self::PlanoAcao => "plano_acao",
            Self::Regularizado => "regularizado",
            Self::EscaladoComite => "escalado_comite",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Alerta => "Alerta",
            Self::EmAnalise => "Em Análise",
            Self::PlanoAcao => "Plano de Ação",
            Self::Regularizado => "Regularizado",
            Self::EscaladoComite => "Escalado ao Comitê",
        }
    }

    fn color(self) -> StatusColor {
        match self {
            Self::Regular => StatusColor::Green,
            Self::Alerta => StatusColor::Yellow,
            Self::EmAnalise => StatusColor::Cyan,
            Self::PlanoAcao => StatusColor::Magenta,
            Self::Regularizado => StatusColor::Blue,
            Self::EscaladoComite => StatusColor::Red,
        }
    }

    fn checklist(self) -> &'static [&'static str] {
        checklist::monitoramento(self)
    }

    fn wrap(entity: PipelineEntity<Self>) -> Entity {
        Entity::Monitoramento(entity)
    }
}

macro_rules! display_as_key {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.key())
                }
            }
        )*
    };
}

display_as_key!(CedenteStatus, ProspeccaoStatus, AlocacaoStatus, MonitoramentoStatus);
