//! Checklists exigidos por status.
//!
//! Cada item traz entre parênteses o motivo da exigência, exibido ao
//! analista junto com o item. Status terminais não têm checklist.

use super::status::{AlocacaoStatus, CedenteStatus, MonitoramentoStatus, ProspeccaoStatus};

const NONE: &[&str] = &[];

pub fn cedente(status: CedenteStatus) -> &'static [&'static str] {
    match status {
        CedenteStatus::Lead => &[
            "Cadastro básico do cedente (CNPJ, razão social e contato responsável)",
            "Primeira reunião comercial (entender o modelo de negócio e o volume de recebíveis)",
        ],
        CedenteStatus::DueDiligence => &[
            "Análise de crédito do cedente (capacidade de recompra de títulos inadimplidos)",
            "Consulta a restritivos e processos judiciais (risco reputacional e de fraude)",
            "Visita técnica à operação (confirma que a atividade geradora dos recebíveis existe)",
        ],
        CedenteStatus::DocumentacaoPendente => &[
            "Contrato social e procurações (poderes de assinatura dos representantes)",
            "Demonstrações financeiras dos últimos 2 anos (base da análise de crédito)",
            "Contrato-mãe de cessão assinado (base jurídica de todas as operações)",
        ],
        CedenteStatus::CedenteAtivo | CedenteStatus::BloqueadoDesistencia => NONE,
    }
}

pub fn prospeccao(status: ProspeccaoStatus) -> &'static [&'static str] {
    match status {
        ProspeccaoStatus::Novo => &[
            "Identificação do sacado (quem efetivamente paga os recebíveis)",
            "Estimativa de volume mensal (viabilidade econômica da operação)",
        ],
        ProspeccaoStatus::Qualificacao => &[
            "Histórico de pagamento do sacado (inadimplência esperada da carteira)",
            "Confirmação de lastro (nota fiscal, duplicata ou contrato que origina o crédito)",
        ],
        ProspeccaoStatus::AnaliseCredito => &[
            "Rating interno do sacado (define a taxa mínima de desconto)",
            "Análise de diluição (devoluções e abatimentos históricos)",
        ],
        ProspeccaoStatus::PropostaEnviada => &[
            "Proposta com taxa e prazo enviada ao cedente (registro formal da oferta)",
        ],
        ProspeccaoStatus::Negociacao => &[
            "Taxa final aprovada pelo comitê de crédito (respeita a alçada de aprovação)",
            "Aceite do cedente (formaliza a operação antes da cessão)",
        ],
        ProspeccaoStatus::Convertido | ProspeccaoStatus::Perdido => NONE,
    }
}

pub fn alocacao(status: AlocacaoStatus) -> &'static [&'static str] {
    match status {
        AlocacaoStatus::Lead => &[
            "Verificação de elegibilidade dos recebíveis (critérios do regulamento do fundo)",
            "Match de taxas entre cedente e fundo (spread mínimo exigido pela política de investimento)",
            "Análise de concentração por sacado e cedente (limites regulatórios do fundo)",
        ],
        AlocacaoStatus::FundSelection => &[
            "Seleção do fundo com caixa disponível (evita alocação sem recursos)",
            "Aprovação do gestor do fundo (alçada de investimento)",
            "Validação dos limites de exposição do fundo (política de risco)",
        ],
        AlocacaoStatus::TermSheet => &[
            "Term sheet enviado ao cedente (formaliza as condições comerciais)",
            "Aceite formal do term sheet (evita renegociação após a documentação)",
        ],
        AlocacaoStatus::Documentation => &[
            "Termo de cessão assinado (transfere os direitos creditórios ao fundo)",
            "Registro dos recebíveis na registradora (exigência regulatória)",
            "Notificação aos sacados (garante que o pagamento seja feito ao fundo)",
        ],
        AlocacaoStatus::Allocated
        | AlocacaoStatus::Rejected
        | AlocacaoStatus::Withdrawn
        | AlocacaoStatus::Superseded => NONE,
    }
}

pub fn monitoramento(status: MonitoramentoStatus) -> &'static [&'static str] {
    match status {
        MonitoramentoStatus::Regular => &[
            "Conferência mensal da carteira (aging e concentração dentro dos limites)",
        ],
        MonitoramentoStatus::Alerta => &[
            "Identificação do gatilho do alerta (atraso, concentração ou quebra de covenant)",
            "Contato com o cedente (entender a causa antes de escalar)",
        ],
        MonitoramentoStatus::EmAnalise => &[
            "Relatório de análise de risco (quantifica a exposição do fundo)",
            "Parecer do compliance (enquadramento regulatório do caso)",
        ],
        MonitoramentoStatus::PlanoAcao => &[
            "Plano de ação acordado com o cedente (prazos e responsáveis definidos)",
            "Acompanhamento semanal do plano (evidência para o comitê)",
            "Validação da regularização (encerra o caso com base em dados)",
        ],
        MonitoramentoStatus::Regularizado | MonitoramentoStatus::EscaladoComite => NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::status::PipelineStatus;

    fn assert_no_duplicates<S: PipelineStatus>() {
        for status in S::ALL {
            let items = status.checklist();
            for (i, item) in items.iter().enumerate() {
                assert!(!items[i + 1..].contains(item), "duplicate item in {status}: {item}");
            }
        }
    }

    #[test]
    fn checklists_have_no_duplicate_items() {
        assert_no_duplicates::<CedenteStatus>();
        assert_no_duplicates::<ProspeccaoStatus>();
        assert_no_duplicates::<AlocacaoStatus>();
        assert_no_duplicates::<MonitoramentoStatus>();
    }

    #[test]
    fn alocacao_lead_and_fund_selection_have_three_items() {
        assert_eq!(alocacao(AlocacaoStatus::Lead).len(), 3);
        assert!(alocacao(AlocacaoStatus::Lead)[0].starts_with("Verificação de elegibilidade"));
        assert!(alocacao(AlocacaoStatus::Lead)[1].starts_with("Match de taxas"));
        assert!(alocacao(AlocacaoStatus::Lead)[2].starts_with("Análise de concentração"));
        assert_eq!(alocacao(AlocacaoStatus::FundSelection).len(), 3);
    }

    #[test]
    fn every_non_terminal_status_has_a_checklist() {
        for status in CedenteStatus::ALL.iter().filter(|s| !s.is_terminal()) {
            assert!(!cedente(*status).is_empty());
        }
        for status in MonitoramentoStatus::ALL.iter().filter(|s| !s.is_terminal()) {
            assert!(!monitoramento(*status).is_empty());
        }
    }
}
