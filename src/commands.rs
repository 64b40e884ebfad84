use anyhow::{Context, Result};
use chrono::Utc;

use crate::api::HttpPipelineApi;
use crate::board::Board;
use crate::cli::{Cli, Command};
use crate::config::FidcConfig;
use crate::error::PipelineError;
use crate::pipeline::{
    AlocacaoStatus, CedenteStatus, Entity, EntityRecord, MonitoramentoStatus, PendingItemTracker,
    PipelineEntity, PipelineKind, PipelineStatus, ProspeccaoStatus, TransitionValidator, registry,
};
use crate::ui;
use crate::workflow::PipelineWorkflow;

type Workflow = PipelineWorkflow<HttpPipelineApi>;

/// Runs `$f::<Status>(args..)` for the status enum of `$kind`.
macro_rules! for_pipeline {
    ($kind:expr, $f:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            PipelineKind::Cedentes => $f::<CedenteStatus>($($arg),*).await,
            PipelineKind::Prospeccao => $f::<ProspeccaoStatus>($($arg),*).await,
            PipelineKind::Alocacao => $f::<AlocacaoStatus>($($arg),*).await,
            PipelineKind::Monitoramento => $f::<MonitoramentoStatus>($($arg),*).await,
        }
    };
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => FidcConfig::load_from(path)?,
        None => FidcConfig::load()?,
    };

    match cli.command {
        Command::Statuses { pipeline } => {
            let kind = PipelineKind::from(pipeline);
            ui::print_statuses(kind, &registry::statuses(kind));
            Ok(())
        }
        Command::Demo => {
            run_demo();
            Ok(())
        }
        Command::Board { pipeline } => {
            let workflow = connect(&config)?;
            let kind = PipelineKind::from(pipeline);
            let records = fetch(&workflow, kind).await?;
            ui::print_board(&Board::from_records(kind, &records, config.stale_after_days));
            Ok(())
        }
        Command::Show { pipeline, id } => {
            let workflow = connect(&config)?;
            show(&workflow, PipelineKind::from(pipeline), &id).await
        }
        Command::Check {
            pipeline,
            id,
            target,
        } => {
            let workflow = connect(&config)?;
            for_pipeline!(PipelineKind::from(pipeline), check(&workflow, &id, &target))
        }
        Command::Advance {
            pipeline,
            id,
            target,
        } => {
            let workflow = connect(&config)?;
            for_pipeline!(
                PipelineKind::from(pipeline),
                advance(&workflow, &id, target.as_deref())
            )
        }
        Command::Complete { pipeline, id, item } => {
            let workflow = connect(&config)?;
            for_pipeline!(
                PipelineKind::from(pipeline),
                update_item(&workflow, &id, &item, false)
            )
        }
        Command::Reopen { pipeline, id, item } => {
            let workflow = connect(&config)?;
            for_pipeline!(
                PipelineKind::from(pipeline),
                update_item(&workflow, &id, &item, true)
            )
        }
    }
}

fn connect(config: &FidcConfig) -> Result<Workflow> {
    let api = HttpPipelineApi::new(&config.api_url, config.api_token(), config.request_timeout())
        .context("failed to build HTTP client")?;
    let workflow = PipelineWorkflow::new(api, config.gating_policy);
    tracing::debug!(
        api_url = %workflow.api().base_url(),
        policy = ?workflow.validator().policy(),
        "connected"
    );
    Ok(workflow)
}

async fn fetch(workflow: &Workflow, kind: PipelineKind) -> Result<Vec<EntityRecord>> {
    let spinner = ui::Spinner::start(format!("Carregando {}...", kind.label()));
    let records = workflow.load_records(kind).await;
    spinner.finish();
    Ok(records?)
}

async fn load_entity<S: PipelineStatus>(workflow: &Workflow, id: &str) -> Result<PipelineEntity<S>> {
    let spinner = ui::Spinner::start(format!("Carregando {id}..."));
    let entity = workflow.find::<S>(id).await;
    spinner.finish();
    Ok(entity?)
}

fn parse_target<S: PipelineStatus>(key: &str) -> Result<S, PipelineError> {
    S::from_key(key).ok_or_else(|| PipelineError::UnknownStatus {
        pipeline: S::KIND,
        status: key.to_string(),
    })
}

async fn show(workflow: &Workflow, kind: PipelineKind, id: &str) -> Result<()> {
    let spinner = ui::Spinner::start(format!("Carregando {id}..."));
    let entity = workflow.find_entity(kind, id).await;
    spinner.finish();
    ui::print_entity(&entity?);
    Ok(())
}

async fn check<S: PipelineStatus>(workflow: &Workflow, id: &str, target: &str) -> Result<()> {
    let target = parse_target::<S>(target)?;
    let entity = load_entity::<S>(workflow, id).await?;
    let decision = workflow.validator().can_transition(&entity, target);
    ui::print_decision(&entity, target, &decision);
    Ok(())
}

async fn advance<S: PipelineStatus>(
    workflow: &Workflow,
    id: &str,
    target: Option<&str>,
) -> Result<()> {
    let mut entity = load_entity::<S>(workflow, id).await?;
    let target = match target {
        Some(key) => parse_target::<S>(key)?,
        None => entity.status.next().with_context(|| {
            format!("{} has no next status; pass one explicitly", entity.status.label())
        })?,
    };

    match workflow.advance(&mut entity, target).await {
        Ok(_) => {
            ui::success(&format!("{id} movido para {}", target.label()));
            ui::print_entity(&entity.into());
            Ok(())
        }
        Err(e @ PipelineError::InvalidTransition { .. }) => {
            for item in &entity.pending_items {
                ui::hint(&format!("pendente: {item}"));
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

async fn update_item<S: PipelineStatus>(
    workflow: &Workflow,
    id: &str,
    selector: &str,
    reopen: bool,
) -> Result<()> {
    let mut entity = load_entity::<S>(workflow, id).await?;
    let item = PendingItemTracker::resolve_item(&entity, selector)?;

    let changed = if reopen {
        workflow.reopen_item(&mut entity, item).await?
    } else {
        workflow.complete_item(&mut entity, item).await?
    };
    if changed {
        ui::success(if reopen { "item reaberto" } else { "item concluído" });
    } else {
        ui::hint("nada a alterar");
    }
    if PendingItemTracker::is_ready_to_advance(&entity) {
        ui::hint("checklist completo, pronto para avançar");
    }
    ui::print_entity(&entity.into());
    Ok(())
}

/// Walks the gating rules on local entities, without a backend.
fn run_demo() {
    let validator = TransitionValidator::default();
    let now = Utc::now();

    println!("Cenário A: lead de alocação com checklist pendente");
    let mut lead = PipelineEntity::new(AlocacaoStatus::Lead, Some("ana".into()));
    ui::print_entity(&Entity::from(lead.clone()));
    let decision = validator.can_transition(&lead, AlocacaoStatus::FundSelection);
    ui::print_decision(&lead, AlocacaoStatus::FundSelection, &decision);

    println!();
    println!("Cenário B: checklist concluído, avanço para seleção de fundo");
    for item in AlocacaoStatus::Lead.checklist() {
        if let Err(e) = PendingItemTracker::mark_item_complete(&mut lead, item) {
            ui::failure(&e.to_string());
        }
    }
    let decision = validator.can_transition(&lead, AlocacaoStatus::FundSelection);
    ui::print_decision(&lead, AlocacaoStatus::FundSelection, &decision);
    match validator.apply(&mut lead, AlocacaoStatus::FundSelection, now) {
        Ok(req) => {
            ui::hint(&format!(
                "payload: {}",
                serde_json::to_string(&req).unwrap_or_default()
            ));
            ui::print_entity(&Entity::from(lead.clone()));
        }
        Err(e) => ui::failure(&e.to_string()),
    }

    println!();
    println!("Cenário C: item inexistente no checklist");
    match PendingItemTracker::mark_item_complete(&mut lead, "not-a-real-item") {
        Ok(_) => ui::success("item aceito"),
        Err(e) => ui::failure(&e.to_string()),
    }
    ui::hint(&format!("{} itens pendentes", PendingItemTracker::pending_count(&lead)));

    println!();
    println!("Cenário D: entidade alocada (terminal) movida para rejeitada");
    let allocated = PipelineEntity::new(AlocacaoStatus::Allocated, Some("bruno".into()));
    let decision = validator.can_transition(&allocated, AlocacaoStatus::Rejected);
    ui::print_decision(&allocated, AlocacaoStatus::Rejected, &decision);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_target_accepts_pipeline_keys_only() {
        assert_eq!(
            parse_target::<AlocacaoStatus>("fund_selection").unwrap(),
            AlocacaoStatus::FundSelection
        );
        let err = parse_target::<CedenteStatus>("fund_selection").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnknownStatus {
                pipeline: PipelineKind::Cedentes,
                ..
            }
        ));
    }

    #[test]
    fn connect_uses_config() {
        let config = FidcConfig {
            api_url: "http://backend:8080/api/".into(),
            ..FidcConfig::default()
        };
        let workflow = connect(&config).unwrap();
        assert_eq!(workflow.api().base_url(), "http://backend:8080/api");
    }

    #[test]
    fn demo_runs_without_backend() {
        run_demo();
    }
}
