use chrono::Utc;
use tracing::{info, warn};

use crate::api::PipelineApi;
use crate::error::PipelineError;
use crate::pipeline::{
    Entity, EntityRecord, GatingPolicy, PendingItemTracker, PipelineEntity, PipelineKind, PipelineStatus,
    TransitionRequest, TransitionValidator,
};

/// Runs pipeline operations against the backend with optimistic updates.
///
/// Every mutation is validated and applied locally first; if persisting it
/// fails, the entity is restored from a snapshot taken before the change.
pub struct PipelineWorkflow<A> {
    api: A,
    validator: TransitionValidator,
}

impl<A: PipelineApi> PipelineWorkflow<A> {
    pub fn new(api: A, policy: GatingPolicy) -> Self {
        Self {
            api,
            validator: TransitionValidator::new(policy),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn validator(&self) -> &TransitionValidator {
        &self.validator
    }

    /// Fetch the raw records of a pipeline.
    pub async fn load_records(&self, kind: PipelineKind) -> Result<Vec<EntityRecord>, PipelineError> {
        Ok(self.api.fetch_entities(kind).await?)
    }

    async fn find_record(&self, kind: PipelineKind, id: &str) -> Result<EntityRecord, PipelineError> {
        self.load_records(kind)
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| PipelineError::EntityNotFound(id.to_string()))
    }

    /// Fetch a single entity by id, typed to its pipeline's status enum.
    pub async fn find<S: PipelineStatus>(&self, id: &str) -> Result<PipelineEntity<S>, PipelineError> {
        PipelineEntity::from_record(self.find_record(S::KIND, id).await?)
    }

    /// Fetch a single entity by id from any pipeline, for read-only use.
    pub async fn find_entity(&self, kind: PipelineKind, id: &str) -> Result<Entity, PipelineError> {
        Entity::from_record(kind, self.find_record(kind, id).await?)
    }

    /// Move `entity` to `target` and persist the change.
    pub async fn advance<S: PipelineStatus>(
        &self,
        entity: &mut PipelineEntity<S>,
        target: S,
    ) -> Result<TransitionRequest, PipelineError> {
        let snapshot = entity.clone();
        let req = self.validator.apply(entity, target, Utc::now())?;

        if let Err(e) = self.api.persist_transition(S::KIND, &req).await {
            warn!(
                entity_id = %entity.id,
                from = %snapshot.status,
                to = %target,
                "transition not persisted, restoring local state: {e}"
            );
            *entity = snapshot;
            return Err(e.into());
        }

        info!(
            entity_id = %entity.id,
            from = %snapshot.status,
            to = %target,
            pending = entity.pending_items.len(),
            "transition applied"
        );
        Ok(req)
    }

    /// Mark a checklist item as done and persist the pending set.
    /// Returns whether the pending set changed.
    pub async fn complete_item<S: PipelineStatus>(
        &self,
        entity: &mut PipelineEntity<S>,
        item: &str,
    ) -> Result<bool, PipelineError> {
        self.update_item(entity, item, PendingItemTracker::mark_item_complete)
            .await
    }

    /// Reopen a checklist item and persist the pending set.
    /// Returns whether the pending set changed.
    pub async fn reopen_item<S: PipelineStatus>(
        &self,
        entity: &mut PipelineEntity<S>,
        item: &str,
    ) -> Result<bool, PipelineError> {
        self.update_item(entity, item, PendingItemTracker::mark_item_incomplete)
            .await
    }

    async fn update_item<S: PipelineStatus>(
        &self,
        entity: &mut PipelineEntity<S>,
        item: &str,
        mutate: fn(&mut PipelineEntity<S>, &str) -> Result<bool, PipelineError>,
    ) -> Result<bool, PipelineError> {
        let snapshot = entity.clone();
        let changed = match mutate(entity, item) {
            Ok(changed) => changed,
            Err(e) => {
                warn!(entity_id = %entity.id, status = %entity.status, "{e}");
                return Err(e);
            }
        };
        if !changed {
            return Ok(false);
        }

        let req = PendingItemTracker::pending_update(entity);
        if let Err(e) = self.api.persist_pending_items(S::KIND, &req).await {
            warn!(entity_id = %entity.id, "pending items not persisted, restoring local state: {e}");
            *entity = snapshot;
            return Err(e.into());
        }

        info!(
            entity_id = %entity.id,
            pending = entity.pending_items.len(),
            "pending items updated"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::api::ApiError;
    use crate::pipeline::{AlocacaoStatus, CedenteStatus, PendingItemsRequest};

    #[derive(Default)]
    struct MockApi {
        records: Vec<EntityRecord>,
        fail_writes: bool,
        transitions: Mutex<Vec<TransitionRequest>>,
        pending_updates: Mutex<Vec<PendingItemsRequest>>,
    }

    impl MockApi {
        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Default::default()
            }
        }

        fn with_records(records: Vec<EntityRecord>) -> Self {
            Self {
                records,
                ..Default::default()
            }
        }

        fn write_result(&self) -> Result<(), ApiError> {
            if self.fail_writes {
                Err(ApiError::Status {
                    status: 500,
                    message: "mock error".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    impl PipelineApi for MockApi {
        async fn fetch_entities(&self, _kind: PipelineKind) -> Result<Vec<EntityRecord>, ApiError> {
            Ok(self.records.clone())
        }

        async fn persist_transition(
            &self,
            _kind: PipelineKind,
            req: &TransitionRequest,
        ) -> Result<(), ApiError> {
            self.transitions.lock().unwrap().push(req.clone());
            self.write_result()
        }

        async fn persist_pending_items(
            &self,
            _kind: PipelineKind,
            req: &PendingItemsRequest,
        ) -> Result<(), ApiError> {
            self.pending_updates.lock().unwrap().push(req.clone());
            self.write_result()
        }
    }

    fn ready(status: AlocacaoStatus) -> PipelineEntity<AlocacaoStatus> {
        let mut entity = PipelineEntity::new(status, Some("ana".into()));
        entity.pending_items.clear();
        entity.days_in_status = 9;
        entity
    }

    #[tokio::test]
    async fn advance_persists_and_resets() {
        let workflow = PipelineWorkflow::new(MockApi::default(), GatingPolicy::Strict);
        let mut entity = ready(AlocacaoStatus::Lead);

        let req = workflow.advance(&mut entity, AlocacaoStatus::FundSelection).await.unwrap();

        assert_eq!(req.new_status, "fund_selection");
        assert_eq!(entity.status, AlocacaoStatus::FundSelection);
        assert_eq!(entity.days_in_status, 0);
        assert_eq!(entity.pending_items.len(), 3);
        assert_eq!(workflow.api().transitions.lock().unwrap().as_slice(), &[req]);
    }

    #[tokio::test]
    async fn advance_denied_never_calls_api() {
        let workflow = PipelineWorkflow::new(MockApi::default(), GatingPolicy::Strict);
        let mut entity = PipelineEntity::new(AlocacaoStatus::Lead, None);

        let err = workflow
            .advance(&mut entity, AlocacaoStatus::FundSelection)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::InvalidTransition { .. }));
        assert!(workflow.api().transitions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn advance_failure_restores_snapshot() {
        let workflow = PipelineWorkflow::new(MockApi::failing(), GatingPolicy::Strict);
        let mut entity = ready(AlocacaoStatus::Lead);
        let before = entity.clone();

        let err = workflow
            .advance(&mut entity, AlocacaoStatus::FundSelection)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Api(_)));
        assert_eq!(entity, before);
    }

    #[tokio::test]
    async fn complete_item_persists_pending_set() {
        let workflow = PipelineWorkflow::new(MockApi::default(), GatingPolicy::Strict);
        let mut entity = PipelineEntity::new(CedenteStatus::Lead, None);
        let item = CedenteStatus::Lead.checklist()[0];

        assert!(workflow.complete_item(&mut entity, item).await.unwrap());
        assert!(!workflow.complete_item(&mut entity, item).await.unwrap());

        let updates = workflow.api().pending_updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].pending_items, vec![CedenteStatus::Lead.checklist()[1].to_string()]);
    }

    #[tokio::test]
    async fn unknown_item_is_not_persisted() {
        let workflow = PipelineWorkflow::new(MockApi::default(), GatingPolicy::Strict);
        let mut entity = PipelineEntity::new(CedenteStatus::Lead, None);

        let err = workflow.complete_item(&mut entity, "not-a-real-item").await.unwrap_err();

        assert!(matches!(err, PipelineError::UnknownChecklistItem { .. }));
        assert!(workflow.api().pending_updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reopen_failure_restores_snapshot() {
        let workflow = PipelineWorkflow::new(MockApi::failing(), GatingPolicy::Strict);
        let mut entity = ready(AlocacaoStatus::TermSheet);
        let before = entity.clone();
        let item = AlocacaoStatus::TermSheet.checklist()[1];

        assert!(workflow.reopen_item(&mut entity, item).await.is_err());
        assert_eq!(entity, before);
    }

    #[tokio::test]
    async fn find_resolves_typed_and_untyped_entities() {
        let records = vec![
            EntityRecord {
                id: "aloc-1".into(),
                status: "lead".into(),
                assigned_to: None,
                pending_items: vec![],
                days_in_status: 1,
            },
            EntityRecord {
                id: "aloc-2".into(),
                status: "em_revisao".into(),
                assigned_to: None,
                pending_items: vec![],
                days_in_status: 1,
            },
        ];
        let workflow = PipelineWorkflow::new(MockApi::with_records(records), GatingPolicy::Strict);

        let entity = workflow.find_entity(PipelineKind::Alocacao, "aloc-1").await.unwrap();
        assert_eq!(entity.kind(), PipelineKind::Alocacao);
        assert_eq!(entity.status_key(), "lead");
        assert!(matches!(
            workflow.find_entity(PipelineKind::Alocacao, "aloc-2").await,
            Err(PipelineError::UnknownStatus { .. })
        ));

        let found = workflow.find::<AlocacaoStatus>("aloc-1").await.unwrap();
        assert_eq!(found.status, AlocacaoStatus::Lead);
        assert!(matches!(
            workflow.find::<AlocacaoStatus>("aloc-9").await,
            Err(PipelineError::EntityNotFound(_))
        ));
    }
}
