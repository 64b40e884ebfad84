use super::entity::{PendingItemsRequest, PipelineEntity};
use super::status::PipelineStatus;
use crate::error::PipelineError;

/// Maintains the outstanding checklist items of an entity.
///
/// Every mutation is checked against the checklist of the entity's current
/// status, so a stale UI cannot write items from another status.
pub struct PendingItemTracker;

impl PendingItemTracker {
    /// Remove `item` from the pending set. Returns whether anything changed.
    pub fn mark_item_complete<S: PipelineStatus>(
        entity: &mut PipelineEntity<S>,
        item: &str,
    ) -> Result<bool, PipelineError> {
        Self::ensure_in_checklist(entity, item)?;
        let before = entity.pending_items.len();
        entity.pending_items.retain(|p| p != item);
        Ok(entity.pending_items.len() != before)
    }

    /// Put `item` back into the pending set, keeping checklist order.
    /// Returns whether anything changed.
    pub fn mark_item_incomplete<S: PipelineStatus>(
        entity: &mut PipelineEntity<S>,
        item: &str,
    ) -> Result<bool, PipelineError> {
        Self::ensure_in_checklist(entity, item)?;
        if entity.pending_items.iter().any(|p| p == item) {
            return Ok(false);
        }
        let pending = &entity.pending_items;
        let rebuilt: Vec<String> = entity
            .status
            .checklist()
            .iter()
            .filter(|c| **c == item || pending.iter().any(|p| p == *c))
            .map(|c| c.to_string())
            .collect();
        entity.pending_items = rebuilt;
        Ok(true)
    }

    pub fn pending_count<S: PipelineStatus>(entity: &PipelineEntity<S>) -> usize {
        entity.pending_items.len()
    }

    pub fn is_ready_to_advance<S: PipelineStatus>(entity: &PipelineEntity<S>) -> bool {
        Self::pending_count(entity) == 0
    }

    /// Resolve an item selector against the current checklist: either a
    /// 1-based position or the exact item text.
    pub fn resolve_item<S: PipelineStatus>(
        entity: &PipelineEntity<S>,
        selector: &str,
    ) -> Result<&'static str, PipelineError> {
        let checklist = entity.status.checklist();
        let found = match selector.trim().parse::<usize>() {
            Ok(n) if n >= 1 => checklist.get(n - 1).copied(),
            Ok(_) => None,
            Err(_) => checklist.iter().copied().find(|c| *c == selector),
        };
        found.ok_or_else(|| Self::unknown_item(entity, selector))
    }

    pub fn pending_update<S: PipelineStatus>(entity: &PipelineEntity<S>) -> PendingItemsRequest {
        PendingItemsRequest {
            entity_id: entity.id.clone(),
            pending_items: entity.pending_items.clone(),
        }
    }

    fn ensure_in_checklist<S: PipelineStatus>(
        entity: &PipelineEntity<S>,
        item: &str,
    ) -> Result<(), PipelineError> {
        if entity.status.checklist().contains(&item) {
            Ok(())
        } else {
            Err(Self::unknown_item(entity, item))
        }
    }

    fn unknown_item<S: PipelineStatus>(entity: &PipelineEntity<S>, item: &str) -> PipelineError {
        PipelineError::UnknownChecklistItem {
            entity_id: entity.id.clone(),
            status: entity.status.key().to_string(),
            item: item.to_string(),
        }
    }
}
