use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use school_core_api::{ActorRef, EntityType};
use school_core_db::models::{DeletableModel, SoftDeletable};
use school_core_db::repository::{
    CreateBatch, Find, HardDelete, LoadBatch, Page, PageRequest, RecordFilter, RecordOrder,
    RepositoryError, Restore, SoftDelete, TransitionOutcome,
};
use uuid::Uuid;

use crate::error::MemoryStoreError;

/// Every deletable collection, keyed by row id.
///
/// All checks and the write they guard happen under one write lock, which is
/// what makes each transition atomic.
#[derive(Debug, Default)]
pub struct MemoryEntityRepository {
    rows: RwLock<HashMap<Uuid, DeletableModel>>,
}

impl MemoryEntityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn active_key_holder(
        rows: &HashMap<Uuid, DeletableModel>,
        entity_type: EntityType,
        key: &str,
        except: Uuid,
    ) -> Option<Uuid> {
        rows.values()
            .find(|row| {
                row.id != except
                    && row.entity_type == entity_type
                    && !row.is_deleted
                    && row.natural_key.as_deref() == Some(key)
            })
            .map(|row| row.id)
    }
}

#[async_trait]
impl Find for MemoryEntityRepository {
    async fn find(
        &self,
        filter: &RecordFilter,
        order: RecordOrder,
        page: PageRequest,
    ) -> Result<Page<DeletableModel>, RepositoryError> {
        let mut matched: Vec<DeletableModel> = self
            .rows
            .read()
            .values()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();
        order.sort(&mut matched);
        Ok(Page::from_full(matched, page))
    }
}

#[async_trait]
impl LoadBatch<DeletableModel> for MemoryEntityRepository {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<DeletableModel>>, RepositoryError> {
        let rows = self.rows.read();
        Ok(ids.iter().map(|id| rows.get(id).cloned()).collect())
    }
}

#[async_trait]
impl CreateBatch<DeletableModel> for MemoryEntityRepository {
    async fn create_batch(
        &self,
        items: Vec<DeletableModel>,
    ) -> Result<Vec<DeletableModel>, RepositoryError> {
        let mut rows = self.rows.write();

        // Validate the whole batch first so a failure leaves nothing behind.
        let mut staged: HashMap<Uuid, &DeletableModel> = HashMap::new();
        for item in &items {
            if rows.contains_key(&item.id) || staged.contains_key(&item.id) {
                return Err(Box::new(MemoryStoreError::DuplicateId(item.id)));
            }
            if let (false, Some(key)) = (item.is_deleted, item.natural_key.as_deref()) {
                let staged_holder = staged.values().any(|other| {
                    other.entity_type == item.entity_type
                        && !other.is_deleted
                        && other.natural_key.as_deref() == Some(key)
                });
                if staged_holder
                    || Self::active_key_holder(&rows, item.entity_type, key, item.id).is_some()
                {
                    return Err(Box::new(MemoryStoreError::NaturalKeyTaken {
                        entity_type: item.entity_type,
                        key: key.to_string(),
                    }));
                }
            }
            staged.insert(item.id, item);
        }

        for item in &items {
            rows.insert(item.id, item.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl SoftDelete for MemoryEntityRepository {
    async fn soft_delete(
        &self,
        entity_type: EntityType,
        id: Uuid,
        actor: &ActorRef,
        at: DateTime<Utc>,
    ) -> Result<Option<DeletableModel>, RepositoryError> {
        let mut rows = self.rows.write();
        match rows.get_mut(&id) {
            Some(row) if row.entity_type == entity_type && !row.is_deleted => {
                let pre_state = row.clone();
                row.mark_deleted(actor.clone(), at);
                Ok(Some(pre_state))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl Restore for MemoryEntityRepository {
    async fn restore(
        &self,
        entity_type: EntityType,
        id: Uuid,
    ) -> Result<TransitionOutcome, RepositoryError> {
        let mut rows = self.rows.write();
        let (pre_state, key) = match rows.get(&id) {
            Some(row) if row.entity_type != entity_type => return Ok(TransitionOutcome::NotFound),
            Some(row) if !row.is_deleted => return Ok(TransitionOutcome::NotDeleted),
            Some(row) => (row.clone(), row.natural_key.clone()),
            None => return Ok(TransitionOutcome::NotFound),
        };

        if let Some(key) = key.as_deref() {
            if let Some(holder) = Self::active_key_holder(&rows, entity_type, key, id) {
                tracing::debug!(%id, %holder, key, "restore blocked by active natural key holder");
                return Ok(TransitionOutcome::Conflict);
            }
        }

        if let Some(row) = rows.get_mut(&id) {
            row.clear_deleted();
        }
        Ok(TransitionOutcome::Applied(pre_state))
    }
}

#[async_trait]
impl HardDelete for MemoryEntityRepository {
    async fn hard_delete(
        &self,
        entity_type: EntityType,
        id: Uuid,
    ) -> Result<TransitionOutcome, RepositoryError> {
        let mut rows = self.rows.write();
        let removable = match rows.get(&id) {
            Some(row) if row.entity_type != entity_type => return Ok(TransitionOutcome::NotFound),
            Some(row) if !row.is_deleted => return Ok(TransitionOutcome::NotDeleted),
            Some(_) => true,
            None => false,
        };
        if !removable {
            return Ok(TransitionOutcome::NotFound);
        }
        Ok(rows
            .remove(&id)
            .map_or(TransitionOutcome::NotFound, TransitionOutcome::Applied))
    }
}
