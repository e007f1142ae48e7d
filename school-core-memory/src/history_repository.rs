use async_trait::async_trait;
use parking_lot::RwLock;
use school_core_api::SortDirection;
use school_core_db::models::HistoryRecordModel;
use school_core_db::repository::{
    AppendHistory, HistoryFilter, LoadHistory, Page, PageRequest, RepositoryError,
};

use crate::error::MemoryStoreError;

/// Append-only history log kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryHistoryRepository {
    records: RwLock<Vec<HistoryRecordModel>>,
}

impl MemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl AppendHistory for MemoryHistoryRepository {
    async fn append_history(
        &self,
        record: HistoryRecordModel,
    ) -> Result<HistoryRecordModel, RepositoryError> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.id == record.id) {
            return Err(Box::new(MemoryStoreError::DuplicateHistory(record.id)));
        }
        records.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl LoadHistory for MemoryHistoryRepository {
    async fn load_history(
        &self,
        filter: &HistoryFilter,
        direction: SortDirection,
        page: PageRequest,
    ) -> Result<Page<HistoryRecordModel>, RepositoryError> {
        let mut matched: Vec<HistoryRecordModel> = self
            .records
            .read()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        // Equal timestamps keep append order; descending reverses it too.
        matched.sort_by_key(|r| r.timestamp);
        if direction == SortDirection::Desc {
            matched.reverse();
        }
        Ok(Page::from_full(matched, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_core_api::{ActorRef, EntityType, HistoryAction};
    use school_core_db::models::DeletableModel;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_append_then_load_by_item() {
        let repo = MemoryHistoryRepository::new();
        let actor = ActorRef::new(Uuid::new_v4(), "Registrar");
        let student = DeletableModel::new(EntityType::Student, json!({"admissionNumber": "A1"}));
        let other = DeletableModel::new(EntityType::Student, json!({"admissionNumber": "A2"}));

        for (row, action) in [
            (&student, HistoryAction::Deleted),
            (&other, HistoryAction::Deleted),
            (&student, HistoryAction::Restored),
        ] {
            let record = HistoryRecordModel::for_transition(row, action, &actor).unwrap();
            repo.append_history(record).await.unwrap();
        }

        let page = repo
            .load_history(
                &HistoryFilter::item(student.id),
                SortDirection::Asc,
                PageRequest::default(),
            )
            .await
            .unwrap();
        let actions: Vec<HistoryAction> = page.items.iter().map(|r| r.action).collect();
        assert_eq!(actions, vec![HistoryAction::Deleted, HistoryAction::Restored]);
        assert_eq!(repo.len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_record_is_rejected() {
        let repo = MemoryHistoryRepository::new();
        let row = DeletableModel::new(EntityType::Fee, json!({}));
        let record = HistoryRecordModel::for_transition(
            &row,
            HistoryAction::Deleted,
            &ActorRef::new(Uuid::new_v4(), "Admin"),
        )
        .unwrap();
        repo.append_history(record.clone()).await.unwrap();
        assert!(repo.append_history(record).await.is_err());
    }
}
