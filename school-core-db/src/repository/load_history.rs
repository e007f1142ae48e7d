use async_trait::async_trait;
use school_core_api::{DateRange, HistoryAction, SortDirection, TypeSelector};
use uuid::Uuid;

use super::pagination::{Page, PageRequest};
use super::RepositoryError;
use crate::models::HistoryRecordModel;

/// Filter over the history log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub types: TypeSelector,
    pub item_id: Option<Uuid>,
    pub action: Option<HistoryAction>,
    /// Matched case-insensitively against the actor's name or email.
    pub search: Option<String>,
    pub range: DateRange,
}

impl HistoryFilter {
    pub fn item(item_id: Uuid) -> Self {
        Self {
            item_id: Some(item_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &HistoryRecordModel) -> bool {
        self.types.matches(record.entity_type)
            && self.item_id.map_or(true, |id| record.item_id == id)
            && self.action.map_or(true, |a| record.action == a)
            && self.range.contains(record.timestamp)
            && self
                .search
                .as_deref()
                .map_or(true, |s| record.performed_by.matches_search(&s.to_lowercase()))
    }
}

/// Repository trait for reading the history log with pagination
///
/// # Example
/// ```ignore
/// let page = repo
///     .load_history(&HistoryFilter::item(student_id), SortDirection::Asc, PageRequest::new(20, 0))
///     .await?;
/// println!("Page {} of {}", page.page_number(), page.total_pages());
/// ```
#[async_trait]
pub trait LoadHistory: Send + Sync {
    /// Load history records ordered by timestamp
    ///
    /// # Arguments
    /// * `filter` - Type, item, action, actor and time-range constraints
    /// * `direction` - Timestamp sort direction
    /// * `page` - The pagination parameters (limit and offset)
    ///
    /// # Returns
    /// * `Ok(Page<HistoryRecordModel>)` - A page of matching records
    /// * `Err` - An error if the records could not be loaded
    async fn load_history(
        &self,
        filter: &HistoryFilter,
        direction: SortDirection,
        page: PageRequest,
    ) -> Result<Page<HistoryRecordModel>, RepositoryError>;
}
