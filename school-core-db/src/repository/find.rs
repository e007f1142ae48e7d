use async_trait::async_trait;
use school_core_api::EntityType;
use uuid::Uuid;

use super::filter::{with_active_only, FindOptions, RecordFilter, RecordOrder};
use super::pagination::{Page, PageRequest};
use super::RepositoryError;
use crate::models::DeletableModel;

/// Repository trait for filtered, ordered and paginated reads of one collection
///
/// `find` executes the filter exactly as given. Normal reads pass it through
/// [`with_active_only`] first; the recycle bin asks for deleted rows
/// explicitly.
///
/// # Example
/// ```ignore
/// let filter = with_active_only(RecordFilter::new(EntityType::Student), FindOptions::default());
/// let page = repo.find(&filter, RecordOrder::default(), PageRequest::new(20, 0)).await?;
/// ```
#[async_trait]
pub trait Find: Send + Sync {
    /// Find rows matching a filter
    ///
    /// # Arguments
    /// * `filter` - The record filter; `is_deleted: None` leaves the flag unconstrained
    /// * `order` - Sort key and direction
    /// * `page` - The pagination parameters (limit and offset)
    ///
    /// # Returns
    /// * `Ok(Page<DeletableModel>)` - The requested page plus the total match count
    /// * `Err` - An error if the query could not be executed
    async fn find(
        &self,
        filter: &RecordFilter,
        order: RecordOrder,
        page: PageRequest,
    ) -> Result<Page<DeletableModel>, RepositoryError>;

    /// Find a single row by id, hiding soft-deleted rows unless `opts` says otherwise
    async fn find_by_id(
        &self,
        entity_type: EntityType,
        id: Uuid,
        opts: FindOptions,
    ) -> Result<Option<DeletableModel>, RepositoryError> {
        let filter = with_active_only(RecordFilter::new(entity_type).id(id), opts);
        let page = self
            .find(&filter, RecordOrder::default(), PageRequest::new(1, 0))
            .await?;
        Ok(page.items.into_iter().next())
    }
}
