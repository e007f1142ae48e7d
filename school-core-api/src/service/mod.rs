use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    ActorRef, BatchOutcome, BatchRequest, EntityDocument, EntityListQuery, EntityType,
    HistoryItem, HistoryQuery, Paginated, RecycleBinItem, RecycleBinQuery,
};
use crate::error::ApiResult;

/// Contract of the soft-delete, recycle-bin and history subsystem.
///
/// Every write that changes an entity's state appends exactly one history
/// record, after the state change is persisted.
#[async_trait]
pub trait RecycleBinService: Send + Sync {
    /// Load one active entity. Soft-deleted rows resolve to `NotFound`.
    async fn get_entity(&self, entity_type: EntityType, id: Uuid) -> ApiResult<EntityDocument>;

    /// List entities of a type; soft-deleted rows only with `includeDeleted=true`.
    async fn list_entities(
        &self,
        entity_type: EntityType,
        query: &EntityListQuery,
    ) -> ApiResult<Paginated<EntityDocument>>;

    /// Mark an active entity as deleted. Fails with `NotFound` when no active row matches.
    async fn soft_delete(
        &self,
        entity_type: EntityType,
        id: Uuid,
        actor: &ActorRef,
    ) -> ApiResult<EntityDocument>;

    /// Paginated view over the soft-deleted rows of one type.
    async fn list_deleted(&self, query: &RecycleBinQuery) -> ApiResult<Paginated<RecycleBinItem>>;

    /// Clear the deleted flags of each id; per-id failures are collected.
    async fn restore(&self, request: &BatchRequest, actor: &ActorRef) -> ApiResult<BatchOutcome>;

    /// Physically remove each soft-deleted id; per-id failures are collected.
    async fn hard_delete(&self, request: &BatchRequest, actor: &ActorRef)
        -> ApiResult<BatchOutcome>;

    /// Read-only query over the audit history.
    async fn list_history(&self, query: &HistoryQuery) -> ApiResult<Paginated<HistoryItem>>;
}
