use async_trait::async_trait;
use chrono::{DateTime, Utc};
use school_core_api::{ActorRef, EntityType};
use uuid::Uuid;

use super::RepositoryError;
use crate::models::DeletableModel;

/// Repository trait for flagging a single active row as deleted
///
/// Implementations apply the change with one conditional write ("id and type
/// match and the row is active") so a row already in the recycle bin is never
/// touched twice.
#[async_trait]
pub trait SoftDelete: Send + Sync {
    /// Mark an active row as deleted
    ///
    /// # Arguments
    /// * `entity_type` - The collection the row belongs to
    /// * `id` - The UUID of the row
    /// * `actor` - Who performed the deletion
    /// * `at` - Deletion timestamp to store in `deleted_at`
    ///
    /// # Returns
    /// * `Ok(Some(DeletableModel))` - The row as it was before the update
    /// * `Ok(None)` - No active row matched (missing or already deleted)
    /// * `Err` - An error if the update could not be executed
    async fn soft_delete(
        &self,
        entity_type: EntityType,
        id: Uuid,
        actor: &ActorRef,
        at: DateTime<Utc>,
    ) -> Result<Option<DeletableModel>, RepositoryError>;
}
