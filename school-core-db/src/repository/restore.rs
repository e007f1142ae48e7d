use async_trait::async_trait;
use school_core_api::EntityType;
use uuid::Uuid;

use super::transition::TransitionOutcome;
use super::RepositoryError;

/// Repository trait for bringing a soft-deleted row back
///
/// Clears `is_deleted`, `deleted_at` and `deleted_by` in one conditional
/// write. Restoring never cascades to linked rows.
#[async_trait]
pub trait Restore: Send + Sync {
    /// Restore one soft-deleted row
    ///
    /// # Arguments
    /// * `entity_type` - The collection the row belongs to
    /// * `id` - The UUID of the row
    ///
    /// # Returns
    /// * `Ok(TransitionOutcome::Applied(pre_state))` - The row is active again
    /// * `Ok(TransitionOutcome::NotFound | NotDeleted | Conflict)` - Nothing changed
    /// * `Err` - An error if the update could not be executed
    async fn restore(
        &self,
        entity_type: EntityType,
        id: Uuid,
    ) -> Result<TransitionOutcome, RepositoryError>;
}
