use async_trait::async_trait;
use school_core_api::EntityType;
use uuid::Uuid;

use super::transition::TransitionOutcome;
use super::RepositoryError;

/// Repository trait for physically removing a soft-deleted row
///
/// Only rows currently in the recycle bin are removed; an active row is
/// reported as `NotDeleted` and left alone.
#[async_trait]
pub trait HardDelete: Send + Sync {
    /// Permanently delete one soft-deleted row
    ///
    /// # Arguments
    /// * `entity_type` - The collection the row belongs to
    /// * `id` - The UUID of the row
    ///
    /// # Returns
    /// * `Ok(TransitionOutcome::Applied(pre_state))` - The row is gone
    /// * `Ok(TransitionOutcome::NotFound | NotDeleted)` - Nothing changed
    /// * `Err` - An error if the delete could not be executed
    async fn hard_delete(
        &self,
        entity_type: EntityType,
        id: Uuid,
    ) -> Result<TransitionOutcome, RepositoryError>;
}
