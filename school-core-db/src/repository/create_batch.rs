use async_trait::async_trait;

use super::RepositoryError;
use crate::models::identifiable::Identifiable;

/// Generic repository trait for creating multiple entities in a batch
///
/// All creates are performed within a single transaction for atomicity.
/// A natural-key collision with an active row fails the whole batch.
///
/// # Type Parameters
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl CreateBatch<DeletableModel> for EntityRepositoryImpl {
///     async fn create_batch(&self, items: Vec<DeletableModel>) -> Result<Vec<DeletableModel>, RepositoryError> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait CreateBatch<T: Identifiable>: Send + Sync {
    /// Save multiple items in a single transaction
    ///
    /// # Arguments
    /// * `items` - A vector of entities to create
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The created entities as stored
    /// * `Err` - An error if the transaction could not be executed
    async fn create_batch(&self, items: Vec<T>) -> Result<Vec<T>, RepositoryError>;
}
