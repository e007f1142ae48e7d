use async_trait::async_trait;

use super::RepositoryError;
use crate::models::HistoryRecordModel;

/// Repository trait for the append-only history log
///
/// Records are immutable once appended; no update or delete exists.
#[async_trait]
pub trait AppendHistory: Send + Sync {
    /// Append one history record
    ///
    /// # Arguments
    /// * `record` - The record to store, hash already computed
    ///
    /// # Returns
    /// * `Ok(HistoryRecordModel)` - The stored record
    /// * `Err` - An error if the insert could not be executed
    async fn append_history(
        &self,
        record: HistoryRecordModel,
    ) -> Result<HistoryRecordModel, RepositoryError>;
}
