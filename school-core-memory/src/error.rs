use school_core_api::EntityType;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("row {0} already exists")]
    DuplicateId(Uuid),

    #[error("an active {entity_type} already holds natural key '{key}'")]
    NaturalKeyTaken { entity_type: EntityType, key: String },

    #[error("history record {0} already exists")]
    DuplicateHistory(Uuid),
}
