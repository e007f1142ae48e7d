//! In-process storage backend.
//!
//! Honors the same contracts as the Postgres backend: conditional state
//! transitions under a single write lock, and natural keys unique among
//! active rows only.

pub mod entity_repository;
pub mod error;
pub mod history_repository;

pub use entity_repository::MemoryEntityRepository;
pub use error::MemoryStoreError;
pub use history_repository::MemoryHistoryRepository;
