pub mod append_history;
pub mod create_batch;
pub mod filter;
pub mod find;
pub mod hard_delete;
pub mod load_batch;
pub mod load_history;
pub mod pagination;
pub mod restore;
pub mod soft_delete;
pub mod store;
pub mod transition;

// Re-exports
pub use append_history::*;
pub use create_batch::*;
pub use filter::*;
pub use find::*;
pub use hard_delete::*;
pub use load_batch::*;
pub use load_history::*;
pub use pagination::*;
pub use restore::*;
pub use soft_delete::*;
pub use store::*;
pub use transition::*;

/// Error type shared by every repository trait.
pub type RepositoryError = Box<dyn std::error::Error + Send + Sync>;
