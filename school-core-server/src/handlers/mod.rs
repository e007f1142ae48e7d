//! HTTP handlers.

pub mod entities;
pub mod health;
pub mod history;
pub mod recycle_bin;

pub use entities::{get_entity, list_entities, soft_delete_entity};
pub use health::health_check;
pub use history::list_history;
pub use recycle_bin::{hard_delete, list_deleted, restore};
