pub mod actor;
pub mod batch;
pub mod entity;
pub mod entity_type;
pub mod history;
pub mod history_action;
pub mod pagination;
pub mod query;
pub mod recycle_bin;

pub use actor::*;
pub use batch::*;
pub use entity::*;
pub use entity_type::*;
pub use history::*;
pub use history_action::*;
pub use pagination::*;
pub use query::*;
pub use recycle_bin::*;
