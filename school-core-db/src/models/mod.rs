pub mod deletable;
pub mod display;
pub mod history_record;
pub mod identifiable;
pub mod natural_key;
pub mod soft_deletable;

// Re-exports
pub use deletable::*;
pub use display::*;
pub use history_record::*;
pub use identifiable::*;
pub use natural_key::*;
pub use soft_deletable::*;
