//! Persistence models and repository contracts for soft-deletable school
//! entities and their audit history. Backends live in sibling crates.

pub mod models;
pub mod repository;
pub mod utils;

pub use models::*;
pub use repository::*;
