pub mod entity_repository;
pub mod factory;
pub mod history_repository;

pub use factory::{SchoolRepoFactory, SchoolRepositories};
