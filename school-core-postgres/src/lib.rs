//! Postgres backend for the school recycle bin, built on sqlx.

pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use postgres_repositories::PostgresRepositories;
pub use repository::entity_repository::EntityRepositoryImpl;
pub use repository::factory::{SchoolRepoFactory, SchoolRepositories};
pub use repository::history_repository::HistoryRepositoryImpl;

/// Schema migrations embedded at compile time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[cfg(test)]
pub mod test_helper;
