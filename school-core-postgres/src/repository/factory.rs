use std::sync::Arc;

use sqlx::PgPool;

use super::{
    entity_repository::EntityRepositoryImpl, history_repository::HistoryRepositoryImpl,
};

/// Factory for the repositories of the recycle-bin module
///
/// Holds nothing but the pool; every repository built from it shares that pool.
/// This should be used as a singleton throughout the application.
pub struct SchoolRepoFactory {
    pool: PgPool,
}

impl SchoolRepoFactory {
    /// Create a new SchoolRepoFactory singleton
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }

    /// Build an EntityRepository over the shared pool
    pub fn build_entity_repo(&self) -> Arc<EntityRepositoryImpl> {
        Arc::new(EntityRepositoryImpl::new(self.pool.clone()))
    }

    /// Build a HistoryRepository over the shared pool
    pub fn build_history_repo(&self) -> Arc<HistoryRepositoryImpl> {
        Arc::new(HistoryRepositoryImpl::new(self.pool.clone()))
    }

    /// Build all repositories of the module
    pub fn build_all_repos(&self) -> SchoolRepositories {
        SchoolRepositories {
            entity_repository: self.build_entity_repo(),
            history_repository: self.build_history_repo(),
        }
    }
}

/// Container for all recycle-bin repositories
pub struct SchoolRepositories {
    pub entity_repository: Arc<EntityRepositoryImpl>,
    pub history_repository: Arc<HistoryRepositoryImpl>,
}
