//! Backend wiring: turns the `[database]` and `[service]` tables into a
//! ready [`RecycleBinService`].

use anyhow::{Context, Result};
use school_core_api::RecycleBinService;
use school_core_memory::{MemoryEntityRepository, MemoryHistoryRepository};
use school_core_postgres::PostgresRepositories;
use school_core_service::{RecycleBinServiceImpl, ServiceConfig};
use std::sync::Arc;

use crate::config::{AppConfig, DatabaseConfig, StorageBackend};

pub async fn build_service(config: &AppConfig) -> Result<Arc<dyn RecycleBinService>> {
    match config.database.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory backend, data is lost on restart");
            Ok(memory_service(config.service.clone()))
        }
        StorageBackend::Postgres => postgres_service(&config.database, config.service.clone()).await,
    }
}

pub fn memory_service(service_config: ServiceConfig) -> Arc<dyn RecycleBinService> {
    Arc::new(RecycleBinServiceImpl::new(
        Arc::new(MemoryEntityRepository::new()),
        Arc::new(MemoryHistoryRepository::new()),
        service_config,
    ))
}

async fn postgres_service(
    database: &DatabaseConfig,
    service_config: ServiceConfig,
) -> Result<Arc<dyn RecycleBinService>> {
    let url = database
        .url
        .as_deref()
        .context("database.url is required for the postgres backend")?;

    let postgres = PostgresRepositories::connect(url, database.max_connections)
        .await
        .context("failed to connect to postgres")?;
    tracing::info!(
        max_connections = database.max_connections,
        "Postgres pool initialized"
    );

    if database.run_migrations {
        postgres
            .migrate()
            .await
            .context("failed to apply database migrations")?;
    }

    let repos = postgres.create_all_repositories();
    Ok(Arc::new(RecycleBinServiceImpl::new(
        repos.entity_repository,
        repos.history_repository,
        service_config,
    )))
}
