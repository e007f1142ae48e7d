//! Configuration types of the server binary.
//!
//! Layering: built-in defaults, then the optional TOML file, then environment
//! variables prefixed `SCHOOL_CORE_` with `__` separating nested keys
//! (`SCHOOL_CORE_DATABASE__URL` sets `database.url`).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use school_core_service::ServiceConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of every configuration environment variable.
pub const ENV_PREFIX: &str = "SCHOOL_CORE_";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Provider chain for `config_path`. A missing file is not an error.
    pub fn figment(config_path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if config_path.exists() {
            figment = figment.merge(Toml::file(config_path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(config_path: &Path) -> Result<Self, figment::Error> {
        Self::figment(config_path).extract()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Where entities and history are stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// In-process storage; everything is lost on restart.
    Memory,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Connection URL, required for the postgres backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Apply the embedded migrations at startup.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_run_migrations() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: None,
            max_connections: default_max_connections(),
            run_migrations: default_run_migrations(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Emit JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}
