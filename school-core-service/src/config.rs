use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables of the recycle-bin service, the `[service]` table of the server config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Ids of one batch processed at the same time.
    pub batch_concurrency: usize,
    /// Largest accepted `ids` array for restore and hard delete.
    pub max_batch_size: usize,
    pub name_cache_ttl_secs: u64,
    pub name_cache_capacity: u64,
    /// Most `user` rows a recycle-bin search consults when matching linked names.
    pub linked_user_search_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            batch_concurrency: 8,
            max_batch_size: 500,
            name_cache_ttl_secs: 60,
            name_cache_capacity: 10_000,
            linked_user_search_limit: 200,
        }
    }
}

impl ServiceConfig {
    pub fn name_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.name_cache_ttl_secs)
    }
}
