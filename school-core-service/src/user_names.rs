use std::collections::HashMap;
use std::time::Duration;

use moka::future::Cache;
use school_core_api::EntityType;
use school_core_db::models::{DeletableModel, UNKNOWN_NAME};
use school_core_db::repository::{LoadBatch, RepositoryError};
use uuid::Uuid;

/// Resolves the display name of `user` rows referenced by profile documents.
///
/// Names are cached with a TTL; recycle-bin pages usually repeat the same few
/// users.
pub struct UserNameResolver {
    cache: Cache<Uuid, String>,
}

impl UserNameResolver {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Names for every id that resolves to a `user` row, soft-deleted or not.
    /// Ids without a usable name are simply absent from the map.
    pub async fn resolve<R>(
        &self,
        repo: &R,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, RepositoryError>
    where
        R: LoadBatch<DeletableModel> + ?Sized,
    {
        let mut names = HashMap::with_capacity(ids.len());
        let mut missing = Vec::new();
        for id in ids {
            if names.contains_key(id) || missing.contains(id) {
                continue;
            }
            match self.cache.get(id).await {
                Some(name) => {
                    names.insert(*id, name);
                }
                None => missing.push(*id),
            }
        }

        if missing.is_empty() {
            return Ok(names);
        }

        for user in repo.load_batch(&missing).await?.into_iter().flatten() {
            if user.entity_type != EntityType::User {
                continue;
            }
            let name = user.display_name(None);
            if name == UNKNOWN_NAME {
                continue;
            }
            self.cache.insert(user.id, name.clone()).await;
            names.insert(user.id, name);
        }
        Ok(names)
    }

    pub async fn invalidate(&self, id: &Uuid) {
        self.cache.invalidate(id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_core_db::repository::CreateBatch;
    use school_core_memory::MemoryEntityRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_resolves_only_user_rows() {
        let repo = MemoryEntityRepository::new();
        let user = DeletableModel::new(EntityType::User, json!({"name": "Ada Lovelace", "email": "ada@school.org"}));
        let fee = DeletableModel::new(EntityType::Fee, json!({"feeType": "Lab"}));
        repo.create_batch(vec![user.clone(), fee.clone()]).await.unwrap();

        let resolver = UserNameResolver::new(Duration::from_secs(60), 100);
        let names = resolver
            .resolve(&repo, &[user.id, fee.id, Uuid::new_v4(), user.id])
            .await
            .unwrap();

        assert_eq!(names.len(), 1);
        assert_eq!(names.get(&user.id).map(String::as_str), Some("Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_cached_name_survives_until_invalidated() {
        let repo = MemoryEntityRepository::new();
        let user = DeletableModel::new(EntityType::User, json!({"email": "grace@school.org"}));
        repo.create_batch(vec![user.clone()]).await.unwrap();

        let resolver = UserNameResolver::new(Duration::from_secs(60), 100);
        resolver.resolve(&repo, &[user.id]).await.unwrap();

        let empty = MemoryEntityRepository::new();
        let names = resolver.resolve(&empty, &[user.id]).await.unwrap();
        assert_eq!(names.get(&user.id).map(String::as_str), Some("grace@school.org"));

        resolver.invalidate(&user.id).await;
        let names = resolver.resolve(&empty, &[user.id]).await.unwrap();
        assert!(names.is_empty());
    }
}
