use async_trait::async_trait;
use school_core_db::models::DeletableModel;
use school_core_db::repository::LoadBatch;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{EntityRepositoryImpl, ENTITY_COLUMNS};
use crate::utils::TryFromRow;

impl EntityRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &EntityRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<DeletableModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let query = format!("SELECT {ENTITY_COLUMNS} FROM school_entity WHERE id = ANY($1)");
        let rows = sqlx::query(&query).bind(ids).fetch_all(&repo.pool).await?;

        let mut map: HashMap<Uuid, DeletableModel> = HashMap::with_capacity(rows.len());
        for row in rows {
            let model = DeletableModel::try_from_row(&row)?;
            map.insert(model.id, model);
        }

        // Return results in the same order as input ids
        Ok(ids.iter().map(|id| map.get(id).cloned()).collect())
    }
}

#[async_trait]
impl LoadBatch<DeletableModel> for EntityRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<DeletableModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
