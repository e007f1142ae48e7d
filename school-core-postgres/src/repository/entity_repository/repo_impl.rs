use crate::utils::{get_optional_actor, TryFromRow};
use school_core_db::models::DeletableModel;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;

/// Columns selected for a full [`DeletableModel`].
pub(super) const ENTITY_COLUMNS: &str =
    "id, entity_type, data, natural_key, is_deleted, deleted_at, deleted_by, created_at, updated_at";

pub struct EntityRepositoryImpl {
    pub pool: PgPool,
}

impl EntityRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for DeletableModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(DeletableModel {
            id: row.try_get("id")?,
            entity_type: row.try_get("entity_type")?,
            data: row.try_get("data")?,
            natural_key: row.try_get("natural_key")?,
            is_deleted: row.try_get("is_deleted")?,
            deleted_at: row.try_get("deleted_at")?,
            deleted_by: get_optional_actor(row, "deleted_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// State of a row that a conditional statement did not touch.
pub(super) enum RowState {
    Missing,
    Active,
    Deleted,
}

impl EntityRepositoryImpl {
    pub(super) async fn row_state(
        &self,
        entity_type: school_core_api::EntityType,
        id: uuid::Uuid,
    ) -> Result<RowState, Box<dyn Error + Send + Sync>> {
        let is_deleted: Option<bool> = sqlx::query_scalar(
            "SELECT is_deleted FROM school_entity WHERE id = $1 AND entity_type = $2",
        )
        .bind(id)
        .bind(entity_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match is_deleted {
            None => RowState::Missing,
            Some(false) => RowState::Active,
            Some(true) => RowState::Deleted,
        })
    }
}
