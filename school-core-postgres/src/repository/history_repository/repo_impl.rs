use crate::utils::{get_actor, TryFromRow};
use school_core_db::models::HistoryRecordModel;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;

pub(super) const HISTORY_COLUMNS: &str =
    r#"id, item_id, entity_type, action, performed_by, "timestamp", snapshot, hash"#;

pub struct HistoryRepositoryImpl {
    pub pool: PgPool,
}

impl HistoryRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for HistoryRecordModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(HistoryRecordModel {
            id: row.try_get("id")?,
            item_id: row.try_get("item_id")?,
            entity_type: row.try_get("entity_type")?,
            action: row.try_get("action")?,
            performed_by: get_actor(row, "performed_by")?,
            timestamp: row.try_get("timestamp")?,
            snapshot: row.try_get("snapshot")?,
            hash: row.try_get("hash")?,
        })
    }
}
