use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::actor::ActorRef;
use super::entity_type::EntityType;

/// Normalized recycle-bin row, identical in shape for every entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecycleBinItem {
    pub item_id: Uuid,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Display name resolved through the type's priority list.
    pub name: String,
    pub deleted_at: DateTime<Utc>,
    pub deleted_by: Option<ActorRef>,
    pub snapshot: Value,
}
