use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::actor::ActorRef;
use super::entity_type::EntityType;
use super::history_action::HistoryAction;

/// One immutable audit entry as returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: Uuid,
    pub item_id: Uuid,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub action: HistoryAction,
    pub performed_by: ActorRef,
    pub timestamp: DateTime<Utc>,
    pub snapshot: Value,
    pub hash: i64,
}
