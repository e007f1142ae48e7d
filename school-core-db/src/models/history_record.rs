use chrono::{DateTime, Utc};
use school_core_api::{ActorRef, EntityType, HistoryAction, HistoryItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::deletable::DeletableModel;
use super::identifiable::Identifiable;
use crate::utils::{canonical_json, hash_as_i64, now_utc};

/// # Documentation
/// - One record per successful state transition of a deletable entity.
/// - Immutable once written: no repository exposes update or delete for it.
/// - `item_id` is not a foreign key; the entity may have been hard-deleted since.
/// - `performed_by` and `snapshot` are point-in-time copies, never live joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecordModel {
    pub id: Uuid,
    pub item_id: Uuid,
    pub entity_type: EntityType,
    pub action: HistoryAction,
    pub performed_by: ActorRef,
    pub timestamp: DateTime<Utc>,
    pub snapshot: Value,

    /// Hash of the record with this field set to 0
    /// - Computed once at creation, checked with [`HistoryRecordModel::verify_hash`]
    pub hash: i64,
}

impl HistoryRecordModel {
    /// Build the record for `action` applied to `pre_state`, stamped now.
    pub fn for_transition(
        pre_state: &DeletableModel,
        action: HistoryAction,
        performed_by: &ActorRef,
    ) -> Result<Self, String> {
        let mut record = Self {
            id: Uuid::new_v4(),
            item_id: pre_state.id,
            entity_type: pre_state.entity_type,
            action,
            performed_by: performed_by.clone(),
            timestamp: now_utc(),
            snapshot: pre_state.snapshot(),
            hash: 0,
        };
        record.hash = record.compute_hash()?;
        Ok(record)
    }

    pub fn compute_hash(&self) -> Result<i64, String> {
        let mut for_hashing = self.clone();
        for_hashing.hash = 0;
        for_hashing.snapshot = canonical_json(&self.snapshot);
        hash_as_i64(&for_hashing)
    }

    /// True when the stored hash still matches the record's content.
    pub fn verify_hash(&self) -> bool {
        self.compute_hash().is_ok_and(|h| h == self.hash)
    }

    pub fn to_item(&self) -> HistoryItem {
        HistoryItem {
            id: self.id,
            item_id: self.item_id,
            entity_type: self.entity_type,
            action: self.action,
            performed_by: self.performed_by.clone(),
            timestamp: self.timestamp,
            snapshot: self.snapshot.clone(),
            hash: self.hash,
        }
    }
}

impl Identifiable for HistoryRecordModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
