use chrono::{DateTime, Utc};
use school_core_api::{ActorRef, EntityDocument, EntityType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::display::{linked_user_id, resolve_display_name};
use super::identifiable::Identifiable;
use super::natural_key::derive_natural_key;
use super::soft_deletable::SoftDeletable;
use crate::utils::now_utc;

/// Database model for a soft-deletable school entity.
///
/// All fourteen collections share this shape; the type-specific domain
/// fields live in `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletableModel {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub entity_type: EntityType,

    /// Domain fields of the entity, e.g. `admissionNumber` for a student.
    pub data: Value,

    /// Derived from `data`; unique among active rows of the same type only.
    pub natural_key: Option<String>,

    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<ActorRef>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DeletableModel {
    /// A new active row with a fresh id.
    pub fn new(entity_type: EntityType, data: Value) -> Self {
        Self::with_id(Uuid::new_v4(), entity_type, data)
    }

    pub fn with_id(id: Uuid, entity_type: EntityType, data: Value) -> Self {
        let now = now_utc();
        Self {
            id,
            entity_type,
            natural_key: derive_natural_key(entity_type, &data),
            data,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full point-in-time copy of the row, as stored in history records.
    pub fn snapshot(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn linked_user_id(&self) -> Option<Uuid> {
        if self.entity_type.links_user() {
            linked_user_id(&self.data)
        } else {
            None
        }
    }

    pub fn display_name(&self, linked_user_name: Option<&str>) -> String {
        resolve_display_name(self.entity_type, &self.data, linked_user_name)
    }

    pub fn to_document(&self) -> EntityDocument {
        EntityDocument {
            id: self.id,
            entity_type: self.entity_type,
            data: self.data.clone(),
            is_deleted: self.is_deleted,
            deleted_at: self.deleted_at,
            deleted_by: self.deleted_by.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Identifiable for DeletableModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl SoftDeletable for DeletableModel {
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn deleted_by(&self) -> Option<&ActorRef> {
        self.deleted_by.as_ref()
    }

    fn mark_deleted(&mut self, actor: ActorRef, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
        self.deleted_by = Some(actor);
    }

    fn clear_deleted(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
        self.deleted_by = None;
    }
}
