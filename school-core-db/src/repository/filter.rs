use school_core_api::{DateRange, EntityType, SortDirection};
use uuid::Uuid;

use crate::models::{matches_search, DeletableModel};

/// Filter over one entity collection, shared by every backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    pub entity_type: EntityType,
    pub ids: Option<Vec<Uuid>>,
    /// `None` means "unconstrained"; see [`with_active_only`].
    pub is_deleted: Option<bool>,
    pub deleted_range: DateRange,
    pub search: Option<String>,
    /// Rows whose linked `userId` is one of these also satisfy `search`.
    pub search_linked_users: Vec<Uuid>,
}

impl RecordFilter {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            ids: None,
            is_deleted: None,
            deleted_range: DateRange::default(),
            search: None,
            search_linked_users: Vec::new(),
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.ids = Some(vec![id]);
        self
    }

    /// The recycle-bin view: soft-deleted rows only.
    pub fn deleted_only(mut self) -> Self {
        self.is_deleted = Some(true);
        self
    }

    pub fn deleted_between(mut self, range: DateRange) -> Self {
        self.deleted_range = range;
        self
    }

    pub fn search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    pub fn search_linked_users(mut self, user_ids: Vec<Uuid>) -> Self {
        self.search_linked_users = user_ids;
        self
    }

    /// In-process evaluation, used by backends that cannot push the filter down.
    pub fn matches(&self, model: &DeletableModel) -> bool {
        if model.entity_type != self.entity_type {
            return false;
        }
        if let Some(ids) = &self.ids {
            if !ids.contains(&model.id) {
                return false;
            }
        }
        if let Some(deleted) = self.is_deleted {
            if model.is_deleted != deleted {
                return false;
            }
        }
        if self.deleted_range != DateRange::default() {
            match model.deleted_at {
                Some(at) if self.deleted_range.contains(at) => {}
                _ => return false,
            }
        }
        if let Some(needle) = &self.search {
            let linked = model
                .linked_user_id()
                .is_some_and(|id| self.search_linked_users.contains(&id));
            if !linked && !matches_search(model.entity_type, &model.data, needle) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FindOptions {
    pub include_deleted: bool,
}

impl FindOptions {
    pub fn including_deleted() -> Self {
        Self {
            include_deleted: true,
        }
    }
}

/// Visibility filter applied to every normal read.
///
/// Adds `is_deleted = false` unless the caller opted in with
/// `include_deleted`, or already constrained `is_deleted` itself (an explicit
/// value always wins).
pub fn with_active_only(mut filter: RecordFilter, opts: FindOptions) -> RecordFilter {
    if !opts.include_deleted && filter.is_deleted.is_none() {
        filter.is_deleted = Some(false);
    }
    filter
}

/// Ordering of a record listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrder {
    CreatedAt(SortDirection),
    DeletedAt(SortDirection),
}

impl Default for RecordOrder {
    fn default() -> Self {
        RecordOrder::CreatedAt(SortDirection::Desc)
    }
}

impl RecordOrder {
    /// Sort in place; ties fall back to the id so paging is stable.
    pub fn sort(self, rows: &mut [DeletableModel]) {
        rows.sort_by(|a, b| {
            let ordering = match self {
                RecordOrder::CreatedAt(_) => a.created_at.cmp(&b.created_at),
                RecordOrder::DeletedAt(_) => a.deleted_at.cmp(&b.deleted_at),
            }
            .then_with(|| a.id.cmp(&b.id));
            match self {
                RecordOrder::CreatedAt(SortDirection::Asc)
                | RecordOrder::DeletedAt(SortDirection::Asc) => ordering,
                _ => ordering.reverse(),
            }
        });
    }
}
