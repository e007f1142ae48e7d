use chrono::{DateTime, Utc};
use school_core_api::ActorRef;

use super::identifiable::Identifiable;

/// Capability shared by every collection that supports the recycle bin.
///
/// `is_deleted() == true` iff `deleted_at()` is set iff `deleted_by()` is set.
pub trait SoftDeletable: Identifiable {
    fn is_deleted(&self) -> bool;

    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn deleted_by(&self) -> Option<&ActorRef>;

    /// Set all three flags at once.
    fn mark_deleted(&mut self, actor: ActorRef, at: DateTime<Utc>);

    /// Clear all three flags at once.
    fn clear_deleted(&mut self);

    fn soft_delete_flags_consistent(&self) -> bool {
        self.is_deleted() == self.deleted_at().is_some()
            && self.is_deleted() == self.deleted_by().is_some()
    }
}
