use crate::models::DeletableModel;

/// Result of one conditional state transition on a single row.
///
/// Backends decide the outcome inside the same atomic statement that applies
/// the change, so two concurrent transitions of one row cannot both report
/// `Applied`.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// The change was persisted; carries the row as it was immediately before.
    Applied(DeletableModel),
    /// No row with this id and type exists.
    NotFound,
    /// The row exists but is active.
    NotDeleted,
    /// Restoring would give the natural key a second active holder.
    Conflict,
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied(_))
    }
}
