use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;

/// Body of the restore and hard-delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchRequest {
    #[serde(rename = "type")]
    pub entity_type: String,
    #[validate(length(min = 1, message = "ids must not be empty"))]
    pub ids: Vec<String>,
}

impl BatchRequest {
    pub fn new(entity_type: impl Into<String>, ids: impl IntoIterator<Item = impl ToString>) -> Self {
        Self {
            entity_type: entity_type.into(),
            ids: ids.into_iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Why a single id of a batch was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    NotFound,
    NotDeleted,
    Conflict,
    StorageError,
}

impl FailureReason {
    /// Short phrase used in bulk summaries.
    pub fn describe(self) -> &'static str {
        match self {
            FailureReason::NotFound => "not found",
            FailureReason::NotDeleted => "already active",
            FailureReason::Conflict => "conflicts with an active record",
            FailureReason::StorageError => "storage error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub id: String,
    pub reason: FailureReason,
    pub message: String,
}

impl BatchFailure {
    pub fn new(id: impl Into<String>, reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reason,
            message: message.into(),
        }
    }

    /// The per-id form of an error a single-item call would have returned.
    pub fn from_error(id: impl Into<String>, error: ApiError) -> Self {
        let reason = match &error {
            ApiError::NotFound(_) | ApiError::InvalidType(_) => FailureReason::NotFound,
            ApiError::NotDeleted(_) => FailureReason::NotDeleted,
            ApiError::Conflict(_) => FailureReason::Conflict,
            _ => FailureReason::StorageError,
        };
        let message = match error {
            ApiError::NotFound(m)
            | ApiError::NotDeleted(m)
            | ApiError::Conflict(m)
            | ApiError::DatabaseError(m)
            | ApiError::InternalError(m) => m,
            other => other.to_string(),
        };
        Self::new(id, reason, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Restore,
    HardDelete,
}

impl BatchKind {
    fn verb(self) -> &'static str {
        match self {
            BatchKind::Restore => "Restored",
            BatchKind::HardDelete => "Permanently deleted",
        }
    }
}

/// Result of a restore or hard-delete batch. Successes and failures are
/// reported side by side; one bad id never fails the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub kind: BatchKind,
    pub requested: usize,
    pub succeeded: Vec<Uuid>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn new(kind: BatchKind, requested: usize) -> Self {
        Self {
            kind,
            requested,
            succeeded: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    /// `"Restored 3 of 4; 1 failed (already active)"`.
    pub fn summary(&self) -> String {
        let head = format!("{} {} of {}", self.kind.verb(), self.succeeded.len(), self.requested);
        if self.failures.is_empty() {
            return head;
        }
        let mut reasons: Vec<&str> = self.failures.iter().map(|f| f.reason.describe()).collect();
        reasons.sort_unstable();
        reasons.dedup();
        format!("{head}; {} failed ({})", self.failures.len(), reasons.join(", "))
    }

    pub fn into_restore_response(self) -> RestoreResponse {
        RestoreResponse {
            success: self.failures.is_empty(),
            message: self.summary(),
            restored_count: self.succeeded.len(),
            requested: self.requested,
            failures: self.failures,
        }
    }

    pub fn into_hard_delete_response(self) -> HardDeleteResponse {
        HardDeleteResponse {
            success: self.failures.is_empty(),
            message: self.summary(),
            deleted_count: self.succeeded.len(),
            requested: self.requested,
            failures: self.failures,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResponse {
    pub success: bool,
    pub message: String,
    pub restored_count: usize,
    pub requested: usize,
    pub failures: Vec<BatchFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardDeleteResponse {
    pub success: bool,
    pub message: String,
    pub deleted_count: usize,
    pub requested: usize,
    pub failures: Vec<BatchFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ids_fail_validation() {
        let request = BatchRequest::new("student", Vec::<String>::new());
        assert!(request.validate().is_err());
        let request = BatchRequest::new("student", [Uuid::new_v4()]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_summary_reports_counts() {
        let mut outcome = BatchOutcome::new(BatchKind::Restore, 4);
        outcome.succeeded = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        outcome
            .failures
            .push(BatchFailure::new("x", FailureReason::NotDeleted, "active"));
        assert_eq!(outcome.summary(), "Restored 3 of 4; 1 failed (already active)");

        let response = outcome.into_restore_response();
        assert!(!response.success);
        assert_eq!(response.restored_count, 3);

        let outcome = BatchOutcome::new(BatchKind::HardDelete, 0);
        assert_eq!(outcome.summary(), "Permanently deleted 0 of 0");
    }

    #[test]
    fn test_failure_reason_wire_names() {
        let failure = BatchFailure::new("S4", FailureReason::NotDeleted, "Record is active");
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["reason"], "NotDeleted");
        assert_eq!(json["id"], "S4");
    }

    #[test]
    fn test_failure_from_error_keeps_reason_and_message() {
        let failure = BatchFailure::from_error("S4", ApiError::NotDeleted("student S4 is active".into()));
        assert_eq!(failure.reason, FailureReason::NotDeleted);
        assert_eq!(failure.message, "student S4 is active");

        let failure = BatchFailure::from_error("T1", ApiError::Conflict("key taken".into()));
        assert_eq!(failure.reason, FailureReason::Conflict);

        let failure = BatchFailure::from_error("X", ApiError::DatabaseError("pool timed out".into()));
        assert_eq!(failure.reason, FailureReason::StorageError);
        assert_eq!(failure.message, "pool timed out");
    }

    #[test]
    fn test_response_is_camel_case() {
        let mut outcome = BatchOutcome::new(BatchKind::HardDelete, 1);
        outcome.succeeded.push(Uuid::new_v4());
        let json = serde_json::to_value(outcome.into_hard_delete_response()).unwrap();
        assert_eq!(json["deletedCount"], 1);
        assert_eq!(json["success"], true);
    }
}
