use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ApiError;

/// State transition recorded by a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "history_action", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Deleted,
    Restored,
    PermanentlyDeleted,
}

impl HistoryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryAction::Deleted => "deleted",
            HistoryAction::Restored => "restored",
            HistoryAction::PermanentlyDeleted => "permanently_deleted",
        }
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryAction {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "deleted" => Ok(HistoryAction::Deleted),
            "restored" => Ok(HistoryAction::Restored),
            "permanently_deleted" => Ok(HistoryAction::PermanentlyDeleted),
            other => Err(ApiError::ValidationError(format!("Unknown action: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&HistoryAction::PermanentlyDeleted).unwrap(),
            "\"permanently_deleted\""
        );
        assert_eq!(
            "restored".parse::<HistoryAction>().unwrap(),
            HistoryAction::Restored
        );
        assert!(matches!(
            "purged".parse::<HistoryAction>(),
            Err(ApiError::ValidationError(_))
        ));
    }
}
