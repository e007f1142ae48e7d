use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not deleted: {0}")]
    NotDeleted(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller aborted the request before it completed. Never shown to users.
    ///
    /// Not raised by the service itself; it completes the wire taxonomy so
    /// proxies and clients can report aborted calls with the same codes.
    #[error("Request canceled")]
    Canceled,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Stable machine-readable code, used as the `code` field of error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidType(_) => "invalid_type",
            Self::NotFound(_) => "not_found",
            Self::NotDeleted(_) => "not_deleted",
            Self::Conflict(_) => "conflict",
            Self::ValidationError(_) => "validation_error",
            Self::Unauthorized(_) => "unauthorized",
            Self::Canceled => "canceled",
            Self::DatabaseError(_) => "database_error",
            Self::InternalError(_) => "internal_error",
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ApiError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_per_variant() {
        let errors = [
            ApiError::InvalidType("x".into()),
            ApiError::NotFound("x".into()),
            ApiError::NotDeleted("x".into()),
            ApiError::Conflict("x".into()),
            ApiError::ValidationError("x".into()),
            ApiError::Unauthorized("x".into()),
            ApiError::Canceled,
            ApiError::DatabaseError("x".into()),
            ApiError::InternalError("x".into()),
        ];
        let mut codes: Vec<&str> = errors.iter().map(ApiError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_boxed_error_becomes_database_error() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = "connection reset".into();
        let err: ApiError = boxed.into();
        assert_eq!(err, ApiError::DatabaseError("connection reset".to_string()));
        assert!(!err.is_canceled());
        assert!(ApiError::Canceled.is_canceled());
    }
}
