use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Score source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Write conflict: {0}")]
    WriteConflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::SourceUnavailable(_) => "SOURCE_UNAVAILABLE",
            AppError::WriteConflict(_) => "WRITE_CONFLICT",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller may retry the failed operation as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::SourceUnavailable(_) | AppError::WriteConflict(_)
        )
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::SourceUnavailable("test".into()).error_code(),
            "SOURCE_UNAVAILABLE"
        );
        assert_eq!(
            AppError::WriteConflict("test".into()).error_code(),
            "WRITE_CONFLICT"
        );
        assert_eq!(
            AppError::ValidationError("test".into()).error_code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("student".into());
        assert_eq!(err.to_string(), "Not found: student");
    }

    #[test]
    fn test_retryable_errors() {
        assert!(AppError::WriteConflict("test".into()).is_retryable());
        assert!(AppError::SourceUnavailable("test".into()).is_retryable());
        assert!(!AppError::ValidationError("test".into()).is_retryable());
    }
}
