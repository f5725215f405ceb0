//! Error types for myorm.

use thiserror::Error;

/// Result type alias for myorm operations.
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for query building and execution.
///
/// Every variant carries a short stable code (see [`OrmError::code`]) for
/// operator-facing logs. Errors surfaced by the database client are
/// propagated unchanged; myorm performs no retry and no translation of them.
#[derive(Debug, Error)]
pub enum OrmError {
    /// Execution was attempted before any connection pool was initialized.
    #[error("connection pool not initialized")]
    NotInitialized,

    /// `insert`/`update` was invoked with no configured data.
    #[error("no data configured for write")]
    EmptyWriteData,

    /// `find`/`update`/`delete` matched zero rows.
    #[error("record not found: {0}")]
    NotFound(String),

    /// A named condition was given without a usable value.
    #[error("condition value missing: {0}")]
    MissingConditionValue(String),

    /// Invalid connection configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Row decode/mapping error.
    #[error("decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Error surfaced by the database client.
    #[error("database error: {0}")]
    Db(#[from] mysql_async::Error),
}

impl OrmError {
    /// Stable error code for logs and machine handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "not_initialized",
            Self::EmptyWriteData => "empty_write_data",
            Self::NotFound(_) => "not_found",
            Self::MissingConditionValue(_) => "missing_condition_value",
            Self::Config(_) => "config",
            Self::Decode { .. } => "decode",
            Self::Db(_) => "db",
        }
    }

    /// Create a not-found error.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into()).warned()
    }

    /// Create a missing-condition-value error.
    pub fn missing_condition_value(detail: impl Into<String>) -> Self {
        Self::MissingConditionValue(detail.into()).warned()
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into()).warned()
    }

    /// Create a decode error for a specific column.
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
        .warned()
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Emit the warning-level log entry domain errors carry.
    pub(crate) fn warned(self) -> Self {
        tracing::warn!(target: "myorm.sql", code = self.code(), error = %self);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(OrmError::NotInitialized.code(), "not_initialized");
        assert_eq!(OrmError::EmptyWriteData.code(), "empty_write_data");
        assert_eq!(OrmError::not_found("user").code(), "not_found");
        assert_eq!(OrmError::missing_condition_value("x").code(), "missing_condition_value");
        assert_eq!(OrmError::decode("id", "bad int").code(), "decode");
    }

    #[test]
    fn not_found_predicate() {
        assert!(OrmError::not_found("user id = 7").is_not_found());
        assert!(!OrmError::EmptyWriteData.is_not_found());
    }
}
