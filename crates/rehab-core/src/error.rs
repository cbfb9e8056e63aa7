//! Error types for the Rehability application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Rehability workspace.
///
/// Variants are structured so that the presentation layer can tell a
/// recoverable collaborator failure apart from a rejected user input.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RehabError {
    /// A summary or plan field failed validation.
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// A classification result arrived for an exercise that is no longer active.
    #[error("Stale classification for '{received}' (active exercise: '{active}')")]
    StaleExercise { received: String, active: String },

    /// The requested operation does not apply to the current session state.
    #[error("Invalid session state: {0}")]
    InvalidState(String),

    /// The classification collaborator failed.
    #[error("Classifier error: {message}")]
    Classifier { message: String, retryable: bool },

    /// The persistence collaborator failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RehabError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for the given field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Creates a Classifier error.
    pub fn classifier(message: impl Into<String>, retryable: bool) -> Self {
        Self::Classifier {
            message: message.into(),
            retryable,
        }
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns the offending field name for validation errors.
    pub fn invalid_field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Check if the failed operation may succeed when attempted again.
    ///
    /// Classifier failures carry their own flag; persistence and IO failures
    /// are always considered retryable since the user keeps their draft.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Classifier { retryable, .. } => *retryable,
            Self::Persistence(_) | Self::Io { .. } => true,
            _ => false,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RehabError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RehabError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RehabError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RehabError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error for callers that bubble up ad-hoc context.
impl From<anyhow::Error> for RehabError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, RehabError>`.
pub type Result<T> = std::result::Result<T, RehabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_reports_field() {
        let err = RehabError::validation("sets_planned", "must be a positive integer");
        assert!(err.is_validation());
        assert_eq!(err.invalid_field(), Some("sets_planned"));
        assert_eq!(
            err.to_string(),
            "Invalid sets_planned: must be a positive integer"
        );
    }

    #[test]
    fn test_retryable_flags() {
        assert!(RehabError::classifier("timeout", true).is_retryable());
        assert!(!RehabError::classifier("bad request", false).is_retryable());
        assert!(RehabError::persistence("connection refused").is_retryable());
        assert!(!RehabError::config("missing url").is_retryable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: RehabError = io.into();
        assert!(matches!(err, RehabError::Io { .. }));
        assert!(err.to_string().contains("NotFound"));
    }
}
