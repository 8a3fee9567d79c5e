use thiserror::Error;

/// Core error types for Shelf store operations.
///
/// Every fallible store operation returns one of these as a typed result;
/// nothing in the store panics on caller input. Internal invariant
/// violations (a colliding generated id, a non-positive id slipping past
/// construction) are bugs, checked with `debug_assert!` at the site rather
/// than surfaced here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("{resource_type} not found: {id}")]
    NotFound {
        /// The schema's resource type name (e.g. "todo").
        resource_type: String,
        /// The id that was looked up.
        id: u64,
    },

    /// The payload failed schema validation; the store was not mutated.
    #[error("{message}")]
    Validation {
        /// Description of what failed (e.g. "task is required").
        message: String,
    },

    /// Seed data carried an id that is already taken.
    #[error("{resource_type} id already exists: {id}")]
    Conflict {
        /// The schema's resource type name.
        resource_type: String,
        /// The duplicated id.
        id: u64,
    },
}

impl StoreError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: u64) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id,
        }
    }

    /// Creates a new `Validation` error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new `Conflict` error.
    #[must_use]
    pub fn conflict(resource_type: impl Into<String>, id: u64) -> Self {
        Self::Conflict {
            resource_type: resource_type.into(),
            id,
        }
    }

    /// Check if this error is caller-fixable (4xx category).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Validation { .. } | Self::Conflict { .. }
        )
    }

    /// Get error category for logging/monitoring.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Conflict { .. } => ErrorCategory::Conflict,
        }
    }
}

/// Error categories for monitoring and classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
        }
    }
}

/// Convenience result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = StoreError::not_found("todo", 7);
        assert_eq!(err.to_string(), "todo not found: 7");
        assert!(err.is_client_error());
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_validation_error() {
        let err = StoreError::validation("task is required");
        assert_eq!(err.to_string(), "task is required");
        assert!(err.is_client_error());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_conflict_error() {
        let err = StoreError::conflict("todo", 2);
        assert_eq!(err.to_string(), "todo id already exists: 2");
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }

    #[test]
    fn test_error_categories_display() {
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
        assert_eq!(ErrorCategory::NotFound.to_string(), "not_found");
        assert_eq!(ErrorCategory::Conflict.to_string(), "conflict");
    }

    #[test]
    fn test_error_debug_format() {
        let err = StoreError::validation("empty body");
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("Validation"));
        assert!(debug_str.contains("empty body"));
    }

    #[test]
    fn test_result_type_usage() {
        fn lookup(found: bool) -> Result<u64> {
            if found {
                Ok(1)
            } else {
                Err(StoreError::not_found("todo", 1))
            }
        }

        assert!(lookup(true).is_ok());
        assert!(lookup(false).is_err());
    }
}
