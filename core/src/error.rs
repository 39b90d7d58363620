use thiserror::Error;

/// Result type alias for store and core operations
pub type Result<T> = std::result::Result<T, TaskError>;

/// Error types raised below the service boundary.
///
/// Stores return these; [`TaskService`](crate::service::TaskService) turns
/// every one of them into a failed [`Outcome`](crate::outcome::Outcome)
/// carrying the error's display text, so callers never match on variants.
///
/// # Examples
///
/// ```rust
/// use taskdesk_core::error::TaskError;
///
/// let duplicate = TaskError::DuplicateEmail("ada@example.com".to_string());
/// assert!(duplicate.is_database());
/// assert_eq!(duplicate.to_string(), "Email already in use: ada@example.com");
///
/// let unknown = "Blocked".parse::<taskdesk_core::Status>().unwrap_err();
/// assert!(unknown.is_validation());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// A person with this email already exists
    #[error("Email already in use: {0}")]
    DuplicateEmail(String),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskError {
    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation(_))
    }

    /// Check if this error indicates a database problem
    pub fn is_database(&self) -> bool {
        matches!(self, TaskError::Database(_) | TaskError::DuplicateEmail(_))
    }
}
