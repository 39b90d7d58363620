use serde::{Deserialize, Serialize};

/// Message used when a success is reported without a custom one
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation completed successfully";

/// Success/failure envelope returned by every service operation.
///
/// `Outcome` (with the default `()` payload) is used for operations that only
/// report completion, such as update and delete. `Outcome<T>` carries the
/// result of create, read and list operations.
///
/// Callers branch on [`is_success`](Outcome::is_success) only. The
/// [`errors`](Outcome::errors) list is meant for display and logging, and the
/// payload is always absent on failure.
///
/// # Examples
///
/// ```rust
/// use taskdesk_core::outcome::Outcome;
///
/// let found: Outcome<Vec<u32>> = Outcome::success_with_message(vec![1, 2], "Found 2 tasks");
/// assert!(found.is_success());
/// assert_eq!(found.data(), Some(&vec![1, 2]));
///
/// let failed: Outcome = Outcome::failure("Task not found", ["No task with ID 42"]);
/// assert!(!failed.is_success());
/// assert_eq!(failed.errors(), ["No task with ID 42"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome<T = ()> {
    is_success: bool,
    message: String,
    errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> Outcome<T> {
    /// Successful outcome carrying `data` and the default message
    pub fn success(data: T) -> Self {
        Self::success_with_message(data, DEFAULT_SUCCESS_MESSAGE)
    }

    /// Successful outcome carrying `data` and a custom message
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            message: message.into(),
            errors: Vec::new(),
            data: Some(data),
        }
    }

    /// Failed outcome with a summary message and zero or more error details
    pub fn failure<I, S>(message: impl Into<String>, errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_success: false,
            message: message.into(),
            errors: errors.into_iter().map(Into::into).collect(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Re-shape a failure into another payload type, keeping message and errors.
    ///
    /// Successful outcomes are converted with `f`.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        Outcome {
            is_success: self.is_success,
            message: self.message,
            errors: self.errors,
            data: self.data.map(f),
        }
    }
}

impl Outcome {
    /// Successful outcome without payload and the default message
    pub fn ok() -> Self {
        Self::ok_with_message(DEFAULT_SUCCESS_MESSAGE)
    }

    /// Successful outcome without payload and a custom message
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            message: message.into(),
            errors: Vec::new(),
            data: None,
        }
    }
}
