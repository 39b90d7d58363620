//! TaskDesk Core Library
//!
//! This crate holds the business rules of the task tracker: the domain
//! models, the outcome convention every operation reports through, the task
//! validator, the store contract and the task service that ties them
//! together. Stores and front ends live in other crates and depend on the
//! types defined here.
//!
//! # Architecture
//!
//! - [`models`] - Domain models (WorkTask, Person, Status, Priority)
//! - [`outcome`] - Success/failure envelope returned by the service
//! - [`validation`] - State-dependent task rules and person checks
//! - [`repository`] - Store contract implemented by persistence crates
//! - [`service`] - Task use cases on top of a repository
//! - [`error`] - Error types raised by stores
//!
//! # Example
//!
//! ```rust
//! use taskdesk_core::{
//!     models::{Status, WorkTask},
//!     validation::{Field, TaskValidator},
//! };
//!
//! let task = WorkTask::new("Review pull request").with_status(Status::Assigned);
//!
//! let violations = TaskValidator::validate(&task);
//! assert_eq!(violations[0].field, Field::AssignedTo);
//! ```

pub mod error;
pub mod models;
pub mod outcome;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, TaskError};
pub use models::{Person, PersonId, Priority, Status, TaskFilter, TaskId, WorkTask};
pub use outcome::{Outcome, DEFAULT_SUCCESS_MESSAGE};
pub use repository::TaskRepository;
pub use service::TaskService;
pub use validation::{Field, TaskValidator, Violation};

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_crate_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(CRATE_NAME, "taskdesk-core");
    }

    #[test]
    fn test_re_exports() {
        let status = Status::InProgress;
        assert_eq!(format!("{status}"), "InProgress");

        let error = TaskError::Database("locked".to_string());
        assert!(error.is_database());

        let outcome: Outcome = Outcome::ok();
        assert_eq!(outcome.message(), DEFAULT_SUCCESS_MESSAGE);
    }
}
