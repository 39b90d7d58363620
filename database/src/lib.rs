//! Database crate for TaskDesk
//!
//! This crate provides the SQLite implementation of the TaskRepository trait:
//! tasks and people in one database file, schema migrations, error mapping
//! and optional sample data.
//!
//! # Features
//!
//! - SQLite database support with WAL mode for file databases
//! - Database migrations with proper schema management
//! - `ON DELETE SET NULL` on the task assignee when a person is removed
//! - Full test coverage with in-memory database support
//!
//! # Usage
//!
//! ```rust
//! use database::SqliteTaskRepository;
//! use taskdesk_core::repository::TaskRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create repository (in-memory for testing)
//!     let repo = SqliteTaskRepository::new(":memory:").await?;
//!
//!     // Run migrations
//!     repo.migrate().await?;
//!
//!     // Repository is ready to use
//!     repo.health_check().await?;
//!     println!("Database is healthy!");
//!
//!     Ok(())
//! }
//! ```

mod common;
pub mod seed;
mod sqlite;

pub use seed::seed_sample_data;
pub use sqlite::{
    database_file_path, SqliteTaskRepository, DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS,
};

// Re-export commonly used types from taskdesk-core for convenience
pub use taskdesk_core::{
    error::{Result, TaskError},
    models::{Person, PersonId, Priority, Status, TaskId, WorkTask},
    repository::TaskRepository,
};
