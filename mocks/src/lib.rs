//! Mock implementations and test utilities for TaskDesk
//!
//! This crate provides comprehensive testing infrastructure including:
//! - An in-memory TaskRepository with error injection and call tracking
//! - Realistic test data generators
//! - Custom assertion helpers
//! - Property-based testing strategies
//! - Contract test helpers shared by every store

pub mod assertions;
pub mod builders;
pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod repository;

pub use assertions::*;
pub use builders::*;
pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use repository::MockTaskRepository;
