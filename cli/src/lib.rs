//! TaskDesk command-line application
//!
//! This library holds everything the `taskdesk` binary needs: configuration
//! management, telemetry, store setup, the clap command surface, task export
//! and outcome rendering.

pub mod commands;
pub mod config;
pub mod export;
pub mod output;
pub mod setup;
pub mod telemetry;

pub use commands::{execute, Cli, Command};
pub use config::Config;
pub use export::ExportFormat;
pub use output::Response;
pub use setup::{create_repository, ensure_database_directory, initialize_service};
pub use telemetry::init_telemetry;
