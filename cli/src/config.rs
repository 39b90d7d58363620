use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Optional database URL. If not provided, defaults to a file in the user's data directory
    pub url: Option<String>,
    /// Maximum number of database connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
    /// Insert sample people and tasks when the store is empty
    #[serde(default)]
    pub seed_sample_data: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

const ENV_PREFIX: &str = "TASKDESK";

fn environment() -> Environment {
    // TASKDESK_DATABASE__MAX_CONNECTIONS -> database.max_connections
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Config {
    /// Load configuration from environment variables and config files
    pub fn from_env() -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        // Start with default configuration
        builder = builder.add_source(File::from_str(
            include_str!("../config/default.toml"),
            FileFormat::Toml,
        ));

        // Add config file if specified
        if let Ok(config_file) = env::var("CONFIG_FILE") {
            builder = builder.add_source(
                File::with_name(&config_file)
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }

        builder = builder.add_source(environment());

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        // DATABASE_URL and LOG_LEVEL win over the layered sources
        Self::apply_standard_env_vars(&mut result);

        Ok(result)
    }

    /// Load configuration from a specific file path
    ///
    /// Keys missing from the file fall back to the embedded defaults.
    pub fn from_file(path: &str) -> Result<Self> {
        let builder = ConfigBuilder::builder()
            .add_source(File::from_str(
                include_str!("../config/default.toml"),
                FileFormat::Toml,
            ))
            .add_source(File::with_name(path).format(FileFormat::Toml))
            .add_source(environment());

        let config = builder
            .build()
            .with_context(|| format!("Failed to build configuration from file {path}"))?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration from file")?;

        Self::apply_standard_env_vars(&mut result);

        Ok(result)
    }

    /// Apply standard environment variables (DATABASE_URL, LOG_LEVEL)
    fn apply_standard_env_vars(config: &mut Config) {
        if let Ok(database_url) = env::var("DATABASE_URL") {
            config.database.url = Some(database_url);
        }

        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.logging.level = log_level;
        }
    }

    /// Get the database URL with default fallback
    pub fn database_url(&self) -> String {
        match &self.database.url {
            Some(url) => url.clone(),
            None => Self::default_database_url(),
        }
    }

    /// Default database location
    ///
    /// `$XDG_DATA_HOME/taskdesk/taskdesk.sqlite` when set, otherwise
    /// `~/.taskdesk.sqlite`.
    pub fn default_database_url() -> String {
        if let Ok(xdg_data) = env::var("XDG_DATA_HOME") {
            return format!("sqlite://{xdg_data}/taskdesk/taskdesk.sqlite");
        }

        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        format!("sqlite://{home}/.taskdesk.sqlite")
    }

    /// Pool acquire timeout
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.database.connection_timeout)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        let database_url = self.database_url();
        if !database_url.starts_with("sqlite:") && database_url != ":memory:" {
            return Err(anyhow::anyhow!(
                "Only SQLite databases are supported. URL must start with 'sqlite:'. Got: {}",
                database_url
            ));
        }

        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!(
                "Database max_connections must be greater than 0"
            ));
        }

        if self.database.connection_timeout == 0 {
            return Err(anyhow::anyhow!(
                "Database connection_timeout must be greater than 0"
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
                seed_sample_data: false,
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: LogFormat::Compact,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.connection_timeout(), Duration::from_secs(30));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(!config.database.seed_sample_data);
    }

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        let config: Config = ConfigBuilder::builder()
            .add_source(File::from_str(
                include_str!("../config/default.toml"),
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        let default = Config::default();

        assert_eq!(config.database.url, default.database.url);
        assert_eq!(config.database.max_connections, default.database.max_connections);
        assert_eq!(config.logging.level, default.logging.level);
        assert_eq!(config.logging.format, default.logging.format);
    }

    #[test]
    fn test_database_url_with_default() {
        let config = Config::default();
        let url = config.database_url();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("taskdesk.sqlite"));
    }

    #[test]
    fn test_database_url_with_custom() {
        let mut config = Config::default();
        config.database.url = Some("sqlite://custom.db".to_string());
        assert_eq!(config.database_url(), "sqlite://custom.db");
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = Config::default();
        invalid_config.logging.level = "loud".to_string();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = Config::default();
        invalid_config.database.url = Some("postgres://localhost/tasks".to_string());
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = Config::default();
        invalid_config.database.max_connections = 0;
        assert!(invalid_config.validate().is_err());

        let mut memory = Config::default();
        memory.database.url = Some("sqlite::memory:".to_string());
        assert!(memory.validate().is_ok());

        let mut short = Config::default();
        short.database.url = Some("sqlite:tasks.db".to_string());
        assert!(short.validate().is_ok());
    }

    #[test]
    fn test_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[database]\nurl = \"sqlite://from-file.db\"\nseed_sample_data = true\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        if env::var("DATABASE_URL").is_err() {
            assert_eq!(config.database.url.as_deref(), Some("sqlite://from-file.db"));
        }
        assert!(config.database.seed_sample_data);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_from_file_missing_is_error() {
        assert!(Config::from_file("/nonexistent/taskdesk.toml").is_err());
    }
}
