use anyhow::{Context, Result};
use database::{database_file_path, seed_sample_data, SqliteTaskRepository};
use std::path::Path;
use std::sync::Arc;
use taskdesk_core::TaskService;
use tracing::info;

use crate::config::Config;

/// Create the SQLite repository described by `config` and bring its schema up to date
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteTaskRepository>> {
    let database_url = config.database_url();
    info!(database_url = %database_url, "Opening task store");

    let repo = SqliteTaskRepository::with_pool_settings(
        &database_url,
        config.database.max_connections,
        config.connection_timeout(),
    )
    .await
    .with_context(|| format!("Failed to open SQLite database at {database_url}"))?;

    repo.migrate()
        .await
        .context("Failed to run database migrations")?;

    if config.database.seed_sample_data {
        let seeded = seed_sample_data(&repo)
            .await
            .context("Failed to seed sample data")?;
        info!(seeded, "Sample data check finished");
    }

    Ok(Arc::new(repo))
}

/// Initialize the task service on top of the configured store
pub async fn initialize_service(config: &Config) -> Result<TaskService<SqliteTaskRepository>> {
    ensure_database_directory(&config.database_url())
        .context("Failed to create database directory")?;

    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;

    Ok(TaskService::new(repository))
}

/// Ensure the database directory exists and set secure permissions
///
/// In-memory URLs are left alone.
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    let Some(db_path) = database_file_path(database_url) else {
        return Ok(());
    };
    if db_path.is_empty() {
        return Ok(());
    }

    let db_path = Path::new(db_path);
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating database directory: {}", parent.display());
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;

            // Owner only
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(0o700);
                std::fs::set_permissions(parent, permissions)
                    .context("Failed to set directory permissions")?;
            }
        }
    }

    if db_path.exists() {
        set_secure_file_permissions(db_path)?;
    }
    Ok(())
}

/// Set secure file permissions (owner-only access on Unix)
fn set_secure_file_permissions(file_path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(file_path, permissions)
            .with_context(|| format!("Failed to set permissions for {}", file_path.display()))?;
    }

    #[cfg(not(unix))]
    let _ = file_path;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use taskdesk_core::TaskRepository;
    use tempfile::TempDir;

    fn config_for(url: String) -> Config {
        let mut config = Config::default();
        config.database.url = Some(url);
        config
    }

    #[tokio::test]
    async fn test_create_repository_with_file_url() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("tasks.db");

        let config = config_for(format!("sqlite://{}", db_path.display()));
        let repo = create_repository(&config).await.unwrap();

        assert!(repo.health_check().await.is_ok());
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_create_repository_with_seeding() {
        let mut config = config_for("sqlite::memory:".to_string());
        config.database.seed_sample_data = true;

        let repo = create_repository(&config).await.unwrap();
        assert_eq!(repo.list_all_people().await.unwrap().len(), 4);
        assert!(!repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_service_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("tasks.db");

        let config = config_for(format!("sqlite://{}", db_path.display()));
        let service = initialize_service(&config).await.unwrap();

        assert!(service.get_all_tasks().await.is_success());
        assert!(db_path.parent().unwrap().exists());
    }

    #[test]
    fn test_ensure_database_directory() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("subdir").join("test.db");
        let database_url = format!("sqlite://{}", db_path.display());

        let result = ensure_database_directory(&database_url);
        assert!(result.is_ok());
        assert!(db_path.parent().unwrap().exists());
    }

    #[test]
    fn test_ensure_database_directory_single_colon_url() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("short").join("test.db");

        ensure_database_directory(&format!("sqlite:{}", db_path.display())).unwrap();
        assert!(db_path.parent().unwrap().exists());
    }

    #[test]
    fn test_ensure_database_directory_ignores_memory() {
        assert!(ensure_database_directory("sqlite::memory:").is_ok());
        assert!(ensure_database_directory("sqlite://:memory:").is_ok());
    }
}
