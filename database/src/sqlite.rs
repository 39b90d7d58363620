use crate::common::{
    row_to_person, row_to_task, sqlx_error_to_task_error, tags_to_json, TASK_COLUMNS,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    migrate::MigrateDatabase,
    query::Query,
    sqlite::{SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Sqlite, SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;
use taskdesk_core::{
    error::{Result, TaskError},
    models::{Person, PersonId, Priority, Status, TaskId, WorkTask},
    repository::TaskRepository,
};
use uuid::Uuid;

/// Default number of pooled connections for file databases
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a free connection
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// SQLite implementation of the TaskRepository trait
///
/// Tasks and people share one database. Identifiers and timestamps are
/// stored as TEXT, tags as a JSON array.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    /// Create a new SQLite repository with the given database URL
    ///
    /// # Arguments
    /// * `database_url` - SQLite database URL (file path, `sqlite://path` or `:memory:`)
    ///
    /// # Returns
    /// * `Ok(SqliteTaskRepository)` - Successfully connected repository
    /// * `Err(TaskError::Database)` - If connection fails
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteTaskRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let repo = SqliteTaskRepository::new(":memory:").await?;
    ///
    /// // File-based database
    /// let repo = SqliteTaskRepository::new("sqlite:///tmp/tasks.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_pool_settings(database_url, DEFAULT_MAX_CONNECTIONS, DEFAULT_ACQUIRE_TIMEOUT)
            .await
    }

    /// Create a repository with explicit pool sizing
    pub async fn with_pool_settings(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        if is_memory_url(database_url) {
            // Every pooled connection to `:memory:` would open its own empty
            // database, so in-memory stores use a single long-lived connection.
            let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(sqlx_error_to_task_error)?
                .journal_mode(SqliteJournalMode::Memory)
                .foreign_keys(true);

            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(acquire_timeout)
                .connect_with(connect_options)
                .await
                .map_err(sqlx_error_to_task_error)?;

            return Ok(Self { pool });
        }

        let db_path = database_file_path(database_url).unwrap_or(database_url);
        let db_url = format!("sqlite://{db_path}");

        if !Sqlite::database_exists(&db_url).await.unwrap_or(false) {
            match Sqlite::create_database(&db_url).await {
                Ok(_) => tracing::info!(database_url = %db_url, "Database created successfully"),
                Err(error) => {
                    tracing::error!("Error creating database: {}", error);
                    return Err(TaskError::Database(format!(
                        "Failed to create database: {error}"
                    )));
                }
            }
        }

        let connect_options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_with(connect_options)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    ///
    /// This method applies all pending migrations to bring the database schema
    /// up to date. It should be called after creating a new repository instance.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| TaskError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// This method is primarily intended for testing scenarios where
    /// direct SQL execution is needed.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_tasks<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Result<Vec<WorkTask>> {
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        tracing::debug!(count = rows.len(), "Fetched task rows");

        rows.iter().map(row_to_task).collect()
    }
}

fn is_memory_url(database_url: &str) -> bool {
    matches!(database_url, ":memory:" | "sqlite::memory:" | "sqlite://:memory:")
}

/// File path named by a database URL, `None` for in-memory databases.
///
/// `sqlite://path`, `sqlite:path` and bare paths all name the same file.
pub fn database_file_path(database_url: &str) -> Option<&str> {
    if is_memory_url(database_url) {
        return None;
    }
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    Some(path)
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn list_all(&self) -> Result<Vec<WorkTask>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, rowid DESC");
        self.fetch_tasks(sqlx::query(&sql)).await
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<WorkTask>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?");
        let result = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        match result {
            Some(row) => Ok(Some(row_to_task(&row)?)),
            None => Ok(None),
        }
    }

    async fn add(&self, task: WorkTask) -> Result<WorkTask> {
        let task = WorkTask {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            ..task
        };

        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, description, status, priority, created_at, due_date, estimated_hours, assigned_to, tags)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(task.id.to_string())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.created_at)
        .bind(task.due_date)
        .bind(task.estimated_hours.map(i64::from))
        .bind(task.assigned_to.map(|id| id.to_string()))
        .bind(tags_to_json(&task.tags)?)
        .execute(&self.pool)
        .await
        .map_err(sqlx_error_to_task_error)?;

        tracing::debug!(task_id = %task.id, "Inserted task");
        Ok(task)
    }

    async fn update(&self, task: WorkTask) -> Result<()> {
        // created_at is owned by the store and never rewritten
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, status = ?, priority = ?, due_date = ?,
                estimated_hours = ?, assigned_to = ?, tags = ?
            WHERE id = ?
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.due_date)
        .bind(task.estimated_hours.map(i64::from))
        .bind(task.assigned_to.map(|id| id.to_string()))
        .bind(tags_to_json(&task.tags)?)
        .bind(task.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(sqlx_error_to_task_error)?;

        if result.rows_affected() == 0 {
            tracing::debug!(task_id = %task.id, "Update matched no task");
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: TaskId) -> Result<()> {
        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(())
    }

    async fn list_by_status(&self, status: Status) -> Result<Vec<WorkTask>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE status = ? ORDER BY created_at DESC, rowid DESC"
        );
        self.fetch_tasks(sqlx::query(&sql).bind(status.as_str())).await
    }

    async fn list_by_priority(&self, priority: Priority) -> Result<Vec<WorkTask>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE priority = ? ORDER BY created_at DESC, rowid DESC"
        );
        self.fetch_tasks(sqlx::query(&sql).bind(priority.as_str())).await
    }

    async fn list_by_person(&self, person_id: PersonId) -> Result<Vec<WorkTask>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE assigned_to = ? ORDER BY created_at DESC, rowid DESC"
        );
        self.fetch_tasks(sqlx::query(&sql).bind(person_id.to_string())).await
    }

    async fn search(&self, term: &str) -> Result<Vec<WorkTask>> {
        // LIKE only folds ASCII letters, so matching happens on decoded rows
        let tasks = self.list_all().await?;
        if term.trim().is_empty() {
            return Ok(tasks);
        }

        Ok(tasks.into_iter().filter(|task| task.matches_term(term)).collect())
    }

    async fn list_all_people(&self) -> Result<Vec<Person>> {
        let rows = sqlx::query("SELECT id, name, email FROM people ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        rows.iter().map(row_to_person).collect()
    }

    async fn get_person_by_id(&self, id: PersonId) -> Result<Option<Person>> {
        let result = sqlx::query("SELECT id, name, email FROM people WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        result.as_ref().map(row_to_person).transpose()
    }

    async fn add_person(&self, person: Person) -> Result<Person> {
        sqlx::query("INSERT INTO people (id, name, email) VALUES (?, ?, ?)")
            .bind(person.id.to_string())
            .bind(&person.name)
            .bind(&person.email)
            .execute(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        tracing::debug!(person_id = %person.id, "Inserted person");
        Ok(person)
    }

    async fn delete_person(&self, id: PersonId) -> Result<()> {
        // ON DELETE SET NULL clears tasks.assigned_to
        sqlx::query("DELETE FROM people WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        // Simple query to verify database connectivity
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(())
    }
}
