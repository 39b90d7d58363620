use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use taskdesk_core::{
    error::{Result, TaskError},
    models::{Person, Priority, Status, WorkTask},
};
use uuid::Uuid;

/// Column list shared by every task query
pub const TASK_COLUMNS: &str = "id, title, description, status, priority, created_at, due_date, estimated_hours, assigned_to, tags";

/// Convert string from database to Status enum
pub fn string_to_status(s: &str) -> Result<Status> {
    s.parse()
        .map_err(|_| TaskError::Database(format!("Invalid task status in database: {s}")))
}

/// Convert string from database to Priority enum
pub fn string_to_priority(s: &str) -> Result<Priority> {
    s.parse()
        .map_err(|_| TaskError::Database(format!("Invalid task priority in database: {s}")))
}

/// Parse a UUID stored as TEXT
pub fn string_to_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s)
        .map_err(|e| TaskError::Database(format!("Invalid identifier in database: {s} ({e})")))
}

/// Serialize tags into the JSON text column
pub fn tags_to_json(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags)
        .map_err(|e| TaskError::Internal(format!("Failed to encode tags: {e}")))
}

/// Convert SQLite row to WorkTask model
pub fn row_to_task(row: &SqliteRow) -> Result<WorkTask> {
    let id: String = row.get("id");
    let status: String = row.get("status");
    let priority: String = row.get("priority");
    let created_at: DateTime<Utc> = row.get("created_at");
    let due_date: Option<DateTime<Utc>> = row.get("due_date");
    let estimated_hours: Option<i64> = row.get("estimated_hours");
    let assigned_to: Option<String> = row.get("assigned_to");
    let tags: String = row.get("tags");

    let estimated_hours = estimated_hours
        .map(|hours| {
            u32::try_from(hours).map_err(|_| {
                TaskError::Database(format!("Invalid estimated hours in database: {hours}"))
            })
        })
        .transpose()?;

    let tags: Vec<String> = serde_json::from_str(&tags)
        .map_err(|e| TaskError::Database(format!("Invalid tags in database: {e}")))?;

    Ok(WorkTask {
        id: string_to_uuid(&id)?,
        title: row.get("title"),
        description: row.get("description"),
        status: string_to_status(&status)?,
        priority: string_to_priority(&priority)?,
        created_at,
        due_date,
        estimated_hours,
        assigned_to: assigned_to.as_deref().map(string_to_uuid).transpose()?,
        tags,
    })
}

/// Convert SQLite row to Person model
pub fn row_to_person(row: &SqliteRow) -> Result<Person> {
    let id: String = row.get("id");

    Ok(Person {
        id: string_to_uuid(&id)?,
        name: row.get("name"),
        email: row.get("email"),
    })
}

/// Convert SQLx error to TaskError
pub fn sqlx_error_to_task_error(err: sqlx::Error) -> TaskError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();

            if message.contains("UNIQUE constraint failed: people.email") {
                TaskError::DuplicateEmail(message.to_string())
            } else {
                TaskError::Database(format!("Database constraint error: {message}"))
            }
        }
        sqlx::Error::RowNotFound => {
            TaskError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => TaskError::Database("Connection pool timeout".to_string()),
        sqlx::Error::Io(io_err) => TaskError::Database(format!("Database I/O error: {io_err}")),
        _ => TaskError::Database(format!("Database operation failed: {err}")),
    }
}
