use async_trait::async_trait;
use crate::{
    error::Result,
    models::{Person, PersonId, Priority, Status, TaskId, WorkTask},
};

/// Persistence operations the task service depends on.
///
/// Implementations must be thread-safe. Every task listing is ordered by
/// creation timestamp, most recent first; people are ordered by name.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// List every task
    ///
    /// # Returns
    /// * `Ok(Vec<WorkTask>)` - All tasks, newest first (may be empty)
    /// * `Err(TaskError::Database)` - If the store cannot be read
    async fn list_all(&self) -> Result<Vec<WorkTask>>;

    /// Get a task by its identifier
    ///
    /// # Returns
    /// * `Ok(Some(WorkTask))` - The task if found
    /// * `Ok(None)` - If no task exists with that ID
    /// * `Err(TaskError::Database)` - If the store cannot be read
    async fn get_by_id(&self, id: TaskId) -> Result<Option<WorkTask>>;

    /// Persist a new task
    ///
    /// Any `id` or `created_at` supplied by the caller is replaced.
    ///
    /// # Returns
    /// * `Ok(WorkTask)` - The stored task with its generated ID and timestamp
    /// * `Err(TaskError::Database)` - If the write fails
    async fn add(&self, task: WorkTask) -> Result<WorkTask>;

    /// Replace a stored task with the given record
    ///
    /// Nothing happens if no task has `task.id`; callers check existence first.
    async fn update(&self, task: WorkTask) -> Result<()>;

    /// Remove a task
    async fn delete_by_id(&self, id: TaskId) -> Result<()>;

    /// Tasks with the given status
    async fn list_by_status(&self, status: Status) -> Result<Vec<WorkTask>>;

    /// Tasks with the given priority
    async fn list_by_priority(&self, priority: Priority) -> Result<Vec<WorkTask>>;

    /// Tasks assigned to the given person
    async fn list_by_person(&self, person_id: PersonId) -> Result<Vec<WorkTask>>;

    /// Tasks whose title or description contains `term`, ignoring case
    async fn search(&self, term: &str) -> Result<Vec<WorkTask>>;

    /// Every person, ordered by name
    async fn list_all_people(&self) -> Result<Vec<Person>>;

    /// Get a person by identifier
    ///
    /// # Returns
    /// * `Ok(Some(Person))` - The person if found
    /// * `Ok(None)` - If no person exists with that ID
    async fn get_person_by_id(&self, id: PersonId) -> Result<Option<Person>>;

    /// Persist a person, keeping the caller-supplied ID
    ///
    /// # Returns
    /// * `Ok(Person)` - The stored person
    /// * `Err(TaskError::DuplicateEmail)` - If another person has the same email
    /// * `Err(TaskError::Database)` - If the write fails
    async fn add_person(&self, person: Person) -> Result<Person>;

    /// Remove a person and clear the assignee of every task that referenced them
    async fn delete_person(&self, id: PersonId) -> Result<()>;

    /// Verify the store is reachable
    async fn health_check(&self) -> Result<()>;
}
