use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::TaskError,
    models::{Person, PersonId, TaskFilter, TaskId, WorkTask},
    outcome::Outcome,
    repository::TaskRepository,
    validation::{TaskValidator, Violation},
};

/// Use-case layer between the presentation and the store.
///
/// Every operation is a single request/response exchange that returns an
/// [`Outcome`]. Store errors never escape: they become failed outcomes whose
/// message names the operation and whose errors hold the diagnostic text.
/// The service keeps no state of its own between calls.
///
/// # Examples
///
/// ```rust,ignore
/// let service = TaskService::new(Arc::new(repository));
///
/// let outcome = service.create_task(WorkTask::new("")).await;
/// assert!(!outcome.is_success());
/// assert_eq!(outcome.message(), "Validation failed");
/// ```
pub struct TaskService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository + ?Sized> TaskService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Access to the underlying store
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Every task, newest first
    pub async fn get_all_tasks(&self) -> Outcome<Vec<WorkTask>> {
        match self.repository.list_all().await {
            Ok(tasks) => {
                let message = format!("Retrieved {} tasks", tasks.len());
                Outcome::success_with_message(tasks, message)
            }
            Err(e) => storage_failure("Failed to retrieve tasks", e),
        }
    }

    /// A single task by ID
    pub async fn get_task_by_id(&self, id: TaskId) -> Outcome<WorkTask> {
        match self.repository.get_by_id(id).await {
            Ok(Some(task)) => Outcome::success_with_message(task, "Task retrieved successfully"),
            Ok(None) => task_not_found(id),
            Err(e) => storage_failure("Failed to retrieve task", e),
        }
    }

    /// Validate and persist a new task.
    ///
    /// The store is not touched when validation reports violations.
    pub async fn create_task(&self, task: WorkTask) -> Outcome<WorkTask> {
        let violations = TaskValidator::validate(&task);
        if !violations.is_empty() {
            return validation_failure(violations);
        }

        match self.repository.add(task).await {
            Ok(created) => {
                debug!(task_id = %created.id, "Task created");
                Outcome::success_with_message(created, "Task created successfully")
            }
            Err(e) => storage_failure("Failed to create task", e),
        }
    }

    /// Replace an existing task with `task`.
    ///
    /// The stored creation time always wins over the caller's, so the
    /// due-date rule is checked against the value the store keeps. The
    /// existence check and the write are two separate store calls; a
    /// concurrent delete in between is not detected.
    pub async fn update_task(&self, mut task: WorkTask) -> Outcome {
        match self.repository.get_by_id(task.id).await {
            Ok(Some(existing)) => task.created_at = existing.created_at,
            Ok(None) => return task_not_found(task.id),
            Err(e) => return storage_failure("Failed to update task", e),
        }

        let violations = TaskValidator::validate(&task);
        if !violations.is_empty() {
            return validation_failure(violations);
        }

        let task_id = task.id;
        match self.repository.update(task).await {
            Ok(()) => {
                debug!(task_id = %task_id, "Task updated");
                Outcome::ok_with_message("Task updated successfully")
            }
            Err(e) => storage_failure("Failed to update task", e),
        }
    }

    /// Remove a task after confirming it exists
    pub async fn delete_task(&self, id: TaskId) -> Outcome {
        match self.repository.get_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => return task_not_found(id),
            Err(e) => return storage_failure("Failed to delete task", e),
        }

        match self.repository.delete_by_id(id).await {
            Ok(()) => {
                debug!(task_id = %id, "Task deleted");
                Outcome::ok_with_message("Task deleted successfully")
            }
            Err(e) => storage_failure("Failed to delete task", e),
        }
    }

    /// Narrow the task list by status, priority and assignee.
    ///
    /// Criteria do not combine freely:
    ///
    /// * all three set: every task is loaded and all three must match;
    /// * otherwise the first set criterion in the order status, priority,
    ///   assignee is used on its own and the rest are ignored;
    /// * none set: every task is returned.
    ///
    /// So `status + priority` filters by status only, and an assignee is only
    /// honored alone or together with both other criteria. Existing callers
    /// depend on this precedence.
    pub async fn filter_tasks(&self, filter: TaskFilter) -> Outcome<Vec<WorkTask>> {
        let result = match filter {
            TaskFilter {
                status: Some(status),
                priority: Some(priority),
                assigned_to: Some(person_id),
            } => self.repository.list_all().await.map(|tasks| {
                tasks
                    .into_iter()
                    .filter(|t| {
                        t.status == status && t.priority == priority && t.is_assigned_to(person_id)
                    })
                    .collect()
            }),
            TaskFilter {
                status: Some(status),
                ..
            } => self.repository.list_by_status(status).await,
            TaskFilter {
                priority: Some(priority),
                ..
            } => self.repository.list_by_priority(priority).await,
            TaskFilter {
                assigned_to: Some(person_id),
                ..
            } => self.repository.list_by_person(person_id).await,
            TaskFilter { .. } => self.repository.list_all().await,
        };

        match result {
            Ok(tasks) => {
                let message = format!("Found {} tasks", tasks.len());
                Outcome::success_with_message(tasks, message)
            }
            Err(e) => storage_failure("Failed to filter tasks", e),
        }
    }

    /// Tasks whose title or description contains `term`.
    ///
    /// A blank term behaves exactly like [`get_all_tasks`](Self::get_all_tasks).
    pub async fn search_tasks(&self, term: &str) -> Outcome<Vec<WorkTask>> {
        if term.trim().is_empty() {
            return self.get_all_tasks().await;
        }

        match self.repository.search(term).await {
            Ok(tasks) => {
                let message = format!("Found {} tasks matching '{term}'", tasks.len());
                Outcome::success_with_message(tasks, message)
            }
            Err(e) => storage_failure("Failed to search tasks", e),
        }
    }

    /// Every person, ordered by name
    pub async fn get_all_people(&self) -> Outcome<Vec<Person>> {
        match self.repository.list_all_people().await {
            Ok(people) => {
                let message = format!("Retrieved {} people", people.len());
                Outcome::success_with_message(people, message)
            }
            Err(e) => storage_failure("Failed to retrieve people", e),
        }
    }

    /// Resolve a task's assignee reference
    pub async fn get_person(&self, id: PersonId) -> Outcome<Person> {
        match self.repository.get_person_by_id(id).await {
            Ok(Some(person)) => {
                Outcome::success_with_message(person, "Person retrieved successfully")
            }
            Ok(None) => Outcome::failure("Person not found", [format!("No person with ID {id}")]),
            Err(e) => storage_failure("Failed to retrieve person", e),
        }
    }

    /// Validate and persist a person, typically from a quick add while
    /// editing a task
    pub async fn add_person(&self, person: Person) -> Outcome<Person> {
        let violations = TaskValidator::validate_person(&person);
        if !violations.is_empty() {
            return validation_failure(violations);
        }

        match self.repository.add_person(person).await {
            Ok(added) => Outcome::success_with_message(added, "Person added successfully"),
            Err(e) => storage_failure("Failed to add person", e),
        }
    }
}

fn task_not_found<T>(id: TaskId) -> Outcome<T> {
    debug!(task_id = %id, "Task not found");
    Outcome::failure("Task not found", [format!("No task with ID {id}")])
}

fn validation_failure<T>(violations: Vec<Violation>) -> Outcome<T> {
    debug!(count = violations.len(), "Validation failed");
    Outcome::failure(
        "Validation failed",
        violations.into_iter().map(|v| v.message),
    )
}

fn storage_failure<T>(message: &str, error: TaskError) -> Outcome<T> {
    warn!(error = %error, "{message}");
    Outcome::failure(message, [error.to_string()])
}
