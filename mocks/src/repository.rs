//! Mock implementation of TaskRepository trait
//!
//! Provides a thread-safe mock repository with:
//! - Error injection capabilities
//! - Call tracking for verification
//! - Behavior matching the SQLite store (ordering, assignment clearing)

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use taskdesk_core::{
    error::{Result, TaskError},
    models::{Person, PersonId, Priority, Status, TaskId, WorkTask},
    repository::TaskRepository,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredTask {
    seq: u64,
    task: WorkTask,
}

/// Mock implementation of TaskRepository for testing
///
/// Features:
/// - Thread-safe concurrent access
/// - Error injection for failure testing
/// - Call history tracking for verification
/// - Newest-first ordering with insertion order as tie-breaker
#[derive(Clone)]
pub struct MockTaskRepository {
    tasks: Arc<Mutex<HashMap<TaskId, StoredTask>>>,
    people: Arc<Mutex<HashMap<PersonId, Person>>>,
    next_seq: Arc<AtomicU64>,
    error_injection: Arc<Mutex<Option<TaskError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTaskRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            people: Arc::new(Mutex::new(HashMap::new())),
            next_seq: Arc::new(AtomicU64::new(1)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create mock repository with pre-populated tasks
    ///
    /// Tasks keep their ids and timestamps exactly as given.
    pub fn with_tasks(tasks: Vec<WorkTask>) -> Self {
        let repo = Self::new();
        repo.insert_tasks(tasks);
        repo
    }

    /// Create mock repository with pre-populated people and tasks
    pub fn with_data(people: Vec<Person>, tasks: Vec<WorkTask>) -> Self {
        let repo = Self::with_tasks(tasks);
        {
            let mut map = repo.people.lock();
            for person in people {
                map.insert(person.id, person);
            }
        }
        repo
    }

    fn insert_tasks(&self, tasks: Vec<WorkTask>) {
        let mut map = self.tasks.lock();
        for task in tasks {
            let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
            map.insert(task.id, StoredTask { seq, task });
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: TaskError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    /// Number of recorded calls to `method`
    pub fn call_count(&self, method: &str) -> usize {
        let prefix = format!("{method}(");
        self.call_history
            .lock()
            .iter()
            .filter(|call| call.starts_with(&prefix))
            .count()
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.contains(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Assert method was never called
    pub fn assert_not_called(&self, method: &str) {
        assert_eq!(
            self.call_count(method),
            0,
            "Method '{}' was called. Call history: {:?}",
            method,
            self.call_history()
        );
    }

    /// Check if an error should be injected, consuming it if so
    fn check_error_injection(&self) -> Result<()> {
        let mut error_opt = self.error_injection.lock();
        if let Some(error) = error_opt.take() {
            return Err(error);
        }
        Ok(())
    }

    /// Record method call in history
    fn record_call(&self, method: &str) {
        self.call_history.lock().push(format!("{method}()"));
    }

    /// Record method call with parameters in history
    fn record_call_with_params(&self, method: &str, params: &str) {
        self.call_history.lock().push(format!("{method}({params})"));
    }

    /// Snapshot of tasks matching `predicate`, newest first
    fn collect_tasks<F>(&self, predicate: F) -> Vec<WorkTask>
    where
        F: Fn(&WorkTask) -> bool,
    {
        let tasks = self.tasks.lock();
        let mut stored: Vec<&StoredTask> = tasks.values().filter(|s| predicate(&s.task)).collect();
        stored.sort_by(|a, b| {
            b.task
                .created_at
                .cmp(&a.task.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        stored.into_iter().map(|s| s.task.clone()).collect()
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn list_all(&self) -> Result<Vec<WorkTask>> {
        self.record_call("list_all");
        self.check_error_injection()?;

        Ok(self.collect_tasks(|_| true))
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<WorkTask>> {
        self.record_call_with_params("get_by_id", &format!("id={id}"));
        self.check_error_injection()?;

        Ok(self.tasks.lock().get(&id).map(|s| s.task.clone()))
    }

    async fn add(&self, mut task: WorkTask) -> Result<WorkTask> {
        self.record_call_with_params("add", &format!("title={}", task.title));
        self.check_error_injection()?;

        task.id = Uuid::new_v4();
        task.created_at = Utc::now();

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.tasks.lock().insert(
            task.id,
            StoredTask {
                seq,
                task: task.clone(),
            },
        );

        Ok(task)
    }

    async fn update(&self, task: WorkTask) -> Result<()> {
        self.record_call_with_params("update", &format!("id={}", task.id));
        self.check_error_injection()?;

        let mut tasks = self.tasks.lock();
        if let Some(stored) = tasks.get_mut(&task.id) {
            let created_at = stored.task.created_at;
            stored.task = WorkTask { created_at, ..task };
        }

        Ok(())
    }

    async fn delete_by_id(&self, id: TaskId) -> Result<()> {
        self.record_call_with_params("delete_by_id", &format!("id={id}"));
        self.check_error_injection()?;

        self.tasks.lock().remove(&id);
        Ok(())
    }

    async fn list_by_status(&self, status: Status) -> Result<Vec<WorkTask>> {
        self.record_call_with_params("list_by_status", &format!("status={status}"));
        self.check_error_injection()?;

        Ok(self.collect_tasks(|t| t.status == status))
    }

    async fn list_by_priority(&self, priority: Priority) -> Result<Vec<WorkTask>> {
        self.record_call_with_params("list_by_priority", &format!("priority={priority}"));
        self.check_error_injection()?;

        Ok(self.collect_tasks(|t| t.priority == priority))
    }

    async fn list_by_person(&self, person_id: PersonId) -> Result<Vec<WorkTask>> {
        self.record_call_with_params("list_by_person", &format!("person={person_id}"));
        self.check_error_injection()?;

        Ok(self.collect_tasks(|t| t.is_assigned_to(person_id)))
    }

    async fn search(&self, term: &str) -> Result<Vec<WorkTask>> {
        self.record_call_with_params("search", &format!("term={term}"));
        self.check_error_injection()?;

        if term.trim().is_empty() {
            return Ok(self.collect_tasks(|_| true));
        }
        Ok(self.collect_tasks(|t| t.matches_term(term)))
    }

    async fn list_all_people(&self) -> Result<Vec<Person>> {
        self.record_call("list_all_people");
        self.check_error_injection()?;

        let mut people: Vec<Person> = self.people.lock().values().cloned().collect();
        people.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(people)
    }

    async fn get_person_by_id(&self, id: PersonId) -> Result<Option<Person>> {
        self.record_call_with_params("get_person_by_id", &format!("id={id}"));
        self.check_error_injection()?;

        Ok(self.people.lock().get(&id).cloned())
    }

    async fn add_person(&self, person: Person) -> Result<Person> {
        self.record_call_with_params("add_person", &format!("name={}", person.name));
        self.check_error_injection()?;

        let mut people = self.people.lock();
        if let Some(email) = person.email.as_deref() {
            if people.values().any(|p| p.email.as_deref() == Some(email)) {
                return Err(TaskError::DuplicateEmail(email.to_string()));
            }
        }
        people.insert(person.id, person.clone());

        Ok(person)
    }

    async fn delete_person(&self, id: PersonId) -> Result<()> {
        self.record_call_with_params("delete_person", &format!("id={id}"));
        self.check_error_injection()?;

        if self.people.lock().remove(&id).is_some() {
            for stored in self.tasks.lock().values_mut() {
                if stored.task.assigned_to == Some(id) {
                    stored.task.assigned_to = None;
                }
            }
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        self.record_call("health_check");
        self.check_error_injection()
    }
}
