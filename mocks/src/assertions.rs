//! Custom assertion helpers for testing
//!
//! Provides specialized assertions for:
//! - Task equality with clear error messages
//! - Outcome success and failure checks
//! - Collection-based assertions

use std::fmt::Debug;
use taskdesk_core::{
    models::{PersonId, Priority, Status, TaskId, WorkTask},
    outcome::Outcome,
};

/// Assert tasks are equal ignoring id and creation timestamp
pub fn assert_task_equals(actual: &WorkTask, expected: &WorkTask) {
    assert_eq!(actual.title, expected.title, "Task titles don't match");
    assert_eq!(actual.description, expected.description, "Task descriptions don't match");
    assert_eq!(actual.status, expected.status, "Task statuses don't match");
    assert_eq!(actual.priority, expected.priority, "Task priorities don't match");
    assert_eq!(actual.due_date, expected.due_date, "Task due dates don't match");
    assert_eq!(actual.estimated_hours, expected.estimated_hours, "Task estimates don't match");
    assert_eq!(actual.assigned_to, expected.assigned_to, "Task assignees don't match");
    assert_eq!(actual.tags, expected.tags, "Task tags don't match");
}

/// Assert tasks are equal including id and timestamps
pub fn assert_task_equals_exact(actual: &WorkTask, expected: &WorkTask) {
    assert_eq!(actual, expected, "Tasks are not exactly equal");
}

/// Assert task matches partial criteria
pub fn assert_task_matches(task: &WorkTask, matcher: &TaskMatcher) {
    if let Some(expected_id) = matcher.id {
        assert_eq!(task.id, expected_id, "Task ID doesn't match expected");
    }
    if let Some(ref expected_title) = matcher.title {
        assert_eq!(task.title, *expected_title, "Task title doesn't match expected");
    }
    if let Some(expected_status) = matcher.status {
        assert_eq!(task.status, expected_status, "Task status doesn't match expected");
    }
    if let Some(expected_priority) = matcher.priority {
        assert_eq!(task.priority, expected_priority, "Task priority doesn't match expected");
    }
    if let Some(expected_assignee) = matcher.assigned_to {
        assert_eq!(task.assigned_to, expected_assignee, "Task assignee doesn't match expected");
    }
}

/// Assert the outcome succeeded, returning its payload
pub fn assert_success<T: Debug>(outcome: Outcome<T>) -> T {
    assert!(
        outcome.is_success(),
        "Expected success, got failure '{}' with errors {:?}",
        outcome.message(),
        outcome.errors()
    );
    match outcome.into_data() {
        Some(data) => data,
        None => panic!("Successful outcome carried no data"),
    }
}

/// Assert the outcome failed with exactly `message`
pub fn assert_failure<T: Debug>(outcome: &Outcome<T>, message: &str) {
    assert!(
        !outcome.is_success(),
        "Expected failure '{message}', got success: {:?}",
        outcome.data()
    );
    assert_eq!(outcome.message(), message, "Failure message doesn't match");
    assert!(outcome.data().is_none(), "Failed outcome must not carry data");
}

/// Assert task list contains task with specific title
pub fn assert_contains_task_with_title(tasks: &[WorkTask], title: &str) {
    assert!(
        tasks.iter().any(|t| t.title == title),
        "Expected to find task with title '{}' in task list, but it wasn't found. Available titles: {:?}",
        title,
        tasks.iter().map(|t| &t.title).collect::<Vec<_>>()
    );
}

/// Assert tasks are sorted by creation date (most recent first)
pub fn assert_tasks_sorted_by_date(tasks: &[WorkTask]) {
    for window in tasks.windows(2) {
        assert!(
            window[0].created_at >= window[1].created_at,
            "Tasks are not sorted by creation date (most recent first). Task '{}' ({}) comes before '{}' ({})",
            window[0].title,
            window[0].created_at,
            window[1].title,
            window[1].created_at
        );
    }
}

/// Assert every task has `status`
pub fn assert_all_tasks_have_status(tasks: &[WorkTask], status: Status) {
    for task in tasks {
        assert_eq!(
            task.status, status,
            "Task '{}' has status {} but expected {}",
            task.title, task.status, status
        );
    }
}

/// Flexible task matcher for partial assertions
#[derive(Debug, Default)]
pub struct TaskMatcher {
    pub id: Option<TaskId>,
    pub title: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<Option<PersonId>>,
}

impl TaskMatcher {
    /// Create a new empty matcher
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assignee: Option<PersonId>) -> Self {
        self.assigned_to = Some(assignee);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TaskBuilder;

    #[test]
    fn test_task_matcher() {
        let task = TaskBuilder::new()
            .with_title("Matcher")
            .with_priority(Priority::Critical)
            .build();

        let matcher = TaskMatcher::new()
            .with_id(task.id)
            .with_title("Matcher")
            .with_priority(Priority::Critical)
            .with_assignee(None);
        assert_task_matches(&task, &matcher);
    }

    #[test]
    fn test_outcome_assertions() {
        let ok = Outcome::success(5);
        assert_eq!(assert_success(ok), 5);

        let failed: Outcome<i32> = Outcome::failure("Task not found", ["No task"]);
        assert_failure(&failed, "Task not found");
    }

    #[test]
    #[should_panic(expected = "not sorted")]
    fn test_sorted_assertion_detects_disorder() {
        let mut tasks = crate::fixtures::create_test_tasks(2);
        tasks.reverse();
        assert_tasks_sorted_by_date(&tasks);
    }
}
