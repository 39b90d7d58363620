//! Standard test fixtures for consistent testing
//!
//! Provides pre-built test data including:
//! - A valid task for every status
//! - A small team of people
//! - Bulk task generators with distinct timestamps

use chrono::{Duration, Utc};
use taskdesk_core::models::{Person, Priority, Status, WorkTask};
use uuid::Uuid;

/// Create a basic valid Draft task with a fresh id
pub fn create_test_task() -> WorkTask {
    let mut task = WorkTask::new("Test Task")
        .with_description("A standard test task with default values")
        .with_tags(["test"]);
    task.id = Uuid::new_v4();
    task
}

/// Create a test person with a fresh id
pub fn create_test_person(name: &str) -> Person {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    Person::new(Uuid::new_v4(), name, Some(email))
}

/// Create a small team of people
pub fn create_test_people() -> Vec<Person> {
    ["Ada Lovelace", "Grace Hopper", "Linus Torvalds"]
        .into_iter()
        .map(create_test_person)
        .collect()
}

/// Create a task with `status` that satisfies every validation rule
///
/// Statuses that need an assignee get `assignee`, active and completed
/// statuses get an estimate.
pub fn create_valid_task_with_status(status: Status, assignee: Uuid) -> WorkTask {
    let mut task = create_test_task()
        .with_status(status)
        .with_due_date(Utc::now() + Duration::days(7));
    task.title = format!("{status} task");

    if status.requires_assignee() {
        task = task.with_assignee(assignee);
    }
    if status.is_active_work() || status == Status::Completed {
        task = task.with_estimated_hours(5);
    }
    task
}

/// Create one valid task in each status
pub fn create_tasks_in_all_statuses(assignee: Uuid) -> Vec<WorkTask> {
    Status::ALL
        .into_iter()
        .map(|status| create_valid_task_with_status(status, assignee))
        .collect()
}

/// Create multiple unique tasks with strictly decreasing creation times
pub fn create_test_tasks(count: usize) -> Vec<WorkTask> {
    let now = Utc::now();
    (0..count)
        .map(|i| {
            let priority = Priority::ALL[i % Priority::ALL.len()];
            let mut task = WorkTask::new(format!("Test Task {}", i + 1))
                .with_description(format!("Test task number {} for bulk testing", i + 1))
                .with_priority(priority);
            task.id = Uuid::new_v4();
            task.created_at = now - Duration::minutes(i as i64);
            task
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdesk_core::validation::TaskValidator;

    #[test]
    fn test_valid_fixtures_pass_validation() {
        for task in create_tasks_in_all_statuses(Uuid::new_v4()) {
            let violations = TaskValidator::validate(&task);
            assert!(violations.is_empty(), "{}: {violations:?}", task.status);
        }
    }

    #[test]
    fn test_bulk_tasks_are_unique_and_ordered() {
        let tasks = create_test_tasks(5);
        assert_eq!(tasks.len(), 5);
        for window in tasks.windows(2) {
            assert_ne!(window[0].id, window[1].id);
            assert!(window[0].created_at > window[1].created_at);
        }
    }

    #[test]
    fn test_people_have_emails() {
        let people = create_test_people();
        assert_eq!(people.len(), 3);
        assert_eq!(people[0].email.as_deref(), Some("ada.lovelace@example.com"));
    }
}
