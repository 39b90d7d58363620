//! Builder pattern implementations for easy test data construction
//!
//! Provides fluent builders for:
//! - WorkTask construction with sensible defaults
//! - Person construction
//! - Filter construction for query testing

use chrono::{DateTime, Utc};
use taskdesk_core::models::{Person, PersonId, Priority, Status, TaskFilter, TaskId, WorkTask};
use uuid::Uuid;

/// Builder for constructing WorkTask instances in tests
pub struct TaskBuilder {
    task: WorkTask,
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBuilder {
    /// Create new builder with default values
    pub fn new() -> Self {
        let mut task = WorkTask::new("Test Task").with_description("A test task");
        task.id = Uuid::new_v4();
        Self { task }
    }

    /// Set task ID
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.task.id = id;
        self
    }

    /// Set task title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.task.title = title.into();
        self
    }

    /// Set task description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.task.description = description.into();
        self
    }

    /// Set task status
    pub fn with_status(mut self, status: Status) -> Self {
        self.task.status = status;
        self
    }

    /// Set task priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.task.priority = priority;
        self
    }

    /// Set creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.task.created_at = created_at;
        self
    }

    /// Set due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.task.due_date = Some(due_date);
        self
    }

    /// Set estimated hours
    pub fn with_estimated_hours(mut self, hours: u32) -> Self {
        self.task.estimated_hours = Some(hours);
        self
    }

    /// Set assignee
    pub fn with_assignee(mut self, person_id: PersonId) -> Self {
        self.task.assigned_to = Some(person_id);
        self
    }

    /// Remove assignee
    pub fn unassigned(mut self) -> Self {
        self.task.assigned_to = None;
        self
    }

    /// Append a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.task.tags.push(tag.into());
        self
    }

    /// Build the final task
    pub fn build(self) -> WorkTask {
        self.task
    }
}

/// Builder for constructing Person instances in tests
pub struct PersonBuilder {
    person: Person,
}

impl Default for PersonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonBuilder {
    /// Create new builder with a fresh id and no email
    pub fn new() -> Self {
        Self {
            person: Person::new(Uuid::new_v4(), "Test Person", None),
        }
    }

    pub fn with_id(mut self, id: PersonId) -> Self {
        self.person.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.person.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.person.email = Some(email.into());
        self
    }

    pub fn build(self) -> Person {
        self.person
    }
}

/// Builder for constructing TaskFilter instances in tests
#[derive(Default)]
pub struct TaskFilterBuilder {
    filter: TaskFilter,
}

impl TaskFilterBuilder {
    /// Create new empty filter builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by status
    pub fn with_status(mut self, status: Status) -> Self {
        self.filter.status = Some(status);
        self
    }

    /// Filter by priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.filter.priority = Some(priority);
        self
    }

    /// Filter by assignee
    pub fn with_assignee(mut self, person_id: PersonId) -> Self {
        self.filter.assigned_to = Some(person_id);
        self
    }

    /// Build the final filter
    pub fn build(self) -> TaskFilter {
        self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let assignee = Uuid::new_v4();
        let task = TaskBuilder::new()
            .with_title("Custom Task")
            .with_status(Status::InProgress)
            .with_priority(Priority::High)
            .with_estimated_hours(3)
            .with_assignee(assignee)
            .with_tag("backend")
            .build();

        assert_eq!(task.title, "Custom Task");
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.estimated_hours, Some(3));
        assert_eq!(task.assigned_to, Some(assignee));
        assert_eq!(task.tags, vec!["backend"]);
        assert!(!task.id.is_nil());
    }

    #[test]
    fn test_person_builder() {
        let person = PersonBuilder::new()
            .with_name("Dana")
            .with_email("dana@example.com")
            .build();

        assert_eq!(person.name, "Dana");
        assert_eq!(person.email.as_deref(), Some("dana@example.com"));
    }

    #[test]
    fn test_filter_builder() {
        let filter = TaskFilterBuilder::new()
            .with_status(Status::Draft)
            .with_priority(Priority::Low)
            .build();

        assert_eq!(filter.status, Some(Status::Draft));
        assert_eq!(filter.priority, Some(Priority::Low));
        assert_eq!(filter.assigned_to, None);
        assert!(TaskFilterBuilder::new().build().is_empty());
    }
}
