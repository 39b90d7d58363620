use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::models::{Person, Status, WorkTask};

/// Maximum length of a person's name
pub const MAX_PERSON_NAME_LEN: usize = 100;
/// Maximum length of a person's email
pub const MAX_EMAIL_LEN: usize = 100;

/// Field a [`Violation`] is attributed to.
///
/// The rendered names are part of the public contract: callers group and
/// display violations by them.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
pub enum Field {
    Title,
    DueDate,
    EstimatedHours,
    AssignedTo,
    Tags,
    Name,
    Email,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::DueDate => "DueDate",
            Field::EstimatedHours => "EstimatedHours",
            Field::AssignedTo => "AssignedTo",
            Field::Tags => "Tags",
            Field::Name => "Name",
            Field::Email => "Email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule the validated record fails
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub message: String,
}

impl Violation {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Business rules for tasks and people.
///
/// Validation is a pure function of the record: every rule runs, every
/// failure is collected, and nothing is read from the clock or the store.
/// The due-date rule compares against the task's own `created_at`.
///
/// # Examples
///
/// ```rust
/// use taskdesk_core::models::{Status, WorkTask};
/// use taskdesk_core::validation::{Field, TaskValidator};
///
/// let task = WorkTask::new("   ").with_status(Status::InProgress);
/// let fields: Vec<Field> = TaskValidator::validate(&task)
///     .into_iter()
///     .map(|v| v.field)
///     .collect();
///
/// assert_eq!(fields, vec![Field::Title, Field::EstimatedHours, Field::AssignedTo]);
/// ```
pub struct TaskValidator;

impl TaskValidator {
    /// Check a task snapshot against every rule, in rule order
    pub fn validate(task: &WorkTask) -> Vec<Violation> {
        let mut violations = Vec::new();

        if task.title.trim().is_empty() {
            violations.push(Violation::new(
                Field::Title,
                "Title cannot be empty or whitespace.",
            ));
        }

        if let Some(due_date) = task.due_date {
            if due_date <= task.created_at {
                violations.push(Violation::new(
                    Field::DueDate,
                    "Due date must be after the creation date.",
                ));
            }
        }

        if task.status.is_active_work() && task.estimated_hours.is_none() {
            violations.push(Violation::new(
                Field::EstimatedHours,
                "Estimated hours must be provided for tasks in progress or under review.",
            ));
        }

        if task.estimated_hours == Some(0) {
            violations.push(Violation::new(
                Field::EstimatedHours,
                "Estimated hours must be a positive number.",
            ));
        }

        if task.status.requires_assignee() && task.assigned_to.is_none() {
            violations.push(Violation::new(
                Field::AssignedTo,
                "Task must have an assignee in the current status.",
            ));
        }

        for tag in &task.tags {
            if tag.trim().is_empty() {
                violations.push(Violation::new(
                    Field::Tags,
                    "Tags cannot contain empty values.",
                ));
            }
        }

        if task.status == Status::Completed && task.estimated_hours.is_none() {
            violations.push(Violation::new(
                Field::EstimatedHours,
                "Completed tasks must have estimated hours defined.",
            ));
        }

        violations
    }

    /// Whether a task passes every rule
    pub fn is_valid(task: &WorkTask) -> bool {
        Self::validate(task).is_empty()
    }

    /// Check a person before it is added
    pub fn validate_person(person: &Person) -> Vec<Violation> {
        let mut violations = Vec::new();

        let name = person.name.trim();
        if name.is_empty() {
            violations.push(Violation::new(
                Field::Name,
                "Name cannot be empty or whitespace.",
            ));
        } else if name.chars().count() > MAX_PERSON_NAME_LEN {
            violations.push(Violation::new(
                Field::Name,
                "Name must be at most 100 characters.",
            ));
        }

        if let Some(email) = &person.email {
            if !email_pattern().is_match(email) {
                violations.push(Violation::new(
                    Field::Email,
                    "Email must be a valid email address.",
                ));
            }
            if email.chars().count() > MAX_EMAIL_LEN {
                violations.push(Violation::new(
                    Field::Email,
                    "Email must be at most 100 characters.",
                ));
            }
        }

        violations
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn fields(task: &WorkTask) -> Vec<Field> {
        TaskValidator::validate(task).into_iter().map(|v| v.field).collect()
    }

    fn base_task() -> WorkTask {
        let mut task = WorkTask::new("Valid title");
        task.created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        task
    }

    #[test]
    fn test_valid_draft_task() {
        let task = base_task();
        assert!(TaskValidator::is_valid(&task));
    }

    #[test]
    fn test_empty_and_whitespace_titles() {
        for title in ["", "   ", "\t\n"] {
            let mut task = base_task();
            task.title = title.to_string();
            let violations = TaskValidator::validate(&task);
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, Field::Title);
            assert_eq!(violations[0].message, "Title cannot be empty or whitespace.");
        }
    }

    #[test]
    fn test_due_date_must_be_after_creation() {
        let task = base_task();
        let created = task.created_at;

        let same = task.clone().with_due_date(created);
        assert_eq!(fields(&same), vec![Field::DueDate]);

        let before = task.clone().with_due_date(created - Duration::days(1));
        assert_eq!(fields(&before), vec![Field::DueDate]);

        let after = task.with_due_date(created + Duration::seconds(1));
        assert!(fields(&after).is_empty());
    }

    #[test]
    fn test_active_work_requires_estimate() {
        for status in [Status::InProgress, Status::UnderReview] {
            let task = base_task().with_status(status).with_assignee(Uuid::new_v4());
            let violations = TaskValidator::validate(&task);
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, Field::EstimatedHours);
            assert_eq!(
                violations[0].message,
                "Estimated hours must be provided for tasks in progress or under review."
            );
        }
    }

    #[test]
    fn test_completed_requires_estimate() {
        let task = base_task().with_status(Status::Completed);
        let violations = TaskValidator::validate(&task);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, Field::EstimatedHours);
        assert_eq!(
            violations[0].message,
            "Completed tasks must have estimated hours defined."
        );

        let estimated = base_task().with_status(Status::Completed).with_estimated_hours(3);
        assert!(TaskValidator::is_valid(&estimated));
    }

    #[test]
    fn test_zero_estimate_is_rejected() {
        let task = base_task().with_estimated_hours(0);
        let violations = TaskValidator::validate(&task);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Estimated hours must be a positive number.");
    }

    #[test]
    fn test_assignee_required_statuses() {
        let assigned = base_task().with_status(Status::Assigned);
        assert_eq!(fields(&assigned), vec![Field::AssignedTo]);

        let with_person = base_task()
            .with_status(Status::Assigned)
            .with_assignee(Uuid::new_v4());
        assert!(TaskValidator::is_valid(&with_person));
    }

    #[test]
    fn test_terminal_statuses_without_assignee() {
        for status in [Status::Cancelled, Status::Rejected, Status::Draft] {
            let task = base_task().with_status(status);
            assert!(TaskValidator::is_valid(&task), "{status} should be valid");
        }
    }

    #[test]
    fn test_each_blank_tag_is_reported() {
        let task = base_task().with_tags(["backend", "", "  ", "ui"]);
        assert_eq!(fields(&task), vec![Field::Tags, Field::Tags]);
    }

    #[test]
    fn test_all_violations_collected_in_rule_order() {
        let mut task = base_task()
            .with_status(Status::InProgress)
            .with_tags([" "]);
        task.title = String::new();
        task.due_date = Some(task.created_at);

        assert_eq!(
            fields(&task),
            vec![
                Field::Title,
                Field::DueDate,
                Field::EstimatedHours,
                Field::AssignedTo,
                Field::Tags,
            ]
        );
    }

    #[test]
    fn test_validation_is_deterministic() {
        let task = base_task().with_status(Status::UnderReview);
        assert_eq!(TaskValidator::validate(&task), TaskValidator::validate(&task));
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::new(Field::Tags, "Tags cannot contain empty values.");
        assert_eq!(violation.to_string(), "Tags: Tags cannot contain empty values.");
    }

    #[test]
    fn test_valid_people() {
        let person = Person::new(Uuid::new_v4(), "Jane Smith", Some("jane@example.com".into()));
        assert!(TaskValidator::validate_person(&person).is_empty());

        let no_email = Person::quick("Bob");
        assert!(TaskValidator::validate_person(&no_email).is_empty());
    }

    #[test]
    fn test_invalid_people() {
        let blank = Person::new(Uuid::new_v4(), "  ", None);
        let violations = TaskValidator::validate_person(&blank);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, Field::Name);

        let long_name = Person::new(Uuid::new_v4(), "a".repeat(101), None);
        assert_eq!(TaskValidator::validate_person(&long_name)[0].field, Field::Name);

        for email in ["not-an-email", "a@b", "two@@example.com", "sp ace@example.com"] {
            let person = Person::new(Uuid::new_v4(), "Jane", Some(email.to_string()));
            let violations = TaskValidator::validate_person(&person);
            assert_eq!(violations.len(), 1, "{email} should be rejected");
            assert_eq!(violations[0].field, Field::Email);
        }

        let long_email = format!("{}@example.com", "a".repeat(95));
        let person = Person::new(Uuid::new_v4(), "Jane", Some(long_email));
        let violations = TaskValidator::validate_person(&person);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Email must be at most 100 characters.");
    }

    fn status_strategy() -> impl Strategy<Value = Status> {
        proptest::sample::select(Status::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_blank_titles_always_flagged(title in "[ \t\n]{0,10}") {
            let mut task = base_task();
            task.title = title;
            prop_assert!(fields(&task).contains(&Field::Title));
        }

        #[test]
        fn prop_non_blank_titles_never_flagged(title in "[ ]{0,3}[A-Za-z0-9][A-Za-z0-9 ]{0,40}") {
            let mut task = base_task();
            task.title = title;
            prop_assert!(!fields(&task).contains(&Field::Title));
        }

        #[test]
        fn prop_due_date_rule(offset_secs in -100_000i64..100_000) {
            let task = base_task();
            let due = task.created_at + Duration::seconds(offset_secs);
            let flagged = fields(&task.with_due_date(due)).contains(&Field::DueDate);
            prop_assert_eq!(flagged, offset_secs <= 0);
        }

        #[test]
        fn prop_estimate_required(status in status_strategy()) {
            let task = base_task().with_status(status);
            let flagged = fields(&task).contains(&Field::EstimatedHours);
            let expected = matches!(
                status,
                Status::InProgress | Status::UnderReview | Status::Completed
            );
            prop_assert_eq!(flagged, expected);
        }

        #[test]
        fn prop_assignee_required(status in status_strategy()) {
            let task = base_task().with_status(status);
            let flagged = fields(&task).contains(&Field::AssignedTo);
            let expected = matches!(
                status,
                Status::Assigned | Status::InProgress | Status::UnderReview
            );
            prop_assert_eq!(flagged, expected);
        }
    }
}
