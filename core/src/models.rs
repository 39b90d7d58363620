use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::TaskError;

/// Opaque identifier of a [`WorkTask`]
pub type TaskId = Uuid;

/// Opaque identifier of a [`Person`]
pub type PersonId = Uuid;

/// A unit of work tracked by the application.
///
/// Tasks are replaced as whole records on update: callers hand over the
/// complete desired state rather than a delta. The `id` and `created_at`
/// fields are owned by the store and are overwritten when a task is first
/// persisted.
///
/// # Examples
///
/// ```rust
/// use taskdesk_core::models::{Priority, Status, WorkTask};
///
/// let task = WorkTask::new("Write release notes")
///     .with_description("Summarise the changes since 0.3")
///     .with_priority(Priority::High);
///
/// assert_eq!(task.status, Status::Draft);
/// assert!(task.assigned_to.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkTask {
    /// Store-assigned identifier
    pub id: TaskId,
    /// Short title, required
    pub title: String,
    /// Free-form details
    #[serde(default)]
    pub description: String,
    /// Current lifecycle status
    #[serde(default)]
    pub status: Status,
    /// Relative importance
    #[serde(default)]
    pub priority: Priority,
    /// Set once when the task is persisted
    pub created_at: DateTime<Utc>,
    /// Optional deadline, must be after `created_at`
    pub due_date: Option<DateTime<Utc>>,
    /// Estimated effort in whole hours
    pub estimated_hours: Option<u32>,
    /// Non-owning reference to the assignee
    pub assigned_to: Option<PersonId>,
    /// Ordered free-text labels
    #[serde(default)]
    pub tags: Vec<String>,
}

impl WorkTask {
    /// Create a draft task with the given title and default values for every other field
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            title: title.into(),
            description: String::new(),
            status: Status::default(),
            priority: Priority::default(),
            created_at: Utc::now(),
            due_date: None,
            estimated_hours: None,
            assigned_to: None,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_estimated_hours(mut self, hours: u32) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_assignee(mut self, person_id: PersonId) -> Self {
        self.assigned_to = Some(person_id);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the task is assigned to the given person
    pub fn is_assigned_to(&self, person_id: PersonId) -> bool {
        self.assigned_to == Some(person_id)
    }

    /// Case-insensitive containment check against title and description
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Someone tasks can be assigned to.
///
/// A person does not own its tasks; the relation lives on
/// [`WorkTask::assigned_to`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    /// Caller-supplied identifier
    pub id: PersonId,
    /// Display name, required
    pub name: String,
    /// Optional contact address, unique across people
    pub email: Option<String>,
}

impl Person {
    pub fn new(id: PersonId, name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email,
        }
    }

    /// Build a person from just a name, as done when adding someone inline
    /// while editing a task. The name is trimmed and a fresh id is generated.
    pub fn quick(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: None,
        }
    }
}

/// Task lifecycle status.
///
/// The usual flow is Draft → Assigned → InProgress → UnderReview → Completed,
/// with Cancelled and Rejected as abandoned endings. Adjacency is not
/// enforced: any status may be set directly, and only the validator's
/// invariants apply.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Status {
    /// Not yet actionable
    #[default]
    Draft,
    /// Owner set, not started
    Assigned,
    /// Active work
    InProgress,
    /// Work done, awaiting check
    UnderReview,
    /// Finished successfully
    Completed,
    /// Abandoned by the owner
    Cancelled,
    /// Abandoned after review
    Rejected,
}

impl Status {
    pub const ALL: [Status; 7] = [
        Status::Draft,
        Status::Assigned,
        Status::InProgress,
        Status::UnderReview,
        Status::Completed,
        Status::Cancelled,
        Status::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::Assigned => "Assigned",
            Status::InProgress => "InProgress",
            Status::UnderReview => "UnderReview",
            Status::Completed => "Completed",
            Status::Cancelled => "Cancelled",
            Status::Rejected => "Rejected",
        }
    }

    /// Statuses that require an assignee
    pub fn requires_assignee(&self) -> bool {
        matches!(self, Status::Assigned | Status::InProgress | Status::UnderReview)
    }

    /// Statuses that represent work under way
    pub fn is_active_work(&self) -> bool {
        matches!(self, Status::InProgress | Status::UnderReview)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TaskError::Validation(format!("Unknown status: '{s}'")))
    }
}

/// Task priority, ordered from least to most urgent
#[derive(
    Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TaskError::Validation(format!("Unknown priority: '{s}'")))
    }
}

/// Optional criteria for narrowing the task list.
///
/// See [`TaskService::filter_tasks`](crate::service::TaskService::filter_tasks)
/// for how the criteria combine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<PersonId>,
}

impl TaskFilter {
    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.assigned_to.is_none()
    }
}
