//! Sample data for a fresh database

use chrono::{Duration, Utc};
use taskdesk_core::{
    error::Result,
    models::{Person, Priority, Status, WorkTask},
    repository::TaskRepository,
};
use uuid::Uuid;

/// Insert a small set of people and tasks when the store is empty.
///
/// Returns `Ok(false)` without writing anything if any task or person already
/// exists, so calling it on every start-up is safe.
pub async fn seed_sample_data<R: TaskRepository + ?Sized>(repo: &R) -> Result<bool> {
    if !repo.list_all().await?.is_empty() || !repo.list_all_people().await?.is_empty() {
        tracing::debug!("Store already has data, skipping seed");
        return Ok(false);
    }

    let people = [
        ("John Doe", "john.doe@example.com"),
        ("Jane Smith", "jane.smith@example.com"),
        ("Bob Johnson", "bob.johnson@example.com"),
        ("Alice Williams", "alice.williams@example.com"),
    ];

    let mut ids = Vec::with_capacity(people.len());
    for (name, email) in people {
        let person = repo
            .add_person(Person::new(Uuid::new_v4(), name, Some(email.to_string())))
            .await?;
        ids.push(person.id);
    }

    let now = Utc::now();
    let tasks = vec![
        WorkTask::new("Setup development environment")
            .with_description("Install the toolchain, editor plugins and local database")
            .with_status(Status::Completed)
            .with_priority(Priority::High)
            .with_estimated_hours(4)
            .with_assignee(ids[0])
            .with_tags(["setup", "environment", "dev"]),
        WorkTask::new("Design database schema")
            .with_description("Create the entity relationship diagram for the application")
            .with_status(Status::Completed)
            .with_priority(Priority::High)
            .with_estimated_hours(6)
            .with_assignee(ids[1])
            .with_tags(["database", "design"]),
        WorkTask::new("Implement user authentication")
            .with_description("Add login and registration with token-based sessions")
            .with_status(Status::InProgress)
            .with_priority(Priority::Critical)
            .with_due_date(now + Duration::days(2))
            .with_estimated_hours(12)
            .with_assignee(ids[0])
            .with_tags(["security", "backend"]),
        WorkTask::new("Review API documentation")
            .with_description("Check endpoint descriptions and examples for accuracy")
            .with_status(Status::UnderReview)
            .with_priority(Priority::Medium)
            .with_due_date(now + Duration::days(3))
            .with_estimated_hours(3)
            .with_assignee(ids[2])
            .with_tags(["docs"]),
        WorkTask::new("Create dashboard mockups")
            .with_description("Sketch the main dashboard and the task detail screen")
            .with_status(Status::Assigned)
            .with_priority(Priority::Medium)
            .with_due_date(now + Duration::days(5))
            .with_assignee(ids[3])
            .with_tags(["ui", "design"]),
        WorkTask::new("Write integration tests")
            .with_description("Cover the task lifecycle end to end")
            .with_status(Status::Draft)
            .with_priority(Priority::Low)
            .with_due_date(now + Duration::days(10))
            .with_tags(["testing"]),
        WorkTask::new("Evaluate reporting library")
            .with_description("Dropped in favour of the built-in export")
            .with_status(Status::Cancelled)
            .with_priority(Priority::Low),
    ];

    let count = tasks.len();
    for task in tasks {
        repo.add(task).await?;
    }

    tracing::info!(people = ids.len(), tasks = count, "Seeded sample data");
    Ok(true)
}
