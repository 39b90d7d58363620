//! Random test data generators using the fake crate
//!
//! Provides realistic random data including:
//! - Task titles, descriptions and tags
//! - People with names and emails
//! - Property-based testing strategies

use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use taskdesk_core::models::{Person, Priority, Status, TaskFilter, WorkTask};
use uuid::Uuid;

/// Generate a realistic task title
pub fn generate_task_title() -> String {
    Sentence(3..8).fake()
}

/// Generate a realistic task description
pub fn generate_task_description() -> String {
    Paragraph(2..5).fake()
}

/// Generate a random status
pub fn generate_random_status() -> Status {
    Status::ALL[rand::thread_rng().gen_range(0..Status::ALL.len())]
}

/// Generate a random priority
pub fn generate_random_priority() -> Priority {
    Priority::ALL[rand::thread_rng().gen_range(0..Priority::ALL.len())]
}

/// Generate a random person with a unique-looking email
pub fn generate_random_person() -> Person {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    Person::new(Uuid::new_v4(), name, Some(email))
}

/// Generate a random Draft task, which is always valid
pub fn generate_random_task() -> WorkTask {
    let tag_count = rand::thread_rng().gen_range(0..4);
    let tags: Vec<String> = (0..tag_count).map(|_| Word().fake()).collect();
    let mut task = WorkTask::new(generate_task_title())
        .with_description(generate_task_description())
        .with_priority(generate_random_priority())
        .with_tags(tags);
    task.id = Uuid::new_v4();
    task.created_at = Utc::now();
    task
}

/// Proptest strategy for generating statuses
pub fn status_strategy() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

/// Proptest strategy for generating priorities
pub fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop::sample::select(Priority::ALL.to_vec())
}

/// Proptest strategy for generating Draft tasks with arbitrary text
pub fn task_strategy() -> impl Strategy<Value = WorkTask> {
    (
        "[A-Za-z][A-Za-z ]{4,49}",
        "[A-Za-z0-9 .,!?]{0,200}",
        priority_strategy(),
        prop::collection::vec("[a-z]{3,10}", 0..4),
    )
        .prop_map(|(title, description, priority, tags)| {
            WorkTask::new(title)
                .with_description(description)
                .with_priority(priority)
                .with_tags(tags)
        })
}

/// Proptest strategy for generating task filters over status and priority
pub fn task_filter_strategy() -> impl Strategy<Value = TaskFilter> {
    (
        proptest::option::of(status_strategy()),
        proptest::option::of(priority_strategy()),
    )
        .prop_map(|(status, priority)| TaskFilter {
            status,
            priority,
            assigned_to: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdesk_core::validation::TaskValidator;

    #[test]
    fn test_random_tasks_are_valid() {
        for _ in 0..20 {
            let task = generate_random_task();
            assert!(TaskValidator::is_valid(&task), "{task:?}");
        }
    }

    #[test]
    fn test_random_person() {
        let person = generate_random_person();
        assert!(!person.name.trim().is_empty());
        assert!(person.email.is_some());
    }

    proptest! {
        #[test]
        fn generated_draft_tasks_pass_validation(task in task_strategy()) {
            prop_assert!(TaskValidator::validate(&task).is_empty());
        }
    }
}
