//! Contract test helpers for validating trait implementations
//!
//! Provides standardized tests that any implementation of core traits
//! should pass, ensuring consistent behavior across different implementations.
//! Every sub-contract tolerates data left behind by the others, so the whole
//! suite can run against one repository.

use crate::{create_test_person, create_test_task, TaskBuilder};
use taskdesk_core::{Priority, Status, TaskError, TaskRepository};
use uuid::Uuid;

/// Test any TaskRepository implementation with comprehensive contract tests
///
/// This function runs a suite of tests that any TaskRepository implementation
/// should pass to be considered compliant with the expected contract.
pub async fn test_repository_contract<R: TaskRepository + ?Sized>(repo: &R) {
    test_health_check_contract(repo).await;
    test_add_contract(repo).await;
    test_get_contract(repo).await;
    test_update_contract(repo).await;
    test_delete_contract(repo).await;
    test_list_contract(repo).await;
    test_search_contract(repo).await;
    test_people_contract(repo).await;
}

/// Test task insertion contract
pub async fn test_add_contract<R: TaskRepository + ?Sized>(repo: &R) {
    let input = create_test_task();
    let task = repo.add(input.clone()).await.expect("Add should succeed");

    assert!(!task.id.is_nil(), "Stored task should have an identifier");
    assert_ne!(task.id, input.id, "Store should assign a fresh identifier");
    assert_eq!(task.title, input.title, "Stored task should preserve title");
    assert_eq!(task.tags, input.tags, "Stored task should preserve tags");

    let second = repo.add(input).await.expect("Second add should succeed");
    assert_ne!(task.id, second.id, "Identifiers should be unique");
}

/// Test retrieval contract
pub async fn test_get_contract<R: TaskRepository + ?Sized>(repo: &R) {
    let task = repo
        .add(TaskBuilder::new().with_title("Contract get").build())
        .await
        .expect("Add should succeed");

    let first = repo.get_by_id(task.id).await.expect("Get should succeed");
    let second = repo.get_by_id(task.id).await.expect("Get should succeed");
    assert_eq!(first, Some(task), "Get should return the stored task");
    assert_eq!(first, second, "Repeated gets should agree");

    let missing = repo.get_by_id(Uuid::new_v4()).await.expect("Get should succeed");
    assert!(missing.is_none(), "Unknown id should return None");
}

/// Test update contract
pub async fn test_update_contract<R: TaskRepository + ?Sized>(repo: &R) {
    let task = repo
        .add(TaskBuilder::new().with_title("Contract update").build())
        .await
        .expect("Add should succeed");

    let mut changed = task.clone();
    changed.title = "Contract update (edited)".to_string();
    changed.priority = Priority::Critical;
    changed.tags = vec!["edited".to_string()];
    repo.update(changed).await.expect("Update should succeed");

    let stored = repo
        .get_by_id(task.id)
        .await
        .expect("Get should succeed")
        .expect("Task should still exist");
    assert_eq!(stored.title, "Contract update (edited)");
    assert_eq!(stored.priority, Priority::Critical);
    assert_eq!(stored.tags, vec!["edited"]);
    assert_eq!(stored.created_at, task.created_at, "Update should keep created_at");

    let ghost = TaskBuilder::new().with_title("Ghost").build();
    repo.update(ghost.clone())
        .await
        .expect("Updating a missing task should not fail");
    assert!(repo.get_by_id(ghost.id).await.expect("Get should succeed").is_none());
}

/// Test delete contract
pub async fn test_delete_contract<R: TaskRepository + ?Sized>(repo: &R) {
    let task = repo
        .add(TaskBuilder::new().with_title("Contract delete").build())
        .await
        .expect("Add should succeed");

    repo.delete_by_id(task.id).await.expect("Delete should succeed");
    assert!(repo.get_by_id(task.id).await.expect("Get should succeed").is_none());

    repo.delete_by_id(task.id)
        .await
        .expect("Deleting a missing task should not fail");
}

/// Test listing and lookup contract
pub async fn test_list_contract<R: TaskRepository + ?Sized>(repo: &R) {
    let person = repo
        .add_person(create_test_person("Contract Lister"))
        .await
        .expect("Add person should succeed");

    let reviewed = repo
        .add(
            TaskBuilder::new()
                .with_title("Contract list review")
                .with_status(Status::UnderReview)
                .with_priority(Priority::Low)
                .with_estimated_hours(2)
                .with_assignee(person.id)
                .build(),
        )
        .await
        .expect("Add should succeed");

    let all = repo.list_all().await.expect("List should succeed");
    assert!(all.iter().any(|t| t.id == reviewed.id));
    for window in all.windows(2) {
        assert!(
            window[0].created_at >= window[1].created_at,
            "List should be newest first"
        );
    }

    let by_status = repo
        .list_by_status(Status::UnderReview)
        .await
        .expect("Status lookup should succeed");
    assert!(by_status.iter().all(|t| t.status == Status::UnderReview));
    assert!(by_status.iter().any(|t| t.id == reviewed.id));

    let by_priority = repo
        .list_by_priority(Priority::Low)
        .await
        .expect("Priority lookup should succeed");
    assert!(by_priority.iter().all(|t| t.priority == Priority::Low));
    assert!(by_priority.iter().any(|t| t.id == reviewed.id));

    let by_person = repo
        .list_by_person(person.id)
        .await
        .expect("Person lookup should succeed");
    assert_eq!(by_person.len(), 1);
    assert_eq!(by_person[0].id, reviewed.id);

    let nobody = repo
        .list_by_person(Uuid::new_v4())
        .await
        .expect("Person lookup should succeed");
    assert!(nobody.is_empty());
}

/// Test free-text search contract
pub async fn test_search_contract<R: TaskRepository + ?Sized>(repo: &R) {
    let task = repo
        .add(
            TaskBuilder::new()
                .with_title("Quarterly Zebrafish report")
                .with_description("numbers")
                .build(),
        )
        .await
        .expect("Add should succeed");
    let by_description = repo
        .add(
            TaskBuilder::new()
                .with_title("Unrelated")
                .with_description("mentions zebrafish too")
                .build(),
        )
        .await
        .expect("Add should succeed");

    let found = repo.search("ZEBRAFISH").await.expect("Search should succeed");
    let ids: Vec<_> = found.iter().map(|t| t.id).collect();
    assert_eq!(
        ids,
        vec![by_description.id, task.id],
        "Search should be case-insensitive and newest first"
    );

    let none = repo
        .search("no-such-term-anywhere")
        .await
        .expect("Search should succeed");
    assert!(none.is_empty());

    let accented = repo
        .add(TaskBuilder::new().with_title("Übersetzung der Ärztebriefe").build())
        .await
        .expect("Add should succeed");
    for term in ["übersetzung", "ÄRZTEBRIEFE"] {
        let found = repo.search(term).await.expect("Search should succeed");
        let ids: Vec<_> = found.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![accented.id], "Search should fold non-ASCII case for '{term}'");
    }
}

/// Test people contract
pub async fn test_people_contract<R: TaskRepository + ?Sized>(repo: &R) {
    let person = repo
        .add_person(create_test_person("Contract Person"))
        .await
        .expect("Add person should succeed");

    let fetched = repo
        .get_person_by_id(person.id)
        .await
        .expect("Get person should succeed");
    assert_eq!(fetched.as_ref(), Some(&person));

    let people = repo.list_all_people().await.expect("List people should succeed");
    assert!(people.iter().any(|p| p.id == person.id));
    for window in people.windows(2) {
        assert!(window[0].name <= window[1].name, "People should be ordered by name");
    }

    let mut clash = create_test_person("Someone Else");
    clash.email = person.email.clone();
    let err = repo
        .add_person(clash)
        .await
        .expect_err("Duplicate email should be rejected");
    assert!(matches!(err, TaskError::DuplicateEmail(_)), "got {err:?}");

    let task = repo
        .add(
            TaskBuilder::new()
                .with_title("Contract orphan")
                .with_status(Status::Assigned)
                .with_assignee(person.id)
                .build(),
        )
        .await
        .expect("Add should succeed");
    repo.delete_person(person.id).await.expect("Delete person should succeed");

    assert!(repo
        .get_person_by_id(person.id)
        .await
        .expect("Get person should succeed")
        .is_none());
    let orphan = repo
        .get_by_id(task.id)
        .await
        .expect("Get should succeed")
        .expect("Task should survive person removal");
    assert_eq!(orphan.assigned_to, None, "Assignment should be cleared");
}

/// Test health check contract
pub async fn test_health_check_contract<R: TaskRepository + ?Sized>(repo: &R) {
    repo.health_check().await.expect("Health check should pass");
}
