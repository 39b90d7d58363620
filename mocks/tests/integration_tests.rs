//! Integration tests for the mocks crate
//!
//! Tests the mock implementations and utilities to ensure they work correctly
//! and provide the expected testing capabilities.

use mocks::*;
use std::sync::Arc;
use taskdesk_core::{Priority, Status, TaskError, TaskRepository};
use uuid::Uuid;

#[tokio::test]
async fn test_mock_repository_basic_operations() {
    let repo = MockTaskRepository::new();

    let task = repo.add(create_test_task()).await.unwrap();
    assert_eq!(task.title, "Test Task");
    assert_eq!(task.status, Status::Draft);
    repo.assert_called("add");

    let retrieved = repo.get_by_id(task.id).await.unwrap().unwrap();
    assert_task_equals_exact(&retrieved, &task);
    repo.assert_called("get_by_id");
}

#[tokio::test]
async fn test_mock_repository_error_injection() {
    let repo = MockTaskRepository::new();

    repo.inject_error(TaskError::Database("connection lost".to_string()));

    let result = repo.get_by_id(Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), TaskError::Database(_)));

    repo.inject_error(TaskError::Database("connection lost".to_string()));
    repo.clear_error();
    assert!(repo.get_by_id(Uuid::new_v4()).await.is_ok());
}

#[tokio::test]
async fn test_mock_repository_passes_contract() {
    let repo = MockTaskRepository::new();
    test_repository_contract(&repo).await;
}

#[tokio::test]
async fn test_mock_repository_as_trait_object() {
    let repo: Arc<dyn TaskRepository> = Arc::new(MockTaskRepository::new());
    test_repository_contract(repo.as_ref()).await;
}

#[tokio::test]
async fn test_lookups_on_prepopulated_data() {
    let people = create_test_people();
    let ada = people[0].id;
    let tasks = create_tasks_in_all_statuses(ada);
    let repo = MockTaskRepository::with_data(people, tasks);

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), Status::ALL.len());
    assert_tasks_sorted_by_date(&all);

    let in_progress = repo.list_by_status(Status::InProgress).await.unwrap();
    assert_eq!(in_progress.len(), 1);
    assert_all_tasks_have_status(&in_progress, Status::InProgress);

    let assigned = repo.list_by_person(ada).await.unwrap();
    assert_eq!(assigned.len(), 3);

    let names: Vec<_> = repo
        .list_all_people()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Ada Lovelace", "Grace Hopper", "Linus Torvalds"]);
}

#[tokio::test]
async fn test_search_matches_title_or_description() {
    let repo = MockTaskRepository::with_tasks(vec![
        TaskBuilder::new().with_title("Fix login bug").build(),
        TaskBuilder::new()
            .with_title("Docs")
            .with_description("Explain the LOGIN flow")
            .build(),
        TaskBuilder::new().with_title("Unrelated").build(),
    ]);

    let found = repo.search("Login").await.unwrap();
    assert_eq!(found.len(), 2);
    assert_contains_task_with_title(&found, "Fix login bug");
    assert_contains_task_with_title(&found, "Docs");
}

#[tokio::test]
async fn test_priority_lookup_with_generated_tasks() {
    let tasks: Vec<_> = (0..12).map(|_| generate_random_task()).collect();
    let expected = tasks.iter().filter(|t| t.priority == Priority::High).count();
    let repo = MockTaskRepository::with_tasks(tasks);

    let high = repo.list_by_priority(Priority::High).await.unwrap();
    assert_eq!(high.len(), expected);
}

#[tokio::test]
async fn test_concurrent_adds() {
    let repo = Arc::new(MockTaskRepository::new());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.add(TaskBuilder::new().with_title(format!("Concurrent {i}")).build())
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(repo.list_all().await.unwrap().len(), 10);
    assert_eq!(repo.call_count("add"), 10);
}
