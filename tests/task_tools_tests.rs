//! Task tool tests

mod common;

use common::{add_task, due_in, empty_handler, extract_id_from_response, fixture_handler};

#[tokio::test]
async fn test_add_then_list_newest_first() {
    let handler = empty_handler();
    add_task(&handler, "First", "work", 1, "low").await;
    // Keep the creation timestamps apart
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    add_task(&handler, "Second", "work", 2, "high").await;

    let text = handler.handle_list_tasks(None, None).await.unwrap();
    assert!(text.starts_with("Found 2 task(s):"));
    let first = text.find("First").unwrap();
    let second = text.find("Second").unwrap();
    assert!(second < first);
}

#[tokio::test]
async fn test_add_task_validation() {
    let handler = empty_handler();

    let missing_title = handler
        .handle_add_task(" ".to_string(), "work".to_string(), due_in(0), None, None)
        .await;
    assert!(missing_title.is_err());

    let bad_date = handler
        .handle_add_task(
            "Report".to_string(),
            "work".to_string(),
            "next friday".to_string(),
            None,
            None,
        )
        .await;
    assert!(bad_date.is_err());

    let bad_priority = handler
        .handle_add_task(
            "Report".to_string(),
            "work".to_string(),
            due_in(0),
            Some("urgent".to_string()),
            None,
        )
        .await;
    assert!(bad_priority.is_err());

    assert_eq!(
        handler.handle_list_tasks(None, None).await.unwrap(),
        "No tasks found"
    );
}

#[tokio::test]
async fn test_update_task_changes_only_given_fields() {
    let handler = empty_handler();
    let response = handler
        .handle_add_task(
            "Draft memo".to_string(),
            "work".to_string(),
            due_in(3),
            Some("low".to_string()),
            Some("Two pages".to_string()),
        )
        .await
        .unwrap();
    let id = extract_id_from_response(&response);

    let text = handler
        .handle_update_task(id, None, None, Some("high".to_string()), None, None, None)
        .await
        .unwrap();
    assert!(text.contains("Draft memo"));
    assert!(text.contains("priority: high"));
    assert!(text.contains("category: work"));
    assert!(text.contains("Description: Two pages"));

    // An empty description clears it
    let text = handler
        .handle_update_task(id, None, Some(String::new()), None, None, None, None)
        .await
        .unwrap();
    assert!(!text.contains("Description:"));
}

#[tokio::test]
async fn test_update_missing_task_fails() {
    let handler = fixture_handler();
    let result = handler
        .handle_update_task(99, Some("Ghost".to_string()), None, None, None, None, None)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_toggle_and_delete() {
    let handler = empty_handler();
    let id = add_task(&handler, "Water plants", "home", 0, "medium").await;

    assert_eq!(
        handler.handle_toggle_task(id).await.unwrap(),
        format!("Task {} marked as done", id)
    );
    let text = handler.handle_list_tasks(None, None).await.unwrap();
    assert!(text.contains("[x] Water plants"));

    assert_eq!(
        handler.handle_delete_task(id).await.unwrap(),
        format!("Task {} deleted", id)
    );
    assert!(handler.handle_delete_task(id).await.is_err());
    assert!(handler.handle_toggle_task(id).await.is_err());
}

#[tokio::test]
async fn test_list_by_priority() {
    let handler = fixture_handler();
    let text = handler
        .handle_list_tasks(None, Some("high".to_string()))
        .await
        .unwrap();
    assert!(text.starts_with("Found 2 task(s):"));
    assert!(text.contains("Prepare quarterly report"));
    assert!(text.contains("Plan weekend trip"));
}
