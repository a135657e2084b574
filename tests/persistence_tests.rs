//! Data file persistence tests

use std::time::Duration;
use taskdeck::{Config, DataMode, TaskDeckHandler};
use tempfile::TempDir;

fn file_config(dir: &TempDir) -> Config {
    Config {
        data: DataMode::File {
            path: dir.path().join("taskdeck.toml"),
            latency: Duration::ZERO,
        },
        log_filter: "info".to_string(),
    }
}

#[tokio::test]
async fn test_changes_survive_restart() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let handler = TaskDeckHandler::from_config(&config).unwrap();
    handler
        .handle_add_task(
            "Ship release".to_string(),
            "work".to_string(),
            "2030-01-15".to_string(),
            Some("high".to_string()),
            None,
        )
        .await
        .unwrap();
    handler
        .handle_add_contact("Ana Silva".to_string(), "+5511987654321".to_string())
        .await
        .unwrap();
    handler.handle_toggle_task(1).await.unwrap();
    drop(handler);

    let handler = TaskDeckHandler::from_config(&config).unwrap();
    let tasks = handler.handle_list_tasks(None, None).await.unwrap();
    assert!(tasks.contains("- [1] [x] Ship release (priority: high, category: work, due: 2030-01-15)"));
    let contacts = handler.handle_list_contacts().await.unwrap();
    assert!(contacts.contains("Ana Silva"));

    // The id counter survives too; deleted ids are not reused
    handler.handle_delete_task(1).await.unwrap();
    drop(handler);
    let handler = TaskDeckHandler::from_config(&config).unwrap();
    let response = handler
        .handle_add_task(
            "Next".to_string(),
            "work".to_string(),
            "2030-02-01".to_string(),
            None,
            None,
        )
        .await
        .unwrap();
    assert!(response.starts_with("Task created with ID: 2"));
}

#[tokio::test]
async fn test_mock_mode_does_not_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("taskdeck.toml");
    let config = Config {
        data: DataMode::Mock {
            latency: Duration::from_millis(1),
        },
        log_filter: "info".to_string(),
    };

    let handler = TaskDeckHandler::from_config(&config).unwrap();
    handler.handle_delete_task(1).await.unwrap();
    assert!(!path.exists());

    // A fresh mock store starts from the sample data again
    let handler = TaskDeckHandler::from_config(&config).unwrap();
    let text = handler.handle_list_tasks(None, None).await.unwrap();
    assert!(text.starts_with("Found 6 task(s):"));
}
