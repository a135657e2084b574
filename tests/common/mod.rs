//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::sync::Arc;
use taskdeck::model::local_date_today;
use taskdeck::{MemoryStore, TaskDeckHandler};

/// Handler over the bundled sample data
pub fn fixture_handler() -> TaskDeckHandler {
    TaskDeckHandler::with_fixtures().unwrap()
}

/// Handler over an empty store
pub fn empty_handler() -> TaskDeckHandler {
    TaskDeckHandler::new(Arc::new(MemoryStore::empty()))
}

/// `days` from today, formatted as a tool argument
pub fn due_in(days: i64) -> String {
    date_in(days).format("%Y-%m-%d").to_string()
}

pub fn date_in(days: i64) -> NaiveDate {
    local_date_today() + Duration::days(days)
}

/// Extract the ID from "... created with ID: <id>..." responses
pub fn extract_id_from_response(response: &str) -> u64 {
    let start = response.find("ID: ").unwrap() + 4;
    response[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap()
}

/// Add a task through the tool handler and return its ID
pub async fn add_task(
    handler: &TaskDeckHandler,
    title: &str,
    category: &str,
    due_in_days: i64,
    priority: &str,
) -> u64 {
    let response = handler
        .handle_add_task(
            title.to_string(),
            category.to_string(),
            due_in(due_in_days),
            Some(priority.to_string()),
            None,
        )
        .await
        .unwrap();
    extract_id_from_response(&response)
}
