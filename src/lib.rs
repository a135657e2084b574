//! Task Dashboard MCP Server Library
//!
//! This library serves a personal task dashboard over the Model Context
//! Protocol: tasks with priority, category and due date, plus categories,
//! contacts and users. Quick filters, counts and completion progress are
//! derived from the task list.
//!
//! # Architecture
//!
//! The library follows a 4-layer architecture:
//! - **MCP Layer**: `TaskDeckHandler` - tool surface and dashboard state
//! - **Service Layer**: `service` module - per-entity facades over a data source
//! - **Data Layer**: `store` module - hosted-backend-shaped data source with an
//!   in-memory implementation
//! - **Persistence Layer**: `storage` module - optional TOML snapshot file
//!
//! # Example
//!
//! ```no_run
//! use taskdeck::TaskDeckHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = TaskDeckHandler::with_fixtures()?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod filter;
pub mod formatting;
pub mod handlers;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;
pub mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use config::{Cli, Config, DataMode};
pub use dashboard::Dashboard;
pub use filter::QuickFilter;
pub use model::{Category, Contact, Priority, Task, User};
pub use service::{CategoryService, ContactService, ServiceError, TaskService, UserService};
pub use storage::Storage;
pub use store::MemoryStore;

/// MCP Server handler for the task dashboard
///
/// Every facade shares one data source. The dashboard selection (category,
/// quick filter, search) lives here and persists between tool calls.
pub struct TaskDeckHandler {
    pub(crate) tasks: TaskService<MemoryStore>,
    pub(crate) categories: CategoryService<MemoryStore>,
    pub(crate) contacts: ContactService<MemoryStore>,
    pub(crate) users: UserService<MemoryStore>,
    dashboard: Mutex<Dashboard>,
}

impl TaskDeckHandler {
    /// Create a handler over an existing store
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            tasks: TaskService::new(Arc::clone(&store)),
            categories: CategoryService::new(Arc::clone(&store)),
            contacts: ContactService::new(Arc::clone(&store)),
            users: UserService::new(store),
            dashboard: Mutex::new(Dashboard::default()),
        }
    }

    /// Create a handler over the sample data, without latency
    pub fn with_fixtures() -> Result<Self> {
        Ok(Self::new(Arc::new(MemoryStore::with_fixtures()?)))
    }

    /// Create a handler for the configured data mode
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(config.build_store()?)))
    }

    /// Lock the dashboard state
    ///
    /// Never hold the guard across an `.await`.
    pub fn dashboard_state(&self) -> MutexGuard<'_, Dashboard> {
        self.dashboard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[mcp_server]
impl McpServer for TaskDeckHandler {
    /// **List tasks**: newest first. Narrow by category and/or priority.
    #[tool]
    async fn list_tasks(
        &self,
        /// Category name, case-insensitive (optional)
        category: Option<String>,
        /// Priority: low/medium/high (optional)
        priority: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_tasks(category, priority).await
    }

    /// **Add task**: creates an open task. Returns the new ID.
    #[tool]
    async fn add_task(
        &self,
        /// Title: brief description
        title: String,
        /// Category name (e.g., "work", "personal")
        category: String,
        /// Due date: YYYY-MM-DD
        due_date: String,
        /// Priority: low/medium/high, default medium (optional)
        priority: Option<String>,
        /// Longer description (optional)
        description: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_task(title, category, due_date, priority, description)
            .await
    }

    /// **Update task**: only the given fields change.
    #[tool]
    async fn update_task(
        &self,
        /// Task ID
        id: u64,
        /// New title (optional)
        title: Option<String>,
        /// New description, ""=clear (optional)
        description: Option<String>,
        /// New priority: low/medium/high (optional)
        priority: Option<String>,
        /// New category (optional)
        category: Option<String>,
        /// New due date YYYY-MM-DD (optional)
        due_date: Option<String>,
        /// Completion flag (optional)
        completed: Option<bool>,
    ) -> McpResult<String> {
        self.handle_update_task(id, title, description, priority, category, due_date, completed)
            .await
    }

    /// **Toggle task**: flips a task between open and done.
    #[tool]
    async fn toggle_task(
        &self,
        /// Task ID
        id: u64,
    ) -> McpResult<String> {
        self.handle_toggle_task(id).await
    }

    /// **Delete task**: removes a task permanently.
    #[tool]
    async fn delete_task(
        &self,
        /// Task ID
        id: u64,
    ) -> McpResult<String> {
        self.handle_delete_task(id).await
    }

    /// **Dashboard**: progress, quick filter counts and the tasks matching the
    /// current category, quick filter and search. Overdue and soonest-due
    /// open tasks come first.
    #[tool]
    async fn dashboard(&self) -> McpResult<String> {
        self.handle_dashboard().await
    }

    /// **Search tasks**: matches title or description. ""=clear the search.
    /// The search stays active for later dashboard calls.
    #[tool]
    async fn search_tasks(
        &self,
        /// Text to look for, case-insensitive
        query: String,
    ) -> McpResult<String> {
        self.handle_search_tasks(query).await
    }

    /// **Select category** for the dashboard view.
    #[tool]
    async fn select_category(
        &self,
        /// Category name, empty=all categories (optional)
        category: Option<String>,
    ) -> McpResult<String> {
        self.handle_select_category(category).await
    }

    /// **Select quick filter** for the dashboard view.
    #[tool]
    async fn select_filter(
        &self,
        /// Filter: all/today/week/high/overdue
        filter: String,
    ) -> McpResult<String> {
        self.handle_select_filter(filter).await
    }

    /// **List categories** with how many tasks each holds.
    #[tool]
    async fn list_categories(&self) -> McpResult<String> {
        self.handle_list_categories().await
    }

    /// **Add category**: names are unique, case-insensitive.
    #[tool]
    async fn add_category(
        &self,
        /// Category name
        name: String,
        /// Hex color, e.g. "#5b21b6" (optional)
        color: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_category(name, color).await
    }

    /// **Update category**: rename and/or recolor.
    #[tool]
    async fn update_category(
        &self,
        /// Category ID
        id: u64,
        /// New name (optional)
        name: Option<String>,
        /// New hex color (optional)
        color: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_category(id, name, color).await
    }

    /// **Delete category**: tasks keep their category text.
    #[tool]
    async fn delete_category(
        &self,
        /// Category ID
        id: u64,
    ) -> McpResult<String> {
        self.handle_delete_category(id).await
    }

    /// **List contacts** by name, first 100.
    #[tool]
    async fn list_contacts(&self) -> McpResult<String> {
        self.handle_list_contacts().await
    }

    /// **Search contacts** by name or phone.
    #[tool]
    async fn search_contacts(
        &self,
        /// Text to look for, case-insensitive
        query: String,
    ) -> McpResult<String> {
        self.handle_search_contacts(query).await
    }

    /// **Add contact**: phone may contain spaces, dashes and parentheses.
    #[tool]
    async fn add_contact(
        &self,
        /// Full name
        name: String,
        /// Phone number, e.g. "+1 (555) 010-2030"
        phone: String,
    ) -> McpResult<String> {
        self.handle_add_contact(name, phone).await
    }

    /// **Update contact**: replaces name and phone.
    #[tool]
    async fn update_contact(
        &self,
        /// Contact ID
        id: u64,
        /// Full name
        name: String,
        /// Phone number
        phone: String,
    ) -> McpResult<String> {
        self.handle_update_contact(id, name, phone).await
    }

    /// **Delete contact**.
    #[tool]
    async fn delete_contact(
        &self,
        /// Contact ID
        id: u64,
    ) -> McpResult<String> {
        self.handle_delete_contact(id).await
    }

    /// **List users** by name, or look one up by e-mail.
    #[tool]
    async fn list_users(
        &self,
        /// E-mail to look up (optional)
        email: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_users(email).await
    }

    /// **Add user**: the name is the user's e-mail.
    #[tool]
    async fn add_user(
        &self,
        /// E-mail address
        name: String,
        /// Phone number (optional)
        phone: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_user(name, phone).await
    }

    /// **Delete user**.
    #[tool]
    async fn delete_user(
        &self,
        /// User ID
        id: u64,
    ) -> McpResult<String> {
        self.handle_delete_user(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_handler_shares_one_store() {
        let store = Arc::new(MemoryStore::empty());
        let handler = TaskDeckHandler::new(Arc::clone(&store));
        // Four facades plus the caller
        assert_eq!(Arc::strong_count(&store), 5);
        assert!(handler.dashboard_state().tasks().is_empty());
    }

    #[tokio::test]
    async fn test_from_config_file_mode_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.toml");
        let config = Config {
            data: DataMode::File {
                path: path.clone(),
                latency: std::time::Duration::ZERO,
            },
            log_filter: "info".to_string(),
        };

        let handler = TaskDeckHandler::from_config(&config).unwrap();
        handler
            .handle_add_category("Errands".to_string(), None)
            .await
            .unwrap();
        drop(handler);

        let reopened = TaskDeckHandler::from_config(&config).unwrap();
        let text = reopened.handle_list_categories().await.unwrap();
        assert!(text.contains("- [1] Errands (color: #94a3b8, tasks: 0)"));
        assert!(path.exists());
    }
}
