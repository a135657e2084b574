//! Task tool handlers

use crate::TaskDeckHandler;
use crate::formatting::{format_task, format_tasks};
use crate::model::{TaskDraft, TaskPatch};
use crate::validation::{self, parse_date, parse_optional, parse_priority};
use mcp_attr::{Result as McpResult, bail_public};

impl TaskDeckHandler {
    /// List tasks, optionally narrowed to one category and/or priority
    pub async fn handle_list_tasks(
        &self,
        category: Option<String>,
        priority: Option<String>,
    ) -> McpResult<String> {
        let priority = parse_optional(priority, parse_priority)?;
        let category = category.filter(|c| !c.trim().is_empty());

        let mut tasks = match (&category, priority) {
            (_, Some(priority)) => self.tasks.get_by_priority(priority).await,
            (Some(category), None) => self.tasks.get_by_category(category).await,
            (None, None) => self.tasks.get_all().await,
        }
        .map_err(validation::service_error)?;

        if priority.is_some()
            && let Some(ref category) = category
        {
            tasks.retain(|t| t.in_category(category));
        }

        Ok(format_tasks(&tasks))
    }

    pub async fn handle_add_task(
        &self,
        title: String,
        category: String,
        due_date: String,
        priority: Option<String>,
        description: Option<String>,
    ) -> McpResult<String> {
        let draft = TaskDraft {
            title,
            description: description.filter(|d| !d.trim().is_empty()),
            priority: parse_optional(priority, parse_priority)?.unwrap_or_default(),
            category,
            due_date: parse_date(&due_date)?,
        };

        let task = self
            .tasks
            .create(draft)
            .await
            .map_err(validation::service_error)?;
        self.dashboard_state().insert_task(task.clone());

        Ok(format!(
            "Task created with ID: {}\n\n{}",
            task.id,
            format_task(&task)
        ))
    }

    /// Change only the given fields; an empty description clears it
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_update_task(
        &self,
        id: u64,
        title: Option<String>,
        description: Option<String>,
        priority: Option<String>,
        category: Option<String>,
        due_date: Option<String>,
        completed: Option<bool>,
    ) -> McpResult<String> {
        let patch = TaskPatch {
            title,
            description,
            completed,
            priority: parse_optional(priority, parse_priority)?,
            category,
            due_date: parse_optional(due_date, parse_date)?,
        };
        if patch.is_empty() {
            bail_public!(
                _,
                "No fields to update. Provide at least one of title, description, priority, category, due_date, completed."
            );
        }

        let task = self
            .tasks
            .update(id, patch)
            .await
            .map_err(validation::service_error)?;
        self.dashboard_state().replace_task(task.clone());

        Ok(format!("Task {} updated\n\n{}", id, format_task(&task)))
    }

    pub async fn handle_toggle_task(&self, id: u64) -> McpResult<String> {
        let task = self
            .tasks
            .toggle_complete(id)
            .await
            .map_err(validation::service_error)?;
        self.dashboard_state().replace_task(task.clone());

        let state = if task.completed { "done" } else { "open" };
        Ok(format!("Task {} marked as {}", id, state))
    }

    pub async fn handle_delete_task(&self, id: u64) -> McpResult<String> {
        self.tasks
            .delete(id)
            .await
            .map_err(validation::service_error)?;
        self.dashboard_state().remove_task(id);

        Ok(format!("Task {} deleted", id))
    }
}
