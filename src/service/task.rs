use super::{ServiceError, ServiceResult, delete_one, into_list, into_record, into_written};
use crate::model::{Priority, Task, TaskDraft, TaskPatch};
use crate::store::{Condition, DataSource, Query, SortDirection, WhereGroup};
use std::sync::Arc;
use tracing::{debug, error};

/// Task facade
pub struct TaskService<S> {
    source: Arc<S>,
}

impl<S> Clone for TaskService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: DataSource> TaskService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// All tasks, newest first
    pub async fn get_all(&self) -> ServiceResult<Vec<Task>> {
        let query = Query::new().order_by("created_at", SortDirection::Descending);
        into_list(self.source.fetch_records(&query).await, "Failed to fetch tasks")
            .inspect_err(|e| error!(error = %e, "Error fetching tasks"))
    }

    pub async fn get_by_id(&self, id: u64) -> ServiceResult<Task> {
        into_record(self.source.get_record_by_id(id).await, "task", id)
            .inspect_err(|e| error!(error = %e, id, "Error fetching task"))
    }

    pub async fn create(&self, draft: TaskDraft) -> ServiceResult<Task> {
        validate_draft(&draft)?;
        let task: Task = into_written(
            self.source.create_records(vec![draft]).await,
            "Failed to create task",
        )
        .inspect_err(|e| error!(error = %e, "Error creating task"))?;
        debug!(id = task.id, "Created task");
        Ok(task)
    }

    /// Only the fields set in `patch` change
    pub async fn update(&self, id: u64, patch: TaskPatch) -> ServiceResult<Task> {
        validate_patch(&patch)?;
        into_written(
            self.source.update_records(vec![(id, patch)]).await,
            "Failed to update task",
        )
        .inspect_err(|e| error!(error = %e, id, "Error updating task"))
    }

    pub async fn delete(&self, id: u64) -> ServiceResult<()> {
        delete_one::<S, Task>(&self.source, id).await
    }

    /// Flip the completion flag of a task
    pub async fn toggle_complete(&self, id: u64) -> ServiceResult<Task> {
        let task = self.get_by_id(id).await?;
        self.update(id, TaskPatch::completed(!task.completed)).await
    }

    pub async fn get_by_category(&self, category: &str) -> ServiceResult<Vec<Task>> {
        let query = Query::new().filter(Condition::equal_to("category", category));
        into_list(self.source.fetch_records(&query).await, "Failed to fetch tasks")
            .inspect_err(|e| error!(error = %e, category, "Error fetching tasks by category"))
    }

    pub async fn get_by_priority(&self, priority: Priority) -> ServiceResult<Vec<Task>> {
        let query = Query::new().filter(Condition::equal_to("priority", priority.as_str()));
        into_list(self.source.fetch_records(&query).await, "Failed to fetch tasks")
            .inspect_err(|e| error!(error = %e, %priority, "Error fetching tasks by priority"))
    }

    /// Tasks whose title or description contains `query`, ignoring case
    pub async fn search(&self, query: &str) -> ServiceResult<Vec<Task>> {
        let query = Query::new().group(WhereGroup::any_of(vec![
            Condition::contains("title", query),
            Condition::contains("description", query),
        ]));
        into_list(self.source.fetch_records(&query).await, "Failed to search tasks")
            .inspect_err(|e| error!(error = %e, "Error searching tasks"))
    }
}

fn validate_draft(draft: &TaskDraft) -> ServiceResult<()> {
    if draft.title.trim().is_empty() {
        return Err(ServiceError::Validation("Title is required".to_string()));
    }
    if draft.category.trim().is_empty() {
        return Err(ServiceError::Validation("Category is required".to_string()));
    }
    Ok(())
}

/// Fields a patch sets may not be blanked out
fn validate_patch(patch: &TaskPatch) -> ServiceResult<()> {
    if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(ServiceError::Validation("Title is required".to_string()));
    }
    if patch.category.as_deref().is_some_and(|c| c.trim().is_empty()) {
        return Err(ServiceError::Validation("Category is required".to_string()));
    }
    Ok(())
}
