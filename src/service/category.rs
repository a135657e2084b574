use super::{ServiceError, ServiceResult, delete_one, into_list, into_record, into_written};
use crate::model::{Category, CategoryDraft, CategoryPatch, Task};
use crate::store::{Condition, DataSource, Query, SortDirection};
use std::sync::Arc;
use tracing::error;

/// Category facade
///
/// Category names are unique ignoring case. Task counts are never stored:
/// [`CategoryService::get_all_with_counts`] recounts them from a task list.
pub struct CategoryService<S> {
    source: Arc<S>,
}

impl<S> Clone for CategoryService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: DataSource> CategoryService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// All categories by name
    pub async fn get_all(&self) -> ServiceResult<Vec<Category>> {
        let query = Query::new().order_by("name", SortDirection::Ascending);
        into_list(self.source.fetch_records(&query).await, "Failed to fetch categories")
            .inspect_err(|e| error!(error = %e, "Error fetching categories"))
    }

    /// All categories by name, with `task_count` computed from `tasks`
    pub async fn get_all_with_counts(&self, tasks: &[Task]) -> ServiceResult<Vec<Category>> {
        let mut categories = self.get_all().await?;
        for category in &mut categories {
            category.task_count = tasks.iter().filter(|t| t.in_category(&category.name)).count();
        }
        Ok(categories)
    }

    pub async fn get_by_id(&self, id: u64) -> ServiceResult<Category> {
        into_record(self.source.get_record_by_id(id).await, "category", id)
            .inspect_err(|e| error!(error = %e, id, "Error fetching category"))
    }

    pub async fn find_by_name(&self, name: &str) -> ServiceResult<Option<Category>> {
        let query = Query::new().filter(Condition::equal_to("name", name.trim()));
        let categories: Vec<Category> =
            into_list(self.source.fetch_records(&query).await, "Failed to fetch categories")
                .inspect_err(|e| error!(error = %e, name, "Error finding category"))?;
        Ok(categories.into_iter().next())
    }

    pub async fn create(&self, draft: CategoryDraft) -> ServiceResult<Category> {
        if draft.name.trim().is_empty() {
            return Err(ServiceError::Validation("Name is required".to_string()));
        }
        self.ensure_name_free(&draft.name, None).await?;
        into_written(
            self.source.create_records(vec![draft]).await,
            "Failed to create category",
        )
        .inspect_err(|e| error!(error = %e, "Error creating category"))
    }

    pub async fn update(&self, id: u64, patch: CategoryPatch) -> ServiceResult<Category> {
        if let Some(ref name) = patch.name {
            if name.trim().is_empty() {
                return Err(ServiceError::Validation("Name is required".to_string()));
            }
            self.ensure_name_free(name, Some(id)).await?;
        }
        into_written(
            self.source.update_records(vec![(id, patch)]).await,
            "Failed to update category",
        )
        .inspect_err(|e| error!(error = %e, id, "Error updating category"))
    }

    /// Tasks filed under the category keep their category text
    pub async fn delete(&self, id: u64) -> ServiceResult<()> {
        delete_one::<S, Category>(&self.source, id).await
    }

    async fn ensure_name_free(&self, name: &str, except: Option<u64>) -> ServiceResult<()> {
        match self.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != except => Err(ServiceError::Validation(
                format!("Category '{}' already exists", existing.name),
            )),
            _ => Ok(()),
        }
    }
}
