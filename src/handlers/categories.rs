//! Category tool handlers

use crate::TaskDeckHandler;
use crate::formatting::format_categories;
use crate::model::{CategoryDraft, CategoryPatch};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TaskDeckHandler {
    /// Categories by name with their current task counts
    pub async fn handle_list_categories(&self) -> McpResult<String> {
        let tasks = self
            .tasks
            .get_all()
            .await
            .map_err(validation::service_error)?;
        let categories = self
            .categories
            .get_all_with_counts(&tasks)
            .await
            .map_err(validation::service_error)?;
        Ok(format_categories(&categories))
    }

    pub async fn handle_add_category(
        &self,
        name: String,
        color: Option<String>,
    ) -> McpResult<String> {
        let category = self
            .categories
            .create(CategoryDraft { name, color })
            .await
            .map_err(validation::service_error)?;
        Ok(format!(
            "Category created with ID: {} ({}, color: {})",
            category.id, category.name, category.color
        ))
    }

    pub async fn handle_update_category(
        &self,
        id: u64,
        name: Option<String>,
        color: Option<String>,
    ) -> McpResult<String> {
        if name.is_none() && color.is_none() {
            bail_public!(_, "No fields to update. Provide name and/or color.");
        }
        let category = self
            .categories
            .update(id, CategoryPatch { name, color })
            .await
            .map_err(validation::service_error)?;
        Ok(format!(
            "Category {} updated ({}, color: {})",
            category.id, category.name, category.color
        ))
    }

    /// Tasks keep their category text after the category is gone
    pub async fn handle_delete_category(&self, id: u64) -> McpResult<String> {
        self.categories
            .delete(id)
            .await
            .map_err(validation::service_error)?;
        Ok(format!("Category {} deleted", id))
    }
}
