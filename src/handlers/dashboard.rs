//! Dashboard tool handlers
//!
//! These drive the shared [`Dashboard`] state: the task list is reloaded from
//! the store before each view, the selection (category, quick filter, search)
//! persists between calls.

use crate::TaskDeckHandler;
use crate::dashboard::Dashboard;
use crate::formatting::{format_completion, format_counts, format_tasks};
use crate::model::local_date_today;
use crate::validation::{self, parse_quick_filter};
use chrono::NaiveDate;
use mcp_attr::{Result as McpResult, bail_public};

/// Progress, filter badges, current selection and the visible tasks
fn render(dashboard: &Dashboard, today: NaiveDate) -> String {
    let mut result = String::new();
    result.push_str(&format_completion(&dashboard.completion()));
    result.push('\n');
    result.push_str(&format_counts(
        &dashboard.counts(today),
        dashboard.active_filter(),
    ));
    result.push('\n');
    result.push_str(&format!(
        "Category: {}\n",
        dashboard.active_category().unwrap_or("all")
    ));
    if dashboard.is_searching() {
        result.push_str(&format!("Search: \"{}\"\n", dashboard.query()));
    }
    result.push('\n');
    result.push_str(&format_tasks(&dashboard.visible_tasks(today)));
    result
}

impl TaskDeckHandler {
    async fn reload_dashboard(&self) -> McpResult<()> {
        let tasks = self
            .tasks
            .get_all()
            .await
            .map_err(validation::service_error)?;
        self.dashboard_state().set_tasks(tasks);
        Ok(())
    }

    fn render_dashboard(&self) -> String {
        let today = local_date_today();
        render(&self.dashboard_state(), today)
    }

    pub async fn handle_dashboard(&self) -> McpResult<String> {
        self.reload_dashboard().await?;
        Ok(self.render_dashboard())
    }

    /// Search titles and descriptions; a blank query clears the search
    pub async fn handle_search_tasks(&self, query: String) -> McpResult<String> {
        self.reload_dashboard().await?;

        let ticket = self.dashboard_state().begin_search(&query);
        let Some(ticket) = ticket else {
            return Ok(format!("Search cleared\n\n{}", self.render_dashboard()));
        };

        let results = self
            .tasks
            .search(query.trim())
            .await
            .map_err(validation::service_error)?;

        let applied = self.dashboard_state().complete_search(ticket, results);
        if !applied {
            bail_public!(
                _,
                "Search for '{}' was superseded by a newer search",
                query.trim()
            );
        }
        Ok(self.render_dashboard())
    }

    /// Select a category by name; `None` or "" shows every category
    pub async fn handle_select_category(&self, category: Option<String>) -> McpResult<String> {
        let category = category.filter(|c| !c.trim().is_empty());
        if let Some(ref name) = category {
            let found = self
                .categories
                .find_by_name(name)
                .await
                .map_err(validation::service_error)?;
            if found.is_none() {
                bail_public!(_, "Category '{}' not found", name.trim());
            }
        }

        self.reload_dashboard().await?;
        self.dashboard_state().select_category(category.as_deref());
        Ok(self.render_dashboard())
    }

    pub async fn handle_select_filter(&self, filter: String) -> McpResult<String> {
        let filter = parse_quick_filter(&filter)?;

        self.reload_dashboard().await?;
        self.dashboard_state().select_filter(filter);
        Ok(self.render_dashboard())
    }
}
