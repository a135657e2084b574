//! Dashboard view state
//!
//! Holds the loaded task list together with the active category, quick
//! filter and search. Searches are sequenced: every call to
//! [`Dashboard::begin_search`] issues a new ticket, and only results carrying
//! the latest ticket are accepted, so a slow response to an older query can
//! never overwrite a newer one.

use crate::filter::{CompletionStats, FilterCounts, QuickFilter, filter_tasks};
use crate::model::Task;
use chrono::NaiveDate;
use tracing::debug;

/// Identifies one search request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Default)]
pub struct Dashboard {
    tasks: Vec<Task>,
    active_category: Option<String>,
    active_filter: QuickFilter,
    query: String,
    search_results: Vec<Task>,
    latest_ticket: u64,
}

impl Dashboard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    /// Categories are stored lower-cased; `None` or blank clears the selection
    pub fn select_category(&mut self, category: Option<&str>) {
        self.active_category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase);
    }

    pub fn active_filter(&self) -> QuickFilter {
        self.active_filter
    }

    pub fn select_filter(&mut self, filter: QuickFilter) {
        self.active_filter = filter;
    }

    /// The active search query, empty when no search is active
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Start a search for `query`
    ///
    /// Returns `None` for a blank query, which clears the search instead.
    /// Either way, results of every earlier search become stale and are
    /// dropped, so the view never pairs a query with another query's matches.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        self.latest_ticket += 1;
        self.search_results.clear();
        let query = query.trim();
        if query.is_empty() {
            self.query.clear();
            return None;
        }
        self.query = query.to_string();
        Some(SearchTicket(self.latest_ticket))
    }

    /// Apply search results; returns `false` and drops them when stale
    pub fn complete_search(&mut self, ticket: SearchTicket, results: Vec<Task>) -> bool {
        if ticket.0 != self.latest_ticket {
            debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "Dropping stale search results"
            );
            return false;
        }
        self.search_results = results;
        true
    }

    pub fn clear_search(&mut self) {
        self.begin_search("");
    }

    /// Tasks to show for the current selection, sorted for display
    pub fn visible_tasks(&self, today: NaiveDate) -> Vec<Task> {
        let base = if self.is_searching() {
            &self.search_results
        } else {
            &self.tasks
        };
        filter_tasks(
            base,
            self.active_category.as_deref(),
            self.active_filter,
            today,
        )
    }

    pub fn counts(&self, today: NaiveDate) -> FilterCounts {
        FilterCounts::from_tasks(&self.tasks, today)
    }

    pub fn completion(&self) -> CompletionStats {
        CompletionStats::from_tasks(&self.tasks)
    }

    /// A newly created task goes to the front
    pub fn insert_task(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Replace a task in the list and in any active search results
    pub fn replace_task(&mut self, task: Task) {
        for list in [&mut self.tasks, &mut self.search_results] {
            if let Some(slot) = list.iter_mut().find(|t| t.id == task.id) {
                *slot = task.clone();
            }
        }
    }

    pub fn remove_task(&mut self, id: u64) {
        self.tasks.retain(|t| t.id != id);
        self.search_results.retain(|t| t.id != id);
    }
}
