//! Task filtering and derived views
//!
//! Pure functions over a task list: the category and quick filters, the
//! display ordering, badge counts and completion statistics. "Today" is
//! always passed in so results do not depend on the wall clock.

use crate::model::{Priority, Task};
use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Named predicate applied on top of the category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuickFilter {
    #[default]
    All,
    Today,
    Week,
    High,
    Overdue,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 5] = [
        QuickFilter::All,
        QuickFilter::Today,
        QuickFilter::Week,
        QuickFilter::High,
        QuickFilter::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuickFilter::All => "all",
            QuickFilter::Today => "today",
            QuickFilter::Week => "week",
            QuickFilter::High => "high",
            QuickFilter::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickFilter::All => "All Tasks",
            QuickFilter::Today => "Today",
            QuickFilter::Week => "This Week",
            QuickFilter::High => "High Priority",
            QuickFilter::Overdue => "Overdue",
        }
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            QuickFilter::All => true,
            QuickFilter::Today => is_due_today(task, today),
            QuickFilter::Week => is_due_this_week(task, today),
            QuickFilter::High => task.priority == Priority::High,
            QuickFilter::Overdue => is_overdue(task, today),
        }
    }
}

impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(QuickFilter::All),
            "today" => Ok(QuickFilter::Today),
            "week" => Ok(QuickFilter::Week),
            "high" => Ok(QuickFilter::High),
            "overdue" => Ok(QuickFilter::Overdue),
            _ => Err(format!(
                "Invalid filter '{}'. Valid filters: all, today, week, high, overdue",
                s
            )),
        }
    }
}

pub fn is_due_today(task: &Task, today: NaiveDate) -> bool {
    task.due_date == today
}

/// Weeks run Sunday through Saturday
pub fn is_due_this_week(task: &Task, today: NaiveDate) -> bool {
    let start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    let end = start + Duration::days(6);
    start <= task.due_date && task.due_date <= end
}

/// Due strictly before today and still open
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.due_date < today && !task.completed
}

/// Keep tasks filed under `category`, ignoring case
pub fn apply_category_filter(tasks: &mut Vec<Task>, category: &str) {
    let category = category.to_lowercase();
    tasks.retain(|task| task.category.to_lowercase() == category);
}

pub fn apply_quick_filter(tasks: &mut Vec<Task>, filter: QuickFilter, today: NaiveDate) {
    tasks.retain(|task| filter.matches(task, today));
}

/// Open tasks before completed ones, then by due date. Stable.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| (task.completed, task.due_date));
}

/// The visible task list for a category and quick filter selection
pub fn filter_tasks(
    base: &[Task],
    category: Option<&str>,
    filter: QuickFilter,
    today: NaiveDate,
) -> Vec<Task> {
    let mut tasks = base.to_vec();
    if let Some(category) = category {
        apply_category_filter(&mut tasks, category);
    }
    apply_quick_filter(&mut tasks, filter, today);
    sort_tasks(&mut tasks);
    tasks
}

/// Badge counts, always computed over the full, unfiltered collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub all: usize,
    pub today: usize,
    pub week: usize,
    pub high: usize,
    pub overdue: usize,
}

impl FilterCounts {
    pub fn from_tasks(tasks: &[Task], today: NaiveDate) -> Self {
        let count = |filter: QuickFilter| tasks.iter().filter(|t| filter.matches(t, today)).count();
        Self {
            all: tasks.len(),
            today: count(QuickFilter::Today),
            week: count(QuickFilter::Week),
            high: count(QuickFilter::High),
            overdue: count(QuickFilter::Overdue),
        }
    }

    pub fn get(&self, filter: QuickFilter) -> usize {
        match filter {
            QuickFilter::All => self.all,
            QuickFilter::Today => self.today,
            QuickFilter::Week => self.week,
            QuickFilter::High => self.high,
            QuickFilter::Overdue => self.overdue,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
    /// Rounded half up, 0 for an empty list
    pub percentage: u8,
}

impl CompletionStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let percentage = if total == 0 {
            0
        } else {
            ((completed * 200 + total) / (total * 2)) as u8
        };
        Self {
            total,
            completed,
            percentage,
        }
    }
}
