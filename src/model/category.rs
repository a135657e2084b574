use serde::{Deserialize, Serialize};

/// Color given to categories created without one
pub const DEFAULT_CATEGORY_COLOR: &str = "#94a3b8";

/// A task category
///
/// `name` is the join key against [`crate::Task::category`] and is compared
/// case-insensitively. `task_count` is only meaningful on values returned by
/// `CategoryService::get_all_with_counts`, which recounts it from the tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub task_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}
