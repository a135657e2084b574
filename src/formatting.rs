//! Text rendering of tool results

use crate::filter::{CompletionStats, FilterCounts, QuickFilter};
use crate::model::{Category, Contact, Task, User};

/// Format one task as a list entry
pub fn format_task(task: &Task) -> String {
    let mut result = format!(
        "- [{}] {} {} (priority: {}, category: {}, due: {})\n",
        task.id,
        if task.completed { "[x]" } else { "[ ]" },
        task.title,
        task.priority,
        task.category,
        task.due_date
    );
    if let Some(ref description) = task.description {
        result.push_str(&format!("  Description: {}\n", description));
    }
    result
}

/// Format tasks into a display string
pub fn format_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found".to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", tasks.len());
    for task in tasks {
        result.push_str(&format_task(task));
    }
    result
}

/// Badge line for every quick filter, marking the active one
pub fn format_counts(counts: &FilterCounts, active: QuickFilter) -> String {
    QuickFilter::ALL
        .iter()
        .map(|filter| {
            let marker = if *filter == active { "*" } else { "" };
            format!("{}{} ({})", marker, filter.label(), counts.get(*filter))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn format_completion(stats: &CompletionStats) -> String {
    format!(
        "Progress: {}% ({} of {} tasks completed)",
        stats.percentage, stats.completed, stats.total
    )
}

pub fn format_categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found".to_string();
    }

    let mut result = format!("Found {} category(ies):\n\n", categories.len());
    for category in categories {
        result.push_str(&format!(
            "- [{}] {} (color: {}, tasks: {})\n",
            category.id, category.name, category.color, category.task_count
        ));
    }
    result
}

pub fn format_contacts(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "No contacts found".to_string();
    }

    let mut result = format!("Found {} contact(s):\n\n", contacts.len());
    for contact in contacts {
        result.push_str(&format!(
            "- [{}] {} (phone: {})\n",
            contact.id, contact.name, contact.phone
        ));
        result.push_str(&format!("  Modified: {}\n", contact.modified_on.format("%Y-%m-%d %H:%M")));
    }
    result
}

pub fn format_users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found".to_string();
    }

    let mut result = format!("Found {} user(s):\n\n", users.len());
    for user in users {
        match user.phone {
            Some(ref phone) => {
                result.push_str(&format!("- [{}] {} (phone: {})\n", user.id, user.name, phone))
            }
            None => result.push_str(&format!("- [{}] {}\n", user.id, user.name)),
        }
    }
    result
}
