//! [`Record`] implementations for the domain entities
//!
//! Field names here are the canonical ones used in queries. The checks in
//! `create`/`apply` are the backend-side required-field checks; format
//! validation (phone numbers) happens in the service facades.

use super::{FieldError, Record, Table, Tables};
use crate::model::{
    Category, CategoryDraft, CategoryPatch, Contact, ContactDraft, DEFAULT_CATEGORY_COLOR, Task,
    TaskDraft, TaskPatch, User, UserDraft, UserPatch,
};
use chrono::{DateTime, SecondsFormat, Utc};

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn required(field: &str, label: &str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{} is required", label)));
    }
}

/// Empty text clears an optional field
fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn check(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

impl Record for Task {
    const ENTITY: &'static str = "task";

    type Draft = TaskDraft;
    type Patch = TaskPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "title" => Some(self.title.clone()),
            "description" => self.description.clone(),
            "completed" => Some(self.completed.to_string()),
            "priority" => Some(self.priority.to_string()),
            "category" => Some(self.category.clone()),
            "due_date" => Some(self.due_date.format("%Y-%m-%d").to_string()),
            "created_at" => Some(timestamp(&self.created_at)),
            _ => None,
        }
    }

    fn create(id: u64, draft: TaskDraft, now: DateTime<Utc>) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        required("title", "Title", &draft.title, &mut errors);
        required("category", "Category", &draft.category, &mut errors);
        check(errors)?;

        Ok(Task {
            id,
            title: draft.title.trim().to_string(),
            description: optional_text(draft.description),
            completed: false,
            priority: draft.priority,
            category: draft.category.trim().to_string(),
            due_date: draft.due_date,
            created_at: now,
        })
    }

    fn apply(&mut self, patch: TaskPatch, _now: DateTime<Utc>) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(ref title) = patch.title {
            required("title", "Title", title, &mut errors);
        }
        if let Some(ref category) = patch.category {
            required("category", "Category", category, &mut errors);
        }
        check(errors)?;

        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = optional_text(Some(description));
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(category) = patch.category {
            self.category = category.trim().to_string();
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        Ok(())
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.tasks
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.tasks
    }
}

impl Record for Category {
    const ENTITY: &'static str = "category";

    type Draft = CategoryDraft;
    type Patch = CategoryPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "color" => Some(self.color.clone()),
            "task_count" => Some(self.task_count.to_string()),
            _ => None,
        }
    }

    fn create(id: u64, draft: CategoryDraft, _now: DateTime<Utc>) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        required("name", "Name", &draft.name, &mut errors);
        check(errors)?;

        Ok(Category {
            id,
            name: draft.name.trim().to_string(),
            color: optional_text(draft.color).unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
            task_count: 0,
        })
    }

    fn apply(&mut self, patch: CategoryPatch, _now: DateTime<Utc>) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(ref name) = patch.name {
            required("name", "Name", name, &mut errors);
        }
        check(errors)?;

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(color) = optional_text(patch.color) {
            self.color = color;
        }
        Ok(())
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.categories
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.categories
    }
}

impl Record for Contact {
    const ENTITY: &'static str = "contact";

    type Draft = ContactDraft;
    type Patch = ContactDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "phone" => Some(self.phone.clone()),
            "created_on" => Some(timestamp(&self.created_on)),
            "modified_on" => Some(timestamp(&self.modified_on)),
            _ => None,
        }
    }

    fn create(id: u64, draft: ContactDraft, now: DateTime<Utc>) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        required("name", "Name", &draft.name, &mut errors);
        required("phone", "Phone number", &draft.phone, &mut errors);
        check(errors)?;

        Ok(Contact {
            id,
            name: draft.name.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            created_on: now,
            modified_on: now,
        })
    }

    fn apply(&mut self, patch: ContactDraft, now: DateTime<Utc>) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        required("name", "Name", &patch.name, &mut errors);
        required("phone", "Phone number", &patch.phone, &mut errors);
        check(errors)?;

        self.name = patch.name.trim().to_string();
        self.phone = patch.phone.trim().to_string();
        self.modified_on = now;
        Ok(())
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.contacts
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.contacts
    }
}

impl Record for User {
    const ENTITY: &'static str = "user";

    type Draft = UserDraft;
    type Patch = UserPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "phone" => self.phone.clone(),
            _ => None,
        }
    }

    fn create(id: u64, draft: UserDraft, _now: DateTime<Utc>) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        required("name", "Name", &draft.name, &mut errors);
        check(errors)?;

        Ok(User {
            id,
            name: draft.name.trim().to_string(),
            phone: optional_text(draft.phone),
        })
    }

    fn apply(&mut self, patch: UserPatch, _now: DateTime<Utc>) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(ref name) = patch.name {
            required("name", "Name", name, &mut errors);
        }
        check(errors)?;

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(phone) = patch.phone {
            self.phone = optional_text(Some(phone));
        }
        Ok(())
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use chrono::NaiveDate;

    fn draft() -> TaskDraft {
        TaskDraft {
            title: "  Call the bank ".to_string(),
            description: Some(String::new()),
            priority: Priority::High,
            category: "Finance".to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        }
    }

    #[test]
    fn test_task_create_normalizes_fields() {
        let now = Utc::now();
        let task = Task::create(9, draft(), now).unwrap();
        assert_eq!(task.id, 9);
        assert_eq!(task.title, "Call the bank");
        assert_eq!(task.description, None);
        assert!(!task.completed);
        assert_eq!(task.created_at, now);
    }

    #[test]
    fn test_task_create_reports_every_missing_field() {
        let mut bad = draft();
        bad.title = " ".to_string();
        bad.category = String::new();
        let errors = Task::create(1, bad, Utc::now()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "category"]);
        assert_eq!(errors[0].message, "Title is required");
    }

    #[test]
    fn test_task_apply_is_all_or_nothing() {
        let mut task = Task::create(1, draft(), Utc::now()).unwrap();
        let before = task.clone();
        let patch = TaskPatch {
            title: Some(String::new()),
            completed: Some(true),
            ..TaskPatch::default()
        };
        assert!(task.apply(patch, Utc::now()).is_err());
        assert_eq!(task, before);
    }

    #[test]
    fn test_task_fields() {
        let task = Task::create(3, draft(), Utc::now()).unwrap();
        assert_eq!(task.field("due_date").as_deref(), Some("2025-04-01"));
        assert_eq!(task.field("priority").as_deref(), Some("high"));
        assert_eq!(task.field("completed").as_deref(), Some("false"));
        assert_eq!(task.field("description"), None);
        assert_eq!(task.field("unknown"), None);
    }

    #[test]
    fn test_category_default_color() {
        let draft = CategoryDraft {
            name: "Errands".to_string(),
            color: None,
        };
        let category = Category::create(1, draft, Utc::now()).unwrap();
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
        assert_eq!(category.task_count, 0);
    }

    #[test]
    fn test_contact_update_touches_modified_on() {
        let created = Utc::now() - chrono::Duration::days(1);
        let mut contact = Contact::create(
            1,
            ContactDraft {
                name: "Ada".to_string(),
                phone: "+4420123456".to_string(),
            },
            created,
        )
        .unwrap();

        let now = Utc::now();
        contact
            .apply(
                ContactDraft {
                    name: "Ada Lovelace".to_string(),
                    phone: "+4420123456".to_string(),
                },
                now,
            )
            .unwrap();
        assert_eq!(contact.name, "Ada Lovelace");
        assert_eq!(contact.created_on, created);
        assert_eq!(contact.modified_on, now);
    }
}
