//! Domain models
//!
//! One explicit schema per entity. Every field has a single canonical
//! snake_case name, which is also the name used by the query engine and the
//! TOML fixture/persistence format.
//! - `task`: tasks, priorities, drafts and patches
//! - `category`: categories keyed by case-insensitive name
//! - `contact`: contacts with a validated phone number
//! - `user`: application users

mod category;
mod contact;
mod task;
mod user;

pub use category::{Category, CategoryDraft, CategoryPatch, DEFAULT_CATEGORY_COLOR};
pub use contact::{Contact, ContactDraft};
pub use task::{Priority, Task, TaskDraft, TaskPatch, local_date_today};
pub use user::{User, UserDraft, UserPatch};
