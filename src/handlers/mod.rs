//! MCP tool handlers
//!
//! Each file adds `handle_*` methods to [`crate::TaskDeckHandler`], one group
//! of tools per entity. The `#[tool]` wrappers in the crate root only forward
//! to these.

pub mod categories;
pub mod contacts;
pub mod dashboard;
pub mod tasks;
pub mod users;
