use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact. Timestamps are maintained by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
}

/// Input for creating a contact, also used for updates: contacts are always
/// written with both fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
}
