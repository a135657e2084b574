//! Data source layer
//!
//! [`DataSource`] is the contract the service facades consume. It follows the
//! hosted backend's record API (fetch with a query, get by id, batch create,
//! batch update, batch delete) and answers with an [`Envelope`].
//! [`MemoryStore`] is the in-memory implementation, seeded from fixtures and
//! optionally persisted to a TOML file.
//!
//! - `query`: filter trees, ordering and paging
//! - `envelope`: response and per-record result shapes
//! - `records`: [`Record`] implementations for each entity
//! - `memory`: the in-memory store

mod envelope;
mod memory;
mod query;
mod records;

pub use envelope::{Envelope, FieldError, RecordResult};
pub use memory::MemoryStore;
pub use query::{Combinator, Condition, Operator, OrderBy, Paging, Query, SortDirection, SubGroup, WhereGroup};

use crate::model::{Category, Contact, Task, User};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;

const SEED_FIXTURES: &str = include_str!("../../fixtures/seed.toml");

/// An entity the data source can store
///
/// Ids are assigned by the data source: `create` receives the id to use.
/// `create` and `apply` report validation problems as field errors, the way
/// the hosted backend rejects individual records in a batch.
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in messages and logs
    const ENTITY: &'static str;

    type Draft: Send + 'static;
    type Patch: Send + 'static;

    fn id(&self) -> u64;

    /// Field value as text, `None` when the field is unset or unknown
    fn field(&self, name: &str) -> Option<String>;

    fn create(id: u64, draft: Self::Draft, now: DateTime<Utc>) -> Result<Self, Vec<FieldError>>;

    /// Must leave `self` untouched when it returns an error
    fn apply(&mut self, patch: Self::Patch, now: DateTime<Utc>) -> Result<(), Vec<FieldError>>;

    fn table(tables: &Tables) -> &Table<Self>;

    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;
}

/// Records of one entity plus the last id handed out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table<R> {
    pub last_id: u64,
    pub records: Vec<R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            last_id: 0,
            records: Vec::new(),
        }
    }
}

impl<R: Record> Table<R> {
    pub fn from_records(records: Vec<R>) -> Self {
        let mut table = Self {
            last_id: 0,
            records,
        };
        table.sync_counter();
        table
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next created record receives
    pub fn next_id(&self) -> u64 {
        self.last_id + 1
    }

    pub fn find(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut R> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    pub fn insert(&mut self, record: R) {
        self.last_id = self.last_id.max(record.id());
        self.records.push(record);
    }

    pub fn remove(&mut self, id: u64) -> Option<R> {
        let pos = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(pos))
    }

    /// Ids are never reused, even when the counter in a file lags behind its records
    fn sync_counter(&mut self) {
        let max_id = self.records.iter().map(|r| r.id()).max().unwrap_or(0);
        self.last_id = self.last_id.max(max_id);
    }
}

/// Every table the store holds; also the TOML fixture and persistence format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub tasks: Table<Task>,
    pub categories: Table<Category>,
    pub contacts: Table<Contact>,
    pub users: Table<User>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tables from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        let mut tables: Tables = toml::from_str(text)?;
        tables.tasks.sync_counter();
        tables.categories.sync_counter();
        tables.contacts.sync_counter();
        tables.users.sync_counter();
        Ok(tables)
    }

    /// The seed data shipped with the crate
    pub fn fixtures() -> Result<Self> {
        Self::parse(SEED_FIXTURES)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Record-level access to a backing store
pub trait DataSource: Send + Sync {
    fn fetch_records<R: Record>(
        &self,
        query: &Query,
    ) -> impl Future<Output = Envelope<Vec<R>>> + Send;

    /// Succeeds with `data: None` when no record has the id
    fn get_record_by_id<R: Record>(&self, id: u64) -> impl Future<Output = Envelope<R>> + Send;

    fn create_records<R: Record>(
        &self,
        drafts: Vec<R::Draft>,
    ) -> impl Future<Output = Envelope<R>> + Send;

    fn update_records<R: Record>(
        &self,
        patches: Vec<(u64, R::Patch)>,
    ) -> impl Future<Output = Envelope<R>> + Send;

    fn delete_records<R: Record>(&self, ids: &[u64]) -> impl Future<Output = Envelope<u64>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_parse() {
        let tables = Tables::fixtures().unwrap();
        assert!(!tables.tasks.is_empty());
        assert!(!tables.categories.is_empty());
        assert!(!tables.contacts.is_empty());
        assert!(tables.tasks.last_id >= tables.tasks.len() as u64);
    }

    #[test]
    fn test_parse_repairs_lagging_counter() {
        let text = r#"
[tasks]
last_id = 1

[[tasks.records]]
id = 7
title = "Pay rent"
completed = false
priority = "high"
category = "personal"
due_date = "2025-03-01"
created_at = "2025-02-20T09:00:00Z"
"#;
        let tables = Tables::parse(text).unwrap();
        assert_eq!(tables.tasks.last_id, 7);
        assert_eq!(tables.tasks.next_id(), 8);
        assert!(tables.categories.is_empty());
    }

    #[test]
    fn test_tables_toml_round_trip() {
        let tables = Tables::fixtures().unwrap();
        let text = tables.to_toml().unwrap();
        assert_eq!(Tables::parse(&text).unwrap(), tables);
    }

    #[test]
    fn test_table_insert_and_remove() {
        let mut table: Table<User> = Table::default();
        assert_eq!(table.next_id(), 1);

        table.insert(User {
            id: 1,
            name: "ann@example.com".to_string(),
            phone: None,
        });
        assert_eq!(table.next_id(), 2);
        assert!(table.find(1).is_some());

        assert!(table.remove(1).is_some());
        assert!(table.remove(1).is_none());
        // Removed ids are not handed out again
        assert_eq!(table.next_id(), 2);
    }
}
