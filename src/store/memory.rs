//! In-memory data source
//!
//! The store owns its tables behind a mutex and is meant to be shared through
//! an `Arc`. Every call can be slowed down by a fixed latency to mimic a
//! remote backend. When a [`Storage`] is attached, the tables are written to
//! disk after every mutating call; a failed write rolls the tables back and
//! fails the whole call.

use super::{DataSource, Envelope, Query, Record, RecordResult, Tables};
use crate::storage::Storage;
use anyhow::Result;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    latency: Duration,
    storage: Option<Storage>,
}

impl MemoryStore {
    pub fn new(tables: Tables) -> Self {
        Self {
            tables: Mutex::new(tables),
            latency: Duration::ZERO,
            storage: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Tables::new())
    }

    /// A store seeded with the bundled fixtures
    pub fn with_fixtures() -> Result<Self> {
        Ok(Self::new(Tables::fixtures()?))
    }

    /// A store loaded from, and saved back to, `storage`
    pub fn open(storage: Storage) -> Result<Self> {
        let tables = storage.load()?;
        debug!(
            path = %storage.file_path().display(),
            tasks = tables.tasks.len(),
            "Loaded data file"
        );
        Ok(Self {
            tables: Mutex::new(tables),
            latency: Duration::ZERO,
            storage: Some(storage),
        })
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Copy of the current tables
    pub fn snapshot(&self) -> Tables {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Persist after a mutation; `before` is restored if the write fails
    fn persist(&self, tables: &mut Tables, before: Option<Tables>) -> Result<(), String> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        if let Err(e) = storage.save(tables) {
            warn!(error = %e, "Failed to save data file, rolling back");
            if let Some(before) = before {
                *tables = before;
            }
            return Err(format!("Failed to save: {}", e));
        }
        Ok(())
    }

    fn backup(&self, tables: &Tables) -> Option<Tables> {
        self.storage.as_ref().map(|_| tables.clone())
    }
}

impl DataSource for MemoryStore {
    async fn fetch_records<R: Record>(&self, query: &Query) -> Envelope<Vec<R>> {
        self.delay().await;
        let tables = self.lock();
        let records = query.apply(R::table(&tables).records.iter().cloned());
        Envelope::ok(Some(records))
    }

    async fn get_record_by_id<R: Record>(&self, id: u64) -> Envelope<R> {
        self.delay().await;
        let tables = self.lock();
        Envelope::ok(R::table(&tables).find(id).cloned())
    }

    async fn create_records<R: Record>(&self, drafts: Vec<R::Draft>) -> Envelope<R> {
        self.delay().await;
        let mut tables = self.lock();
        let before = self.backup(&tables);
        let now = Utc::now();

        let table = R::table_mut(&mut tables);
        let results: Vec<RecordResult<R>> = drafts
            .into_iter()
            .map(|draft| match R::create(table.next_id(), draft, now) {
                Ok(record) => {
                    table.insert(record.clone());
                    RecordResult::ok(record)
                }
                Err(errors) => {
                    RecordResult::failed(format!("Failed to create {}", R::ENTITY), errors)
                }
            })
            .collect();

        if results.iter().any(|r| r.success)
            && let Err(message) = self.persist(&mut tables, before)
        {
            return Envelope::failure(message);
        }
        Envelope::batch(results)
    }

    async fn update_records<R: Record>(&self, patches: Vec<(u64, R::Patch)>) -> Envelope<R> {
        self.delay().await;
        let mut tables = self.lock();
        let before = self.backup(&tables);
        let now = Utc::now();

        let table = R::table_mut(&mut tables);
        let results: Vec<RecordResult<R>> = patches
            .into_iter()
            .map(|(id, patch)| {
                let Some(record) = table.find_mut(id) else {
                    return RecordResult::failed(
                        format!("{} with ID {} not found", R::ENTITY, id),
                        Vec::new(),
                    );
                };
                let mut updated = record.clone();
                match updated.apply(patch, now) {
                    Ok(()) => {
                        *record = updated.clone();
                        RecordResult::ok(updated)
                    }
                    Err(errors) => {
                        RecordResult::failed(format!("Failed to update {}", R::ENTITY), errors)
                    }
                }
            })
            .collect();

        if results.iter().any(|r| r.success)
            && let Err(message) = self.persist(&mut tables, before)
        {
            return Envelope::failure(message);
        }
        Envelope::batch(results)
    }

    async fn delete_records<R: Record>(&self, ids: &[u64]) -> Envelope<u64> {
        self.delay().await;
        let mut tables = self.lock();
        let before = self.backup(&tables);

        let table = R::table_mut(&mut tables);
        let results: Vec<RecordResult<u64>> = ids
            .iter()
            .map(|&id| match table.remove(id) {
                Some(_) => RecordResult::ok(id),
                None => RecordResult::failed(
                    format!("{} with ID {} not found", R::ENTITY, id),
                    Vec::new(),
                ),
            })
            .collect();

        if results.iter().any(|r| r.success)
            && let Err(message) = self.persist(&mut tables, before)
        {
            return Envelope::failure(message);
        }
        Envelope::batch(results)
    }
}
