//! Ledger service: orchestrates store, cache, and events.
//!
//! Every mutation follows the pattern: serialize on the write lock →
//! apply to the backing file → invalidate the cache → emit an event →
//! log. The backing file stays the single source of truth throughout;
//! mutations read their "current" table from disk, never from the cache.

use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{
    EventBus, LedgerCache, LedgerEvent, LodgeRecord, RecordDraft, RecordId,
};
use crate::error::LedgerError;
use crate::service::html;
use crate::store::CsvStore;

/// Result of a fail-soft table read.
///
/// A read failure never surfaces as an error to the caller: the table
/// degrades to empty and `warning` carries the report instead.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// The table in append order; empty on read failure.
    pub records: Vec<LodgeRecord>,
    /// Human-readable report when the backing file could not be read.
    pub warning: Option<String>,
}

/// Orchestration layer for all record operations.
#[derive(Debug)]
pub struct LedgerService {
    store: CsvStore,
    cache: LedgerCache,
    event_bus: EventBus,
    /// Serializes read-modify-write cycles against the backing file so
    /// concurrent submissions cannot interleave partial rewrites.
    write_lock: Mutex<()>,
}

impl LedgerService {
    /// Creates a new `LedgerService` over an initialized store.
    #[must_use]
    pub fn new(store: CsvStore, event_bus: EventBus) -> Self {
        Self {
            store,
            cache: LedgerCache::new(),
            event_bus,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Read-through table load.
    ///
    /// Serves the cached table when warm; otherwise reads the backing
    /// file and fills the cache. On read failure the outcome degrades to
    /// an empty table with a warning, and the failure is not cached so a
    /// repaired file is picked up on the next read.
    pub async fn load_table(&self) -> LoadOutcome {
        if let Some(records) = self.cache.get().await {
            return LoadOutcome {
                records,
                warning: None,
            };
        }
        match self.store.load_all() {
            Ok(records) => {
                self.cache.fill(records.clone()).await;
                LoadOutcome {
                    records,
                    warning: None,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "backing file unreadable; serving empty table");
                LoadOutcome {
                    records: Vec::new(),
                    warning: Some(err.to_string()),
                }
            }
        }
    }

    /// Returns the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RecordNotFound`] when no such record exists.
    pub async fn get(&self, id: RecordId) -> Result<LodgeRecord, LedgerError> {
        self.load_table()
            .await
            .records
            .into_iter()
            .find(|record| record.id == id)
            .ok_or(LedgerError::RecordNotFound(*id.as_uuid()))
    }

    /// Appends a new record built from the submission draft.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] when the append cannot be written.
    pub async fn add(&self, draft: RecordDraft) -> Result<LodgeRecord, LedgerError> {
        let record = LodgeRecord::from_draft(draft);

        let _guard = self.write_lock.lock().await;
        self.store.append(&record)?;
        self.commit_mutation(LedgerEvent::RecordAdded {
            id: record.id,
            name: record.name.clone(),
            timestamp: Utc::now(),
        })
        .await;

        tracing::info!(id = %record.id, "record added");
        Ok(record)
    }

    /// Replaces the record with the given id and rewrites the whole file.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RecordNotFound`] on an unknown id (the file
    /// is left untouched), or a storage/read error from the rewrite cycle.
    pub async fn update(
        &self,
        id: RecordId,
        draft: RecordDraft,
    ) -> Result<LodgeRecord, LedgerError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.store.load_all()?;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Err(LedgerError::RecordNotFound(*id.as_uuid()));
        };
        record.apply_draft(draft);
        let updated = record.clone();

        self.store.rewrite_all(&records)?;
        self.commit_mutation(LedgerEvent::RecordUpdated {
            id,
            timestamp: Utc::now(),
        })
        .await;

        tracing::info!(id = %id, "record updated");
        Ok(updated)
    }

    /// Removes the record with the given id and rewrites the whole file.
    /// Remaining records keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RecordNotFound`] on an unknown id (the file
    /// is left untouched), or a storage/read error from the rewrite cycle.
    pub async fn delete(&self, id: RecordId) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.store.load_all()?;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(LedgerError::RecordNotFound(*id.as_uuid()));
        }

        self.store.rewrite_all(&records)?;
        self.commit_mutation(LedgerEvent::RecordDeleted {
            id,
            timestamp: Utc::now(),
        })
        .await;

        tracing::info!(id = %id, "record deleted");
        Ok(())
    }

    /// Renders the current table as the HTML export artifact.
    ///
    /// Uses the same fail-soft read as [`LedgerService::load_table`]: an
    /// unreadable backing file exports as an empty table.
    pub async fn export_html(&self) -> String {
        let outcome = self.load_table().await;
        html::render_table(&outcome.records)
    }

    /// The single invalidation point: every mutation lands here after its
    /// file write, while still holding the write lock.
    async fn commit_mutation(&self, event: LedgerEvent) {
        self.cache.invalidate().await;
        let _ = self.event_bus.publish(event);
    }
}
