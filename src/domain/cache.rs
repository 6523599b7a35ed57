//! Read-through cache over the backing file.
//!
//! The backing file is the single source of truth; [`LedgerCache`] holds
//! the last table read from it. [`LedgerCache::invalidate`] is the only
//! way the cached table is discarded, and [`crate::service::LedgerService`]
//! calls it from exactly one place per mutation, so there is no separate
//! "remember to refresh" step scattered across the code.

use tokio::sync::RwLock;

use super::LodgeRecord;

/// Cached copy of the record table.
///
/// `None` means the cache is cold (never filled, or invalidated by a
/// write) and the next read must go to the backing file.
#[derive(Debug, Default)]
pub struct LedgerCache {
    table: RwLock<Option<Vec<LodgeRecord>>>,
}

impl LedgerCache {
    /// Creates a cold cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the cached table, or `None` when cold.
    pub async fn get(&self) -> Option<Vec<LodgeRecord>> {
        self.table.read().await.clone()
    }

    /// Fills the cache with a freshly loaded table.
    pub async fn fill(&self, table: Vec<LodgeRecord>) {
        *self.table.write().await = Some(table);
    }

    /// Discards the cached table. The next read reloads from disk.
    pub async fn invalidate(&self) {
        *self.table.write().await = None;
    }

    /// Returns `true` if a table is currently cached.
    pub async fn is_warm(&self) -> bool {
        self.table.read().await.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::RecordId;
    use chrono::NaiveDate;

    fn record(name: &str) -> LodgeRecord {
        LodgeRecord {
            id: RecordId::new(),
            name: name.to_string(),
            occupation: "Clerk".to_string(),
            lodge_date: NaiveDate::from_ymd_opt(2024, 7, 12).unwrap_or_default(),
            grant_date: None,
            comments: String::new(),
        }
    }

    #[tokio::test]
    async fn starts_cold() {
        let cache = LedgerCache::new();
        assert!(!cache.is_warm().await);
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn fill_then_get_returns_table() {
        let cache = LedgerCache::new();
        cache.fill(vec![record("A. Smith")]).await;

        let table = cache.get().await;
        let Some(table) = table else {
            panic!("expected warm cache");
        };
        assert_eq!(table.len(), 1);
        assert!(cache.is_warm().await);
    }

    #[tokio::test]
    async fn invalidate_goes_cold() {
        let cache = LedgerCache::new();
        cache.fill(vec![record("A. Smith")]).await;
        cache.invalidate().await;
        assert!(!cache.is_warm().await);
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn fill_replaces_previous_table() {
        let cache = LedgerCache::new();
        cache.fill(vec![record("A. Smith")]).await;
        cache.fill(vec![record("B. Jones"), record("C. Doe")]).await;

        let table = cache.get().await;
        let Some(table) = table else {
            panic!("expected warm cache");
        };
        assert_eq!(table.len(), 2);
    }
}
