//! Analysis result cache.
//!
//! In-memory, keyed by seed URL, injected into the pipeline rather
//! than held as a process global. Entries live for the process
//! lifetime; age is advisory only and never used to expire anything.
//!
//! The cache also coordinates in-flight runs: a per-key async lock
//! means at most one crawl-and-analyze run per seed URL at a time,
//! with later callers waiting and then re-checking for a fresh entry.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::llm::AnalysisReport;

/// A cached report plus its write time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: AnalysisReport,
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    /// Age of this entry. Reported to callers, never enforced.
    #[must_use]
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.timestamp
    }
}

/// Guard held for the duration of one run of a given key.
pub type InFlightGuard = OwnedMutexGuard<()>;

#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AnalysisCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Store a completed report. A fresher run for the same key
    /// overwrites; there is no eviction.
    pub async fn put(&self, key: String, data: AnalysisReport) {
        let entry = CacheEntry {
            data,
            timestamp: Utc::now(),
        };
        self.entries.lock().await.insert(key, entry);
    }

    /// Acquire the per-key run lock. Callers hold the guard across
    /// their whole run; a second caller for the same key parks here
    /// until the first finishes, then re-checks the cache.
    pub async fn begin(&self, key: &str) -> InFlightGuard {
        let lock = {
            let mut map = self.in_flight.lock().await;
            map.entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
