//! Tiered repository cache
//!
//! Lookups consult the memory tier first, then the persistent store. Fresh
//! persistent hits are promoted into memory; stale or unreadable persistent
//! records are removed on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{CacheTier, PersistentStore, cache_key};
use crate::client::Repository;

/// Repositories cached for one username
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub username: String,
    pub repositories: Vec<Repository>,
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    fn age_at(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.timestamp
    }
}

/// On-disk shape of a persisted entry
#[derive(Serialize, Deserialize)]
struct PersistedRecord {
    repositories: Vec<Repository>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

/// Two-tier cache shared by every request in the process.
///
/// Both tiers sit behind `std::sync::Mutex`; no lock is held across an await.
pub struct CacheLayer {
    memory: Mutex<HashMap<String, CacheEntry>>,
    persistent: Mutex<Box<dyn PersistentStore>>,
}

impl CacheLayer {
    /// Create a cache with an empty memory tier over `persistent`
    pub fn new(persistent: Box<dyn PersistentStore>) -> Self {
        Self {
            memory: Mutex::new(HashMap::new()),
            persistent: Mutex::new(persistent),
        }
    }

    /// Freshest servable entry for `username`, if any
    #[allow(dead_code)]
    pub fn lookup(&self, username: &str) -> Option<CacheEntry> {
        self.lookup_at(username, Utc::now())
    }

    /// [`lookup`](Self::lookup) evaluated at `now`
    pub fn lookup_at(&self, username: &str, now: DateTime<Utc>) -> Option<CacheEntry> {
        if let Some(entry) = self.memory().get(username)
            && CacheTier::Memory.is_fresh(entry.age_at(now))
        {
            log::debug!("Memory cache hit: {}", username);
            return Some(entry.clone());
        }

        let entry = self.read_persistent(username, now)?;
        log::debug!("Persistent cache hit, promoting: {}", username);
        self.memory().insert(username.to_string(), entry.clone());
        Some(entry)
    }

    /// Record `repositories` as the current result for `username`
    #[allow(dead_code)]
    pub fn store(&self, username: &str, repositories: Vec<Repository>) -> CacheEntry {
        self.store_at(username, repositories, Utc::now())
    }

    /// [`store`](Self::store) stamped with `now`
    pub fn store_at(
        &self,
        username: &str,
        repositories: Vec<Repository>,
        now: DateTime<Utc>,
    ) -> CacheEntry {
        let entry = CacheEntry {
            username: username.to_string(),
            repositories,
            timestamp: now,
        };

        self.memory().insert(username.to_string(), entry.clone());
        self.write_persistent(&entry);

        entry
    }

    fn read_persistent(&self, username: &str, now: DateTime<Utc>) -> Option<CacheEntry> {
        let key = cache_key(username);
        let mut store = self.persistent();

        let bytes = match store.get(&key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read persistent cache for {}: {}", username, e);
                return None;
            }
        };

        let record = match serde_json::from_slice::<PersistedRecord>(&bytes) {
            Ok(record) => record,
            Err(e) => {
                log::debug!("Discarding unreadable cache record {}: {}", key, e);
                remove_quietly(&mut **store, &key);
                return None;
            }
        };

        let entry = CacheEntry {
            username: username.to_string(),
            repositories: record.repositories,
            timestamp: record.timestamp,
        };

        if !CacheTier::Persistent.is_fresh(entry.age_at(now)) {
            log::debug!("Evicting stale cache record {}", key);
            remove_quietly(&mut **store, &key);
            return None;
        }

        Some(entry)
    }

    fn write_persistent(&self, entry: &CacheEntry) {
        let record = PersistedRecord {
            repositories: entry.repositories.clone(),
            timestamp: entry.timestamp,
        };

        let result = serde_json::to_vec(&record)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                self.persistent()
                    .set(&cache_key(&entry.username), &bytes)
                    .map_err(|e| e.to_string())
            });

        if let Err(e) = result {
            log::warn!(
                "Failed to persist cache entry for {}: {}",
                entry.username,
                e
            );
        }
    }

    fn memory(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.memory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persistent(&self) -> MutexGuard<'_, Box<dyn PersistentStore>> {
        self.persistent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn remove_quietly(store: &mut dyn PersistentStore, key: &str) {
    if let Err(e) = store.remove(key) {
        log::warn!("Failed to remove cache record {}: {}", key, e);
    }
}
