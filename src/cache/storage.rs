//! Persistent key-value storage for the cache's durable tier
//!
//! [`SqliteStore`] keeps records in a single SQLite database under the user's
//! cache directory. [`VolatileStore`] is an in-process stand-in used when the
//! database cannot be opened. Both enforce a byte capacity and fail the write
//! that would exceed it.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use std::path::Path;

use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

/// Database file name inside the cache directory
const DB_FILE: &str = "cache.db";

type Result<T> = std::result::Result<T, CacheError>;

/// Byte-string storage with bounded capacity.
///
/// Writes may fail (capacity, I/O); callers decide whether that matters.
pub trait PersistentStore: Send {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove `key`; returns whether anything was removed
    fn remove(&mut self, key: &str) -> Result<bool>;
}

/// SQLite-backed persistent store
pub struct SqliteStore {
    conn: Connection,
    capacity_bytes: usize,
}

impl SqliteStore {
    /// Open or create the store in `cache_dir`
    pub fn open_at(cache_dir: &Path, capacity_bytes: usize) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join(DB_FILE);
        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            std::fs::remove_file(&db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
            return Self::open_at(cache_dir, capacity_bytes);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                cache_key TEXT PRIMARY KEY NOT NULL,
                data BLOB NOT NULL,
                created_at INTEGER NOT NULL,
                size_bytes INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_created_at ON cache_entries(created_at);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self {
            conn,
            capacity_bytes,
        })
    }

    /// Database path inside `cache_dir`
    pub fn db_path(cache_dir: &Path) -> std::path::PathBuf {
        cache_dir.join(DB_FILE)
    }

    /// Clear all cache entries
    pub fn clear_all(&self) -> Result<ClearStats> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;

        self.conn.execute("DELETE FROM cache_entries", [])?;

        Ok(ClearStats {
            entries_removed: count as usize,
        })
    }

    /// Get cache statistics.
    ///
    /// `stale_entries` counts rows written more than `stale_after_secs` ago;
    /// they are removed lazily on their next lookup.
    pub fn stats(&self, stale_after_secs: i64) -> Result<CacheStats> {
        let cutoff = Utc::now().timestamp() - stale_after_secs;

        let total_entries: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;

        let stale_entries: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM cache_entries WHERE created_at <= ?1",
            [cutoff],
            |r| r.get(0),
        )?;

        let total_size: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(size_bytes), 0) FROM cache_entries",
            [],
            |r| r.get(0),
        )?;

        let (oldest, newest): (Option<i64>, Option<i64>) = self.conn.query_row(
            "SELECT MIN(created_at), MAX(created_at) FROM cache_entries",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;

        Ok(CacheStats {
            total_entries: total_entries as usize,
            stale_entries: stale_entries as usize,
            total_size_bytes: total_size as usize,
            capacity_bytes: self.capacity_bytes,
            oldest_entry: oldest,
            newest_entry: newest,
        })
    }

    /// Bytes used by every entry except `key`
    fn size_excluding(&self, key: &str) -> Result<usize> {
        let size: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(size_bytes), 0) FROM cache_entries WHERE cache_key != ?1",
            [key],
            |r| r.get(0),
        )?;
        Ok(size as usize)
    }
}

impl PersistentStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let data = self
            .conn
            .query_row(
                "SELECT data FROM cache_entries WHERE cache_key = ?1",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(data)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let needed = self.size_excluding(key)? + value.len();
        if needed > self.capacity_bytes {
            return Err(CacheError::CapacityExceeded {
                needed,
                capacity: self.capacity_bytes,
            });
        }

        self.conn.execute(
            "INSERT OR REPLACE INTO cache_entries (cache_key, data, created_at, size_bytes)
             VALUES (?1, ?2, ?3, ?4)",
            params![key, value, Utc::now().timestamp(), value.len() as i64],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM cache_entries WHERE cache_key = ?1", [key])?;
        Ok(deleted > 0)
    }
}

/// In-process store with the same capacity rule as [`SqliteStore`].
///
/// Contents vanish with the process.
#[derive(Debug, Default)]
pub struct VolatileStore {
    entries: HashMap<String, Vec<u8>>,
    capacity_bytes: usize,
}

impl VolatileStore {
    /// Create an empty store holding at most `capacity_bytes`
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity_bytes,
        }
    }
}

impl PersistentStore for VolatileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let others: usize = self
            .entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum();
        let needed = others + value.len();
        if needed > self.capacity_bytes {
            return Err(CacheError::CapacityExceeded {
                needed,
                capacity: self.capacity_bytes,
            });
        }

        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// Statistics about cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub stale_entries: usize,
    pub total_size_bytes: usize,
    pub capacity_bytes: usize,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}
