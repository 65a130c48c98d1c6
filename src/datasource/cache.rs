use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
#[cfg(test)]
use mockall::automock;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::datasource::error::CacheError;

/// Keyed store of serialized values with per-entry expiry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored value if present and not yet expired
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores a value, replacing any previous entry for the same key
    async fn set(
        &self,
        namespace: &str,
        key: &str,
        value: &str,
        ttl_minutes: u32,
    ) -> Result<(), CacheError>;
}

/// SQLite-backed cache store
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    pub fn new(db_path: &Path) -> Result<Self, CacheError> {
        info!("Initializing cache database at {:?}", db_path);

        let conn = Connection::open(db_path)?;
        debug!("Database connection established");

        let cache = Self {
            conn: Mutex::new(conn),
        };

        cache.create_schema()?;
        info!("Cache initialized successfully");

        Ok(cache)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, CacheError> {
        self.conn.lock().map_err(|_| CacheError::LockPoisoned)
    }

    fn create_schema(&self) -> Result<(), CacheError> {
        debug!("Creating database schema");

        self.lock()?
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS cache_entries (
                    namespace TEXT NOT NULL,
                    key TEXT NOT NULL,
                    value TEXT NOT NULL,
                    expires_at INTEGER NOT NULL,
                    PRIMARY KEY (namespace, key)
                );
                CREATE INDEX IF NOT EXISTS idx_expires_at ON cache_entries(expires_at);
                "#,
            )
            .map_err(|e| CacheError::SchemaCreation(e.to_string()))?;

        debug!("Database schema created successfully");
        Ok(())
    }

    pub fn table_exists(&self, table_name: &str) -> Result<bool, CacheError> {
        let count: i64 = self
            .lock()?
            .query_row(
                r#"
                SELECT COUNT(*) FROM sqlite_master
                WHERE type='table' AND name=?1
                "#,
                params![table_name],
                |row| row.get(0),
            )
            .map_err(|e| CacheError::Query(e.to_string()))?;

        Ok(count > 0)
    }

    /// Deletes expired entries and returns how many were removed
    pub fn purge_expired(&self) -> Result<usize, CacheError> {
        let now = Utc::now().timestamp_millis();
        let removed = self
            .lock()?
            .execute(
                "DELETE FROM cache_entries WHERE expires_at <= ?1",
                params![now],
            )
            .map_err(|e| CacheError::Query(e.to_string()))?;

        debug!(removed, "Purged expired cache entries");
        Ok(removed)
    }
}

#[async_trait::async_trait]
impl CacheStore for SqliteCache {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, CacheError> {
        let now = Utc::now().timestamp_millis();
        self.lock()?
            .query_row(
                r#"
                SELECT value FROM cache_entries
                WHERE namespace = ?1 AND key = ?2 AND expires_at > ?3
                "#,
                params![namespace, key, now],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| CacheError::Query(e.to_string()))
    }

    async fn set(
        &self,
        namespace: &str,
        key: &str,
        value: &str,
        ttl_minutes: u32,
    ) -> Result<(), CacheError> {
        let expires_at = Utc::now().timestamp_millis() + i64::from(ttl_minutes) * 60 * 1000;
        self.lock()?
            .execute(
                r#"
                INSERT INTO cache_entries (namespace, key, value, expires_at)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(namespace, key) DO UPDATE SET
                    value = excluded.value,
                    expires_at = excluded.expires_at
                "#,
                params![namespace, key, value, expires_at],
            )
            .map_err(|e| CacheError::Query(e.to_string()))?;

        Ok(())
    }
}
