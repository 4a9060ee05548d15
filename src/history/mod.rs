//! Persistent scan history.
//!
//! Scores are recorded per key (an article slug or a URL) in a SQLite table:
//!
//! ```text
//! scan_history(id, key, score, details, scanned_at_ms)
//! ```
//!
//! At most `limit` entries are kept per key; older ones are pruned on insert.
//! Entries are always returned newest first.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, error, info};
use serde::Serialize;
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use crate::error_handling::HistoryError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS scan_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    key TEXT NOT NULL,
    score INTEGER NOT NULL,
    details TEXT NOT NULL,
    scanned_at_ms INTEGER NOT NULL
)";

const INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_scan_history_key_time
    ON scan_history (key, scanned_at_ms DESC)";

/// One recorded scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanEntry {
    pub key: String,
    pub score: u8,
    /// Free-form payload, e.g. the PSEO/AEO/GEO sub-scores.
    pub details: Value,
    pub scanned_at: DateTime<Utc>,
}

impl ScanEntry {
    fn from_row(row: &SqliteRow) -> Result<Self, HistoryError> {
        let score: i64 = row.try_get("score")?;
        let details: String = row.try_get("details")?;
        let scanned_at_ms: i64 = row.try_get("scanned_at_ms")?;
        Ok(Self {
            key: row.try_get("key")?,
            score: score.clamp(0, 100) as u8,
            details: serde_json::from_str(&details)?,
            scanned_at: DateTime::from_timestamp_millis(scanned_at_ms).unwrap_or_default(),
        })
    }
}

/// Scan history backed by SQLite.
#[derive(Debug, Clone)]
pub struct ScanHistory {
    pool: Arc<SqlitePool>,
    limit: usize,
}

impl ScanHistory {
    /// Opens (creating if needed) the history database at `db_path`.
    ///
    /// Enables WAL mode and creates the table on first use.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::FileCreationError` if the file cannot be created and
    /// `HistoryError::SqlError` if the connection or schema setup fails.
    pub async fn open(db_path: &Path, limit: usize) -> Result<Self, HistoryError> {
        let db_path_str = db_path.to_string_lossy().to_string();
        match OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&db_path_str)
        {
            Ok(_) => info!("History database created at {db_path_str}"),
            Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("History database already exists at {db_path_str}")
            }
            Err(e) => {
                error!("Failed to create history database file: {e}");
                return Err(HistoryError::FileCreationError(e.to_string()));
            }
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}", db_path_str))
            .await
            .map_err(|e| {
                error!("Failed to connect to history database: {e}");
                HistoryError::SqlError(e)
            })?;

        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await
            .map_err(|e| {
                error!("Failed to set WAL mode: {e}");
                HistoryError::SqlError(e)
            })?;

        Self::with_pool(pool, limit).await
    }

    /// In-memory history, discarded when dropped.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::SqlError` if the database cannot be set up.
    pub async fn in_memory(limit: usize) -> Result<Self, HistoryError> {
        // A single connection so every query sees the same memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool, limit).await
    }

    async fn with_pool(pool: SqlitePool, limit: usize) -> Result<Self, HistoryError> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        sqlx::query(INDEX).execute(&pool).await?;
        Ok(Self {
            pool: Arc::new(pool),
            limit,
        })
    }

    /// Records a scan now. See [`ScanHistory::add_scan_at`].
    pub async fn add_scan(
        &self,
        key: &str,
        score: u8,
        details: Value,
    ) -> Result<Option<ScanEntry>, HistoryError> {
        self.add_scan_at(key, score, details, Utc::now()).await
    }

    /// Records a scan at `scanned_at` and prunes the key to the newest `limit` entries.
    ///
    /// An empty key records nothing and returns `None`.
    pub async fn add_scan_at(
        &self,
        key: &str,
        score: u8,
        details: Value,
        scanned_at: DateTime<Utc>,
    ) -> Result<Option<ScanEntry>, HistoryError> {
        if key.is_empty() {
            return Ok(None);
        }

        let details_text = serde_json::to_string(&details)?;
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO scan_history (key, score, details, scanned_at_ms) VALUES (?, ?, ?, ?)",
        )
        .bind(key)
        .bind(i64::from(score))
        .bind(&details_text)
        .bind(scanned_at.timestamp_millis())
        .execute(&mut *tx)
        .await?;

        let pruned = sqlx::query(
            "DELETE FROM scan_history WHERE key = ? AND id NOT IN (
                SELECT id FROM scan_history WHERE key = ?
                ORDER BY scanned_at_ms DESC, id DESC LIMIT ?
            )",
        )
        .bind(key)
        .bind(key)
        .bind(self.limit as i64)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        if pruned > 0 {
            debug!("Pruned {pruned} old history entries for {key}");
        }

        Ok(Some(ScanEntry {
            key: key.to_string(),
            score,
            details,
            scanned_at,
        }))
    }

    /// Entries for `key`, newest first.
    pub async fn history(&self, key: &str) -> Result<Vec<ScanEntry>, HistoryError> {
        let rows = sqlx::query(
            "SELECT key, score, details, scanned_at_ms FROM scan_history
             WHERE key = ? ORDER BY scanned_at_ms DESC, id DESC",
        )
        .bind(key)
        .fetch_all(self.pool.as_ref())
        .await?;
        rows.iter().map(ScanEntry::from_row).collect()
    }

    /// The most recent entry for `key`.
    pub async fn latest(&self, key: &str) -> Result<Option<ScanEntry>, HistoryError> {
        let row = sqlx::query(
            "SELECT key, score, details, scanned_at_ms FROM scan_history
             WHERE key = ? ORDER BY scanned_at_ms DESC, id DESC LIMIT 1",
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;
        row.as_ref().map(ScanEntry::from_row).transpose()
    }

    /// Difference between `current_score` and the latest stored score for `key`.
    ///
    /// Call before recording the current scan. Returns 0 when the key has no history.
    pub async fn trend(&self, key: &str, current_score: u8) -> Result<i32, HistoryError> {
        Ok(self
            .latest(key)
            .await?
            .map(|latest| i32::from(current_score) - i32::from(latest.score))
            .unwrap_or(0))
    }

    /// Every entry across all keys, newest first.
    pub async fn all_scans(&self) -> Result<Vec<ScanEntry>, HistoryError> {
        let rows = sqlx::query(
            "SELECT key, score, details, scanned_at_ms FROM scan_history
             ORDER BY scanned_at_ms DESC, id DESC",
        )
        .fetch_all(self.pool.as_ref())
        .await?;
        rows.iter().map(ScanEntry::from_row).collect()
    }

    /// Deletes all history. Returns the number of entries removed.
    pub async fn clear(&self) -> Result<u64, HistoryError> {
        let result = sqlx::query("DELETE FROM scan_history")
            .execute(self.pool.as_ref())
            .await?;
        info!("Cleared {} history entries", result.rows_affected());
        Ok(result.rows_affected())
    }
}
