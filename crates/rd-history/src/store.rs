//! SQLite-backed review log.

use crate::HistoryError;
use rd_core::history::GeneratedReviewRecord;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

/// Review log backed by a single SQLite database.
/// Rows are only ever inserted; nothing here updates or deletes them.
pub struct ReviewLog {
    conn: Mutex<Connection>,
}

impl ReviewLog {
    /// Open (or create) the review log at the given path.
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        let conn = Connection::open(path).map_err(|e| HistoryError::Database(e.to_string()))?;
        let log = Self {
            conn: Mutex::new(conn),
        };
        log.initialize_schema()?;
        Ok(log)
    }

    /// Create an in-memory review log (useful for testing).
    pub fn in_memory() -> Result<Self, HistoryError> {
        let conn =
            Connection::open_in_memory().map_err(|e| HistoryError::Database(e.to_string()))?;
        let log = Self {
            conn: Mutex::new(conn),
        };
        log.initialize_schema()?;
        Ok(log)
    }

    fn initialize_schema(&self) -> Result<(), HistoryError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| HistoryError::Database(e.to_string()))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS generated_reviews (
                id TEXT PRIMARY KEY,
                server_name TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_generated_reviews_created
                ON generated_reviews(created_at);",
        )
        .map_err(|e| HistoryError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn insert(&self, record: &GeneratedReviewRecord) -> Result<(), HistoryError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| HistoryError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO generated_reviews (id, server_name, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                record.id.to_string(),
                record.server_name,
                record.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| HistoryError::Database(e.to_string()))?;
        Ok(())
    }

    /// Most recent records first.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<GeneratedReviewRecord>, HistoryError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| HistoryError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT id, server_name, created_at FROM generated_reviews
                 ORDER BY created_at DESC LIMIT ?1",
            )
            .map_err(|e| HistoryError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(rusqlite::params![limit as i64], |row| {
                Ok(RawRecordRow {
                    id: row.get(0)?,
                    server_name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })
            .map_err(|e| HistoryError::Database(e.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| HistoryError::Database(e.to_string()))?;
            records.push(raw_to_record(raw)?);
        }
        Ok(records)
    }
}

/// Internal row struct for SQLite queries.
struct RawRecordRow {
    id: String,
    server_name: String,
    created_at: String,
}

fn raw_to_record(raw: RawRecordRow) -> Result<GeneratedReviewRecord, HistoryError> {
    let parse_err = |field: &str, e: String| HistoryError::Database(format!("{field}: {e}"));

    Ok(GeneratedReviewRecord {
        id: raw
            .id
            .parse()
            .map_err(|e: uuid::Error| parse_err("id", e.to_string()))?,
        server_name: raw.server_name,
        created_at: chrono::DateTime::parse_from_rfc3339(&raw.created_at)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| parse_err("created_at", e.to_string()))?,
    })
}
