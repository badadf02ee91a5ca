//! rd-history: Append-only log of review generations, backed by SQLite.

pub mod store;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("database error: {0}")]
    Database(String),
}
