//! rd-catalog: Selectable feedback options in several languages.
//!
//! Options are translated once when an admin creates them (`admin`), stored
//! with one column per language (`store`) and projected per request with
//! fallback to the canonical text (`reader`).

pub mod admin;
pub mod reader;
pub mod store;
pub mod translation;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Database(String),
    #[error("duplicate entry: {0}")]
    Duplicate(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("translation failed: {0}")]
    Translation(String),
}

impl CatalogError {
    /// Message safe to show to the caller; diagnostics stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Database(_) => "The catalog is temporarily unavailable.",
            Self::Duplicate(_) => "This entry already exists.",
            Self::NotFound(_) => "This entry does not exist.",
            Self::Validation(_) => "Invalid option data.",
            Self::Translation(_) => "The option could not be translated; nothing was saved.",
        }
    }
}
