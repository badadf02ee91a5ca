//! rd-service: The flows callers actually run.
//!
//! `review` turns a guest's tags into a review draft; `desk` bundles the
//! stores and the generator and exposes catalog administration.

pub mod config;
pub mod desk;
pub mod review;

pub use config::ServiceConfig;
pub use desk::ReviewDesk;

use rd_catalog::CatalogError;
use rd_history::HistoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("generation failed: {0}")]
    Generation(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("history error: {0}")]
    History(#[from] HistoryError),
}

impl ServiceError {
    /// Message safe to return to the caller. Never contains diagnostic detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "The service is not configured correctly.",
            Self::InvalidInput(_) => "Invalid data.",
            Self::Generation(_) => "Error while generating the review.",
            Self::Catalog(e) => e.public_message(),
            Self::History(_) => "The review history is temporarily unavailable.",
        }
    }
}
