//! History types — one record per review generation attempt for a named server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedReviewRecord {
    pub id: Uuid,
    pub server_name: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedReviewRecord {
    pub fn new(server_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            server_name: server_name.into(),
            created_at: Utc::now(),
        }
    }
}
