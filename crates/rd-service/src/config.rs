//! Service configuration, read from the environment.

use rd_prompt::generator::LlmProvider;
use std::path::PathBuf;

/// Everything needed to open the stores and reach the generator.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding `catalog.db` and `history.db`.
    pub data_dir: PathBuf,
    pub provider: LlmProvider,
    /// Model override; `None` uses the provider default.
    pub model_id: Option<String>,
    /// Language used when a review request does not name one.
    pub default_lang: String,
}

impl ServiceConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        let data_dir = std::env::var("REVIEW_DESK_DATA_DIR")
            .map(PathBuf::from)
            .ok()
            .or_else(default_data_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let model_id = std::env::var("REVIEW_DESK_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty());

        let default_lang = std::env::var("REVIEW_DESK_DEFAULT_LANG")
            .ok()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| "fr".into());

        Self {
            data_dir,
            provider: LlmProvider::from_env(),
            model_id,
            default_lang,
        }
    }

    pub fn catalog_db_path(&self) -> PathBuf {
        self.data_dir.join("catalog.db")
    }

    pub fn history_db_path(&self) -> PathBuf {
        self.data_dir.join("history.db")
    }
}

fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("review-desk"))
}
