//! `ReviewDesk` — the stores and the generator, wired together once at startup.

use crate::config::ServiceConfig;
use crate::review::{self, ReviewPayload, ReviewResponse};
use crate::ServiceError;
use rd_catalog::store::CatalogStore;
use rd_catalog::{admin, reader};
use rd_core::catalog::{AtmosphereOption, CatalogView, FlavorOption, Server};
use rd_core::history::GeneratedReviewRecord;
use rd_history::store::ReviewLog;
use rd_prompt::generator::LlmClient;
use rd_prompt::TextGenerator;

pub struct ReviewDesk<G: TextGenerator = LlmClient> {
    catalog: CatalogStore,
    log: ReviewLog,
    generator: G,
    default_lang: String,
}

impl ReviewDesk<LlmClient> {
    /// Open the on-disk stores and build the HTTP generator from `config`.
    pub fn open(config: &ServiceConfig) -> Result<Self, ServiceError> {
        std::fs::create_dir_all(&config.data_dir).map_err(|e| {
            ServiceError::Config(format!(
                "cannot create data dir {}: {e}",
                config.data_dir.display()
            ))
        })?;

        let catalog = CatalogStore::open(&config.catalog_db_path())?;
        let log = ReviewLog::open(&config.history_db_path())?;
        let generator = LlmClient::new(config.provider.clone(), config.model_id.clone());

        tracing::info!(
            data_dir = %config.data_dir.display(),
            provider = generator.provider().name(),
            model = generator.model_id(),
            "review desk ready"
        );
        Ok(Self::with_parts(catalog, log, generator, &config.default_lang))
    }
}

impl<G: TextGenerator> ReviewDesk<G> {
    pub fn with_parts(catalog: CatalogStore, log: ReviewLog, generator: G, default_lang: &str) -> Self {
        Self {
            catalog,
            log,
            generator,
            default_lang: default_lang.to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Guest-facing
    // ------------------------------------------------------------------

    /// Handle a raw review request body and shape the response.
    pub async fn review(&self, body: &str) -> ReviewResponse {
        let result = match ReviewPayload::from_json(body) {
            Ok(payload) => {
                review::generate_review(&self.log, &self.generator, &payload, &self.default_lang)
                    .await
            }
            Err(e) => {
                tracing::warn!("rejected review request: {e}");
                Err(e)
            }
        };
        ReviewResponse::from(result)
    }

    pub fn catalog(&self, language_code: &str) -> Result<CatalogView, ServiceError> {
        Ok(reader::list_options(&self.catalog, language_code)?)
    }

    // ------------------------------------------------------------------
    // Administration
    // ------------------------------------------------------------------

    pub async fn add_flavor(&self, text: &str, category: &str) -> Result<FlavorOption, ServiceError> {
        Ok(admin::create_flavor(&self.catalog, &self.generator, text, category).await?)
    }

    pub async fn add_atmosphere(&self, text: &str) -> Result<AtmosphereOption, ServiceError> {
        Ok(admin::create_atmosphere(&self.catalog, &self.generator, text).await?)
    }

    pub fn add_server(&self, name: &str) -> Result<Server, ServiceError> {
        let server = self.catalog.insert_server(name)?;
        tracing::info!(id = server.id, "added server {}", server.name);
        Ok(server)
    }

    pub fn delete_flavor(&self, id: i64) -> Result<(), ServiceError> {
        Ok(self.catalog.delete_flavor(id)?)
    }

    pub fn delete_atmosphere(&self, id: i64) -> Result<(), ServiceError> {
        Ok(self.catalog.delete_atmosphere(id)?)
    }

    pub fn delete_server(&self, name: &str) -> Result<(), ServiceError> {
        Ok(self.catalog.delete_server(name)?)
    }

    pub fn history(&self, limit: usize) -> Result<Vec<GeneratedReviewRecord>, ServiceError> {
        Ok(self.log.list_recent(limit)?)
    }
}
