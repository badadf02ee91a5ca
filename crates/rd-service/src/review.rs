//! Review synthesis: tags → prompt → generator, with a best-effort visit log.

use crate::ServiceError;
use rd_core::history::GeneratedReviewRecord;
use rd_core::tag::FeedbackTag;
use rd_history::store::ReviewLog;
use rd_prompt::{GenerationRequest, SamplingParams, TextGenerator};
use serde::{Deserialize, Serialize};

/// Request body: `{lang?, tags: [{category, value}]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewPayload {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub tags: Vec<FeedbackTag>,
}

impl ReviewPayload {
    /// Parse a raw body. Missing, `null` or `{}` bodies are rejected.
    pub fn from_json(body: &str) -> Result<Self, ServiceError> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| ServiceError::InvalidInput(format!("body is not JSON: {e}")))?;

        match &value {
            serde_json::Value::Object(map) if !map.is_empty() => {}
            _ => return Err(ServiceError::InvalidInput("empty request body".into())),
        }

        serde_json::from_value(value).map_err(|e| ServiceError::InvalidInput(e.to_string()))
    }
}

/// Response body: `{review}` on success, `{error}` on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReviewResponse {
    Review { review: String },
    Error { error: String },
}

impl From<Result<String, ServiceError>> for ReviewResponse {
    fn from(result: Result<String, ServiceError>) -> Self {
        match result {
            Ok(review) => Self::Review { review },
            Err(e) => Self::Error {
                error: e.public_message().to_string(),
            },
        }
    }
}

/// Generate a review draft for one guest.
///
/// Visits with a named server are logged before the generator is called. The
/// log entry is kept even if generation then fails, and a logging failure
/// never blocks the review.
pub async fn generate_review<G: TextGenerator>(
    log: &ReviewLog,
    generator: &G,
    payload: &ReviewPayload,
    default_lang: &str,
) -> Result<String, ServiceError> {
    let lang = payload
        .lang
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(default_lang);

    let (request, prompt) = rd_prompt::compile(&payload.tags, lang);

    if request.has_named_server() {
        let record = GeneratedReviewRecord::new(&request.server_name);
        if let Err(e) = log.insert(&record) {
            tracing::warn!("failed to log review generation for {}: {e}", request.server_name);
        }
    }

    let generation = GenerationRequest {
        instruction: prompt.instruction,
        context: prompt.context,
        params: SamplingParams::creative(),
    };

    let review = generator.generate(&generation).await.map_err(|e| {
        tracing::error!("review generation failed: {e}");
        ServiceError::Generation(e.to_string())
    })?;

    tracing::info!(
        lang,
        server = %request.server_name,
        occasion = request.occasion_detail.as_deref().unwrap_or("-"),
        "generated review"
    );
    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_prompt::testing::ScriptedGenerator;

    fn payload(tags: &[(&str, &str)]) -> ReviewPayload {
        ReviewPayload {
            lang: Some("en".into()),
            tags: tags.iter().map(|(c, v)| FeedbackTag::new(*c, *v)).collect(),
        }
    }

    #[test]
    fn empty_bodies_are_invalid() {
        for body in ["", "null", "{}", "[]", "not json"] {
            assert!(
                matches!(
                    ReviewPayload::from_json(body),
                    Err(ServiceError::InvalidInput(_))
                ),
                "body {body:?} should be rejected"
            );
        }
    }

    #[test]
    fn body_without_lang_parses() {
        let payload = ReviewPayload::from_json(
            r#"{"tags": [{"category": "liked_dishes", "value": "Burrata"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.lang, None);
        assert_eq!(payload.tags.len(), 1);
    }

    #[tokio::test]
    async fn composes_prompt_and_logs_named_server() {
        let log = ReviewLog::in_memory().unwrap();
        let generator = ScriptedGenerator::replying("Lovely evening, Kewan was great.");

        let review = generate_review(
            &log,
            &generator,
            &payload(&[
                ("server_name", "Kewan"),
                ("service_qualities", "attentive"),
            ]),
            "fr",
        )
        .await
        .unwrap();

        assert_eq!(review, "Lovely evening, Kewan was great.");
        let calls = generator.calls();
        assert_eq!(calls[0].context, "Service: attentive.");
        assert!(calls[0].instruction.contains("\"Kewan\""));
        assert!(calls[0].instruction.contains("English (en)"));
        assert_eq!(calls[0].params, SamplingParams::creative());

        let records = log.list_recent(10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].server_name, "Kewan");
    }

    #[tokio::test]
    async fn anonymous_visit_is_not_logged() {
        let log = ReviewLog::in_memory().unwrap();
        let generator = ScriptedGenerator::replying("Great pasta.");

        generate_review(&log, &generator, &payload(&[("liked_dishes", "Pasta")]), "fr")
            .await
            .unwrap();
        assert!(log.list_recent(10).unwrap().is_empty());
    }

    #[tokio::test]
    async fn record_survives_generation_failure() {
        let log = ReviewLog::in_memory().unwrap();
        let generator = ScriptedGenerator::failing();

        let result =
            generate_review(&log, &generator, &payload(&[("server_name", "Lucia")]), "fr").await;

        let response = ReviewResponse::from(result);
        assert_eq!(
            response,
            ReviewResponse::Error {
                error: "Error while generating the review.".into()
            }
        );
        assert_eq!(log.list_recent(10).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn broken_log_does_not_block_review() {
        let path = std::env::temp_dir().join(format!(
            "rd-service-{}-broken-log.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let log = ReviewLog::open(&path).unwrap();
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("DROP TABLE generated_reviews;")
            .unwrap();
        assert!(log.insert(&GeneratedReviewRecord::new("Kewan")).is_err());

        let generator = ScriptedGenerator::replying("Kewan made our evening.");
        let review = generate_review(&log, &generator, &payload(&[("server_name", "Kewan")]), "fr")
            .await
            .unwrap();

        assert_eq!(review, "Kewan made our evening.");
        assert_eq!(generator.calls().len(), 1);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_lang_uses_default() {
        let log = ReviewLog::in_memory().unwrap();
        let generator = ScriptedGenerator::replying("Très bon.");
        let payload = ReviewPayload {
            lang: None,
            tags: vec![],
        };

        generate_review(&log, &generator, &payload, "fr").await.unwrap();
        assert!(generator.calls()[0].instruction.contains("French (fr)"));
    }

    #[test]
    fn response_shapes() {
        let ok = serde_json::to_value(ReviewResponse::Review {
            review: "Nice".into(),
        })
        .unwrap();
        assert_eq!(ok, serde_json::json!({"review": "Nice"}));

        let err = serde_json::to_value(ReviewResponse::Error {
            error: "Invalid data.".into(),
        })
        .unwrap();
        assert_eq!(err, serde_json::json!({"error": "Invalid data."}));
    }
}
