//! Text generation — the one non-deterministic collaborator.
//!
//! `TextGenerator` is the seam every caller depends on; `LlmClient` is the
//! HTTP-backed implementation that talks to OpenAI, a local Ollama server or
//! AWS Bedrock depending on what the environment provides.

use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator request failed: {0}")]
    Request(String),
    #[error("generator API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },
    #[error("generator response could not be parsed: {0}")]
    Malformed(String),
    #[error("generator returned an empty response")]
    Empty,
}

// ============================================================
// Request types
// ============================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: i32,
}

impl SamplingParams {
    /// Review synthesis: varied wording, short output.
    pub fn creative() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: 150,
        }
    }

    /// Translation: near-deterministic, structured output.
    pub fn precise() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System-level instruction.
    pub instruction: String,
    /// User-level content the instruction applies to.
    pub context: String,
    pub params: SamplingParams,
}

/// Anything that can turn an instruction/context pair into text.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, GeneratorError>> + Send;
}

// ============================================================
// Provider selection
// ============================================================

#[derive(Debug, Clone)]
pub enum LlmProvider {
    BedrockApiKey { api_key: String, region: String },
    OpenAI { api_key: String },
    Local { endpoint: String },
}

impl LlmProvider {
    /// Pick a provider from environment variables, defaulting to local Ollama.
    pub fn from_env() -> Self {
        if let Ok(api_key) = std::env::var("AWS_BEARER_TOKEN_BEDROCK") {
            let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into());
            return Self::BedrockApiKey { api_key, region };
        }

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            return Self::OpenAI { api_key };
        }

        if let Ok(endpoint) = std::env::var("LOCAL_LLM_ENDPOINT") {
            return Self::Local { endpoint };
        }

        Self::Local {
            endpoint: "http://localhost:11434".into(),
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::BedrockApiKey { .. } => "anthropic.claude-3-5-sonnet-20240620-v1:0",
            Self::OpenAI { .. } => "gpt-4o-mini",
            Self::Local { .. } => "llama3.2",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BedrockApiKey { .. } => "bedrock",
            Self::OpenAI { .. } => "openai",
            Self::Local { .. } => "local",
        }
    }
}

// ============================================================
// HTTP client
// ============================================================

/// `TextGenerator` backed by a hosted or local LLM endpoint.
#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: LlmProvider,
    model_id: String,
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new(provider: LlmProvider, model_id: Option<String>) -> Self {
        let model_id = model_id.unwrap_or_else(|| provider.default_model().to_string());
        Self {
            provider,
            model_id,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(LlmProvider::from_env(), None)
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn call_bedrock_bearer(
        &self,
        api_key: &str,
        region: &str,
        request: &GenerationRequest,
    ) -> Result<String, GeneratorError> {
        let url = format!(
            "https://bedrock-runtime.{}.amazonaws.com/model/{}/invoke",
            region,
            urlencoding::encode(&self.model_id)
        );

        let body = serde_json::json!({
            "anthropic_version": "bedrock-2023-05-31",
            "max_tokens": request.params.max_tokens,
            "temperature": request.params.temperature,
            "system": request.instruction,
            "messages": [{"role": "user", "content": request.context}]
        });

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::Request(e.to_string()))?;

        let result = read_json(response).await?;
        Ok(result["content"][0]["text"].as_str().unwrap_or("").to_string())
    }

    async fn call_openai(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<String, GeneratorError> {
        let body = serde_json::json!({
            "model": self.model_id,
            "messages": [
                {"role": "system", "content": request.instruction},
                {"role": "user", "content": request.context}
            ],
            "max_tokens": request.params.max_tokens,
            "temperature": request.params.temperature
        });

        let response = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::Request(e.to_string()))?;

        let result = read_json(response).await?;
        Ok(result["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }

    async fn call_local(
        &self,
        endpoint: &str,
        request: &GenerationRequest,
    ) -> Result<String, GeneratorError> {
        let url = format!("{}/api/generate", endpoint.trim_end_matches('/'));

        let body = serde_json::json!({
            "model": self.model_id,
            "prompt": request.context,
            "system": request.instruction,
            "stream": false,
            "options": {
                "num_predict": request.params.max_tokens,
                "temperature": request.params.temperature
            }
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::Request(e.to_string()))?;

        let result = read_json(response).await?;
        Ok(result["response"].as_str().unwrap_or("").to_string())
    }
}

async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, GeneratorError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GeneratorError::Api {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| GeneratorError::Malformed(e.to_string()))
}

impl TextGenerator for LlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        let text = match &self.provider {
            LlmProvider::BedrockApiKey { api_key, region } => {
                self.call_bedrock_bearer(api_key, region, request).await?
            }
            LlmProvider::OpenAI { api_key } => self.call_openai(api_key, request).await?,
            LlmProvider::Local { endpoint } => self.call_local(endpoint, request).await?,
        };

        tracing::debug!(
            provider = self.provider.name(),
            "LLM response: {}",
            crate::response::truncate(&text, 500)
        );

        let text = text.trim();
        if text.is_empty() {
            return Err(GeneratorError::Empty);
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_presets() {
        assert!(SamplingParams::creative().temperature > SamplingParams::precise().temperature);
        assert_eq!(SamplingParams::creative().max_tokens, 150);
    }

    #[test]
    fn explicit_model_overrides_default() {
        let client = LlmClient::new(
            LlmProvider::Local {
                endpoint: "http://localhost:11434".into(),
            },
            Some("mistral".into()),
        );
        assert_eq!(client.model_id(), "mistral");

        let client = LlmClient::new(
            LlmProvider::OpenAI {
                api_key: "sk-test".into(),
            },
            None,
        );
        assert_eq!(client.model_id(), "gpt-4o-mini");
        assert_eq!(client.provider().name(), "openai");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_request_error() {
        let client = LlmClient::new(
            LlmProvider::Local {
                endpoint: "http://127.0.0.1:9".into(),
            },
            None,
        );
        let request = GenerationRequest {
            instruction: "Say hi".into(),
            context: String::new(),
            params: SamplingParams::precise(),
        };
        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(err, GeneratorError::Request(_)));
    }
}
