//! Scripted `TextGenerator` for tests in downstream crates.
//!
//! Enabled with the `testing` feature.

use crate::generator::{GenerationRequest, GeneratorError, TextGenerator};
use std::sync::Mutex;

/// Generator that returns a fixed reply and remembers every request.
pub struct ScriptedGenerator {
    reply: Option<String>,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails as if the provider were unreachable.
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }
        self.reply
            .clone()
            .ok_or_else(|| GeneratorError::Request("connection refused".into()))
    }
}
