//! Provider trait — the abstraction over LLM backends.
//!
//! A Provider knows how to send a fully-rendered prompt to a model and get
//! the raw completion text back. The decision loop never talks to a
//! backend directly; it goes through the chain, which goes through this
//! trait — pure polymorphism, trivially mockable in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Configuration for a completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "gpt-4o-mini").
    pub model: String,

    /// The fully-rendered prompt text.
    pub prompt: String,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Stop sequences — the backend truncates the completion before any of
    /// these strings appears in the output.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

fn default_temperature() -> f32 {
    0.7
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The raw completion text.
    pub text: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// Every model backend implements this trait. The chain calls `complete()`
/// without knowing which provider is behind it.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai", "local").
    fn name(&self) -> &str;

    /// Send a request and get the completion back.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_request_defaults() {
        let req = CompletionRequest {
            model: "gpt-4o-mini".into(),
            prompt: "hello".into(),
            temperature: default_temperature(),
            max_tokens: None,
            stop: vec![],
        };
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert!(req.stop.is_empty());
    }

    #[test]
    fn stop_sequences_serialize_when_present() {
        let req = CompletionRequest {
            model: "m".into(),
            prompt: "p".into(),
            temperature: 0.0,
            max_tokens: Some(256),
            stop: vec!["\nObservation:".into(), "\n\tObservation:".into()],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("stop"));
        assert!(json.contains("max_tokens"));
    }
}
