//! The model invocation chain — prompt template + provider, called once
//! per planning cycle.
//!
//! The chain renders the template with the per-cycle bindings, lifts the
//! reserved `stop` binding into the request's stop sequences, and hands
//! the rest to the provider. It exposes both an asynchronous call and a
//! blocking one with identical semantics.

use std::sync::Arc;

use tracing::debug;

use planact_core::{CompletionRequest, PromptInputs, PromptTemplate, Provider, Result};

/// The reserved binding carrying stop sequences, consumed by the chain
/// rather than rendered into the prompt.
pub(crate) const STOP_KEY: &str = "stop";

/// A prompt template bound to a provider and model parameters.
pub struct LlmChain {
    provider: Arc<dyn Provider>,
    prompt: PromptTemplate,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl LlmChain {
    /// Create a new chain.
    pub fn new(provider: Arc<dyn Provider>, prompt: PromptTemplate, model: impl Into<String>) -> Self {
        Self {
            provider,
            prompt,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the max tokens per completion.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// The prompt template this chain renders.
    pub fn prompt(&self) -> &PromptTemplate {
        &self.prompt
    }

    /// The model this chain requests.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The sampling temperature.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// The max tokens per completion, if capped.
    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    /// Mutable access to the template — the agent extends it at
    /// construction time when the scratchpad variable is missing.
    pub fn prompt_mut(&mut self) -> &mut PromptTemplate {
        &mut self.prompt
    }

    /// Render the prompt with `inputs` and return the model's completion
    /// text.
    pub async fn apredict(&self, inputs: &PromptInputs) -> Result<String> {
        let mut bindings = inputs.clone();
        let stop = match bindings.remove(STOP_KEY) {
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(serde_json::Value::String(s)) => vec![s],
            _ => vec![],
        };

        let prompt = self.prompt.format(&bindings)?;
        debug!(model = %self.model, prompt_chars = prompt.len(), "invoking provider");

        let request = CompletionRequest {
            model: self.model.clone(),
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stop,
        };
        let response = self.provider.complete(request).await?;
        Ok(response.text)
    }

    /// Blocking variant of [`apredict`](Self::apredict).
    ///
    /// Drives the provider future on the current thread. Must not be
    /// called from inside an async runtime — use `apredict` there.
    pub fn predict(&self, inputs: &PromptInputs) -> Result<String> {
        futures::executor::block_on(self.apredict(inputs))
    }
}
