//! Shared test helpers for decision-loop tests.

use std::sync::Mutex;

use async_trait::async_trait;
use planact_core::error::ProviderError;
use planact_core::provider::{CompletionRequest, CompletionResponse, Provider, Usage};

/// A mock provider that returns a sequence of scripted outcomes.
///
/// Each call to `complete` consumes the next outcome in the queue and
/// records the request it was given. Panics if more calls are made than
/// outcomes provided.
pub struct SequentialMockProvider {
    outcomes: Mutex<Vec<Result<String, ProviderError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl SequentialMockProvider {
    pub fn new(outcomes: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider that returns a single successful completion.
    pub fn single_text(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// Every request seen so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let call_number = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };

        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            panic!("SequentialMockProvider: no more outcomes (call #{call_number})");
        }
        outcomes.remove(0).map(|text| CompletionResponse {
            text,
            model: "mock-model".into(),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
        })
    }
}
