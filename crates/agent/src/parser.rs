//! Output parser trait — turning raw model text into a structured decision.
//!
//! Parsing is the pluggable half of an agent flavor: the grammar differs
//! (ReAct stanzas vs. JSON payloads), the contract does not. Given the
//! completion text, a parser either extracts a tool call, recognizes a
//! final answer, or fails with a [`ParseError`] — which the decision loop
//! treats as a first-class recoverable condition.

use async_trait::async_trait;
use planact_core::{AgentDecision, ParseError};

/// Parse model completions into decisions.
///
/// `log` on the returned decision must always be the verbatim input text.
#[async_trait]
pub trait OutputParser: Send + Sync {
    /// Parse the completion text into a decision.
    fn parse(&self, text: &str) -> Result<AgentDecision, ParseError>;

    /// Asynchronous variant with identical semantics.
    ///
    /// The default delegates to [`parse`](Self::parse); implementors only
    /// override this when recognition itself needs to await something.
    async fn aparse(&self, text: &str) -> Result<AgentDecision, ParseError> {
        self.parse(text)
    }
}
