//! Error types for the planact domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all planact operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Model provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Output parsing errors ---
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // --- I/O (agent save paths) ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error. The error parameter can be
/// overridden for bounded-context signatures.
pub type Result<T, E = Error> = std::result::Result<T, E>;

// --- Bounded context errors ---

/// The model completion could not be parsed into a decision.
///
/// The decision loop treats these as recoverable exactly once; every
/// variant carries the completion text that failed so the retry can
/// feed it back to the model.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("could not find a tool-call stanza in model output: {text}")]
    MissingAction { text: String },

    #[error("tool-call stanza has no input payload: {text}")]
    MissingActionInput { text: String },

    #[error("model output contains both a final answer and a tool call: {text}")]
    FinishAndAction { text: String },

    #[error("invalid decision payload ({reason}): {text}")]
    InvalidDecision { reason: String, text: String },
}

impl ParseError {
    /// The verbatim completion text that failed to parse.
    pub fn text(&self) -> &str {
        match self {
            Self::MissingAction { text }
            | Self::MissingActionInput { text }
            | Self::FinishAndAction { text }
            | Self::InvalidDecision { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}
