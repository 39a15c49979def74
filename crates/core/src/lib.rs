//! # planact core
//!
//! Domain types, traits, and error definitions for the planact agent
//! decision loop. This crate has **zero framework dependencies** — it
//! defines the domain model that the agent crate implements against.
//!
//! ## Design Philosophy
//!
//! Every collaborator the decision loop talks to is defined as a trait
//! here (model provider, tools). Implementations live with the caller.
//! This enables:
//! - Swapping model backends via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (everything depends inward on core)

pub mod decision;
pub mod error;
pub mod prompt;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use decision::{AgentAction, AgentDecision, AgentFinish, AgentStep, ToolInput};
pub use error::{Error, ParseError, ProviderError, Result, ToolError};
pub use prompt::{PromptInputs, PromptTemplate};
pub use provider::{CompletionRequest, CompletionResponse, Provider, Usage};
pub use tool::{Tool, ToolRegistry, ToolResult};
