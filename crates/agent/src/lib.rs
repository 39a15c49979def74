//! # planact agent
//!
//! The single-action decision loop:
//!
//! 1. Serialize the (action, observation) history into a scratchpad
//! 2. Assemble the full prompt inputs (caller keywords + scratchpad + stop sequences)
//! 3. Invoke the model through the chain
//! 4. Parse the completion into a tool call or a final answer
//! 5. On any failure, retry exactly once with an `Action: ` nudge
//!
//! The loop never executes tools and never enforces budgets — the caller
//! dispatches the returned [`planact_core::AgentAction`], appends the
//! observation to its own history, and calls
//! [`Agent::return_stopped_response`] when its iteration or wall-clock
//! budget runs out.

pub mod agent;
pub mod chain;
pub mod parser;
pub mod parsers;
pub mod scratchpad;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use agent::{Agent, AgentFlavor, AgentManifest, SCRATCHPAD_KEY};
pub use chain::LlmChain;
pub use parser::OutputParser;
pub use parsers::{ReactOutputParser, StructuredOutputParser};
