//! Decision types — what the agent chose to do on one planning cycle.
//!
//! A planning cycle always yields exactly one [`AgentDecision`]: either an
//! [`AgentAction`] (call this tool with this input) or an [`AgentFinish`]
//! (terminal answer). Both carry the verbatim model text that produced
//! them in their `log` field — the scratchpad replays those fragments on
//! every subsequent cycle.

use serde::{Deserialize, Serialize};

/// The input payload for a tool call.
///
/// Tools accept heterogeneous argument shapes: ReAct-style agents emit a
/// plain string after `Action Input:`, structured flavors emit a JSON
/// object. Closed variant — there is no third shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolInput {
    /// A plain text payload.
    Text(String),
    /// A structured key/value payload.
    Structured(serde_json::Value),
}

impl ToolInput {
    /// The payload as text: verbatim for `Text`, JSON-encoded for
    /// `Structured`.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Structured(v) => v.to_string(),
        }
    }
}

impl From<&str> for ToolInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A decision to invoke a named tool with a given input.
///
/// Produced exclusively by an output parser; the loop never fabricates
/// actions itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAction {
    /// The name of the tool to invoke.
    pub tool: String,
    /// The payload to hand the tool.
    pub tool_input: ToolInput,
    /// The verbatim model output fragment that produced this action.
    pub log: String,
}

/// A terminal decision carrying the agent's final answer.
///
/// `return_values` always contains at least the `"output"` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentFinish {
    /// Output-key to value mapping handed back to the caller.
    pub return_values: serde_json::Map<String, serde_json::Value>,
    /// The verbatim model output fragment that produced this finish.
    pub log: String,
}

impl AgentFinish {
    /// Build a finish whose only return value is `"output"`.
    pub fn with_output(output: impl Into<String>, log: impl Into<String>) -> Self {
        let mut return_values = serde_json::Map::new();
        return_values.insert("output".to_string(), serde_json::Value::String(output.into()));
        Self {
            return_values,
            log: log.into(),
        }
    }

    /// The `"output"` return value, if it is a string.
    pub fn output(&self) -> Option<&str> {
        self.return_values.get("output").and_then(|v| v.as_str())
    }
}

/// The tagged union of the two possible decisions per planning cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentDecision {
    Action(AgentAction),
    Finish(AgentFinish),
}

/// One recorded (action, observation) pair.
///
/// Steps are immutable once recorded. The caller owns the history as an
/// append-only, never-reordered sequence scoped to a single query; the
/// loop only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStep {
    /// The action the agent took.
    pub action: AgentAction,
    /// The textual result of executing the action's tool.
    pub observation: String,
}

impl AgentStep {
    pub fn new(action: AgentAction, observation: impl Into<String>) -> Self {
        Self {
            action,
            observation: observation.into(),
        }
    }
}
