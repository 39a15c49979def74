//! Structured (JSON) output grammar.
//!
//! Expected completion shape, optionally inside a markdown code fence:
//!
//! ```text
//! {"action": "route_finder", "action_input": {"from": "Berlin", "to": "Hamburg"}}
//! ```
//!
//! The reserved action name `"Final Answer"` terminates the loop.

use planact_core::{AgentAction, AgentDecision, AgentFinish, ParseError, ToolInput};

use crate::parser::OutputParser;

const FINAL_ANSWER_ACTION: &str = "Final Answer";

/// Parser for `{"action": ..., "action_input": ...}` payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredOutputParser;

/// Strip a surrounding markdown code fence, if any.
fn strip_fences(text: &str) -> &str {
    let body = if text.contains("```json") {
        text.split("```json").nth(1).and_then(|s| s.split("```").next())
    } else if text.contains("```") {
        text.split("```").nth(1)
    } else {
        None
    };
    body.map(str::trim).unwrap_or_else(|| text.trim())
}

impl OutputParser for StructuredOutputParser {
    fn parse(&self, text: &str) -> Result<AgentDecision, ParseError> {
        let payload = strip_fences(text);

        let value: serde_json::Value =
            serde_json::from_str(payload).map_err(|e| ParseError::InvalidDecision {
                reason: e.to_string(),
                text: text.to_string(),
            })?;

        let action = value
            .get("action")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ParseError::InvalidDecision {
                reason: "missing string `action` key".into(),
                text: text.to_string(),
            })?
            .to_string();

        let input = value
            .get("action_input")
            .cloned()
            .unwrap_or(serde_json::Value::String(String::new()));

        if action == FINAL_ANSWER_ACTION {
            let output = match input {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            return Ok(AgentDecision::Finish(AgentFinish::with_output(output, text)));
        }

        let tool_input = match input {
            serde_json::Value::String(s) => ToolInput::Text(s),
            other => ToolInput::Structured(other),
        };

        Ok(AgentDecision::Action(AgentAction {
            tool: action,
            tool_input,
            log: text.to_string(),
        }))
    }
}
