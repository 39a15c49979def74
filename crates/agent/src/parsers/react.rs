//! ReAct-style output grammar.
//!
//! Expected completion shapes:
//!
//! ```text
//! Thought: I should look this up
//! Action: route_finder
//! Action Input: Berlin to Hamburg
//! ```
//!
//! or, terminally:
//!
//! ```text
//! Thought: I know the answer
//! Final Answer: take the 9:02 ICE
//! ```

use std::sync::LazyLock;

use regex_lite::Regex;

use planact_core::{AgentAction, AgentDecision, AgentFinish, ParseError, ToolInput};

use crate::parser::OutputParser;

const FINAL_ANSWER_MARKER: &str = "Final Answer:";

static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action\s*\d*\s*:\s*(.*?)\s*Action\s*Input\s*\d*\s*:\s*(.*)")
        .expect("react action regex")
});

static ACTION_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*Action\s*\d*\s*:").expect("react action-only regex"));

/// Parser for the `Thought/Action/Action Input` + `Final Answer` grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactOutputParser;

impl OutputParser for ReactOutputParser {
    fn parse(&self, text: &str) -> Result<AgentDecision, ParseError> {
        let includes_answer = text.contains(FINAL_ANSWER_MARKER);

        if let Some(caps) = ACTION_RE.captures(text) {
            if includes_answer {
                return Err(ParseError::FinishAndAction { text: text.into() });
            }
            let tool = caps[1].trim().trim_matches('"').to_string();
            let input = caps[2].trim().trim_matches('"').to_string();
            return Ok(AgentDecision::Action(AgentAction {
                tool,
                tool_input: ToolInput::Text(input),
                log: text.to_string(),
            }));
        }

        if includes_answer {
            let answer = text
                .rsplit(FINAL_ANSWER_MARKER)
                .next()
                .unwrap_or_default()
                .trim();
            return Ok(AgentDecision::Finish(AgentFinish::with_output(answer, text)));
        }

        if ACTION_ONLY_RE.is_match(text) {
            Err(ParseError::MissingActionInput { text: text.into() })
        } else {
            Err(ParseError::MissingAction { text: text.into() })
        }
    }
}
