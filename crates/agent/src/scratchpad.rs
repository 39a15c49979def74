//! Scratchpad construction — the transcript injected into the next prompt.
//!
//! The scratchpad is the only mechanism by which prior steps influence
//! future model calls; there is no side-channel state. It grows linearly
//! with the history — no truncation, no summarization.

use planact_core::AgentStep;

/// Serialize the ordered step history into a single text fragment.
///
/// For each step in order: the action's `log` verbatim, a newline, the
/// observation prefix, the observation text, a newline, and the llm
/// prefix. The prefixes are flavor-specific (e.g., `"Observation: "` /
/// `"Thought: "`).
pub fn build(steps: &[AgentStep], observation_prefix: &str, llm_prefix: &str) -> String {
    let mut thoughts = String::new();
    for step in steps {
        thoughts.push_str(&step.action.log);
        thoughts.push('\n');
        thoughts.push_str(observation_prefix);
        thoughts.push_str(&step.observation);
        thoughts.push('\n');
        thoughts.push_str(llm_prefix);
    }
    thoughts
}
