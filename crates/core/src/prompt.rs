//! Prompt templates — the variable-bearing text the chain renders per cycle.
//!
//! Two shapes exist: a flat completion template and a few-shot template
//! (prefix, worked examples, suffix). Both declare an explicit list of
//! input variables and substitute `{name}` placeholders at render time.
//! The agent extends a template at construction time when the scratchpad
//! variable is missing, so the shape enum exposes a mutable seam for that.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-cycle variable bindings handed to the chain.
///
/// Values are JSON so heterogeneous bindings (scratchpad text, stop-string
/// lists, caller keywords) share one map. Inserting an existing key
/// overwrites it — last write wins.
pub type PromptInputs = serde_json::Map<String, serde_json::Value>;

/// A prompt template with declared input variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PromptTemplate {
    /// A single flat template body.
    Completion {
        template: String,
        input_variables: Vec<String>,
    },
    /// Prefix + worked examples + suffix, joined by a separator.
    FewShot {
        prefix: String,
        examples: Vec<String>,
        example_separator: String,
        suffix: String,
        input_variables: Vec<String>,
    },
}

impl PromptTemplate {
    /// Build a flat template.
    pub fn completion(template: impl Into<String>, input_variables: Vec<String>) -> Self {
        Self::Completion {
            template: template.into(),
            input_variables,
        }
    }

    /// Build a few-shot template with the conventional blank-line separator.
    pub fn few_shot(
        prefix: impl Into<String>,
        examples: Vec<String>,
        suffix: impl Into<String>,
        input_variables: Vec<String>,
    ) -> Self {
        Self::FewShot {
            prefix: prefix.into(),
            examples,
            example_separator: "\n\n".to_string(),
            suffix: suffix.into(),
            input_variables,
        }
    }

    /// The declared input variables, in declaration order.
    pub fn input_variables(&self) -> &[String] {
        match self {
            Self::Completion { input_variables, .. } => input_variables,
            Self::FewShot { input_variables, .. } => input_variables,
        }
    }

    /// Whether `name` is among the declared input variables.
    pub fn has_variable(&self, name: &str) -> bool {
        self.input_variables().iter().any(|v| v == name)
    }

    /// Declare `name` and append `fragment` to the template body (flat) or
    /// suffix (few-shot). No-op when the variable is already declared, so
    /// re-validating an already-patched template never duplicates the
    /// injection point.
    pub fn ensure_variable(&mut self, name: &str, fragment: &str) {
        if self.has_variable(name) {
            return;
        }
        match self {
            Self::Completion {
                template,
                input_variables,
            } => {
                input_variables.push(name.to_string());
                template.push_str(fragment);
            }
            Self::FewShot {
                suffix,
                input_variables,
                ..
            } => {
                input_variables.push(name.to_string());
                suffix.push_str(fragment);
            }
        }
    }

    /// Render the template with the given bindings.
    ///
    /// Single pass over the template text: each declared `{name}`
    /// placeholder must have a binding and is replaced with it; bound
    /// values are emitted as-is and never re-scanned, so a value that
    /// happens to contain another variable's placeholder renders
    /// verbatim. Undeclared braces pass through untouched. String values
    /// render verbatim, everything else renders as its JSON form.
    pub fn format(&self, inputs: &PromptInputs) -> Result<String> {
        let template = match self {
            Self::Completion { template, .. } => template.clone(),
            Self::FewShot {
                prefix,
                examples,
                example_separator,
                suffix,
                ..
            } => {
                let mut pieces = Vec::with_capacity(examples.len() + 2);
                pieces.push(prefix.as_str());
                pieces.extend(examples.iter().map(String::as_str));
                pieces.push(suffix.as_str());
                pieces.join(example_separator)
            }
        };

        let mut rendered = String::with_capacity(template.len());
        let mut rest = template.as_str();
        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                // unterminated brace, emit the tail verbatim
                rest = &rest[open..];
                break;
            };
            let name = &after[..close];
            if self.has_variable(name) {
                let value = inputs.get(name).ok_or_else(|| Error::Config {
                    message: format!("missing prompt input variable `{name}`"),
                })?;
                match value {
                    serde_json::Value::String(s) => rendered.push_str(s),
                    other => rendered.push_str(&other.to_string()),
                }
            } else {
                rendered.push_str(&rest[open..=open + close + 1]);
            }
            rest = &after[close + 1..];
        }
        rendered.push_str(rest);

        Ok(rendered)
    }
}
