//! The decision loop — one planning cycle per call.
//!
//! `plan`/`aplan` build the scratchpad, assemble the full prompt inputs,
//! invoke the chain, and parse the completion into an [`AgentDecision`].
//! Any failure in the model call or the parse triggers exactly one retry
//! with an `Action: ` nudge; a second failure propagates unmodified.
//!
//! # Ownership
//!
//! An `Agent` holds only immutable configuration after construction
//! (chain, flavor, allow-list). The step history is caller-owned and
//! passed in per call, so concurrent callers must each own a private
//! history; one agent value can serve many queries, one history cannot.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use planact_core::{
    AgentDecision, AgentFinish, AgentStep, Error, PromptInputs, PromptTemplate, Provider, Result,
    ToolRegistry,
};

use crate::chain::{LlmChain, STOP_KEY};
use crate::parser::OutputParser;
use crate::parsers::{ReactOutputParser, StructuredOutputParser};
use crate::scratchpad;

/// The reserved prompt variable the scratchpad is injected under. Callers
/// must never bind it themselves; the loop always computes it.
pub const SCRATCHPAD_KEY: &str = "agent_scratchpad";

/// The fragment appended to a template that lacks the scratchpad variable.
const SCRATCHPAD_FRAGMENT: &str = "\n{agent_scratchpad}";

/// The nudge suffix/prefix used by the single-retry recovery.
const ACTION_NUDGE: &str = "Action: ";

/// The constant answer for `"force"` early stopping.
const FORCED_STOP_OUTPUT: &str = "Agent stopped due to iteration limit or time limit.";

/// The instruction appended to the scratchpad for `"generate"` early
/// stopping.
const FINAL_ANSWER_INSTRUCTION: &str =
    "\n\nI now need to return a final answer based on the previous steps:";

/// An agent flavor: the prompt-formatting prefixes plus the parser that
/// understands the matching grammar. Flavors are configuration values,
/// not agent subtypes.
pub struct AgentFlavor {
    /// Label prepended to each observation in the scratchpad
    /// (e.g., "Observation: ").
    pub observation_prefix: String,
    /// Label the model resumes from after each observation
    /// (e.g., "Thought: ").
    pub llm_prefix: String,
    /// Parser for this flavor's output grammar.
    pub parser: Box<dyn OutputParser>,
}

impl AgentFlavor {
    pub fn new(
        observation_prefix: impl Into<String>,
        llm_prefix: impl Into<String>,
        parser: Box<dyn OutputParser>,
    ) -> Self {
        Self {
            observation_prefix: observation_prefix.into(),
            llm_prefix: llm_prefix.into(),
            parser,
        }
    }

    /// ReAct-style `Thought/Action/Action Input` agents.
    pub fn react() -> Self {
        Self::new("Observation: ", "Thought: ", Box::new(ReactOutputParser))
    }

    /// Structured-call agents emitting `{"action", "action_input"}` JSON.
    pub fn structured() -> Self {
        Self::new("Observation: ", "Thought: ", Box::new(StructuredOutputParser))
    }
}

/// A serializable snapshot of an agent's configuration (the parser is
/// implied by the flavor prefixes and is not persisted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentManifest {
    pub observation_prefix: String,
    pub llm_prefix: String,
    pub model: String,
    pub temperature: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_tools: Option<Vec<String>>,
    pub prompt: PromptTemplate,
}

/// The single-action decision loop.
pub struct Agent {
    chain: LlmChain,
    flavor: AgentFlavor,
    allowed_tools: Option<Vec<String>>,
}

impl Agent {
    /// Create an agent, validating the chain's prompt template.
    ///
    /// If the template does not declare `agent_scratchpad`, the variable
    /// is appended to its variable list and a `\n{agent_scratchpad}`
    /// fragment to its body (flat template) or suffix (few-shot). The
    /// patch is idempotent — an already-patched template passes through
    /// untouched.
    pub fn new(mut chain: LlmChain, flavor: AgentFlavor) -> Self {
        if !chain.prompt().has_variable(SCRATCHPAD_KEY) {
            warn!(
                "`{SCRATCHPAD_KEY}` should be a prompt input variable; did not find it, \
                 appending it at the end"
            );
            chain.prompt_mut().ensure_variable(SCRATCHPAD_KEY, SCRATCHPAD_FRAGMENT);
        }
        Self {
            chain,
            flavor,
            allowed_tools: None,
        }
    }

    /// Construct an agent from a provider and a tool registry, snapshotting
    /// the registry's names as the allow-list.
    pub fn from_provider_and_tools(
        provider: Arc<dyn Provider>,
        tools: &ToolRegistry,
        prompt: PromptTemplate,
        model: impl Into<String>,
        flavor: AgentFlavor,
    ) -> Self {
        let chain = LlmChain::new(provider, prompt, model);
        Self::new(chain, flavor).with_allowed_tools(tools.names())
    }

    /// Restrict which tool names the caller may dispatch.
    pub fn with_allowed_tools(mut self, tools: Vec<String>) -> Self {
        self.allowed_tools = Some(tools);
        self
    }

    /// The tool-name allow-list, if any.
    pub fn allowed_tools(&self) -> Option<&[String]> {
        self.allowed_tools.as_deref()
    }

    /// The output keys every finish carries.
    pub fn return_values(&self) -> Vec<&'static str> {
        vec!["output"]
    }

    /// The prompt template (post-validation).
    pub fn prompt(&self) -> &PromptTemplate {
        self.chain.prompt()
    }

    /// The input variables the caller must bind — everything the template
    /// declares except the injected scratchpad.
    pub fn input_keys(&self) -> Vec<&str> {
        self.prompt()
            .input_variables()
            .iter()
            .map(String::as_str)
            .filter(|v| *v != SCRATCHPAD_KEY)
            .collect()
    }

    pub fn observation_prefix(&self) -> &str {
        &self.flavor.observation_prefix
    }

    pub fn llm_prefix(&self) -> &str {
        &self.flavor.llm_prefix
    }

    /// Stop sequences derived from the observation prefix, so the provider
    /// truncates the completion before the model hallucinates an
    /// observation. Both the newline and newline+tab spellings are
    /// included.
    pub fn stop_sequences(&self) -> Vec<String> {
        let trimmed = self.flavor.observation_prefix.trim_end();
        vec![format!("\n{trimmed}"), format!("\n\t{trimmed}")]
    }

    /// Serialize the step history into this flavor's scratchpad text.
    pub fn construct_scratchpad(&self, steps: &[AgentStep]) -> String {
        scratchpad::build(
            steps,
            &self.flavor.observation_prefix,
            &self.flavor.llm_prefix,
        )
    }

    /// Assemble the full prompt inputs for one cycle: caller keywords
    /// first, then the injected scratchpad and stop sequences. Injected
    /// keys win on collision.
    ///
    /// Pure helper — no model call.
    pub fn get_full_inputs(&self, steps: &[AgentStep], kwargs: &PromptInputs) -> PromptInputs {
        let mut full_inputs = kwargs.clone();
        full_inputs.insert(
            SCRATCHPAD_KEY.to_string(),
            serde_json::Value::String(self.construct_scratchpad(steps)),
        );
        full_inputs.insert(
            STOP_KEY.to_string(),
            serde_json::json!(self.stop_sequences()),
        );
        full_inputs
    }

    /// Extend the scratchpad binding with the failed completion text plus
    /// the `Action: ` nudge, for the single retry.
    fn nudge_inputs(&self, full_inputs: &mut PromptInputs, failed_output: &str) {
        let scratchpad = full_inputs
            .get(SCRATCHPAD_KEY)
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let extended = format!("{scratchpad}{failed_output}\n{ACTION_NUDGE}");
        full_inputs.insert(SCRATCHPAD_KEY.to_string(), serde_json::Value::String(extended));
    }

    /// Given the history so far, decide what to do next.
    ///
    /// One model call plus one parse; on any failure, exactly one retry
    /// with the failed output folded back into the scratchpad. A second
    /// failure propagates unmodified. Blocking — use [`aplan`](Self::aplan)
    /// inside an async runtime.
    pub fn plan(&self, steps: &[AgentStep], kwargs: &PromptInputs) -> Result<AgentDecision> {
        let mut full_inputs = self.get_full_inputs(steps, kwargs);
        debug!(steps = steps.len(), "planning cycle");

        let (failed_output, err): (String, Error) = match self.chain.predict(&full_inputs) {
            Ok(text) => match self.flavor.parser.parse(&text) {
                Ok(decision) => return Ok(decision),
                Err(e) => (text, e.into()),
            },
            Err(e) => (String::new(), e),
        };

        warn!(error = %err, "planning cycle failed, retrying once with an Action nudge");
        self.nudge_inputs(&mut full_inputs, &failed_output);

        let retry_output = self.chain.predict(&full_inputs)?;
        let decision = self
            .flavor
            .parser
            .parse(&format!("{ACTION_NUDGE}{retry_output}"))?;
        Ok(decision)
    }

    /// Asynchronous variant of [`plan`](Self::plan) with identical
    /// semantics. Suspends only while awaiting the provider.
    pub async fn aplan(&self, steps: &[AgentStep], kwargs: &PromptInputs) -> Result<AgentDecision> {
        let mut full_inputs = self.get_full_inputs(steps, kwargs);
        debug!(steps = steps.len(), "planning cycle");

        let (failed_output, err): (String, Error) = match self.chain.apredict(&full_inputs).await {
            Ok(text) => match self.flavor.parser.aparse(&text).await {
                Ok(decision) => return Ok(decision),
                Err(e) => (text, e.into()),
            },
            Err(e) => (String::new(), e),
        };

        warn!(error = %err, "planning cycle failed, retrying once with an Action nudge");
        self.nudge_inputs(&mut full_inputs, &failed_output);

        let retry_output = self.chain.apredict(&full_inputs).await?;
        let decision = self
            .flavor
            .parser
            .aparse(&format!("{ACTION_NUDGE}{retry_output}"))
            .await?;
        Ok(decision)
    }

    /// Produce a finish when the caller's iteration or time budget is
    /// exhausted.
    ///
    /// - `"force"` returns a constant answer with zero model calls.
    /// - `"generate"` makes one final model call (no retry) asking for a
    ///   final answer now; if the completion parses as a finish it is
    ///   returned, otherwise the raw completion is wrapped verbatim so the
    ///   model's effort is never discarded.
    ///
    /// Any other method is a configuration error.
    pub fn return_stopped_response(
        &self,
        early_stopping_method: &str,
        steps: &[AgentStep],
        kwargs: &PromptInputs,
    ) -> Result<AgentFinish> {
        match early_stopping_method {
            "force" => Ok(AgentFinish::with_output(FORCED_STOP_OUTPUT, "")),
            "generate" => {
                let mut thoughts = self.construct_scratchpad(steps);
                thoughts.push_str(FINAL_ANSWER_INSTRUCTION);

                let mut full_inputs = kwargs.clone();
                full_inputs.insert(SCRATCHPAD_KEY.to_string(), serde_json::Value::String(thoughts));
                full_inputs.insert(
                    STOP_KEY.to_string(),
                    serde_json::json!(self.stop_sequences()),
                );

                let full_output = self.chain.predict(&full_inputs)?;
                match self.flavor.parser.parse(&full_output) {
                    Ok(AgentDecision::Finish(finish)) => Ok(finish),
                    // Not a finish (an action or unparseable) — hand the
                    // raw completion back rather than discarding it.
                    _ => Ok(AgentFinish::with_output(full_output.clone(), full_output)),
                }
            }
            other => Err(Error::Config {
                message: format!(
                    "early_stopping_method should be one of `force` or `generate`, got {other}"
                ),
            }),
        }
    }

    /// A serializable snapshot of this agent's configuration.
    pub fn manifest(&self) -> AgentManifest {
        AgentManifest {
            observation_prefix: self.flavor.observation_prefix.clone(),
            llm_prefix: self.flavor.llm_prefix.clone(),
            model: self.chain.model().to_string(),
            temperature: self.chain.temperature(),
            max_tokens: self.chain.max_tokens(),
            allowed_tools: self.allowed_tools.clone(),
            prompt: self.chain.prompt().clone(),
        }
    }

    /// Save the agent's configuration to `path`, dispatching on the file
    /// extension: `.json` for the structured-record form, `.yaml`/`.yml`
    /// for the human-readable mapping form. Parent directories are
    /// created as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let manifest = self.manifest();
        let contents = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::to_string_pretty(&manifest)?,
            Some("yaml") | Some("yml") => serde_yaml::to_string(&manifest)?,
            _ => {
                return Err(Error::Config {
                    message: format!("{} must be json or yaml", path.display()),
                });
            }
        };
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::SequentialMockProvider;
    use planact_core::error::{ParseError, ProviderError};
    use planact_core::{AgentAction, ToolInput};

    fn tool_prompt() -> PromptTemplate {
        PromptTemplate::completion(
            "{input}\n{agent_scratchpad}",
            vec!["input".into(), SCRATCHPAD_KEY.into()],
        )
    }

    fn kwargs(input: &str) -> PromptInputs {
        let mut map = PromptInputs::new();
        map.insert("input".into(), serde_json::Value::String(input.into()));
        map
    }

    fn react_agent(outcomes: Vec<Result<String, ProviderError>>) -> (Agent, Arc<SequentialMockProvider>) {
        let provider = Arc::new(SequentialMockProvider::new(outcomes));
        let chain = LlmChain::new(provider.clone(), tool_prompt(), "mock-model");
        (Agent::new(chain, AgentFlavor::react()), provider)
    }

    fn step(log: &str, observation: &str) -> AgentStep {
        AgentStep::new(
            AgentAction {
                tool: "search".into(),
                tool_input: ToolInput::Text("q".into()),
                log: log.into(),
            },
            observation,
        )
    }

    // ── Construction-time validation ──

    #[test]
    fn missing_scratchpad_variable_is_patched() {
        let provider = Arc::new(SequentialMockProvider::new(vec![]));
        let prompt = PromptTemplate::completion("Answer {input}", vec!["input".into()]);
        let agent = Agent::new(
            LlmChain::new(provider, prompt, "mock-model"),
            AgentFlavor::react(),
        );

        assert!(agent.prompt().has_variable(SCRATCHPAD_KEY));
        let PromptTemplate::Completion { template, .. } = agent.prompt() else {
            panic!("shape changed");
        };
        assert_eq!(template, "Answer {input}\n{agent_scratchpad}");
        assert_eq!(agent.input_keys(), vec!["input"]);
    }

    #[test]
    fn patching_is_idempotent_across_revalidation() {
        let provider = Arc::new(SequentialMockProvider::new(vec![]));
        let prompt = PromptTemplate::completion("Answer {input}", vec!["input".into()]);
        let agent = Agent::new(
            LlmChain::new(provider, prompt, "mock-model"),
            AgentFlavor::react(),
        );

        // Rebuild an agent from the already-patched template.
        let provider2 = Arc::new(SequentialMockProvider::new(vec![]));
        let agent2 = Agent::new(
            LlmChain::new(provider2, agent.prompt().clone(), "mock-model"),
            AgentFlavor::react(),
        );

        let PromptTemplate::Completion { template, input_variables } = agent2.prompt() else {
            panic!("shape changed");
        };
        assert_eq!(template.matches("{agent_scratchpad}").count(), 1);
        assert_eq!(
            input_variables.iter().filter(|v| *v == SCRATCHPAD_KEY).count(),
            1
        );
    }

    #[test]
    fn few_shot_template_is_patched_in_suffix() {
        let provider = Arc::new(SequentialMockProvider::new(vec![]));
        let prompt = PromptTemplate::few_shot(
            "You answer questions.",
            vec!["Q: a\nA: b".into()],
            "Q: {input}",
            vec!["input".into()],
        );
        let agent = Agent::new(
            LlmChain::new(provider, prompt, "mock-model"),
            AgentFlavor::react(),
        );

        let PromptTemplate::FewShot { suffix, .. } = agent.prompt() else {
            panic!("shape changed");
        };
        assert_eq!(suffix, "Q: {input}\n{agent_scratchpad}");
    }

    // ── Input assembly ──

    #[test]
    fn get_full_inputs_injects_scratchpad_and_stop() {
        let (agent, _) = react_agent(vec![]);
        let steps = vec![step("Action: search\nAction Input: q", "found it")];

        let full = agent.get_full_inputs(&steps, &kwargs("question"));
        let pad = full.get(SCRATCHPAD_KEY).unwrap().as_str().unwrap();
        assert!(pad.contains("Action: search"));
        assert!(pad.contains("Observation: found it"));
        assert_eq!(
            full.get("stop").unwrap(),
            &serde_json::json!(["\nObservation:", "\n\tObservation:"])
        );
    }

    #[test]
    fn injected_scratchpad_wins_over_caller_binding() {
        let (agent, _) = react_agent(vec![]);
        let mut callers = kwargs("question");
        callers.insert(
            SCRATCHPAD_KEY.into(),
            serde_json::Value::String("caller junk".into()),
        );

        let full = agent.get_full_inputs(&[], &callers);
        assert_eq!(full.get(SCRATCHPAD_KEY).unwrap().as_str().unwrap(), "");
    }

    // ── Planning ──

    #[test]
    fn plan_parses_a_tool_call() {
        let text = "Thought: look it up\nAction: search\nAction Input: rust agents";
        let (agent, provider) = react_agent(vec![Ok(text.into())]);

        let decision = agent.plan(&[], &kwargs("find rust agents")).unwrap();
        let AgentDecision::Action(action) = decision else {
            panic!("expected action");
        };
        assert_eq!(action.tool, "search");
        assert_eq!(action.tool_input, ToolInput::Text("rust agents".into()));
        assert_eq!(action.log, text);

        // Stop sequences ride along on the request.
        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].stop,
            vec!["\nObservation:".to_string(), "\n\tObservation:".to_string()]
        );
    }

    #[tokio::test]
    async fn aplan_parses_a_final_answer() {
        let (agent, provider) =
            react_agent(vec![Ok("Thought: done\nFinal Answer: the 9:02 ICE".into())]);

        let decision = agent.aplan(&[], &kwargs("how do I get there?")).await.unwrap();
        let AgentDecision::Finish(finish) = decision else {
            panic!("expected finish");
        };
        assert_eq!(finish.output(), Some("the 9:02 ICE"));
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn history_is_rendered_into_the_prompt() {
        let (agent, provider) =
            react_agent(vec![Ok("Final Answer: done".into())]);
        let steps = vec![step("Thought: x\nAction: search\nAction Input: q", "result A")];

        agent.plan(&steps, &kwargs("question")).unwrap();

        let prompt = provider.requests()[0].prompt.clone();
        assert!(prompt.contains("Thought: x\nAction: search\nAction Input: q"));
        assert!(prompt.contains("Observation: result A"));
        assert!(prompt.ends_with("Thought: "));
    }

    // ── Recovery ──

    #[test]
    fn parse_failure_retries_with_failed_output_and_nudge() {
        let (agent, provider) = react_agent(vec![
            Ok("garbled nonsense".into()),
            Ok("search\nAction Input: q".into()),
        ]);

        let decision = agent.plan(&[], &kwargs("question")).unwrap();
        let AgentDecision::Action(action) = decision else {
            panic!("expected action");
        };
        assert_eq!(action.tool, "search");
        // The retry completion is re-parsed with the literal prefix.
        assert_eq!(action.log, "Action: search\nAction Input: q");

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].prompt,
            format!("{}garbled nonsense\nAction: ", requests[0].prompt)
        );
    }

    #[tokio::test]
    async fn model_failure_retries_with_empty_failed_output() {
        let (agent, provider) = react_agent(vec![
            Err(ProviderError::Network("connection reset".into())),
            Ok("search\nAction Input: q".into()),
        ]);

        let decision = agent.aplan(&[], &kwargs("question")).await.unwrap();
        assert!(matches!(decision, AgentDecision::Action(_)));

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].prompt,
            format!("{}\nAction: ", requests[0].prompt)
        );
    }

    #[test]
    fn second_model_failure_propagates_unmodified() {
        let (agent, provider) = react_agent(vec![
            Err(ProviderError::Timeout("first".into())),
            Err(ProviderError::Network("second failure".into())),
        ]);

        let err = agent.plan(&[], &kwargs("question")).unwrap_err();
        let Error::Provider(ProviderError::Network(msg)) = err else {
            panic!("expected the second provider error, got {err}");
        };
        assert_eq!(msg, "second failure");
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn second_parse_failure_propagates() {
        let (agent, provider) = react_agent(vec![
            Ok("junk".into()),
            Ok("still junk".into()),
        ]);

        let err = agent.plan(&[], &kwargs("question")).unwrap_err();
        // Retry text "Action: still junk" has a stanza but no input.
        assert!(matches!(
            err,
            Error::Parse(ParseError::MissingActionInput { .. })
        ));
        assert_eq!(provider.call_count(), 2);
    }

    // ── Stopping responses ──

    #[test]
    fn force_stop_returns_constant_with_zero_model_calls() {
        let (agent, provider) = react_agent(vec![]);
        let steps = vec![step("Action: search\nAction Input: q", "obs")];

        let finish = agent
            .return_stopped_response("force", &steps, &kwargs("question"))
            .unwrap();
        assert_eq!(
            finish.output(),
            Some("Agent stopped due to iteration limit or time limit.")
        );
        assert_eq!(finish.log, "");
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn generate_stop_returns_parsed_finish() {
        let (agent, provider) =
            react_agent(vec![Ok("Thought: wrapping up\nFinal Answer: 42".into())]);
        let steps = vec![step("Action: search\nAction Input: q", "obs")];

        let finish = agent
            .return_stopped_response("generate", &steps, &kwargs("question"))
            .unwrap();
        assert_eq!(finish.output(), Some("42"));

        let prompt = provider.requests()[0].prompt.clone();
        assert!(prompt.contains("I now need to return a final answer based on the previous steps:"));
        assert!(prompt.contains("Observation: obs"));
    }

    #[test]
    fn generate_stop_wraps_non_finish_output_verbatim() {
        let (agent, _) = react_agent(vec![Ok("rambling that matches no grammar".into())]);

        let finish = agent
            .return_stopped_response("generate", &[], &kwargs("question"))
            .unwrap();
        assert_eq!(finish.output(), Some("rambling that matches no grammar"));
        assert_eq!(finish.log, "rambling that matches no grammar");
    }

    #[test]
    fn generate_stop_wraps_action_output_verbatim() {
        let text = "Action: search\nAction Input: one more";
        let (agent, _) = react_agent(vec![Ok(text.into())]);

        let finish = agent
            .return_stopped_response("generate", &[], &kwargs("question"))
            .unwrap();
        assert_eq!(finish.output(), Some(text));
    }

    #[test]
    fn unknown_stopping_method_is_a_config_error() {
        let (agent, provider) = react_agent(vec![]);

        let err = agent
            .return_stopped_response("bogus", &[], &kwargs("question"))
            .unwrap_err();
        let Error::Config { message } = err else {
            panic!("expected config error");
        };
        assert!(message.contains("bogus"));
        assert_eq!(provider.call_count(), 0);
    }

    // ── Construction helpers and persistence ──

    #[test]
    fn from_provider_and_tools_snapshots_the_allow_list() {
        use async_trait::async_trait;
        use planact_core::error::ToolError;
        use planact_core::tool::{Tool, ToolResult};

        struct EchoTool;

        #[async_trait]
        impl Tool for EchoTool {
            fn name(&self) -> &str {
                "echo"
            }
            fn description(&self) -> &str {
                "Echoes back the input"
            }
            async fn execute(
                &self,
                input: ToolInput,
            ) -> std::result::Result<ToolResult, ToolError> {
                Ok(ToolResult {
                    success: true,
                    output: input.as_text(),
                })
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let provider = Arc::new(SequentialMockProvider::new(vec![]));
        let agent = Agent::from_provider_and_tools(
            provider,
            &registry,
            tool_prompt(),
            "mock-model",
            AgentFlavor::react(),
        );

        assert_eq!(agent.allowed_tools(), Some(&["echo".to_string()][..]));
    }

    #[test]
    fn save_dispatches_on_extension() {
        let (agent, _) = react_agent(vec![]);
        let agent = agent.with_allowed_tools(vec!["search".into()]);
        let dir = tempfile::tempdir().unwrap();

        // json, in a directory that does not exist yet
        let json_path = dir.path().join("agents/main.json");
        agent.save(&json_path).unwrap();
        let manifest: AgentManifest =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(manifest.model, "mock-model");
        assert_eq!(manifest.observation_prefix, "Observation: ");
        assert_eq!(manifest.allowed_tools, Some(vec!["search".to_string()]));

        // yaml
        let yaml_path = dir.path().join("main.yaml");
        agent.save(&yaml_path).unwrap();
        let yaml = fs::read_to_string(&yaml_path).unwrap();
        assert!(yaml.contains("llm_prefix"));

        // anything else is refused
        let err = agent.save(dir.path().join("main.txt")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
