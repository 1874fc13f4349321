//! Plan → Execute → Aggregate → Reflect loop.
//!
//! ```text
//! Plan ─▶ Execute ─▶ Aggregate ─▶ Reflect ─┬─▶ Execute   (plan not empty)
//!                                          └─▶ Answer ─▶ Done
//! ```
//!
//! Every stage takes the [`AgentState`] by value and returns the next one,
//! so the loop in [`PlanExecuteAgent::run`] is just "call the stage, follow
//! the transition". Stages never fail: a reasoning call that errors is
//! logged and treated as an empty reply, and each stage has a fallback for
//! that.

use std::sync::Arc;
use studyagent_config::AgentConfig;
use studyagent_core::evidence::Evidence;
use studyagent_core::provider::{Provider, ProviderRequest};
use studyagent_core::step::{Step, format_plan};
use studyagent_tools::ToolGateway;
use tracing::{debug, info, warn};

use crate::prompts::{self, Verdict};
use crate::state::AgentState;

/// Where the machine goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Plan,
    Execute,
    Aggregate,
    Reflect,
    Answer,
    Done,
}

pub struct PlanExecuteAgent {
    provider: Arc<dyn Provider>,
    model: String,
    gateway: Arc<ToolGateway>,
    config: AgentConfig,
}

impl PlanExecuteAgent {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, gateway: Arc<ToolGateway>) -> Self {
        Self {
            provider,
            model: model.into(),
            gateway,
            config: AgentConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Answer `question`, returning the final state.
    pub async fn run(&self, question: &str) -> AgentState {
        info!(question, "Received question");
        let mut state = AgentState::new(question);
        let mut stage = Stage::Plan;

        while stage != Stage::Done {
            (state, stage) = self.advance(stage, state).await;
        }

        info!(
            iterations = state.iterations,
            evidence = state.evidence().len(),
            limit_reached = state.iteration_limit_reached,
            "Agent finished"
        );
        state
    }

    /// Run one stage and return the resulting state with the next stage.
    pub async fn advance(&self, stage: Stage, state: AgentState) -> (AgentState, Stage) {
        match stage {
            Stage::Plan => (self.plan(state).await, Stage::Execute),
            Stage::Execute => (self.execute(state).await, Stage::Aggregate),
            Stage::Aggregate => (self.aggregate(state).await, Stage::Reflect),
            Stage::Reflect => {
                let state = self.reflect(state).await;
                self.route_after_reflect(state)
            }
            Stage::Answer => (self.answer(state).await, Stage::Done),
            Stage::Done => (state, Stage::Done),
        }
    }

    /// Ask for a plan. Overwrites `plan` only.
    pub async fn plan(&self, mut state: AgentState) -> AgentState {
        info!("Planning steps");
        let prompt = prompts::plan_prompt(state.question(), self.config.max_plan_steps);
        let reply = self.llm(prompt, self.config.plan_temperature).await;

        state.plan = prompts::parse_plan(&reply).unwrap_or_else(|| {
            warn!(reply = %preview(&reply), "Failed to parse plan, using default");
            prompts::default_plan()
        });

        info!(plan = %format_plan(&state.plan), "Plan created");
        state
    }

    /// Consume the head of the plan.
    pub async fn execute(&self, mut state: AgentState) -> AgentState {
        state.iterations += 1;

        if state.plan.is_empty() {
            warn!("No plan in state, skipping execute");
            return state;
        }

        let step = state.plan.remove(0);
        info!(step = %step, iteration = state.iterations, "Executing step");

        if step.is_answer() {
            debug!("Reached Answer step, clearing plan");
            state.plan.clear();
            state.note("Reached Answer");
            return state;
        }

        let evidence = self.gateway.run(&step, state.question()).await;
        debug!(step = %step, count = evidence.len(), "Step produced evidence");

        state.extend_evidence(evidence);
        state.note(format!("Executed {step}"));
        if state.plan.is_empty() {
            state.plan.push(Step::Answer);
        }
        state
    }

    /// Summarize everything gathered so far into one `aggregate` item.
    pub async fn aggregate(&self, mut state: AgentState) -> AgentState {
        info!(count = state.evidence().len(), "Aggregating evidence");
        let prompt = prompts::aggregate_prompt(state.evidence());
        let summary = self.llm(prompt, self.config.aggregate_temperature).await;

        state.push_evidence(Evidence::aggregate(summary));
        state.note("Aggregated");
        state
    }

    /// Judge completeness; on `NO` schedule one more tool and then the answer.
    pub async fn reflect(&self, mut state: AgentState) -> AgentState {
        info!("Reflecting on completeness");
        let prompt = prompts::reflect_prompt(state.question(), state.evidence().len());
        let reply = self.llm(prompt, self.config.reflect_temperature).await;
        let verdict = prompts::normalize_verdict(&reply);

        info!(verdict = %verdict, "Reflection verdict");
        if let Verdict::NeedsMore(tool) = prompts::parse_verdict(&verdict) {
            state.plan = vec![tool, Step::Answer];
        }
        state.note(format!("Reflected: {verdict}"));
        state
    }

    /// Pick the stage after Reflect. A non-empty plan loops back to Execute
    /// unless the iteration cap is hit, in which case the answer is forced.
    pub fn route_after_reflect(&self, mut state: AgentState) -> (AgentState, Stage) {
        if state.plan.is_empty() {
            return (state, Stage::Answer);
        }

        if state.iterations >= self.config.max_iterations {
            warn!(
                iterations = state.iterations,
                max = self.config.max_iterations,
                pending = %format_plan(&state.plan),
                "Iteration limit reached, forcing answer"
            );
            state.iteration_limit_reached = true;
            state.plan.clear();
            state.note(format!(
                "Iteration limit ({}) reached; answering with gathered evidence",
                self.config.max_iterations
            ));
            return (state, Stage::Answer);
        }

        (state, Stage::Execute)
    }

    /// Write the final answer with a numbered source list.
    pub async fn answer(&self, mut state: AgentState) -> AgentState {
        info!("Generating final answer");
        let citations = prompts::citations(state.citable_evidence(), self.config.max_citations);
        let prompt = prompts::answer_prompt(state.question(), state.evidence());
        let body = self.llm(prompt, self.config.answer_temperature).await;

        state.answer = Some(format!("{body}\n\nSources:\n{citations}"));
        state
    }

    /// One reasoning call. Errors are logged and come back as an empty reply.
    async fn llm(&self, prompt: String, temperature: f32) -> String {
        debug!(temperature, prompt = %preview(&prompt), "Sending prompt");
        let request = ProviderRequest::prompt(&self.model, prompt, temperature);

        match self.provider.complete(request).await {
            Ok(response) => {
                let text = response.message.content;
                debug!(response = %preview(&text), "LLM response");
                text
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "LLM call failed");
                String::new()
            }
        }
    }
}

fn preview(text: &str) -> String {
    const MAX: usize = 120;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX).collect();
        format!("{head}...")
    }
}
