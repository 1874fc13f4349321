//! Agent state: everything one question accumulates on its way to an answer.
//!
//! The question is fixed at construction. Evidence and scratchpad only grow.
//! Stages take the state by value and hand back the next one.

use serde::Serialize;
use studyagent_core::evidence::Evidence;
use studyagent_core::step::Step;

#[derive(Debug, Clone, Serialize)]
pub struct AgentState {
    question: String,
    /// Remaining plan steps; the head is executed next.
    pub plan: Vec<Step>,
    scratchpad: Vec<String>,
    evidence: Vec<Evidence>,
    /// Final answer, set by the Answer stage.
    pub answer: Option<String>,
    /// Number of Execute passes so far.
    pub iterations: u32,
    /// Set when the router forced an answer because of the iteration cap.
    pub iteration_limit_reached: bool,
}

impl AgentState {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            plan: Vec::new(),
            scratchpad: Vec::new(),
            evidence: Vec::new(),
            answer: None,
            iterations: 0,
            iteration_limit_reached: false,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    pub fn scratchpad(&self) -> &[String] {
        &self.scratchpad
    }

    pub fn push_evidence(&mut self, item: Evidence) {
        self.evidence.push(item);
    }

    pub fn extend_evidence(&mut self, items: impl IntoIterator<Item = Evidence>) {
        self.evidence.extend(items);
    }

    pub fn note(&mut self, entry: impl Into<String>) {
        self.scratchpad.push(entry.into());
    }

    /// Evidence that can be cited, i.e. everything except aggregation summaries.
    pub fn citable_evidence(&self) -> impl Iterator<Item = &Evidence> {
        self.evidence.iter().filter(|e| !e.is_aggregate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = AgentState::new("What is Rust?");
        assert_eq!(state.question(), "What is Rust?");
        assert!(state.plan.is_empty());
        assert!(state.evidence().is_empty());
        assert!(state.scratchpad().is_empty());
        assert!(state.answer.is_none());
        assert_eq!(state.iterations, 0);
        assert!(!state.iteration_limit_reached);
    }

    #[test]
    fn evidence_and_scratchpad_append_in_order() {
        let mut state = AgentState::new("q");
        state.push_evidence(Evidence::new("https://a", "one"));
        state.extend_evidence([Evidence::aggregate("sum"), Evidence::from_note("7", "two")]);
        state.note("Executed Search");
        state.note("Aggregated");

        let sources: Vec<&str> = state.evidence().iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["https://a", "aggregate", "notes:7"]);
        assert_eq!(state.scratchpad(), &["Executed Search", "Aggregated"]);
        assert_eq!(state.citable_evidence().count(), 2);
    }
}
