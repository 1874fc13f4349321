//! Plan steps: the agent's closed tool vocabulary.
//!
//! The planner emits free text; it is parsed into [`Step`] once, at the
//! boundary, and everything downstream matches on the variant.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One unit of work in the agent's plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Search,
    Wikipedia,
    Math,
    Notes,
    /// Terminal marker: stop executing and write the answer.
    Answer,
    /// Anything the planner produced that is not in the vocabulary.
    /// Consumed like any other step but yields no evidence.
    Unknown(String),
}

impl Step {
    /// The tools a planner (or a reflection verdict) may name.
    pub const TOOLS: [Step; 4] = [Step::Search, Step::Wikipedia, Step::Math, Step::Notes];

    /// Parse a step name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "search" => Step::Search,
            "wikipedia" => Step::Wikipedia,
            "math" => Step::Math,
            "notes" => Step::Notes,
            "answer" => Step::Answer,
            _ => Step::Unknown(name.to_string()),
        }
    }

    /// Canonical name (raw text for unknown steps).
    pub fn name(&self) -> &str {
        match self {
            Step::Search => "Search",
            Step::Wikipedia => "Wikipedia",
            Step::Math => "Math",
            Step::Notes => "Notes",
            Step::Answer => "Answer",
            Step::Unknown(raw) => raw,
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Step::Answer)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Step {
    fn from(name: &str) -> Self {
        Step::parse(name)
    }
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Step::parse(&raw))
    }
}

/// Render a plan for logs and traces: `[Search, Answer]`.
pub fn format_plan(plan: &[Step]) -> String {
    let names: Vec<&str> = plan.iter().map(Step::name).collect();
    format!("[{}]", names.join(", "))
}
