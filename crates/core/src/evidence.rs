//! Evidence: provenance-tagged text gathered by tools or synthesized by
//! aggregation.
//!
//! Evidence is a value object: it is created once and never mutated. The
//! agent state owns the collection and only ever appends to it.

use serde::{Deserialize, Serialize};

/// Source label for the summary produced by the Aggregate stage.
pub const AGGREGATE_SOURCE: &str = "aggregate";

/// Source label for computational answers.
pub const WOLFRAM_SOURCE: &str = "WolframAlpha";

/// A single piece of evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Provenance: a URL, `notes:<id>`, `aggregate`, or a fixed tool label.
    pub source: String,

    /// The evidence text.
    pub content: String,
}

impl Evidence {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }

    /// Evidence synthesized from all prior evidence.
    pub fn aggregate(summary: impl Into<String>) -> Self {
        Self::new(AGGREGATE_SOURCE, summary)
    }

    /// Evidence backed by a stored note.
    pub fn from_note(id: &str, text: impl Into<String>) -> Self {
        Self::new(format!("notes:{id}"), text)
    }

    /// Whether this item is an aggregation summary rather than a citable source.
    pub fn is_aggregate(&self) -> bool {
        self.source == AGGREGATE_SOURCE
    }
}
