//! Tool traits: the evidence-producing collaborators behind plan steps.
//!
//! Each collaborator owns its failure fallback: the methods here are
//! infallible by contract. An implementation that cannot reach its backend
//! returns an empty list, a fixed placeholder, or a descriptive string.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single web search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub snippet: String,
}

/// An encyclopedia article summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncyclopediaPage {
    pub url: String,
    pub summary: String,
}

impl EncyclopediaPage {
    pub const PLACEHOLDER_URL: &'static str = "https://wikipedia.org";
    pub const PLACEHOLDER_SUMMARY: &'static str = "No article";

    /// Returned when a lookup fails for any reason.
    pub fn placeholder() -> Self {
        Self {
            url: Self::PLACEHOLDER_URL.into(),
            summary: Self::PLACEHOLDER_SUMMARY.into(),
        }
    }
}

/// Web search. Returns no hits when unconfigured or unavailable.
#[async_trait]
pub trait WebSearch: Send + Sync {
    fn name(&self) -> &str;

    async fn search(&self, query: &str) -> Vec<SearchHit>;
}

/// Encyclopedia lookup. Returns [`EncyclopediaPage::placeholder`] on failure.
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    fn name(&self) -> &str;

    async fn lookup(&self, query: &str) -> EncyclopediaPage;
}

/// Computational query. Returns a descriptive error string on failure.
#[async_trait]
pub trait ComputeEngine: Send + Sync {
    fn name(&self) -> &str;

    async fn compute(&self, query: &str) -> String;
}
