//! Evidence-gathering tools for the study agent.
//!
//! Each tool wraps one external service (web search, encyclopedia,
//! computation) behind a core trait and owns its own failure fallback.
//! The [`ToolGateway`] maps plan steps to those tools and to the note
//! retriever, turning whatever they return into evidence.

pub mod gateway;
pub mod tavily;
pub mod wikipedia;
pub mod wolfram;

pub use gateway::ToolGateway;
pub use tavily::TavilySearch;
pub use wikipedia::WikipediaLookup;
pub use wolfram::WolframCompute;

use std::time::Duration;

/// Build an HTTP client with a fixed per-request timeout.
pub(crate) fn http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
