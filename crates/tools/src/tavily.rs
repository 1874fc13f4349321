//! Web search via the Tavily API.
//!
//! `POST https://api.tavily.com/search` with `{api_key, query, max_results}`.
//! Without an API key the tool is inert and returns no hits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use studyagent_core::error::ToolError;
use studyagent_core::tool::{SearchHit, WebSearch};
use tracing::{debug, warn};

pub const TAVILY_URL: &str = "https://api.tavily.com/search";

pub struct TavilySearch {
    api_key: Option<String>,
    endpoint: String,
    max_results: u32,
    client: reqwest::Client,
}

impl TavilySearch {
    pub fn new(api_key: Option<String>, max_results: u32, timeout_secs: u64) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            endpoint: TAVILY_URL.into(),
            max_results,
            client: crate::http_client(timeout_secs),
        }
    }

    /// Point the tool at a different endpoint (self-hosted proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn try_search(&self, api_key: &str, query: &str) -> Result<Vec<SearchHit>, ToolError> {
        let body = TavilyRequest {
            api_key,
            query,
            max_results: self.max_results,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ToolError::RequestFailed {
                tool_name: "tavily".into(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::BadStatus {
                tool_name: "tavily".into(),
                status: status.as_u16(),
            });
        }

        let parsed: TavilyResponse = response.json().await.map_err(|e| ToolError::InvalidResponse {
            tool_name: "tavily".into(),
            reason: e.to_string(),
        })?;

        Ok(parsed.into_hits())
    }
}

#[async_trait]
impl WebSearch for TavilySearch {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, query: &str) -> Vec<SearchHit> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("TAVILY_API_KEY not set; web search returns no results");
            return Vec::new();
        };

        match self.try_search(api_key, query).await {
            Ok(hits) => {
                debug!(query, count = hits.len(), "Web search complete");
                hits
            }
            Err(e) => {
                warn!(error = %e, "Web search failed");
                Vec::new()
            }
        }
    }
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

impl TavilyResponse {
    fn into_hits(self) -> Vec<SearchHit> {
        self.results
            .into_iter()
            .map(|r| SearchHit {
                url: r.url,
                snippet: r.content,
            })
            .collect()
    }
}
