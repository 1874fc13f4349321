//! Wikipedia page summaries via the REST API.
//!
//! `GET <base>/api/rest_v1/page/summary/<title>`. Any failure yields the
//! placeholder page.

use async_trait::async_trait;
use serde::Deserialize;
use studyagent_core::error::ToolError;
use studyagent_core::tool::{Encyclopedia, EncyclopediaPage};
use tracing::{debug, warn};

pub struct WikipediaLookup {
    base_url: String,
    client: reqwest::Client,
}

impl WikipediaLookup {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: crate::http_client(timeout_secs),
        }
    }

    /// Summary endpoint for `title`, percent-encoded as a single path segment.
    pub fn summary_url(&self, title: &str) -> Result<reqwest::Url, ToolError> {
        let invalid = |reason: String| ToolError::InvalidResponse {
            tool_name: "wikipedia".into(),
            reason,
        };

        let mut url = reqwest::Url::parse(&format!("{}/api/rest_v1/page/summary", self.base_url))
            .map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("{} cannot be a base URL", self.base_url)))?
            .push(title);
        Ok(url)
    }

    async fn try_lookup(&self, title: &str) -> Result<EncyclopediaPage, ToolError> {
        let url = self.summary_url(title)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ToolError::RequestFailed {
                tool_name: "wikipedia".into(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::BadStatus {
                tool_name: "wikipedia".into(),
                status: status.as_u16(),
            });
        }

        let summary: PageSummary = response.json().await.map_err(|e| ToolError::InvalidResponse {
            tool_name: "wikipedia".into(),
            reason: e.to_string(),
        })?;

        Ok(summary.into_page())
    }
}

#[async_trait]
impl Encyclopedia for WikipediaLookup {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn lookup(&self, query: &str) -> EncyclopediaPage {
        match self.try_lookup(query).await {
            Ok(page) => {
                debug!(url = %page.url, "Wikipedia summary fetched");
                page
            }
            Err(e) => {
                warn!(error = %e, "Wikipedia lookup failed");
                EncyclopediaPage::placeholder()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<DesktopUrls>,
}

#[derive(Debug, Deserialize)]
struct DesktopUrls {
    page: Option<String>,
}

impl PageSummary {
    fn into_page(self) -> EncyclopediaPage {
        let url = self
            .content_urls
            .and_then(|c| c.desktop)
            .and_then(|d| d.page)
            .or(self.url)
            .unwrap_or_else(|| EncyclopediaPage::PLACEHOLDER_URL.into());

        EncyclopediaPage {
            url,
            summary: self.extract,
        }
    }
}
