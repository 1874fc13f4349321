//! WolframAlpha short answers.
//!
//! `GET https://api.wolframalpha.com/v1/result?i=<query>&appid=<id>` returns
//! plain text. Failures come back as `Wolfram error: ...` strings so the
//! agent can still cite what happened.

use async_trait::async_trait;
use studyagent_core::tool::ComputeEngine;
use tracing::{debug, warn};

pub const WOLFRAM_URL: &str = "https://api.wolframalpha.com/v1/result";

pub const MISSING_APPID: &str = "Wolfram APPID not set.";

pub struct WolframCompute {
    app_id: Option<String>,
    endpoint: String,
    client: reqwest::Client,
}

impl WolframCompute {
    pub fn new(app_id: Option<String>, timeout_secs: u64) -> Self {
        Self {
            app_id: app_id.filter(|id| !id.is_empty()),
            endpoint: WOLFRAM_URL.into(),
            client: crate::http_client(timeout_secs),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl ComputeEngine for WolframCompute {
    fn name(&self) -> &str {
        "wolfram"
    }

    async fn compute(&self, query: &str) -> String {
        let Some(app_id) = self.app_id.as_deref() else {
            warn!("WOLFRAM_APPID not set");
            return MISSING_APPID.into();
        };

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("i", query), ("appid", app_id)])
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Wolfram request failed");
                return format!("Wolfram error: {e}");
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Wolfram returned error status");
            return format!("Wolfram error: {}", status.as_u16());
        }

        match response.text().await {
            Ok(body) => {
                debug!(query, "Wolfram answered");
                body.trim().to_string()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read Wolfram response");
                format!("Wolfram error: {e}")
            }
        }
    }
}
