//! HTTP client for the upstream analysis API.
//!
//! One `GET {base}/api/analyze/{ticker}` per call, bounded by the configured
//! timeout. No retries.

use analysis_core::{AnalysisError, AnalysisProvider, AnalysisResult};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// Error body returned by the analysis API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: Url,
}

impl AnalysisClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AnalysisError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AnalysisError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Fetch the analysis for `ticker`, requesting headline and anchor context.
    pub async fn fetch_analysis(&self, ticker: &str) -> Result<AnalysisResult, AnalysisError> {
        let url = analyze_url(&self.base_url, ticker)?;
        tracing::debug!("Fetching analysis: {}", url);

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<UpstreamErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .filter(|m| !m.trim().is_empty());
            tracing::warn!(
                "Analysis API returned {} for {}: {}",
                status.as_u16(),
                ticker,
                message.as_deref().unwrap_or("no message")
            );
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice::<AnalysisResult>(&body)
            .map_err(|e| AnalysisError::InvalidPayload(e.to_string()))
    }
}

#[async_trait]
impl AnalysisProvider for AnalysisClient {
    async fn analyze(&self, ticker: &str) -> Result<AnalysisResult, AnalysisError> {
        self.fetch_analysis(ticker).await
    }
}

/// Build `{base}/api/analyze/{ticker}?include_headline=true&include_anchor=true`.
/// The ticker is appended as a single escaped path segment.
pub fn analyze_url(base: &Url, ticker: &str) -> Result<Url, AnalysisError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AnalysisError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(["api", "analyze", ticker]);
    url.query_pairs_mut()
        .clear()
        .append_pair("include_headline", "true")
        .append_pair("include_anchor", "true");
    Ok(url)
}

fn map_reqwest_error(e: reqwest::Error) -> AnalysisError {
    if e.is_timeout() {
        AnalysisError::Timeout
    } else {
        AnalysisError::Transport(e.to_string())
    }
}
