use async_trait::async_trait;
use crate::{AnalysisError, AnalysisResult};

/// Source of analysis results for a single ticker.
///
/// Implemented by the HTTP client for the analysis API; tests substitute
/// in-memory fixtures.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(&self, ticker: &str) -> Result<AnalysisResult, AnalysisError>;
}
