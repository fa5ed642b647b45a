use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Analysis API returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Upstream { status: u16, message: Option<String> },

    #[error("Analysis API request failed: {0}")]
    Transport(String),

    #[error("Analysis API timed out")]
    Timeout,

    #[error("Invalid analysis payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Render error: {0}")]
    Render(String),
}
