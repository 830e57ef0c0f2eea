use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Client setup failed: {0}")]
    Config(String),
}

impl ScraperError {
    /// Whether another attempt at the same request could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ScraperError::Network(_) | ScraperError::Timeout(_) | ScraperError::Status { .. }
        )
    }
}

impl From<reqwest::Error> for ScraperError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ScraperError::Timeout(e.to_string())
        } else if e.is_decode() {
            ScraperError::JsonParse(e.to_string())
        } else {
            ScraperError::Network(e.to_string())
        }
    }
}
