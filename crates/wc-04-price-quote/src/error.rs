//! Failures while fetching a quote. Never returned to callers; the client
//! logs them and falls back to a zero price.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Failed to send price request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse price response: {0}")]
    Parse(#[from] serde_json::Error),
}
