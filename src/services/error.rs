use std::time::Duration;

use thiserror::Error;

/// A single provider attempt failed. The chain logs it and moves on.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider API error: {0}")]
    Api(String),

    #[error("no bars returned for {symbol}")]
    EmptySeries { symbol: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("{provider} timed out after {after:?}")]
    Timeout { provider: String, after: Duration },
}
