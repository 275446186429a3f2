//! Typed errors for page detection and metadata lookup.
//!
//! Orchestration converts these into `anyhow::Error`; the UI only ever sees
//! success or failure.

use thiserror::Error;

/// Why a string was rejected as a post page URL.
#[derive(Debug, Error)]
pub enum PageUrlError {
    #[error("invalid URL: {0}")]
    Invalid(#[from] url::ParseError),
    #[error("not a Sora post page: {0}")]
    NotAPostPage(String),
}

/// Failure of a single proxy lookup.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Curl reported an error (timeout, DNS, connection reset).
    #[error("lookup request failed: {0}")]
    Transport(#[from] curl::Error),
    /// The proxy answered with a non-2xx status.
    #[error("lookup returned HTTP {0}")]
    Status(u32),
    #[error("malformed lookup response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("lookup response has no post_id")]
    MissingPostId,
}
