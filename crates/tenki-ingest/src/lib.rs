//! Forecast feed access and parsing
//!
//! Fetches the region list and per-office forecast payloads, resolves which
//! area of a multi-area payload belongs to the requested region, and turns
//! the positional arrays into typed daily entries.

pub mod client;
pub mod feed;
pub mod fixture;
pub mod http;
pub mod regions;
pub mod resolve;

pub use client::*;
pub use feed::*;
pub use fixture::*;
pub use http::*;
pub use regions::*;
pub use resolve::*;

use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Communication error: {0}")]
    Transport(String),

    #[error("Timeout waiting for feed")]
    Timeout,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("週間予報データがありません")]
    MissingWeekly,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Source of raw feed documents: URL in, JSON out
#[async_trait::async_trait]
pub trait ForecastFetcher: Send + Sync {
    /// Fetcher name/identifier
    fn name(&self) -> &str;

    /// Fetch one document. A single attempt, no retry.
    async fn fetch_json(&self, url: &Url) -> IngestResult<Value>;
}
