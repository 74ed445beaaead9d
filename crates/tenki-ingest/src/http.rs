//! HTTP fetcher backed by reqwest

use crate::{ForecastFetcher, IngestError, IngestResult};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> IngestResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tenki/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IngestError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

fn transport_error(e: reqwest::Error) -> IngestError {
    if e.is_timeout() {
        IngestError::Timeout
    } else {
        IngestError::Transport(e.to_string())
    }
}

#[async_trait::async_trait]
impl ForecastFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, url), fields(url = %url))]
    async fn fetch_json(&self, url: &Url) -> IngestResult<Value> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?;

        let body = response.bytes().await.map_err(transport_error)?;
        debug!("Fetched {} bytes", body.len());

        serde_json::from_slice(&body).map_err(|e| IngestError::InvalidJson(e.to_string()))
    }
}
