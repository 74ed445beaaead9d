//! Canned feed documents for offline runs and tests

use crate::{ForecastFetcher, IngestError, IngestResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Fetcher that serves documents by file name (`area.json`, `130000.json`)
/// and remembers which URLs were asked for
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    documents: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for any URL ending in `file_name`
    pub fn with_document(mut self, file_name: impl Into<String>, document: Value) -> Self {
        self.documents.insert(file_name.into(), document);
        self
    }

    /// URLs requested so far, oldest first
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ForecastFetcher for FixtureFetcher {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn fetch_json(&self, url: &Url) -> IngestResult<Value> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let file_name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();

        self.documents
            .get(file_name)
            .cloned()
            .ok_or_else(|| IngestError::Transport(format!("404 Not Found: {url}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_serves_by_file_name() {
        let fetcher = FixtureFetcher::new().with_document("130000.json", json!([1, 2]));
        let url = Url::parse("https://example.test/forecast/130000.json").unwrap();

        assert_eq!(fetcher.fetch_json(&url).await.unwrap(), json!([1, 2]));
        assert_eq!(fetcher.requests(), vec![url.to_string()]);
    }

    #[tokio::test]
    async fn test_missing_document() {
        let fetcher = FixtureFetcher::new();
        let url = Url::parse("https://example.test/forecast/999999.json").unwrap();

        let err = fetcher.fetch_json(&url).await.unwrap_err();
        assert!(matches!(err, IngestError::Transport(_)));
        assert_eq!(fetcher.requests().len(), 1);
    }
}
