//! Feed client: URL layout plus fetch-and-parse for each document

use crate::{
    fetch_code_for, flatten_regions, ForecastFetcher, IngestResult, WeeklyForecast,
};
use tenki_core::Region;
use tracing::{info, instrument};
use url::Url;

pub struct FeedClient<F> {
    fetcher: F,
    area_url: Url,
    forecast_base: Url,
}

impl<F: ForecastFetcher> FeedClient<F> {
    pub fn new(fetcher: F, area_url: &str, forecast_base_url: &str) -> IngestResult<Self> {
        let area_url = Url::parse(area_url)?;
        // Url::join drops the last segment unless the base ends with '/'
        let forecast_base = if forecast_base_url.ends_with('/') {
            Url::parse(forecast_base_url)?
        } else {
            Url::parse(&format!("{forecast_base_url}/"))?
        };

        Ok(Self {
            fetcher,
            area_url,
            forecast_base,
        })
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// URL of the payload file for an office code (after remapping)
    pub fn forecast_url(&self, fetch_code: &str) -> IngestResult<Url> {
        Ok(self.forecast_base.join(&format!("{fetch_code}.json"))?)
    }

    /// Fetch and flatten the region list
    #[instrument(skip(self))]
    pub async fn fetch_regions(&self) -> IngestResult<Vec<Region>> {
        let document = self.fetcher.fetch_json(&self.area_url).await?;
        let regions = flatten_regions(&document)?;
        info!("Loaded {} regions", regions.len());
        Ok(regions)
    }

    /// Fetch the payload file holding `region_code` and parse its slice
    #[instrument(skip(self))]
    pub async fn fetch_forecast(&self, region_code: &str) -> IngestResult<WeeklyForecast> {
        let fetch_code = fetch_code_for(region_code);
        let url = self.forecast_url(fetch_code)?;
        info!(
            "Fetching forecast for {} from {} via {}",
            region_code,
            url,
            self.fetcher.name()
        );

        let document = self.fetcher.fetch_json(&url).await?;
        WeeklyForecast::from_payload(&document, region_code, fetch_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixtureFetcher, IngestError};
    use serde_json::{json, Value};

    fn kushiro_payload() -> Value {
        serde_json::from_str(include_str!("../tests/fixtures/forecast_014100.json")).unwrap()
    }

    fn client(fetcher: FixtureFetcher) -> FeedClient<FixtureFetcher> {
        FeedClient::new(
            fetcher,
            "https://feed.test/common/const/area.json",
            "https://feed.test/forecast/data/forecast",
        )
        .unwrap()
    }

    #[test]
    fn test_forecast_url() {
        let client = client(FixtureFetcher::new());
        assert_eq!(
            client.forecast_url("130000").unwrap().as_str(),
            "https://feed.test/forecast/data/forecast/130000.json"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = FeedClient::new(
            FixtureFetcher::new(),
            "not a url",
            "https://feed.test/forecast/data/forecast/",
        );
        assert!(matches!(result, Err(IngestError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_remapped_region_fetches_combined_file() {
        let client = client(FixtureFetcher::new().with_document("014100.json", kushiro_payload()));

        let forecast = client.fetch_forecast("014030").await.unwrap();

        assert_eq!(
            client.fetcher().requests(),
            vec!["https://feed.test/forecast/data/forecast/014100.json".to_string()]
        );
        assert_eq!(forecast.region_code, "014030");
        assert_eq!(forecast.source_office, "014100");
        assert_eq!(forecast.area.index, 1);
        assert_eq!(forecast.area.name, "十勝地方");
        assert_eq!(forecast.header.publishing_office, "釧路地方気象台");

        let days = forecast.days();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].weather_code, "201");
        assert_eq!(days[0].temp_min, None);
        // Obihiro temperatures, not Kushiro's
        assert_eq!(days[1].temp_min, Some(12.0));
        assert_eq!(days[1].temp_max, Some(22.0));
    }

    #[tokio::test]
    async fn test_combined_office_reads_its_own_area() {
        let client = client(FixtureFetcher::new().with_document("014100.json", kushiro_payload()));

        // 014100 itself is not an area code in the file, so the first area is used
        let forecast = client.fetch_forecast("014100").await.unwrap();
        assert_eq!(forecast.area.index, 0);
        assert_eq!(forecast.area.name, "釧路・根室地方");
        assert_eq!(forecast.days()[1].temp_min, Some(10.0));
    }

    #[tokio::test]
    async fn test_fetch_regions() {
        let area = json!({
            "centers": { "010100": { "name": "北海道地方", "children": ["014100", "014030"] } },
            "offices": { "014100": { "name": "釧路・根室地方" }, "014030": { "name": "十勝地方" } }
        });
        let client = client(FixtureFetcher::new().with_document("area.json", area));

        let regions = client.fetch_regions().await.unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].name, "十勝地方");
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces() {
        let client = client(FixtureFetcher::new());
        let err = client.fetch_forecast("130000").await.unwrap_err();
        assert!(matches!(err, IngestError::Transport(_)));
    }
}
