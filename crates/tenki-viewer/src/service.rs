//! Refresh flow: fetch, persist, read back, render

use crate::{ForecastView, RequestToken, ViewerContext, ViewerResult};
use tenki_core::{all_codes, Region, COLOR_KEYWORDS};
use tenki_db::SnapshotStore;
use tenki_ingest::{FeedClient, ForecastFetcher, WeeklyForecast};
use tracing::{debug, info, instrument};

pub struct ForecastService<F> {
    store: SnapshotStore,
    feed: FeedClient<F>,
}

impl<F: ForecastFetcher> ForecastService<F> {
    /// Wrap an opened store and seed the weather code master
    pub async fn open(store: SnapshotStore, feed: FeedClient<F>) -> ViewerResult<Self> {
        store.seed_code_definitions(all_codes(), COLOR_KEYWORDS).await?;
        Ok(Self { store, feed })
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub async fn load_regions(&self) -> ViewerResult<Vec<Region>> {
        Ok(self.feed.fetch_regions().await?)
    }

    /// Fetch and parse the forecast for a region. Nothing is stored.
    pub async fn fetch(&self, region_code: &str) -> ViewerResult<WeeklyForecast> {
        Ok(self.feed.fetch_forecast(region_code).await?)
    }

    /// Persist a fetched forecast and return the view of the latest snapshot.
    ///
    /// Returns `None` without touching the store when `token` has been
    /// superseded by a later request.
    #[instrument(skip(self, ctx, region, forecast), fields(region = %region.code, token = token.value()))]
    pub async fn commit(
        &self,
        ctx: &mut ViewerContext,
        token: RequestToken,
        region: &Region,
        forecast: &WeeklyForecast,
    ) -> ViewerResult<Option<ForecastView>> {
        if !ctx.is_current(token) {
            debug!("Discarding superseded result");
            return Ok(None);
        }

        self.store.upsert_region(region).await?;
        let snapshot_id = self
            .store
            .save_snapshot(&region.code, &forecast.source_office, forecast.days())
            .await?;
        let rows = self.store.get_latest(&region.code).await?;
        ctx.record_snapshot(snapshot_id);

        info!("Snapshot {} saved with {} days", snapshot_id, rows.len());
        Ok(Some(ForecastView::build(
            region,
            &forecast.header,
            snapshot_id,
            &rows,
        )))
    }

    /// Begin a request for `region`, fetch it and commit the result
    pub async fn refresh(
        &self,
        ctx: &mut ViewerContext,
        region: &Region,
    ) -> ViewerResult<Option<ForecastView>> {
        let token = ctx.begin(&region.code);
        let forecast = self.fetch(&region.code).await?;
        self.commit(ctx, token, region, &forecast).await
    }
}
