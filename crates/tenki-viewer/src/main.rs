//! tenki - weekly forecast viewer
//!
//! Without arguments, lists the available regions grouped by center.
//! With a region code, fetches that region's weekly forecast, stores it as
//! a new snapshot and prints the latest snapshot.

use anyhow::{Context, Result};
use tracing::{error, info};

use tenki_config::AppConfig;
use tenki_db::StoreBuilder;
use tenki_ingest::{find_region, group_by_center, FeedClient, HttpFetcher};
use tenki_viewer::{ForecastService, ViewerContext};

#[tokio::main]
async fn main() -> Result<()> {
    tenki_obs::init("tenki");

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!("Loaded configuration: {:?}", config);

    let store = StoreBuilder::new(config.db_path())
        .open()
        .await
        .context("Failed to open forecast database")?;

    let fetcher = HttpFetcher::new(config.timeout()).context("Failed to build HTTP client")?;
    let feed = FeedClient::new(fetcher, &config.area_url(), &config.forecast_base_url())
        .context("Invalid feed URL in configuration")?;

    let service = ForecastService::open(store, feed)
        .await
        .context("Failed to seed weather codes")?;

    let regions = match service.load_regions().await {
        Ok(regions) => regions,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e).context("Failed to load region list");
        }
    };

    let Some(code) = std::env::args().nth(1) else {
        for (center, members) in group_by_center(&regions) {
            println!("{center}");
            for region in members {
                println!("  {} {}", region.code, region.name);
            }
        }
        return Ok(());
    };

    let region = find_region(&regions, &code)
        .with_context(|| format!("Unknown region code {code}"))?;

    let mut ctx = ViewerContext::new();
    match service.refresh(&mut ctx, region).await {
        Ok(Some(view)) => print!("{view}"),
        Ok(None) => info!("Result for {} was superseded", code),
        Err(e) => {
            error!("Refresh failed: {}", e);
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    }

    service.store().clone().close().await;
    Ok(())
}
