//! Table layout and row types
//!
//! Column names match the viewer's existing `weather_app.db` files, which
//! open unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Region master row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct RegionRow {
    pub area_id: String,
    pub area_name: String,
    pub center_id: String,
    pub center_name: String,
}

/// Weather code master row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct WeatherCodeRow {
    pub weather_code: String,
    pub description: String,

    /// Icon token of the phrase's leading keyword
    pub icon: String,

    pub color_code: String,
    pub memo: Option<String>,
    pub bg_color_code: Option<String>,
}

/// Forecast header (one per ingestion)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct SnapshotRow {
    pub forecast_id: i64,

    /// Ingestion time
    pub datetime: DateTime<Utc>,

    /// Office whose payload file was fetched
    pub office_code: String,

    pub area_id: String,
}

/// Daily row of the latest snapshot joined with its code definition
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct LatestForecastRow {
    pub daily_forecast_id: i64,
    pub date: NaiveDate,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub forecast_id: i64,
    pub weather_code: String,
    pub description: String,
    pub icon: String,
    pub color_code: String,
}

/// Table names
pub mod tables {
    pub const AREAS: &str = "areas";
    pub const WEATHER_CODES: &str = "weather_codes";
    pub const FORECASTS: &str = "forecasts";
    pub const DAILY_FORECASTS: &str = "daily_forecasts";
}

/// DDL run on every open
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS areas (
        area_id TEXT PRIMARY KEY,
        area_name TEXT NOT NULL,
        center_id TEXT NOT NULL,
        center_name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS weather_codes (
        weather_code TEXT PRIMARY KEY,
        description TEXT NOT NULL,
        icon TEXT NOT NULL,
        color_code TEXT NOT NULL,
        memo TEXT,
        bg_color_code TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS forecasts (
        forecast_id INTEGER PRIMARY KEY AUTOINCREMENT,
        datetime TEXT NOT NULL,
        office_code TEXT NOT NULL,
        area_id TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS daily_forecasts (
        daily_forecast_id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        temp_min REAL,
        temp_max REAL,
        forecast_id INTEGER NOT NULL,
        weather_code TEXT NOT NULL,
        FOREIGN KEY (forecast_id) REFERENCES forecasts(forecast_id),
        FOREIGN KEY (weather_code) REFERENCES weather_codes(weather_code),
        UNIQUE (forecast_id, date)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_forecasts_area_id ON forecasts(area_id)",
    "CREATE INDEX IF NOT EXISTS idx_daily_forecasts_forecast_id ON daily_forecasts(forecast_id)",
];
