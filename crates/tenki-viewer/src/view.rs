//! Render model for a region's latest snapshot

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tenki_core::{
    background_color, format_temperature, normalize, to_display_tokens, DisplayModel, Region,
    DEFAULT_BACKGROUND,
};
use tenki_db::LatestForecastRow;
use tenki_ingest::ReportHeader;

/// One day of the weekly forecast, ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    pub date: NaiveDate,
    pub weather_code: String,

    /// Phrase from the code master
    pub phrase: String,

    /// Phrase with filler words removed
    pub short_phrase: String,

    pub display: DisplayModel,
    pub min_label: String,
    pub max_label: String,
    pub background: &'static str,
}

impl ForecastCard {
    pub fn from_row(row: &LatestForecastRow) -> Self {
        let phrase = row.description.as_str();
        Self {
            date: row.date,
            weather_code: row.weather_code.clone(),
            phrase: phrase.to_string(),
            short_phrase: normalize(phrase),
            display: to_display_tokens(phrase),
            min_label: format_temperature(row.temp_min),
            max_label: format_temperature(row.temp_max),
            background: background_color(phrase),
        }
    }
}

impl fmt::Display for ForecastCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {} / {}  {}  {}",
            self.date.format("%Y-%m-%d"),
            self.min_label,
            self.max_label,
            self.display,
            self.short_phrase
        )
    }
}

/// Everything shown for one region after a refresh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastView {
    pub region_code: String,
    pub region_name: String,
    pub publishing_office: String,

    /// Report time in UTC+9
    pub report_time: String,

    pub snapshot_id: i64,

    /// Page tint, taken from the first day
    pub background: &'static str,

    pub cards: Vec<ForecastCard>,
}

impl ForecastView {
    pub fn build(
        region: &Region,
        header: &ReportHeader,
        snapshot_id: i64,
        rows: &[LatestForecastRow],
    ) -> Self {
        let cards: Vec<ForecastCard> = rows.iter().map(ForecastCard::from_row).collect();
        let background = cards
            .first()
            .map(|c| c.background)
            .unwrap_or(DEFAULT_BACKGROUND);

        Self {
            region_code: region.code.clone(),
            region_name: region.name.clone(),
            publishing_office: header.publishing_office.clone(),
            report_time: header.display_time(),
            snapshot_id,
            background,
            cards,
        }
    }
}

impl fmt::Display for ForecastView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.region_name, self.region_code)?;
        writeln!(f, "{} {} 発表", self.publishing_office, self.report_time)?;
        for card in &self.cards {
            writeln!(f, "{card}")?;
        }
        Ok(())
    }
}
