//! Forecast payload types and the parsing boundary
//!
//! A forecast document is a two element array. Element 0 carries the
//! publishing office and report time, element 1 the weekly forecast:
//! `timeSeries[0]` holds dates and per-area weather codes, `timeSeries[1]`
//! per-area min/max temperatures. The two area lists line up by position
//! only, so the area index is resolved once and reused for both.

use crate::resolve::resolve_area_index;
use crate::{IngestError, IngestResult};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tenki_core::{jst, DailyEntry};
use tracing::{debug, warn};

/// Area reference inside a time series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaRef {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub code: String,
}

/// Per-area record of a time series
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRecord {
    #[serde(default)]
    pub area: Option<AreaRef>,

    #[serde(default)]
    pub weather_codes: Vec<String>,

    /// String-or-empty values; a missing key means no data at all
    #[serde(default)]
    pub temps_min: Option<Vec<Value>>,

    #[serde(default)]
    pub temps_max: Option<Vec<Value>>,
}

impl AreaRecord {
    pub fn code(&self) -> Option<&str> {
        self.area.as_ref().map(|a| a.code.as_str())
    }
}

/// One time series: shared time axis plus per-area arrays
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    #[serde(default)]
    pub time_defines: Vec<String>,

    #[serde(default)]
    pub areas: Vec<AreaRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHeader {
    publishing_office: String,
    report_datetime: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeekly {
    #[serde(default)]
    time_series: Vec<TimeSeries>,
}

/// Who published the forecast and when (UTC+9)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportHeader {
    pub publishing_office: String,
    pub report_datetime: DateTime<FixedOffset>,
}

impl ReportHeader {
    fn from_value(value: &Value) -> IngestResult<Self> {
        let raw = RawHeader::deserialize(value)
            .map_err(|e| IngestError::MalformedPayload(format!("report header: {e}")))?;
        Ok(Self {
            publishing_office: raw.publishing_office,
            report_datetime: parse_timestamp(&raw.report_datetime)?,
        })
    }

    /// `2024-06-01 11:00` in UTC+9
    pub fn display_time(&self) -> String {
        self.report_datetime.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// The requested region's slice of a weekly payload.
///
/// Carries the index it was found at; every per-day value in `days` was
/// read from that same index in each series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedArea {
    pub index: usize,
    pub code: String,
    pub name: String,
    pub days: Vec<DailyEntry>,
}

/// Parsed forecast for one region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyForecast {
    /// Region the caller asked for
    pub region_code: String,

    /// Office whose payload file was fetched
    pub source_office: String,

    pub header: ReportHeader,
    pub area: ResolvedArea,
}

impl WeeklyForecast {
    /// Parse a forecast document for `region_code`
    pub fn from_payload(
        payload: &Value,
        region_code: &str,
        source_office: &str,
    ) -> IngestResult<Self> {
        let elements = payload
            .as_array()
            .ok_or_else(|| IngestError::MalformedPayload("expected a JSON array".to_string()))?;
        if elements.len() < 2 {
            return Err(IngestError::MissingWeekly);
        }

        let header = ReportHeader::from_value(&elements[0])?;
        let weekly = RawWeekly::deserialize(&elements[1])
            .map_err(|e| IngestError::MalformedPayload(format!("weekly forecast: {e}")))?;

        let (weather, temps) = match weekly.time_series.as_slice() {
            [weather, temps, ..] => (weather, temps),
            _ => {
                return Err(IngestError::MalformedPayload(format!(
                    "expected 2 time series, found {}",
                    weekly.time_series.len()
                )))
            }
        };

        let area = resolve_area(weather, temps, region_code)?;
        debug!(
            "Resolved region {} to area {} ({}) at index {}",
            region_code, area.code, area.name, area.index
        );

        Ok(Self {
            region_code: region_code.to_string(),
            source_office: source_office.to_string(),
            header,
            area,
        })
    }

    pub fn days(&self) -> &[DailyEntry] {
        &self.area.days
    }
}

/// Locate the region once and zip every series at that index
fn resolve_area(
    weather: &TimeSeries,
    temps: &TimeSeries,
    region_code: &str,
) -> IngestResult<ResolvedArea> {
    if weather.areas.is_empty() {
        return Err(IngestError::MalformedPayload(
            "weather series has no areas".to_string(),
        ));
    }
    let index = resolve_area_index(&weather.areas, region_code);
    let weather_area = &weather.areas[index];
    let temp_area = temps.areas.get(index).ok_or_else(|| {
        IngestError::MalformedPayload(format!(
            "temperature series has no area at index {index}"
        ))
    })?;

    let dates = weather
        .time_defines
        .iter()
        .map(|t| parse_local_date(t))
        .collect::<IngestResult<Vec<_>>>()?;

    if weather_area.weather_codes.len() < dates.len() {
        return Err(IngestError::MalformedPayload(format!(
            "{} weather codes for {} dates",
            weather_area.weather_codes.len(),
            dates.len()
        )));
    }

    let days = dates
        .into_iter()
        .zip(&weather_area.weather_codes)
        .enumerate()
        .map(|(i, (date, code))| DailyEntry {
            date,
            weather_code: code.clone(),
            temp_min: temperature_at(temp_area.temps_min.as_deref(), i),
            temp_max: temperature_at(temp_area.temps_max.as_deref(), i),
        })
        .collect();

    let (code, name) = weather_area
        .area
        .as_ref()
        .map(|a| (a.code.clone(), a.name.clone()))
        .unwrap_or_default();

    Ok(ResolvedArea {
        index,
        code,
        name,
        days,
    })
}

/// Temperature for day `i`; `None` for empty, missing or unreadable values
pub fn temperature_at(values: Option<&[Value]>, i: usize) -> Option<f64> {
    match values?.get(i)? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Unreadable temperature {:?} at day {}", s, i);
                None
            }
        },
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn parse_timestamp(raw: &str) -> IngestResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&jst()))
        .map_err(|e| IngestError::MalformedPayload(format!("bad timestamp {raw:?}: {e}")))
}

/// Calendar date of a feed timestamp in UTC+9
pub fn parse_local_date(raw: &str) -> IngestResult<NaiveDate> {
    parse_timestamp(raw).map(|t| t.date_naive())
}
