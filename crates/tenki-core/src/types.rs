//! Core data types shared by the feed parser and the snapshot store

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Display offset of the forecast feed (UTC+9)
pub const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Placeholder rendered when a temperature is missing
pub const TEMPERATURE_PLACEHOLDER: &str = "--";

/// Fixed UTC+9 offset used for every date shown to the user
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// A forecast-publishing region (office) and the center it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Office code, e.g. "130000"
    pub code: String,

    pub name: String,

    /// Parent center code, e.g. "010300"
    pub center_code: String,

    pub center_name: String,
}

impl Region {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        center_code: impl Into<String>,
        center_name: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            center_code: center_code.into(),
            center_name: center_name.into(),
        }
    }
}

/// One day of a weekly forecast, as persisted in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Region-local calendar date
    pub date: NaiveDate,

    /// Three digit weather code, e.g. "101"
    pub weather_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_max: Option<f64>,
}

/// Format a temperature for display, `--` when there is no value
pub fn format_temperature(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:.0}℃", v),
        Some(v) => format!("{}℃", v),
        None => TEMPERATURE_PLACEHOLDER.to_string(),
    }
}
