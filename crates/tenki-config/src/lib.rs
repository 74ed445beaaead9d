use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "tenki.toml";
pub const DEFAULT_DB_PATH: &str = "weather_app.db";
pub const DEFAULT_AREA_URL: &str = "https://www.jma.go.jp/bosai/common/const/area.json";
pub const DEFAULT_FORECAST_BASE_URL: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedConfig {
    pub area_url: Option<String>,
    pub forecast_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub store: Option<StoreConfig>,
    pub feed: Option<FeedConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl AppConfig {
    /// Load configuration from TENKI_CONFIG path (TOML) if present, with reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("TENKI_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(path)
    }

    /// Load from an explicit path; a missing file yields the defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let cfg = if path.exists() {
            let s = fs::read_to_string(path)?;
            Self::from_toml(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let cfg = toml::from_str::<AppConfig>(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout().is_zero() {
            return Err(ConfigError::Invalid {
                field: "feed.timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// SQLite file path (default weather_app.db)
    pub fn db_path(&self) -> PathBuf {
        self.store
            .as_ref()
            .and_then(|s| s.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
    }

    pub fn area_url(&self) -> String {
        self.feed
            .as_ref()
            .and_then(|f| f.area_url.clone())
            .unwrap_or_else(|| DEFAULT_AREA_URL.to_string())
    }

    pub fn forecast_base_url(&self) -> String {
        self.feed
            .as_ref()
            .and_then(|f| f.forecast_base_url.clone())
            .unwrap_or_else(|| DEFAULT_FORECAST_BASE_URL.to_string())
    }

    /// Per-request timeout for feed fetches (default 10s)
    pub fn timeout(&self) -> Duration {
        let secs = self
            .feed
            .as_ref()
            .and_then(|f| f.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}
