//! Client configuration.
//!
//! Read from `<config dir>/edu-portal/config.toml`, with `PORTAL_*`
//! environment variables taking precedence (e.g. `PORTAL_API_URL`).

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{PortalError, PortalResult};
use crate::today::TodayAnchor;

static DEFAULT_API_URL: &str = "https://education-system-backend-gray.vercel.app/api";
static DEFAULT_LOG_LEVEL: &str = "warn";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortalConfig {
    /// Base URL of the portal API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Pin "today" to a date instead of the system clock
    #[serde(default)]
    pub today: Option<NaiveDate>,

    /// Last day covered by the upcoming-events list (default: end of the
    /// current year)
    #[serde(default)]
    pub upcoming_horizon: Option<NaiveDate>,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        PortalConfig {
            api_url: default_api_url(),
            today: None,
            upcoming_horizon: None,
            log_level: default_log_level(),
        }
    }
}

impl PortalConfig {
    pub fn config_dir() -> PortalResult<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| PortalError::Config("Could not determine config directory".into()))?
            .join("edu-portal"))
    }

    pub fn config_path() -> PortalResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> PortalResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> PortalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("PORTAL"))
            .build()
            .map_err(|e| PortalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PortalError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PortalResult<()> {
        let contents = format!(
            "\
# edu-portal configuration

# Portal API base URL:
# api_url = \"{DEFAULT_API_URL}\"

# Pin \"today\" (useful against demo data seeded around one date):
# today = \"2025-05-01\"

# Last day of the upcoming-events window:
# upcoming_horizon = \"2025-12-31\"

# Log filter when RUST_LOG is unset:
# log_level = \"{DEFAULT_LOG_LEVEL}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PortalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PortalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn today_anchor(&self) -> TodayAnchor {
        TodayAnchor::from_option(self.today)
    }

    /// The configured horizon, or the next December 31st after `today`.
    ///
    /// A configured horizon on or before `today` is ignored in favour of the
    /// default, so the upcoming window always lies ahead.
    pub fn upcoming_horizon(&self, today: NaiveDate) -> NaiveDate {
        match self.upcoming_horizon {
            Some(horizon) if horizon > today => horizon,
            Some(horizon) => {
                tracing::warn!(%horizon, %today, "upcoming_horizon has passed, using the end of the year");
                year_end_after(today)
            }
            None => year_end_after(today),
        }
    }
}

// December 31st of `today`'s year, or of the next year on December 31st itself
fn year_end_after(today: NaiveDate) -> NaiveDate {
    [today.year(), today.year() + 1]
        .into_iter()
        .filter_map(|year| NaiveDate::from_ymd_opt(year, 12, 31))
        .find(|end| *end > today)
        .unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::DateRange;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edu-portal").join("config.toml");
        PortalConfig::create_default_config(&path).unwrap();
        assert!(path.exists());
        assert_eq!(PortalConfig::load_from(&path).unwrap(), PortalConfig::default());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = PortalConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_url = \"http://localhost:5000/api\"\n\
             today = \"2025-05-01\"\n\
             upcoming_horizon = \"2025-12-31\"\n\
             log_level = \"debug\"\n",
        )
        .unwrap();

        let config = PortalConfig::load_from(&path).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.today_anchor(), TodayAnchor::Fixed(ymd(2025, 5, 1)));
        assert_eq!(config.upcoming_horizon(ymd(2025, 5, 1)), ymd(2025, 12, 31));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn bad_date_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "today = \"first of may\"\n").unwrap();
        assert!(matches!(
            PortalConfig::load_from(&path),
            Err(PortalError::Config(_))
        ));
    }

    #[test]
    fn horizon_defaults_to_year_end() {
        let config = PortalConfig::default();
        assert_eq!(config.today_anchor(), TodayAnchor::Live);
        assert_eq!(config.upcoming_horizon(ymd(2026, 3, 9)), ymd(2026, 12, 31));
    }

    #[test]
    fn horizon_rolls_over_on_new_years_eve() {
        let config = PortalConfig::default();
        assert_eq!(config.upcoming_horizon(ymd(2025, 12, 30)), ymd(2025, 12, 31));
        assert_eq!(config.upcoming_horizon(ymd(2025, 12, 31)), ymd(2026, 12, 31));

        let today = TodayAnchor::Fixed(ymd(2025, 12, 31));
        let range = DateRange::upcoming(today.now(), config.upcoming_horizon(today.date()));
        assert!(range.from < range.to);
        assert_eq!(range.end_param(), "2026-12-31T00:00:00.000Z");
    }

    #[test]
    fn passed_horizon_falls_back_to_year_end() {
        let config = PortalConfig {
            upcoming_horizon: Some(ymd(2025, 6, 30)),
            ..PortalConfig::default()
        };
        assert_eq!(config.upcoming_horizon(ymd(2025, 6, 29)), ymd(2025, 6, 30));
        assert_eq!(config.upcoming_horizon(ymd(2025, 6, 30)), ymd(2025, 12, 31));
        assert_eq!(config.upcoming_horizon(ymd(2025, 9, 1)), ymd(2025, 12, 31));
    }
}
