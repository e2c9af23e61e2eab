//! CLI configuration.
//!
//! Every field has a default, so a configuration file only needs the keys it
//! overrides:
//!
//! ```toml
//! data_dir = "/srv/market/vix"
//!
//! [schedule]
//! start = "2015-01-01"
//!
//! [distribution]
//! window = 520
//! ```

use std::path::{Path, PathBuf};

use contango_analytics::DistributionParams;
use contango_core::schedule::ScheduleParams;
use contango_core::Date;
use contango_curves::CombineParams;
use serde::{Deserialize, Serialize};

use crate::cli::CalendarChoice;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory of `YYYY-MM-DD.csv` contract snapshots
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory derived tables are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Delivery schedule generation
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Snapshot combining
    #[serde(default)]
    pub combine: CombineConfig,

    /// Distribution tracking
    #[serde(default)]
    pub distribution: DistributionConfig,

    /// Settlement-day resolution
    #[serde(default)]
    pub settlement: SettlementConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/vix")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            schedule: ScheduleConfig::default(),
            combine: CombineConfig::default(),
            distribution: DistributionConfig::default(),
            settlement: SettlementConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Delivery schedule settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// First date of coverage
    #[serde(default = "default_start")]
    pub start: Date,

    /// Days past the settlement day the schedule extends to
    #[serde(default = "default_horizon_days")]
    pub horizon_days: i64,

    /// Days between expiration and the recorded delivery date
    #[serde(default = "default_roll_offset_days")]
    pub roll_offset_days: i64,

    /// Which Friday of the month is the expiration
    #[serde(default = "default_expiry_week")]
    pub expiry_week: u32,

    /// Trading calendar
    #[serde(default)]
    pub calendar: CalendarChoice,
}

fn default_start() -> Date {
    Date::from(chrono::NaiveDate::from_ymd_opt(2013, 1, 1).unwrap_or_default())
}

fn default_horizon_days() -> i64 {
    ScheduleParams::DEFAULT_HORIZON_DAYS
}

fn default_roll_offset_days() -> i64 {
    ScheduleParams::DEFAULT_ROLL_OFFSET_DAYS
}

fn default_expiry_week() -> u32 {
    ScheduleParams::DEFAULT_EXPIRY_WEEK
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            horizon_days: default_horizon_days(),
            roll_offset_days: default_roll_offset_days(),
            expiry_week: default_expiry_week(),
            calendar: CalendarChoice::default(),
        }
    }
}

impl ScheduleConfig {
    /// Schedule parameters over `[start, end)`.
    pub fn params(&self, start: Date, end: Date) -> ScheduleParams {
        ScheduleParams::new(start, end)
            .roll_offset_days(self.roll_offset_days)
            .expiry_week(self.expiry_week)
    }
}

/// Combine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineConfig {
    /// Maximum number of contributing snapshots
    #[serde(default = "default_max_times")]
    pub max_times: usize,
}

fn default_max_times() -> usize {
    CombineParams::DEFAULT_MAX_TIMES
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            max_times: default_max_times(),
        }
    }
}

/// Distribution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Trailing window for the percentile rank, in rows
    #[serde(default = "default_window")]
    pub window: usize,

    /// Series column read from the index file
    #[serde(default = "default_value_column")]
    pub value_column: String,
}

fn default_window() -> usize {
    DistributionParams::DEFAULT_WINDOW
}

fn default_value_column() -> String {
    "VIX Close".to_string()
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            value_column: default_value_column(),
        }
    }
}

/// Settlement-day settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Local hour from which the current day's settlement counts as published
    #[serde(default = "default_cutoff_hour")]
    pub cutoff_hour: u32,
}

fn default_cutoff_hour() -> u32 {
    23
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            cutoff_hour: default_cutoff_hour(),
        }
    }
}
