//! # Configuration Management
//!
//! Loads the observer location and output settings from `sun-config.toml`. A
//! missing or malformed file is not fatal: the defaults (Philadelphia, New York
//! time) are used and the reason is logged.

use crate::civil::{CivilTimeProvider, ZoneProvider};
use crate::{GeoCoordinate, SolarError};
use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "sun-config.toml";

/// Application configuration loaded from sun-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Where the sun is observed from
    pub location: LocationConfig,
    /// How event times are printed
    #[serde(default)]
    pub output: OutputConfig,
}

/// Observer location
#[derive(Debug, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Human-readable place name for log lines and output
    pub name: String,
    /// Degrees north
    pub latitude: f64,
    /// Degrees east (west is negative)
    pub longitude: f64,
    /// IANA timezone name (e.g. "Europe/London"), or "local" for the system zone
    pub timezone: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OutputConfig {
    /// chrono strftime pattern for event times
    pub time_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            time_format: "%H:%M".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            location: LocationConfig {
                name: "Philadelphia, PA".to_string(),
                latitude: 39.95,
                longitude: -75.15,
                timezone: "America/New_York".to_string(),
            },
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from sun-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(location = %config.location.name, "loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "invalid config file, using defaults"
                    );
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Write the configuration as pretty TOML.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("writing configuration to {}", path.display()))?;
        info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// The configured location, range-checked.
    pub fn coordinate(&self) -> Result<GeoCoordinate, SolarError> {
        GeoCoordinate::new(self.location.latitude, self.location.longitude)
    }

    /// The configured timezone as a civil-time provider.
    pub fn zone(&self) -> anyhow::Result<ConfiguredZone> {
        ConfiguredZone::parse(&self.location.timezone)
    }
}

/// Timezone named in configuration or on the command line.
#[derive(Clone, Debug)]
pub enum ConfiguredZone {
    /// The machine's own zone
    Local(ZoneProvider<chrono::Local>),
    /// An IANA zone from the bundled database
    Named(ZoneProvider<chrono_tz::Tz>),
}

impl ConfiguredZone {
    /// Parse `"local"` (any case) or an IANA zone name.
    pub fn parse(name: &str) -> anyhow::Result<Self> {
        if name.eq_ignore_ascii_case("local") {
            return Ok(ConfiguredZone::Local(ZoneProvider::local()));
        }
        let tz: chrono_tz::Tz = name
            .parse()
            .map_err(|e| anyhow::anyhow!("unknown timezone {name:?}: {e}"))?;
        Ok(ConfiguredZone::Named(ZoneProvider::new(tz)))
    }

    /// Today's date on this zone's wall clock.
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// The current wall-clock time in this zone.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            ConfiguredZone::Local(_) => chrono::Local::now().naive_local(),
            ConfiguredZone::Named(p) => Utc::now().with_timezone(p.zone()).naive_local(),
        }
    }
}

impl CivilTimeProvider for ConfiguredZone {
    fn civil_midnight_of(&self, date: NaiveDate) -> Result<DateTime<Utc>, SolarError> {
        match self {
            ConfiguredZone::Local(p) => p.civil_midnight_of(date),
            ConfiguredZone::Named(p) => p.civil_midnight_of(date),
        }
    }

    fn utc_to_civil(&self, instant: DateTime<Utc>) -> Result<NaiveDateTime, SolarError> {
        match self {
            ConfiguredZone::Local(p) => p.utc_to_civil(instant),
            ConfiguredZone::Named(p) => p.utc_to_civil(instant),
        }
    }
}
