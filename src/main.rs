//! # Sun Trigger Command Line
//!
//! Prints the local sunrise and sunset minute for a date and place, or checks
//! whether a given local minute is one of them (exit status 0 on a match, 1
//! otherwise), so shell schedulers can gate jobs on it.
//!
//! ```text
//! sun-trigger 2004 11 28 --lat 39.95 --lon -75.15 --tz America/New_York
//! sun-trigger --check 07:00
//! ```
//!
//! Location and timezone default to `sun-config.toml`; the date defaults to today
//! in that timezone. Set `RUST_LOG=debug` (or pass `-v`) to see the solver passes.

use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use sun_trigger_lib::civil::CivilTimeProvider;
use sun_trigger_lib::config::{Config, ConfiguredZone};
use sun_trigger_lib::matcher::SolarMatcher;
use sun_trigger_lib::{GeoCoordinate, MinuteMatch, SolarError, SolarEventKind};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sun-trigger")]
#[command(about = "Sunrise and sunset minutes for solar-anchored schedules")]
#[command(version)]
struct Cli {
    /// Year of the date to compute (defaults to today)
    year: Option<i32>,

    /// Month, 1-12
    month: Option<u32>,

    /// Day of month
    day: Option<u32>,

    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude in degrees, east positive (Philadelphia is -75.15)
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// IANA timezone name, or "local"
    #[arg(long)]
    tz: Option<String>,

    /// Configuration file (defaults to sun-config.toml in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Check whether this local minute (HH:MM) is sunrise or sunset
    #[arg(long, value_parser = parse_minute)]
    check: Option<NaiveTime>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_minute(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM, got {s:?}: {e}"))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_date(cli: &Cli, zone: &ConfiguredZone) -> anyhow::Result<NaiveDate> {
    match (cli.year, cli.month, cli.day) {
        (Some(y), Some(m), Some(d)) => {
            NaiveDate::from_ymd_opt(y, m, d).with_context(|| format!("{y}-{m}-{d} is not a date"))
        }
        (None, None, None) => Ok(zone.today()),
        _ => bail!("give year, month and day together, or none of them"),
    }
}

fn resolve_coordinate(cli: &Cli, config: &Config) -> anyhow::Result<GeoCoordinate> {
    let latitude = cli.lat.unwrap_or(config.location.latitude);
    let longitude = cli.lon.unwrap_or(config.location.longitude);
    Ok(GeoCoordinate::new(latitude, longitude)?)
}

/// Evaluate both events for one local minute, sunrise first.
fn check_minute<P: CivilTimeProvider>(
    matcher: &SolarMatcher<P>,
    local: NaiveDateTime,
    coord: GeoCoordinate,
) -> anyhow::Result<Vec<(SolarEventKind, MinuteMatch)>> {
    SolarEventKind::ALL
        .into_iter()
        .map(|kind| -> anyhow::Result<_> {
            let outcome = matcher
                .matches_event(local, coord, kind)
                .with_context(|| format!("checking {kind} at {local}"))?;
            Ok((kind, outcome))
        })
        .collect()
}

/// Main application entry point.
fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    let zone = match &cli.tz {
        Some(name) => ConfiguredZone::parse(name)?,
        None => config.zone()?,
    };
    let matcher = SolarMatcher::new(zone);
    let date = resolve_date(&cli, matcher.provider())?;
    let coord = resolve_coordinate(&cli, &config)?;
    debug!(%date, %coord, zone = ?matcher.provider(), "resolved inputs");

    if let Some(minute) = cli.check {
        let mut matched = false;
        for (kind, outcome) in check_minute(&matcher, date.and_time(minute), coord)? {
            match outcome {
                MinuteMatch::Match => {
                    println!("{kind}");
                    matched = true;
                }
                MinuteMatch::NoMatch => {}
                MinuteMatch::NoSolarEvent(condition) => println!("no {kind} ({condition})"),
            }
        }
        return Ok(if matched {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    println!("{date}  {coord}");
    for kind in SolarEventKind::ALL {
        match matcher.local_event_time(date, coord, kind) {
            Ok(at) => println!("{kind:<8} {}", at.format(&config.output.time_format)),
            Err(SolarError::NoSolarEvent(condition)) => println!("{kind:<8} none ({condition})"),
            Err(e) => return Err(e).with_context(|| format!("computing {kind} for {date}")),
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use sun_trigger_lib::civil::ZoneProvider;
    use sun_trigger_lib::PolarCondition;

    fn est() -> SolarMatcher<ZoneProvider<FixedOffset>> {
        SolarMatcher::new(ZoneProvider::new(FixedOffset::west_opt(5 * 3600).unwrap()))
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_minute() {
        assert_eq!(
            parse_minute("07:05").unwrap(),
            NaiveTime::from_hms_opt(7, 5, 0).unwrap()
        );
        assert!(parse_minute("7").is_err());
        assert!(parse_minute("25:00").is_err());
    }

    #[test]
    fn test_cli_accepts_negative_longitude() {
        let cli = Cli::try_parse_from([
            "sun-trigger",
            "2004",
            "11",
            "28",
            "--lat",
            "39.95",
            "--lon",
            "-75.15",
        ])
        .unwrap();
        assert_eq!(cli.year, Some(2004));
        assert_eq!(cli.lon, Some(-75.15));
        assert!(cli.check.is_none());
    }

    #[test]
    fn test_partial_date_is_rejected() {
        let cli = Cli::try_parse_from(["sun-trigger", "2004", "11"]).unwrap();
        let zone = ConfiguredZone::parse("UTC").unwrap();
        assert!(resolve_date(&cli, &zone).is_err());
    }

    #[test]
    fn test_cli_overrides_config_location() {
        let cli =
            Cli::try_parse_from(["sun-trigger", "--lat", "-33.87", "--lon", "151.21"]).unwrap();
        let coord = resolve_coordinate(&cli, &Config::default()).unwrap();
        assert_eq!(coord.latitude, -33.87);
        assert_eq!(coord.longitude, 151.21);

        let cli = Cli::try_parse_from(["sun-trigger"]).unwrap();
        let coord = resolve_coordinate(&cli, &Config::default()).unwrap();
        assert_eq!(coord.longitude, -75.15);
    }

    #[test]
    fn test_check_minute_reports_sunrise() {
        let philly = GeoCoordinate::new(39.95, -75.15).unwrap();
        let outcomes = check_minute(&est(), at(2004, 11, 28, 7, 0), philly).unwrap();
        assert_eq!(
            outcomes,
            vec![
                (SolarEventKind::Sunrise, MinuteMatch::Match),
                (SolarEventKind::Sunset, MinuteMatch::NoMatch),
            ]
        );
    }

    #[test]
    fn test_check_minute_at_noon_matches_nothing() {
        let philly = GeoCoordinate::new(39.95, -75.15).unwrap();
        let outcomes = check_minute(&est(), at(2004, 11, 28, 12, 0), philly).unwrap();
        assert!(outcomes.iter().all(|(_, o)| *o == MinuteMatch::NoMatch));
    }

    #[test]
    fn test_check_minute_in_polar_night() {
        let arctic = GeoCoordinate::new(85.0, 0.0).unwrap();
        let outcomes = check_minute(&est(), at(2024, 12, 21, 12, 0), arctic).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes
            .iter()
            .all(|(_, o)| *o == MinuteMatch::NoSolarEvent(PolarCondition::PolarNight)));
        assert!(!outcomes.iter().any(|(_, o)| o.is_match()));
    }

    #[test]
    fn test_config_flag_is_optional() {
        let cli = Cli::try_parse_from(["sun-trigger"]).unwrap();
        assert!(cli.config.is_none());
        let cli = Cli::try_parse_from(["sun-trigger", "--config", "/etc/sun.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/sun.toml")));
    }
}
