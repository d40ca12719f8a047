//! Environment-variable configuration.
//!
//! Every knob has a usable default so a bare `board-server` starts against
//! the public endpoints; keys and device ids come from the environment.
//! Parsing helpers are pure functions so they can be tested without
//! touching the process environment.

use std::path::PathBuf;
use std::time::Duration;

/// Error returned for unusable configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Coordinates were not `lat,lon`
    #[error("invalid coordinates: {0:?}")]
    InvalidCoordinates(String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port (`PORT`)
    pub port: u16,
    /// Stop reference table path (`STOP_DATA_PATH`)
    pub stop_data_path: PathBuf,
    /// Platform stops shown on the arrivals board (`BOARD_STOPS`)
    pub board_stops: Vec<String>,
    /// Bike stations to export (`BIKE_STATIONS`)
    pub bike_stations: Vec<String>,
    /// `lat,lon` for weather and pollution (`WEATHER_LOC`)
    pub weather_location: String,
    /// Weather API key (`WEATHER_API_KEY`)
    pub weather_api_key: String,
    /// Sensor API endpoint (`SENSOR_ENDPOINT`)
    pub sensor_endpoint: String,
    /// Sensor API bearer token (`SENSOR_API_KEY`)
    pub sensor_api_key: String,
    /// Sensor devices to export (`SENSOR_DEVICES`)
    pub sensor_devices: Vec<String>,
    /// Seconds between export cycles (`EXPORT_INTERVAL_SECS`)
    pub export_interval: Duration,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            port: parse_port(env("PORT"), 6556),
            stop_data_path: PathBuf::from(string_or(env("STOP_DATA_PATH"), "./data/stops.txt")),
            board_stops: parse_list(&string_or(env("BOARD_STOPS"), "L03S,G29N")),
            bike_stations: parse_list(&string_or(
                env("BIKE_STATIONS"),
                "Park Ave & E 42 St,Park Ave & E 41 St",
            )),
            weather_location: string_or(env("WEATHER_LOC"), "40.75261,-73.97728"),
            weather_api_key: string_or(env("WEATHER_API_KEY"), ""),
            sensor_endpoint: string_or(env("SENSOR_ENDPOINT"), "http://localhost:8123"),
            sensor_api_key: string_or(env("SENSOR_API_KEY"), ""),
            sensor_devices: parse_list(&string_or(env("SENSOR_DEVICES"), "")),
            export_interval: Duration::from_secs(parse_secs(env("EXPORT_INTERVAL_SECS"), 60)),
        }
    }

    /// The configured weather location as `(latitude, longitude)`.
    pub fn weather_coords(&self) -> Result<(f64, f64), ConfigError> {
        parse_coords(&self.weather_location)
    }
}

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn string_or(value: Option<String>, default: &str) -> String {
    value.unwrap_or_else(|| default.to_string())
}

fn parse_port(value: Option<String>, default: u16) -> u16 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn parse_secs(value: Option<String>, default: u64) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Split a comma-separated list, dropping empty entries.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `lat,lon` into a coordinate pair.
fn parse_coords(value: &str) -> Result<(f64, f64), ConfigError> {
    let invalid = || ConfigError::InvalidCoordinates(value.to_string());

    let mut parts = value.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let lat = lat.trim().parse().map_err(|_| invalid())?;
    let lon = lon.trim().parse().map_err(|_| invalid())?;
    Ok((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_splits_on_commas() {
        assert_eq!(
            parse_list("L03S,G29N"),
            vec!["L03S".to_string(), "G29N".to_string()]
        );
        assert_eq!(
            parse_list("Park Ave & E 42 St,Park Ave & E 41 St").len(),
            2
        );
    }

    #[test]
    fn empty_list_is_empty() {
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn coords_parse() {
        assert_eq!(
            parse_coords("40.75261,-73.97728"),
            Ok((40.75261, -73.97728))
        );
        assert_eq!(parse_coords("40.75, -73.97"), Ok((40.75, -73.97)));
    }

    #[test]
    fn bad_coords_are_rejected() {
        assert!(parse_coords("").is_err());
        assert!(parse_coords("40.75").is_err());
        assert!(parse_coords("40.75,-73.97,12").is_err());
        assert!(parse_coords("north,west").is_err());
    }

    #[test]
    fn numeric_fallbacks() {
        assert_eq!(parse_port(None, 6556), 6556);
        assert_eq!(parse_port(Some("8080".to_string()), 6556), 8080);
        assert_eq!(parse_port(Some("not a port".to_string()), 6556), 6556);
        assert_eq!(parse_secs(Some("300".to_string()), 60), 300);
        assert_eq!(parse_secs(Some("-1".to_string()), 60), 60);
    }
}
