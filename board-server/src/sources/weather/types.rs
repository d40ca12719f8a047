//! Weather API response types.
//!
//! Minimal DTOs for the one-call weather and air-pollution endpoints: only
//! the fields the display derivations and exports consume.

use serde::Deserialize;

/// One-call weather response.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherData {
    pub current: Current,
    /// Today first, then the forecast days.
    #[serde(default)]
    pub daily: Vec<Daily>,
}

/// Current conditions.
#[derive(Debug, Clone, Deserialize)]
pub struct Current {
    /// Observation time, unix seconds.
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temp: f64,
    #[serde(default)]
    pub humidity: i64,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

/// One forecast day.
#[derive(Debug, Clone, Deserialize)]
pub struct Daily {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    /// 0 = new moon, 0.5 = full, 1 = new again.
    #[serde(default)]
    pub moon_phase: f64,
    pub temp: DailyTemp,
    /// Probability of precipitation, 0..=1.
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyTemp {
    pub min: f64,
    pub max: f64,
}

/// Weather condition descriptor; `id` selects the display icon.
#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub id: i64,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// Air pollution response.
#[derive(Debug, Clone, Deserialize)]
pub struct PollutionData {
    #[serde(rename = "list", default)]
    pub samples: Vec<PollutionSample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollutionSample {
    pub dt: i64,
    pub components: PollutionComponents,
}

/// Measured pollutant concentrations in µg/m³.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PollutionComponents {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
}
