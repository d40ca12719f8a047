//! Weather and air pollution source.

mod client;
mod error;
mod types;

pub use client::{POLLUTION_TTL, WEATHER_TTL, WeatherClient, WeatherConfig};
pub use error::WeatherError;
pub use types::{
    Condition, Current, Daily, DailyTemp, PollutionComponents, PollutionData, PollutionSample,
    WeatherData,
};
