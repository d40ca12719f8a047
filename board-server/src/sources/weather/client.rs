//! Weather API HTTP client.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::TtlCache;

use super::error::WeatherError;
use super::types::{PollutionData, WeatherData};

/// Default base URL for the weather service.
const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Units requested from the weather endpoint.
const DEFAULT_UNITS: &str = "imperial";

/// Weather moves slowly enough that five minutes of staleness is fine.
pub const WEATHER_TTL: Duration = Duration::from_secs(5 * 60);

/// Pollution data updates hourly upstream.
pub const POLLUTION_TTL: Duration = Duration::from_secs(60 * 60);

/// Configuration for the weather client.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Base URL for the API (override for testing)
    pub base_url: String,
    pub timeout_secs: u64,
}

impl WeatherConfig {
    pub fn new(api_key: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            api_key: api_key.into(),
            latitude,
            longitude,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the weather and air pollution endpoints.
///
/// Each endpoint has its own TTL cache slot, so a pollution fetch never
/// invalidates cached weather and vice versa.
pub struct WeatherClient {
    http: reqwest::Client,
    config: WeatherConfig,
    weather: Mutex<TtlCache<WeatherData>>,
    pollution: Mutex<TtlCache<PollutionData>>,
}

impl WeatherClient {
    /// Create a new weather client.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config,
            weather: Mutex::new(TtlCache::new()),
            pollution: Mutex::new(TtlCache::new()),
        })
    }

    /// Current conditions and daily forecast, cached for [`WEATHER_TTL`].
    pub async fn weather(&self) -> Result<Arc<WeatherData>, WeatherError> {
        let mut cache = self.weather.lock().await;
        cache
            .get_or_fetch(|| async {
                debug!("fetching weather");
                let url = format!(
                    "{}/data/3.0/onecall?lat={}&lon={}&appid={}&units={}",
                    self.config.base_url,
                    self.config.latitude,
                    self.config.longitude,
                    self.config.api_key,
                    DEFAULT_UNITS,
                );
                let data = self.get_json::<WeatherData>(&url).await?;
                Ok((data, WEATHER_TTL))
            })
            .await
    }

    /// Latest pollution sample, cached for [`POLLUTION_TTL`].
    pub async fn pollution(&self) -> Result<Arc<PollutionData>, WeatherError> {
        let mut cache = self.pollution.lock().await;
        cache
            .get_or_fetch(|| async {
                debug!("fetching pollution");
                let url = format!(
                    "{}/data/2.5/air_pollution?lat={}&lon={}&appid={}",
                    self.config.base_url,
                    self.config.latitude,
                    self.config.longitude,
                    self.config.api_key,
                );
                let data = self.get_json::<PollutionData>(&url).await?;
                Ok((data, POLLUTION_TTL))
            })
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(WeatherError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Json {
            message: e.to_string(),
        })
    }
}
