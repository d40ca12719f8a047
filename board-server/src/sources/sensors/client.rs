//! Home sensor API HTTP client.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::export::{DataPoint, FieldValue, LOCATION_TAG, ProviderFn};

use super::error::SensorError;
use super::types::SensorState;

/// Configuration for the sensor client.
#[derive(Debug, Clone)]
pub struct SensorConfig {
    /// Base URL of the sensor API, e.g. `http://localhost:8123`
    pub endpoint: String,
    /// Bearer token
    pub api_key: String,
    /// Freshness window for cached readings. Zero (the default) disables
    /// caching: every read refetches.
    pub state_ttl: Duration,
    pub timeout_secs: u64,
}

impl SensorConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            state_ttl: Duration::ZERO,
            timeout_secs: 30,
        }
    }

    /// Enable caching of readings for the given window.
    pub fn with_state_ttl(mut self, ttl: Duration) -> Self {
        self.state_ttl = ttl;
        self
    }
}

/// Client for the home sensor API.
///
/// Keeps one cache slot per device, plus the previous observation of each
/// device so displays can show whether a reading is trending up or down.
pub struct SensorClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    state_ttl: Duration,
    states: Mutex<HashMap<String, TtlCache<SensorState>>>,
    previous: StdMutex<HashMap<String, Arc<SensorState>>>,
}

impl SensorClient {
    /// Create a new sensor client.
    pub fn new(config: SensorConfig) -> Result<Self, SensorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            api_key: config.api_key,
            state_ttl: config.state_ttl,
            states: Mutex::new(HashMap::new()),
            previous: StdMutex::new(HashMap::new()),
        })
    }

    /// The device's current state.
    ///
    /// When the fetch replaces an older reading, that reading is retained
    /// and stays available via [`previous`](Self::previous).
    pub async fn state(&self, device_id: &str) -> Result<Arc<SensorState>, SensorError> {
        let mut states = self.states.lock().await;
        let cache = states.entry(device_id.to_string()).or_default();

        let prior = cache.last();
        let state = cache
            .get_or_fetch(|| async {
                debug!(device_id, "fetching sensor state");
                let url = format!("{}/api/states/{}", self.endpoint, device_id);

                let response = self
                    .http
                    .get(&url)
                    .bearer_auth(&self.api_key)
                    .send()
                    .await?;
                let status = response.status();
                if status.as_u16() >= 400 {
                    return Err(SensorError::Status {
                        status: status.as_u16(),
                    });
                }

                let body = response.text().await?;
                let state: SensorState =
                    serde_json::from_str(&body).map_err(|e| SensorError::Json {
                        message: e.to_string(),
                    })?;
                Ok((state, self.state_ttl))
            })
            .await?;

        if let Some(prior) = prior {
            if !Arc::ptr_eq(&prior, &state) {
                self.previous
                    .lock()
                    .unwrap()
                    .insert(device_id.to_string(), prior);
            }
        }

        Ok(state)
    }

    /// The reading that preceded the current one, if any.
    pub fn previous(&self, device_id: &str) -> Option<Arc<SensorState>> {
        self.previous.lock().unwrap().get(device_id).cloned()
    }

    /// Export provider reporting every listed device's state as one point.
    ///
    /// A device that fails to read is skipped with a warning; the point
    /// still carries whatever the other devices reported.
    pub fn provider(self: &Arc<Self>, device_ids: Vec<String>) -> ProviderFn {
        let client = Arc::clone(self);
        Box::new(move || {
            let client = Arc::clone(&client);
            let device_ids = device_ids.clone();
            Box::pin(async move {
                let mut point = DataPoint::new("home-sensors").with_tag(LOCATION_TAG, "home");
                for device_id in &device_ids {
                    match client.state(device_id).await {
                        Ok(state) => {
                            let name = if state.attributes.friendly_name.is_empty() {
                                state.entity_id.clone()
                            } else {
                                state.attributes.friendly_name.clone()
                            };
                            point = point.with_field(name, FieldValue::Text(state.state.clone()));
                        }
                        Err(err) => {
                            warn!(device_id, error = %err, "failed to capture device state");
                        }
                    }
                }
                Ok(point)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_caching_disabled() {
        let config = SensorConfig::new("http://localhost:8123", "token");
        assert_eq!(config.state_ttl, Duration::ZERO);
    }

    #[test]
    fn config_can_enable_caching() {
        let config = SensorConfig::new("http://localhost:8123", "token")
            .with_state_ttl(Duration::from_secs(30));
        assert_eq!(config.state_ttl, Duration::from_secs(30));
    }

    #[test]
    fn previous_starts_empty() {
        let client = SensorClient::new(SensorConfig::new("http://localhost:8123", "token")).unwrap();
        assert!(client.previous("sensor.outdoor_temperature").is_none());
    }
}
