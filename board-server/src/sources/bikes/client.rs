//! Bike-share feed HTTP client.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::TtlCache;
use crate::export::{DataPoint, LOCATION_TAG, ProviderFn};

use super::error::BikeError;
use super::types::{GbfsResponse, StationInformation, StationStatus, StationStatuses};

/// Default base URL for the bike-share feed.
const DEFAULT_BASE_URL: &str = "https://gbfs.lyft.com/gbfs/2.3/bkn/en";

/// Vehicle type ids in the feed's vehicle-type table.
const CLASSIC_BIKE_TYPE: &str = "1";
const EBIKE_TYPE: &str = "2";

/// Configuration for the bike-share client.
#[derive(Debug, Clone)]
pub struct BikeShareConfig {
    /// Base URL for the feed (override for testing)
    pub base_url: String,
    pub timeout_secs: u64,
}

impl BikeShareConfig {
    pub fn new() -> Self {
        Self {
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

impl Default for BikeShareConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Bikes available at one station, by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BikeCount {
    pub classics: i64,
    pub ebikes: i64,
}

/// Client for the bike-share feed.
///
/// Station information and station status are cached independently, each
/// for as long as its own envelope's `ttl` says. Station-name resolution is
/// memoized: names are stable, ids are not worth refetching.
pub struct BikeShareClient {
    http: reqwest::Client,
    base_url: String,
    information: Mutex<TtlCache<GbfsResponse<StationInformation>>>,
    status: Mutex<TtlCache<GbfsResponse<StationStatuses>>>,
    station_ids: StdMutex<HashMap<String, String>>,
}

impl BikeShareClient {
    /// Create a new bike-share client.
    pub fn new(config: BikeShareConfig) -> Result<Self, BikeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            information: Mutex::new(TtlCache::new()),
            status: Mutex::new(TtlCache::new()),
            station_ids: StdMutex::new(HashMap::new()),
        })
    }

    /// Station metadata, cached for the envelope's declared ttl.
    pub async fn station_information(
        &self,
    ) -> Result<Arc<GbfsResponse<StationInformation>>, BikeError> {
        let mut cache = self.information.lock().await;
        cache
            .get_or_fetch(|| async {
                let response = self
                    .get_json::<GbfsResponse<StationInformation>>("station_information.json")
                    .await?;
                let ttl = Duration::from_secs(response.ttl);
                Ok((response, ttl))
            })
            .await
    }

    /// Live station availability, cached for the envelope's declared ttl.
    pub async fn station_status(&self) -> Result<Arc<GbfsResponse<StationStatuses>>, BikeError> {
        let mut cache = self.status.lock().await;
        cache
            .get_or_fetch(|| async {
                let response = self
                    .get_json::<GbfsResponse<StationStatuses>>("station_status.json")
                    .await?;
                let ttl = Duration::from_secs(response.ttl);
                Ok((response, ttl))
            })
            .await
    }

    /// Resolve a station's feed id from its display name.
    ///
    /// Unlike stop-directory lookups this one is expected to succeed: a
    /// configured station name with no match is an error, not a zero value.
    pub async fn station_id(&self, name: &str) -> Result<String, BikeError> {
        if let Some(id) = self.station_ids.lock().unwrap().get(name) {
            return Ok(id.clone());
        }

        let information = self.station_information().await?;
        let mut ids = self.station_ids.lock().unwrap();
        for station in &information.data.stations {
            ids.insert(station.name.clone(), station.station_id.clone());
        }

        ids.get(name)
            .cloned()
            .ok_or_else(|| BikeError::StationNotFound(name.to_string()))
    }

    /// Classic and e-bike counts at the named station.
    pub async fn bikes_at_station(&self, name: &str) -> Result<BikeCount, BikeError> {
        let status = self.station_status().await?;
        let id = self.station_id(name).await?;

        let station = status
            .data
            .stations
            .iter()
            .find(|station| station.station_id == id)
            .ok_or_else(|| BikeError::StationNotFound(name.to_string()))?;

        let count = BikeCount {
            classics: count_bikes(station, CLASSIC_BIKE_TYPE),
            ebikes: count_bikes(station, EBIKE_TYPE),
        };
        debug!(station = name, ?count, "counted bikes");
        Ok(count)
    }

    /// Export provider reporting this station's bike counts.
    pub fn provider(self: &Arc<Self>, station_name: String) -> ProviderFn {
        let client = Arc::clone(self);
        Box::new(move || {
            let client = Arc::clone(&client);
            let station = station_name.clone();
            Box::pin(async move {
                let count = client.bikes_at_station(&station).await?;
                Ok(DataPoint::new("bike-share")
                    .with_tag(LOCATION_TAG, station)
                    .with_field("classics", count.classics)
                    .with_field("ebikes", count.ebikes))
            })
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, BikeError> {
        debug!(endpoint, "fetching bike-share feed");
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(BikeError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| BikeError::Json {
            message: e.to_string(),
        })
    }
}

fn count_bikes(station: &StationStatus, vehicle_type_id: &str) -> i64 {
    station
        .vehicle_types_available
        .iter()
        .find(|available| available.vehicle_type_id == vehicle_type_id)
        .map(|available| available.count)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::sources::bikes::types::VehicleTypeCount;

    fn station(counts: &[(&str, i64)]) -> StationStatus {
        StationStatus {
            station_id: "s1".to_string(),
            num_bikes_available: counts.iter().map(|(_, count)| count).sum(),
            vehicle_types_available: counts
                .iter()
                .map(|(vehicle_type_id, count)| VehicleTypeCount {
                    vehicle_type_id: vehicle_type_id.to_string(),
                    count: *count,
                })
                .collect(),
        }
    }

    #[test]
    fn count_bikes_by_type() {
        let station = station(&[("1", 7), ("2", 2)]);
        assert_eq!(count_bikes(&station, CLASSIC_BIKE_TYPE), 7);
        assert_eq!(count_bikes(&station, EBIKE_TYPE), 2);
    }

    #[test]
    fn count_bikes_missing_type_is_zero() {
        let station = station(&[("2", 2)]);
        assert_eq!(count_bikes(&station, CLASSIC_BIKE_TYPE), 0);
    }

    #[test]
    fn config_defaults() {
        let config = BikeShareConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
