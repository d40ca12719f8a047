//! Bike-share feed response types.

use serde::Deserialize;

/// The feed envelope wrapping every endpoint's payload.
#[derive(Debug, Clone, Deserialize)]
pub struct GbfsResponse<T> {
    /// Publication time, unix seconds.
    pub last_updated: i64,
    /// How many seconds the payload stays fresh.
    pub ttl: u64,
    pub data: T,
}

/// Static station metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInformation {
    pub stations: Vec<StationInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationInfo {
    pub station_id: String,
    pub name: String,
}

/// Live station availability.
#[derive(Debug, Clone, Deserialize)]
pub struct StationStatuses {
    pub stations: Vec<StationStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationStatus {
    pub station_id: String,
    #[serde(default)]
    pub num_bikes_available: i64,
    #[serde(default)]
    pub vehicle_types_available: Vec<VehicleTypeCount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleTypeCount {
    pub vehicle_type_id: String,
    pub count: i64,
}
