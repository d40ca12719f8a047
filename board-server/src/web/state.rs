//! Application state for the web layer.

use std::sync::Arc;

use crate::sources::bikes::BikeShareClient;
use crate::sources::sensors::SensorClient;
use crate::sources::weather::WeatherClient;
use crate::transit::TransitClient;

/// Shared application state: every client the handlers derive from.
#[derive(Clone)]
pub struct AppState {
    pub transit: Arc<TransitClient>,
    pub weather: Arc<WeatherClient>,
    pub bikes: Arc<BikeShareClient>,
    pub sensors: Arc<SensorClient>,
}

impl AppState {
    pub fn new(
        transit: Arc<TransitClient>,
        weather: Arc<WeatherClient>,
        bikes: Arc<BikeShareClient>,
        sensors: Arc<SensorClient>,
    ) -> Self {
        Self {
            transit,
            weather,
            bikes,
            sensors,
        }
    }
}
