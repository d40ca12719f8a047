//! Sensor API response types.

use serde::Deserialize;

/// One device's reported state.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorState {
    pub entity_id: String,
    /// The reading, as the upstream reports it (numeric sensors report a
    /// decimal string).
    pub state: String,
    #[serde(default)]
    pub attributes: SensorAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorAttributes {
    #[serde(default, rename = "unit_of_measurement")]
    pub unit: String,
    #[serde(default)]
    pub friendly_name: String,
}
