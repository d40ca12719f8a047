//! Typed feed entities.
//!
//! The wire format distinguishes entity kinds by which optional field is
//! populated; decoding flattens that into one tagged union so consumers can
//! match exhaustively instead of probing for nulls.

/// One decoded unit of transit telemetry.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEntity {
    /// A scheduled vehicle's projected stop-by-stop times for one trip.
    Trip(TripUpdate),
    /// A single vehicle's current position relative to its next stop.
    Vehicle(VehiclePosition),
    /// A free-text service alert.
    Alert(Alert),
    /// Retraction of a previously published entity. Never appears in any
    /// derived output.
    Deleted,
}

/// Projected arrival/departure times for every remaining stop of one trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripUpdate {
    pub trip_id: String,
    /// In stop order; the final entry is the trip's destination.
    pub stop_times: Vec<StopTimeUpdate>,
}

/// One stop's entry within a trip update. Times are unix seconds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StopTimeUpdate {
    pub stop_id: String,
    pub arrival: Option<i64>,
    pub departure: Option<i64>,
}

/// A vehicle's next stop and whether it has already arrived there.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VehiclePosition {
    pub next_stop_id: String,
    /// True when the vehicle is stopped at `next_stop_id`, false while it
    /// is still in transit towards it.
    pub at_stop: bool,
}

/// A service alert's free-text description segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Alert {
    pub descriptions: Vec<String>,
}
