//! Real-time transit telemetry.
//!
//! The upstream feed is a binary GTFS-realtime envelope published per line
//! group. This module covers the whole path from bytes to display state:
//!
//! - [`decode`] parses the envelope into typed [`FeedEntity`] values
//! - [`trips_at_stop`] derives upcoming arrivals for one stop
//! - [`line_state`] derives a whole line's station-by-station train map
//! - [`TransitClient`] fetches feeds over HTTP with a per-line TTL cache
//!   and composes the derivations
//!
//! Entities flagged deleted in the feed are retracted prior updates; they
//! are carried through decoding as [`FeedEntity::Deleted`] and skipped by
//! every derivation.

mod arrivals;
mod client;
mod decode;
mod entity;
mod error;
mod line;
mod line_state;

pub use arrivals::{StopUpdate, soonest, trips_at_stop};
pub use client::{TransitClient, TransitConfig};
pub use decode::{MalformedFeed, decode};
pub use entity::{Alert, FeedEntity, StopTimeUpdate, TripUpdate, VehiclePosition};
pub use error::TransitError;
pub use line::{TrainLine, UnknownLine};
pub use line_state::{
    GapSegment, LineSegment, LineState, StationSegment, TrainUpdate, line_state, stops_on_line,
    trains,
};
