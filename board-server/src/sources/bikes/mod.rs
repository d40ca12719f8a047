//! Bike-share availability source.
//!
//! Speaks the open bike-share feed protocol: a JSON envelope whose `ttl`
//! field declares how long the payload stays fresh. The upstream source is
//! the record of truth for its own cache lifetime.

mod client;
mod error;
mod types;

pub use client::{BikeCount, BikeShareClient, BikeShareConfig};
pub use error::BikeError;
pub use types::{
    GbfsResponse, StationInfo, StationInformation, StationStatus, StationStatuses,
    VehicleTypeCount,
};
