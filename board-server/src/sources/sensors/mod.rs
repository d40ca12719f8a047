//! Home sensor source.
//!
//! Reads device states from a home-automation REST API. Sensor readings
//! change continuously, so caching is disabled by default (ttl = 0, every
//! read refetches); the client still goes through the shared TTL cache so a
//! freshness window can be configured without touching call sites.

mod client;
mod error;
mod types;

pub use client::{SensorClient, SensorConfig};
pub use error::SensorError;
pub use types::{SensorAttributes, SensorState};
