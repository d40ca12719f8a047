//! Transit display and export server.
//!
//! Ingests realtime transit telemetry and external sensor sources, derives
//! point-in-time display state (arrivals boards, whole-line train maps,
//! sky and air-quality readouts), and periodically exports tagged snapshot
//! records to registered sinks.

pub mod aqi;
pub mod cache;
pub mod config;
pub mod export;
pub mod sky;
pub mod sources;
pub mod stops;
pub mod transit;
pub mod web;
