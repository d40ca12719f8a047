//! External sensor and metric sources.
//!
//! Each source gets its own client with its own error type and its own TTL
//! cache slots. Freshness windows differ by source: weather and pollution
//! use fixed constants, the bike-share feed declares its own ttl in the
//! payload, and home sensors disable caching entirely.

pub mod bikes;
pub mod sensors;
pub mod weather;
