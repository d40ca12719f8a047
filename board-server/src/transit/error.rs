//! Transit client error types.

use super::decode::MalformedFeed;

/// Errors from fetching or decoding a realtime transit feed.
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed endpoint answered with an error status
    #[error("feed endpoint returned status {status}")]
    Status { status: u16 },

    /// Payload was not a valid feed envelope
    #[error(transparent)]
    Malformed(#[from] MalformedFeed),

    /// No feed is mapped for the given stop id
    #[error("no feed is mapped for stop {0:?}")]
    UnknownStop(String),
}
