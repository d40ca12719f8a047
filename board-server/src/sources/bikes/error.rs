//! Bike-share client error types.

/// Errors from the bike-share feed.
#[derive(Debug, thiserror::Error)]
pub enum BikeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with an error status
    #[error("bike-share endpoint returned status {status}")]
    Status { status: u16 },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A configured station name has no match in the feed
    #[error("bike station not found: {0:?}")]
    StationNotFound(String),
}
