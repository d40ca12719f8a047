//! Sensor client error types.

/// Errors from the home sensor API.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with an error status
    #[error("sensor endpoint returned status {status}")]
    Status { status: u16 },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
