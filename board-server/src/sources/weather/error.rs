//! Weather client error types.

/// Errors from the weather and pollution endpoints.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with an error status
    #[error("weather endpoint returned status {status}")]
    Status { status: u16 },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
