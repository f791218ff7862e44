use thiserror::Error;

/// Errors surfaced by the telemetry service client.
///
/// Read paths convert every variant into fallback data at the client
/// boundary; the submission path propagates them unchanged so callers can
/// present transport failures and malformed responses differently.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or connection failure before a usable response arrived.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success status code.
    #[error("server returned status {status}")]
    Server { status: u16 },

    /// The response body does not match the endpoint schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Server {
                status: status.as_u16(),
            }
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
