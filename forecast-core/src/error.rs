use thiserror::Error;

/// Faults surfaced by the client and the response model.
///
/// A field missing from a response is never one of these; accessors report
/// it as `None`.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Client is missing something it needs before it can fetch.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The HTTP collaborator failed (connection error or non-2xx status).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("Could not retrieve weather forecast: {0}")]
    Parse(#[from] serde_json::Error),

    /// Caller asked for an accessor that does not exist.
    #[error("Unsupported accessor: {0}")]
    Usage(String),

    /// A stock cache backend failed to read or write an entry.
    #[error("Cache error: {0}")]
    Cache(String),
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        ForecastError::Transport(err.to_string())
    }
}

pub type Result<T, E = ForecastError> = std::result::Result<T, E>;
