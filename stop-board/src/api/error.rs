//! Transit API error types.

/// Errors from talking to the transit API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (connection refused, reset, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned a non-success status without a recognised body
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The favourite being created already exists
    #[error("favourite already exists")]
    Conflict,

    /// Client could not be built from the given configuration
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Whether the request never produced a usable response: the transport
    /// failed or the body could not be decoded.
    pub fn is_network_or_parse(&self) -> bool {
        matches!(self, ApiError::Http(_) | ApiError::Json { .. })
    }
}
