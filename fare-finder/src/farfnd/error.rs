//! Fare finder client error types.

/// Errors from a single `roundTripFares` request.
#[derive(Debug, thiserror::Error)]
pub enum FarfndError {
    /// HTTP request failed (connection refused, DNS, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by fare API")]
    RateLimited,

    /// Response body did not have the expected shape
    #[error(
        "unexpected response shape: {message}{}",
        body.as_deref().map(|b| format!(" (body: {b})")).unwrap_or_default()
    )]
    UnexpectedShape {
        message: String,
        body: Option<String>,
    },

    /// Client could not be set up
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl FarfndError {
    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FarfndError::Status { status, .. } => Some(*status),
            FarfndError::RateLimited => Some(429),
            FarfndError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the response arrived but could not be understood.
    pub fn is_unexpected_shape(&self) -> bool {
        matches!(self, FarfndError::UnexpectedShape { .. })
    }
}
