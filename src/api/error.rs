//! Error types for the episode API and the display formatter

/// Result type alias for episode API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// A raw episode field that could not be turned into its display form
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    #[error("invalid publish date {0:?}")]
    InvalidDate(String),

    #[error("invalid duration {0:?}")]
    InvalidDuration(String),
}

/// Errors that can occur while generating page data from the episode API.
///
/// Transport errors are kept as strings so results can be cloned out of
/// Dioxus resources.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// HTTP request could not be sent or the body could not be read
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// API answered with a non-success status
    #[error("API returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// Body was not the expected JSON
    #[error("JSON decoding failed: {0}")]
    Decode(String),

    /// A record could not be formatted for display
    #[error("episode {id} could not be formatted: {source}")]
    Format {
        id: String,
        #[source]
        source: FormatError,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Request(err.to_string())
        }
    }
}
