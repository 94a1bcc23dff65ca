//! Error types for donation client operations

use thiserror::Error;

/// Result type alias for donation client operations
pub type Result<T> = std::result::Result<T, DonationClientError>;

/// Errors returned by [`DonationClient`](crate::DonationClient)
#[derive(Error, Debug)]
pub enum DonationClientError {
    /// The request could not be sent or the response could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl DonationClientError {
    /// HTTP status returned by the server, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) => None,
        }
    }
}
