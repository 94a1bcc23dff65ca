//! Common error types for donation handling

use std::path::PathBuf;

use thiserror::Error;

/// Result type for donation operations
pub type DonationResult<T> = Result<T, DonationError>;

/// Errors that can occur while accepting a donation
#[derive(Debug, Error)]
pub enum DonationError {
    /// A required form field was not part of the submission
    #[error("Missing form field: {0}")]
    MissingField(String),

    /// The client-supplied image filename cannot be used as a file name
    #[error("Invalid image filename: {0:?}")]
    InvalidFilename(String),

    /// The request body could not be parsed as a form
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Writing to the upload directory failed
    #[error("Storage error at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The freshness predictor failed or returned an unusable answer
    #[error("Freshness prediction failed: {0}")]
    Predictor(String),

    /// The freshness predictor did not answer in time
    #[error("Freshness prediction timed out")]
    PredictorTimeout,

    /// No inventory item has the given id
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// An inventory item was submitted with unusable values
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DonationError {
    /// Returns the HTTP status code for this error
    ///
    /// A missing field is a server error: submissions are not validated and
    /// an incomplete one fails the request outright.
    pub fn status_code(&self) -> u16 {
        match self {
            DonationError::MissingField(_) => 500,
            DonationError::InvalidFilename(_) => 400,
            DonationError::MalformedRequest(_) => 400,
            DonationError::Storage { .. } => 500,
            DonationError::Predictor(_) => 502,
            DonationError::PredictorTimeout => 504,
            DonationError::ItemNotFound(_) => 404,
            DonationError::InvalidItem(_) => 400,
            DonationError::Internal(_) => 500,
        }
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DonationError::Storage {
            path: path.into(),
            source,
        }
    }
}
