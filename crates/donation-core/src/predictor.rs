//! FreshnessPredictor trait - the seam to the external freshness classifier

use std::path::Path;

use async_trait::async_trait;

use crate::error::DonationResult;

/// Classifies a stored food image into a short freshness label
/// (e.g. "fresh", "stale").
///
/// The label is passed through to the donor unchanged, so implementations
/// are responsible for any cleanup of the raw classifier output.
#[async_trait]
pub trait FreshnessPredictor: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Predict the freshness of the image stored at `image_path`
    async fn predict(&self, image_path: &Path) -> DonationResult<String>;
}
