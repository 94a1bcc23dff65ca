//! Predictor that returns a fixed label

use std::path::Path;

use async_trait::async_trait;
use donation_core::{DonationResult, FreshnessPredictor};

/// Answers every image with the same label
#[derive(Debug, Clone)]
pub struct StaticPredictor {
    label: String,
}

impl StaticPredictor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl FreshnessPredictor for StaticPredictor {
    fn name(&self) -> &str {
        "static"
    }

    async fn predict(&self, image_path: &Path) -> DonationResult<String> {
        tracing::debug!(path = %image_path.display(), label = %self.label, "Static prediction");
        Ok(self.label.clone())
    }
}
