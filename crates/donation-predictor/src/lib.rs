//! donation-predictor - Freshness predictor implementations
//!
//! Provides [`FreshnessPredictor`] backends selected by configuration:
//!
//! - [`StaticPredictor`] - answers every image with a fixed label
//! - [`CommandPredictor`] - runs an external program with the image path
//! - [`HttpPredictor`] - asks a remote classifier service
//!
//! # Usage
//!
//! ```ignore
//! use donation_predictor::{build_predictor, PredictorConfig};
//!
//! let predictor = build_predictor(&PredictorConfig::default())?;
//! let label = predictor.predict(Path::new("static/uploads/apple.jpg")).await?;
//! ```

pub mod command;
pub mod config;
pub mod http;
pub mod static_label;

use std::sync::Arc;

pub use command::CommandPredictor;
pub use config::{CommandConfig, HttpConfig, PredictorConfig, StaticConfig};
pub use donation_core::{DonationError, DonationResult, FreshnessPredictor};
pub use http::HttpPredictor;
pub use static_label::StaticPredictor;

/// Create the predictor described by `config`
pub fn build_predictor(config: &PredictorConfig) -> DonationResult<Arc<dyn FreshnessPredictor>> {
    let predictor: Arc<dyn FreshnessPredictor> = match config {
        PredictorConfig::Static(cfg) => Arc::new(StaticPredictor::new(&cfg.label)),
        PredictorConfig::Command(cfg) => Arc::new(CommandPredictor::from_config(cfg)?),
        PredictorConfig::Http(cfg) => Arc::new(HttpPredictor::from_config(cfg)?),
    };

    tracing::info!(predictor = predictor.name(), "Freshness predictor configured");
    Ok(predictor)
}
