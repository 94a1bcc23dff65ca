//! donation-core - Core traits and types for the food donation service
//!
//! This crate provides the submission model, the freshness predictor
//! abstraction, upload storage and the food inventory shared by the API
//! layer and the daemon.

pub mod error;
pub mod inventory;
pub mod models;
pub mod predictor;
pub mod storage;

pub use error::{DonationError, DonationResult};
pub use inventory::{ExpiryStatus, FoodItem, Inventory, InventoryStats, ItemInput, ItemView};
pub use models::{fields, DonationForm, DonationSubmission, UploadedImage};
pub use predictor::FreshnessPredictor;
pub use storage::{UploadDir, DEFAULT_UPLOAD_DIR};
