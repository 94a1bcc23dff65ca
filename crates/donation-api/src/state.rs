//! Application state for the donation API

use std::sync::Arc;

use donation_core::{FreshnessPredictor, Inventory, UploadDir};

/// Default maximum request body size (16 MiB)
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Form page served when no custom template is configured
pub const DEFAULT_FORM_PAGE: &str = include_str!("../templates/donate.html");

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where submitted images are stored
    uploads: Arc<UploadDir>,
    /// External freshness classifier
    predictor: Arc<dyn FreshnessPredictor>,
    /// Tracked food items
    inventory: Arc<Inventory>,
    /// HTML served on GET /donate
    form_page: Arc<str>,
    /// Maximum accepted request body size in bytes
    body_limit: usize,
}

impl AppState {
    /// Create a new AppState with an empty inventory, the default form page
    /// and the default body limit
    pub fn new(uploads: UploadDir, predictor: Arc<dyn FreshnessPredictor>) -> Self {
        Self {
            uploads: Arc::new(uploads),
            predictor,
            inventory: Arc::new(Inventory::new()),
            form_page: Arc::from(DEFAULT_FORM_PAGE),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Replace the HTML served for the donation form
    pub fn with_form_page(mut self, html: impl Into<Arc<str>>) -> Self {
        self.form_page = html.into();
        self
    }

    /// Set the maximum request body size
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Get the upload directory
    pub fn uploads(&self) -> &UploadDir {
        &self.uploads
    }

    /// Get the freshness predictor
    pub fn predictor(&self) -> &dyn FreshnessPredictor {
        self.predictor.as_ref()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Get the donation form HTML
    pub fn form_page(&self) -> &str {
        &self.form_page
    }

    pub fn body_limit(&self) -> usize {
        self.body_limit
    }
}
