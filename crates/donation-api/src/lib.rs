//! donation-api - Donation REST API layer
//!
//! This crate provides the HTTP surface of the donation service: the
//! donation form and the JSON food inventory API under `/api`. It is
//! independent of the concrete freshness predictor, which is injected
//! through [`AppState`].
//!
//! # Usage
//!
//! ```ignore
//! use donation_api::{create_router, AppState};
//! use donation_core::UploadDir;
//! use donation_predictor::StaticPredictor;
//!
//! let uploads = UploadDir::new("static/uploads");
//! uploads.ensure()?;
//! let state = AppState::new(uploads, Arc::new(StaticPredictor::new("fresh")));
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::{AppState, DEFAULT_BODY_LIMIT, DEFAULT_FORM_PAGE};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the donation router with the given application state
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.body_limit();

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Donation form and submission
        .route(
            "/donate",
            get(handlers::donate::donation_form).post(handlers::donate::submit_donation),
        )
        // Food inventory
        .route(
            "/api/items",
            get(handlers::items::list_items).post(handlers::items::create_item),
        )
        .route(
            "/api/items/{id}",
            get(handlers::items::get_item)
                .put(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        )
        .route("/api/items/{id}/consume", patch(handlers::items::consume_item))
        .route("/api/stats", get(handlers::items::inventory_stats))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
