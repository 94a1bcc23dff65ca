//! API error types and conversions

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use donation_core::DonationError;
use serde::Serialize;

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// 413 Payload Too Large
    PayloadTooLarge(String),
    /// 502 Bad Gateway (freshness predictor failed)
    BadGateway(String),
    /// 504 Gateway Timeout
    GatewayTimeout(String),
    /// 500 Internal Server Error
    Internal(String),
}

/// Standard error response format
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", msg)
            }
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg),
            ApiError::GatewayTimeout(msg) => (StatusCode::GATEWAY_TIMEOUT, "gateway_timeout", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(error = error_type, %message, "API error");
        } else if status.is_client_error() {
            tracing::debug!(error = error_type, %message, "API client error");
        }

        let body = Json(ErrorResponse {
            success: false,
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<DonationError> for ApiError {
    fn from(err: DonationError) -> Self {
        let message = err.to_string();
        match err {
            // Incomplete submissions fail the request rather than being
            // reported back as validation errors
            DonationError::MissingField(_) => ApiError::Internal(message),
            DonationError::InvalidFilename(_) => ApiError::BadRequest(message),
            DonationError::MalformedRequest(_) => ApiError::BadRequest(message),
            DonationError::Storage { .. } => ApiError::Internal(message),
            DonationError::Predictor(_) => ApiError::BadGateway(message),
            DonationError::PredictorTimeout => ApiError::GatewayTimeout(message),
            DonationError::ItemNotFound(_) => ApiError::NotFound(message),
            DonationError::InvalidItem(_) => ApiError::BadRequest(message),
            DonationError::Internal(_) => ApiError::Internal(message),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            DonationError::MalformedRequest(err.body_text()).into()
        }
    }
}
