//! Predictor backed by a remote classifier service
//!
//! Sends `POST <url>` with `{"image_path": "<path>"}` and expects
//! `{"label": "<text>"}` back.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use donation_core::{DonationError, DonationResult, FreshnessPredictor};
use serde::{Deserialize, Serialize};

use crate::config::HttpConfig;

#[derive(Serialize)]
struct PredictRequest<'a> {
    image_path: &'a str,
}

#[derive(Deserialize)]
struct PredictResponse {
    label: String,
}

/// Asks a remote HTTP service to classify each image
pub struct HttpPredictor {
    client: reqwest::Client,
    url: String,
    auth_token: Option<String>,
}

impl HttpPredictor {
    pub fn new(url: impl Into<String>, timeout: Duration) -> DonationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DonationError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            auth_token: None,
        })
    }

    pub fn from_config(config: &HttpConfig) -> DonationResult<Self> {
        let mut predictor = Self::new(config.url.clone(), Duration::from_millis(config.timeout_ms))?;
        predictor.auth_token = config.auth_token.clone();
        Ok(predictor)
    }

    fn map_send_error(&self, err: reqwest::Error) -> DonationError {
        if err.is_timeout() {
            tracing::warn!(url = %self.url, "Freshness service timed out");
            DonationError::PredictorTimeout
        } else {
            DonationError::Predictor(format!("Request to {} failed: {}", self.url, err))
        }
    }
}

#[async_trait]
impl FreshnessPredictor for HttpPredictor {
    fn name(&self) -> &str {
        "http"
    }

    async fn predict(&self, image_path: &Path) -> DonationResult<String> {
        let path = image_path.to_string_lossy();
        let mut request = self
            .client
            .post(&self.url)
            .json(&PredictRequest { image_path: &path });
        if let Some(ref token) = self.auth_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(url = %self.url, path = %path, "Requesting freshness prediction");

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DonationError::Predictor(format!(
                "{} returned {}: {}",
                self.url,
                status,
                body.trim()
            )));
        }

        let body: PredictResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                DonationError::PredictorTimeout
            } else {
                DonationError::Predictor(format!("Invalid response from {}: {}", self.url, e))
            }
        })?;

        Ok(body.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        format!("http://{}/predict", addr)
    }

    #[tokio::test]
    async fn test_label_from_service() {
        let router = Router::new().route(
            "/predict",
            post(|Json(body): Json<Value>| async move {
                let path = body["image_path"].as_str().unwrap_or_default().to_string();
                let label = if path.ends_with("apple.jpg") { "fresh" } else { "stale" };
                Json(json!({ "label": label }))
            }),
        );
        let url = serve(router).await;

        let predictor = HttpPredictor::new(url, Duration::from_secs(5)).unwrap();
        let label = predictor
            .predict(Path::new("static/uploads/apple.jpg"))
            .await
            .unwrap();
        assert_eq!(label, "fresh");
    }

    #[tokio::test]
    async fn test_bearer_token_sent() {
        let router = Router::new().route(
            "/predict",
            post(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "label": auth }))
            }),
        );
        let url = serve(router).await;

        let predictor = HttpPredictor::from_config(&HttpConfig {
            url,
            timeout_ms: 5000,
            auth_token: Some("s3cret".to_string()),
        })
        .unwrap();
        let label = predictor.predict(Path::new("apple.jpg")).await.unwrap();
        assert_eq!(label, "Bearer s3cret");
    }

    #[tokio::test]
    async fn test_error_status_is_predictor_error() {
        let router = Router::new().route(
            "/predict",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model warming up") }),
        );
        let url = serve(router).await;

        let predictor = HttpPredictor::new(url, Duration::from_secs(5)).unwrap();
        let err = predictor.predict(Path::new("apple.jpg")).await.unwrap_err();
        match err {
            DonationError::Predictor(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("model warming up"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout() {
        let router = Router::new().route(
            "/predict",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "label": "late" }))
            }),
        );
        let url = serve(router).await;

        let predictor = HttpPredictor::new(url, Duration::from_millis(100)).unwrap();
        let err = predictor.predict(Path::new("apple.jpg")).await.unwrap_err();
        assert!(matches!(err, DonationError::PredictorTimeout));
    }
}
