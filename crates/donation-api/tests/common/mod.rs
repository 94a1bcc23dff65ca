//! Shared harness for the donation API integration tests
//!
//! [`TestServer`] serves the real router on a random local port with a
//! [`StubPredictor`] and an upload directory inside its own temporary
//! directory. Dropping the server stops it and removes the directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use donation_api::{create_router, AppState};
use donation_client::DonationClient;
use donation_core::{DonationError, DonationResult, FreshnessPredictor, UploadDir};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

// =============================================================================
// Stub Predictor
// =============================================================================

/// Predictor that answers with a fixed label and records every call
pub struct StubPredictor {
    label: String,
    fail: bool,
    calls: Mutex<Vec<PathBuf>>,
}

impl StubPredictor {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FreshnessPredictor for StubPredictor {
    fn name(&self) -> &str {
        "stub"
    }

    async fn predict(&self, image_path: &Path) -> DonationResult<String> {
        self.calls.lock().unwrap().push(image_path.to_path_buf());
        if self.fail {
            return Err(DonationError::Predictor("model unavailable".to_string()));
        }
        Ok(self.label.clone())
    }
}

// =============================================================================
// Test Server
// =============================================================================

/// How the upload directory looks when the server starts
pub enum UploadSetup {
    /// `static/uploads` exists, as after daemon startup
    Ready,
    /// `static/uploads` has not been created yet
    Absent,
    /// The upload path is occupied by a regular file
    BlockedByFile,
}

pub struct TestServer {
    pub client: DonationClient,
    pub predictor: Arc<StubPredictor>,
    pub upload_dir: PathBuf,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    _tmp: TempDir,
}

impl TestServer {
    /// Serve with a predictor answering `label` and a ready upload directory
    pub async fn start(label: &str) -> Self {
        Self::start_with(StubPredictor::new(label), UploadSetup::Ready).await
    }

    pub async fn start_with(predictor: StubPredictor, setup: UploadSetup) -> Self {
        let tmp = TempDir::new().unwrap();
        let upload_dir = tmp.path().join("static").join("uploads");

        match setup {
            UploadSetup::Ready => std::fs::create_dir_all(&upload_dir).unwrap(),
            UploadSetup::Absent => {}
            UploadSetup::BlockedByFile => {
                std::fs::create_dir_all(tmp.path().join("static")).unwrap();
                std::fs::write(&upload_dir, b"not a directory").unwrap();
            }
        }

        let predictor = Arc::new(predictor);
        let state = AppState::new(
            UploadDir::new(&upload_dir),
            predictor.clone() as Arc<dyn FreshnessPredictor>,
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let router = create_router(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        let client = DonationClient::new(&format!("http://{}", addr)).unwrap();

        Self {
            client,
            predictor,
            upload_dir,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
            _tmp: tmp,
        }
    }

    /// Number of entries in the upload directory (0 if it does not exist)
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(&self.upload_dir)
            .map(|dir| dir.count())
            .unwrap_or(0)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
