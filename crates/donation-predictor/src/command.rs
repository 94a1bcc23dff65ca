//! Predictor backed by an external program
//!
//! The program is run once per image as `program [args...] <image_path>`.
//! Its trimmed standard output is the freshness label.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use donation_core::{DonationError, DonationResult, FreshnessPredictor};
use tokio::process::Command;

use crate::config::CommandConfig;

/// Runs an external classifier for every image
#[derive(Debug, Clone)]
pub struct CommandPredictor {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandPredictor {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &CommandConfig) -> DonationResult<Self> {
        if config.program.trim().is_empty() {
            return Err(DonationError::Internal(
                "Command predictor requires a program".to_string(),
            ));
        }
        Ok(Self::new(
            config.program.clone(),
            config.args.clone(),
            Duration::from_millis(config.timeout_ms),
        ))
    }
}

#[async_trait]
impl FreshnessPredictor for CommandPredictor {
    fn name(&self) -> &str {
        "command"
    }

    async fn predict(&self, image_path: &Path) -> DonationResult<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(image_path)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(
            program = %self.program,
            path = %image_path.display(),
            "Running freshness command"
        );

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(result) => result.map_err(|e| {
                DonationError::Predictor(format!("Failed to run '{}': {}", self.program, e))
            })?,
            Err(_) => {
                tracing::warn!(
                    program = %self.program,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Freshness command timed out"
                );
                return Err(DonationError::PredictorTimeout);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DonationError::Predictor(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let label = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if label.is_empty() {
            return Err(DonationError::Predictor(format!(
                "'{}' produced no label",
                self.program
            )));
        }

        Ok(label)
    }
}
