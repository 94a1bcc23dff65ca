//! donationd - Food Donation Server Daemon
//!
//! Serves the donation form, stores submitted food images and classifies
//! them with the configured freshness predictor.
//!
//! Usage:
//!   donationd [OPTIONS] [config.toml]
//!
//! Options:
//!   --port <port>        Override the listen port
//!   --upload-dir <path>  Override the upload directory
//!
//! If no config file is provided, defaults are used with a static predictor.

mod config;

use std::path::PathBuf;

use donation_api::{create_router, AppState};
use donation_core::UploadDir;
use donation_predictor::build_predictor;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{DonationdConfig, LogFormat};

const DEFAULT_LOG_FILTER: &str =
    "donationd=info,donation_api=info,donation_core=info,donation_predictor=info,tower_http=info";

/// Parsed command-line arguments
#[derive(Debug, Default)]
struct Args {
    /// Server config file (TOML)
    config_path: Option<String>,
    port: Option<u16>,
    upload_dir: Option<PathBuf>,
    help: bool,
}

impl Args {
    /// Command-line values take precedence over the config file
    fn apply(&self, config: &mut DonationdConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref dir) = self.upload_dir {
            config.uploads.dir = dir.clone();
        }
    }
}

fn parse_args<I>(args: I) -> anyhow::Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut result = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--port" | "-p" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("Missing argument for --port"))?;
                result.port = Some(
                    value
                        .parse::<u16>()
                        .map_err(|e| anyhow::anyhow!("Invalid port '{}': {}", value, e))?,
                );
            }
            "--upload-dir" | "-u" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("Missing argument for --upload-dir"))?;
                result.upload_dir = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                result.help = true;
            }
            other if !other.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(other.to_string());
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(result)
}

fn print_help() {
    eprintln!(
        r#"donationd - Food Donation Server Daemon

Usage: donationd [OPTIONS] [config.toml]

Options:
  -p, --port <port>        Listen port (default 5000)
  -u, --upload-dir <path>  Directory for uploaded images (default static/uploads)
  -h, --help               Print this help message

Examples:
  # Run with defaults and a static "unknown" freshness label
  donationd

  # Run with config file
  donationd donationd.toml

  # Override the port and upload directory
  donationd -p 8080 -u /var/lib/donations donationd.toml
"#
    );
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        print_help();
        return Ok(());
    }

    let mut config = match args.config_path {
        Some(ref path) => DonationdConfig::load(path)?,
        None => DonationdConfig::default(),
    };
    args.apply(&mut config);

    init_logging(config.logging.format);
    tracing::info!("Starting donationd (Food Donation Server)");

    match args.config_path {
        Some(ref path) => tracing::info!("Loaded config from: {}", path),
        None => tracing::info!("No config file provided, using defaults"),
    }

    // The upload directory must exist before the first request
    let uploads = UploadDir::new(&config.uploads.dir);
    uploads.ensure()?;
    tracing::info!(dir = %uploads.root().display(), "Upload directory ready");

    let predictor = build_predictor(&config.predictor)?;

    let mut state = AppState::new(uploads, predictor)
        .with_body_limit(config.server.max_upload_bytes);
    if let Some(html) = config.form_page()? {
        tracing::info!("Using custom donation form page");
        state = state.with_form_page(html);
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("donationd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
