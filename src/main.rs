//! MT4 Watcher CLI
//!
//! Runs one of the three long-lived processes against a YAML config.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --config config.yaml account
//! cargo run -- --config config.yaml market
//! cargo run -- --config config.yaml health
//! RUST_LOG=debug cargo run -- account
//! ```
//!
//! # Exit Codes
//!
//! - 0: Stopped with Ctrl-C
//! - 1: Error (unreadable or invalid config, missing watch directory, etc.)

use mt4_watcher::cli::{self, Command};
use mt4_watcher::{
    create_handler, ApiClient, DirectoryWatcher, HealthPinger, Uploader, WatchConfig, WatcherError,
};
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(args.command, &args.config).await {
        error!("{}", e);
        process::exit(1);
    }
}

async fn run(command: Command, config_path: &std::path::Path) -> Result<(), WatcherError> {
    let config = Arc::new(WatchConfig::from_file(config_path)?);
    info!("Loaded configuration from {}", config_path.display());

    match command.watcher_kind() {
        Some(kind) => {
            let uploader: Arc<dyn Uploader> = Arc::new(ApiClient::new(
                &config.api_endpoint,
                &config.api_token,
                config.request_timeout(),
            )?);
            let handler = create_handler(kind, &config, uploader);
            DirectoryWatcher::new(config, handler).run().await
        }
        None => {
            HealthPinger::from_config(&config)?.run().await;
            Ok(())
        }
    }
}
