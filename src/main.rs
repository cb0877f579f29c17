mod analyzer;
mod config;
mod fetcher;
mod model;
mod normalizer;
mod parser;
mod reporter;
mod scheduler;
mod storage;
mod utils;

use config::{load_config, AppConfig};
use fetcher::CoinGeckoFetcher;
use reporter::ConsoleReporter;
use scheduler::Scheduler;
use std::path::Path;
use storage::XlsxExporter;
use tokio::time::sleep;
use tracing::{error, info, warn};

const CONFIG_PATH: &str = "config.json";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    // Compiled-in defaults, optionally overridden by config.json
    let config = if Path::new(CONFIG_PATH).exists() {
        match load_config(CONFIG_PATH) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Config load error: {}", e);
                return;
            }
        }
    } else {
        AppConfig::default()
    };

    if config.api_key.is_empty() {
        warn!("No API key configured; requests go out without a demo key.");
    }

    let fetcher = match CoinGeckoFetcher::new(config.base_url.clone(), config.retry_policy()) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    let exporter = XlsxExporter::new(&config.export_path);

    info!("Starting real-time cryptocurrency monitor...");
    info!(
        "Live data will be OVERWRITTEN in '{}' every {} seconds",
        config.export_path, config.check_interval_seconds
    );
    sleep(config.startup_delay()).await;

    let mut scheduler = Scheduler::new(fetcher, ConsoleReporter::stdout(), exporter, &config);
    scheduler
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;
}
