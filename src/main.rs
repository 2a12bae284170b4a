//! Milkweb main entry point

use clap::Parser;
use milkweb_api::start_server;
use milkweb_config::Config;
use milkweb_core::Books;
use milkweb_store::{JsonStoreBackend, StoreRef};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "milkweb")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web interface for dairy vendor business management", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = match Config::load(args.config.clone()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Could not load {} ({}), using defaults",
                    args.config.display(),
                    e
                );
                Config::default()
            }
        };

        log::info!(
            "Config loaded: data path={}, main_file={}",
            config.data.path.to_string_lossy(),
            config.data.main_file
        );

        let backend: StoreRef = Arc::new(JsonStoreBackend::default());
        let books = Arc::new(RwLock::new(Books::new(config.clone(), backend)));

        // Try to load the vendor data if the file exists
        let data_path = config.vendor_path();
        log::info!("Looking for vendor data file: {}", data_path.display());

        if data_path.exists() {
            let mut books_guard = books.write().await;
            if let Err(e) = books_guard.load(data_path).await {
                log::error!("Failed to load vendor data: {:?}", e);
            }
        } else {
            log::warn!("Vendor data file not found: {}", data_path.display());
        }

        start_server(config, books).await
    });

    Ok(())
}
