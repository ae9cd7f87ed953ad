use std::env;
use dune_mcp::{api, client::DuneClient, tools};
use std::sync::Arc;
use anyhow::Result;
use log::{info, error};
use std::process;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr; stdout carries the protocol)
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    info!("Starting {} version {}", dune_mcp::SERVER_NAME, dune_mcp::SERVER_VERSION);

    // Get configuration path from command line arguments
    let config_path = env::args().nth(1);

    // Load configuration
    let settings = match dune_mcp::config::load_config(config_path.as_deref()) {
        Ok(settings) => {
            info!("Loaded configuration successfully");
            settings
        },
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let client = match DuneClient::from_settings(&settings.dune) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create Dune client: {}", e);
            process::exit(1);
        }
    };

    // Initialize tool registry
    let registry = match tools::init_registry(Arc::new(client)) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to initialize tool registry: {}", e);
            process::exit(1);
        }
    };
    info!("Initialized tool registry with {} tools", registry.len());

    let dispatcher = Arc::new(api::Dispatcher::new(registry));

    // Serve until stdin closes or we are interrupted
    tokio::select! {
        result = api::init_server(dispatcher) => match result {
            Ok(_) => {
                info!("{} stopped gracefully", dune_mcp::SERVER_NAME);
                Ok(())
            },
            Err(e) => {
                error!("Error running {}: {}", dune_mcp::SERVER_NAME, e);
                process::exit(1);
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received, shutting down");
            process::exit(0);
        }
    }
}
