// Configuration module for the MCP server
//
// This module handles loading and managing configuration settings
// for the MCP server.

mod settings;

pub use settings::{DuneSettings, Settings, API_KEY_ENV, API_URL_ENV};

use std::sync::Arc;
use crate::errors::ServerError;

/// Load configuration from an optional file and the environment.
///
/// A `.env` file in the working directory is honoured. Fails when no Dune
/// API key can be found.
pub fn load_config(path: Option<&str>) -> Result<Arc<Settings>, ServerError> {
    if let Err(e) = dotenv::dotenv() {
        log::debug!("No .env file loaded: {}", e);
    }

    let config_path = path.unwrap_or(crate::defaults::CONFIG_PATH);
    settings::load(config_path)
        .map(Arc::new)
        .map_err(|e| ServerError::Config(format!("Failed to load config: {}", e)))
}
