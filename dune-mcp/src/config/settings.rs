// Settings module for configuration
//
// This module defines the settings structure and how it is assembled from
// the optional config file and the environment.

use std::fmt;

use anyhow::{anyhow, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Environment variable holding the Dune API key
pub const API_KEY_ENV: &str = "DUNE_API_KEY";
/// Environment variable overriding the Dune API base URL
pub const API_URL_ENV: &str = "DUNE_API_URL";

/// Dune API connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct DuneSettings {
    /// Base URL of the Dune REST API
    pub api_url: String,
    /// API key sent with every request
    pub api_key: String,
}

impl Default for DuneSettings {
    fn default() -> Self {
        Self {
            api_url: crate::defaults::DUNE_API_URL.to_string(),
            api_key: String::new(),
        }
    }
}

impl fmt::Debug for DuneSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuneSettings")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Complete settings for the MCP server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Dune API settings
    #[serde(default)]
    pub dune: DuneSettings,
}

impl Settings {
    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.dune.api_key.trim().is_empty() {
            return Err(anyhow!("{} environment variable is required", API_KEY_ENV));
        }
        Url::parse(&self.dune.api_url)
            .map_err(|e| anyhow!("Invalid Dune API URL '{}': {}", self.dune.api_url, e))?;
        Ok(())
    }
}

/// Load settings from an optional file plus the process environment
pub fn load(path: &str) -> Result<Settings> {
    let builder = Config::builder().add_source(File::with_name(path).required(false));
    resolve(
        builder,
        std::env::var(API_KEY_ENV).ok(),
        std::env::var(API_URL_ENV).ok(),
    )
}

/// Layer `DUNE_MCP__*` variables and the explicit overrides on top of
/// `builder`, then deserialize and validate.
pub(crate) fn resolve(
    builder: ConfigBuilder<DefaultState>,
    api_key: Option<String>,
    api_url: Option<String>,
) -> Result<Settings> {
    let settings: Settings = builder
        .set_default("dune.api_url", crate::defaults::DUNE_API_URL)?
        .set_default("dune.api_key", "")?
        .add_source(Environment::with_prefix("DUNE_MCP").separator("__"))
        .set_override_option("dune.api_key", api_key)?
        .set_override_option("dune.api_url", api_url)?
        .build()?
        .try_deserialize()?;

    settings.validate()?;
    Ok(settings)
}
