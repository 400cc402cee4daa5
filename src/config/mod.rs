mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const BACKEND_URL_ENV: &str = "FARM_ADVISOR_BACKEND_URL";
pub const LANGUAGE_ENV: &str = "FARM_ADVISOR_LANGUAGE";
pub const OFFLINE_ENV: &str = "FARM_ADVISOR_OFFLINE";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration and applies the backend URL override from the
/// environment.
///
/// `explicit` wins over `CONFIG_PATH`. An explicitly named file must exist;
/// a missing `config.yaml` in the working directory just means defaults.
pub async fn load(explicit: Option<&str>) -> Result<Config> {
    let named = explicit
        .map(str::to_string)
        .or_else(|| env::var(CONFIG_PATH_ENV).ok());

    let mut config = match named {
        Some(path) => load_file(&path).await?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            load_file(DEFAULT_CONFIG_PATH).await?
        }
        None => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    config.apply_backend_override(env::var(BACKEND_URL_ENV).ok());
    Ok(config)
}

pub async fn load_file(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    let config_str = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::config(format!("cannot read {path}: {e}")))?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to an empty mapping.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

impl Config {
    /// Replaces the backend URL when the override is set and non-blank.
    pub fn apply_backend_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            debug!("Backend URL overridden from environment: {}", url);
            self.backend.base_url = url.trim().to_string();
        }
    }
}
