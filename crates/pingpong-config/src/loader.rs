//! Configuration loader (defaults + file + env merge).

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use crate::schema::ServerConfig;

/// Prefix of the environment variables read at startup.
pub const ENV_PREFIX: &str = "PINGPONG_";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Environment variables (`PINGPONG_SERVER_NAME`, `PINGPONG_LOG_LEVEL`,
///    `PINGPONG_ENVIRONMENT`, `PINGPONG_LOG_DIR`)
///
/// Any layer may leave a key unset; the default then applies.
pub fn load_config(config_path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(ServerConfig::default()));

    if let Some(path) = config_path {
        if !path.exists() {
            return Err(ConfigError::Load(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).only(&ServerConfig::KEYS));

    figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}
