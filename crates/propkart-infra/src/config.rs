//! Client configuration loader.
//!
//! Reads `config.toml` (by default `{config_dir}/propkart/config.toml`) and
//! deserializes it into [`ClientConfig`]. Falls back to defaults when the
//! file is missing or malformed. `PROPKART_BASE_URL` overrides the server
//! origin either way.

use std::path::{Path, PathBuf};

use propkart_types::config::ClientConfig;
use propkart_types::error::ConfigError;

/// Environment variable overriding [`ClientConfig::base_url`].
pub const BASE_URL_ENV: &str = "PROPKART_BASE_URL";

/// `{config_dir}/propkart/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("propkart").join("config.toml"))
}

/// Read and parse the config file strictly.
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn read_client_config(path: &Path) -> Result<Option<ClientConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::Read(format!("{}: {err}", path.display()))),
    };

    toml::from_str::<ClientConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse(format!("{}: {err}", path.display())))
}

/// Load client configuration from `path`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
/// - `PROPKART_BASE_URL`, when set and non-empty, replaces `base_url`.
pub async fn load_client_config(path: &Path) -> ClientConfig {
    let config = match read_client_config(path).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            ClientConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            ClientConfig::default()
        }
    };
    with_base_url_override(config, std::env::var(BASE_URL_ENV).ok())
}

/// Apply a base URL override; blank values are ignored.
pub fn with_base_url_override(mut config: ClientConfig, base_url: Option<String>) -> ClientConfig {
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        tracing::debug!(base_url = %url, "Base URL overridden");
        config.base_url = url.trim().to_string();
    }
    config
}
