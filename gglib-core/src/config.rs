//! Layered configuration for gglib.
//!
//! Uses `figment`: defaults -> user config file -> environment.

use crate::launcher::{DEFAULT_CLI_COMMAND, DEFAULT_SERVER_COMMAND};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GglibConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Catalog database path. `None` means `models.db` under the platform
    /// data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Executable name or path for the inference server.
    pub server_command: String,
    /// Executable name or path for one-shot CLI inference.
    pub cli_command: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_command: DEFAULT_SERVER_COMMAND.to_string(),
            cli_command: DEFAULT_CLI_COMMAND.to_string(),
        }
    }
}

impl GglibConfig {
    /// Effective catalog database path.
    pub fn database_path(&self) -> PathBuf {
        match &self.database.path {
            Some(path) => path.clone(),
            None => default_data_dir().join("models.db"),
        }
    }
}

/// Platform data directory for gglib state (`~/.local/share/gglib` on
/// Linux).
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("dev", "gglib", "gglib")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// User-level config file location, if a home directory can be resolved.
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "gglib", "gglib")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `GGLIB_`, `__` as separator,
///    e.g. `GGLIB_SERVER__SERVER_COMMAND`)
/// 2. User config (`~/.config/gglib/config.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<GglibConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(GglibConfig::default()));

    if let Some(user_config) = config_path() {
        if user_config.exists() {
            debug!(path = %user_config.display(), "merging user config");
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    figment = figment.merge(Env::prefixed("GGLIB_").split("__"));

    figment.extract().map_err(Box::new)
}
