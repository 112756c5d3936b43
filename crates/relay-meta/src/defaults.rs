//! Built-in configuration shipped with the binary

use crate::config::Config;
use crate::{Error, Result};

/// Embedded default configuration.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("defaults.toml");

/// Parse the embedded defaults.
pub fn defaults() -> Result<Config> {
    toml::from_str(DEFAULT_CONFIG_TOML).map_err(|e| Error::InvalidConfig {
        path: "<builtin>".into(),
        message: e.to_string(),
    })
}

impl Config {
    /// The built-in configuration, as written by `relay init`.
    pub fn defaults() -> Result<Self> {
        defaults()
    }
}
