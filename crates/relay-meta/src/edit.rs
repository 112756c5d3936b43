//! Writing configuration files back to disk

use std::path::Path;

use relay_fs::io;

use crate::config::Config;
use crate::loader::load_file;
use crate::{Error, Result};

/// Serialize `config` to `path` as TOML.
pub fn write_file(path: &Path, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| Error::Serialize {
        message: e.to_string(),
    })?;
    io::write_text(path, &content)?;
    Ok(())
}

fn load_or_default(path: &Path) -> Result<Config> {
    match load_file(path) {
        Ok(config) => Ok(config),
        Err(Error::ConfigNotFound { .. }) => Ok(Config::default()),
        Err(e) => Err(e),
    }
}

/// Add `artifact` to the exclude list of `harness` in the file at `path`.
///
/// The file and the harness table are created when missing. Returns
/// `false` when the artifact was already excluded.
pub fn add_exclusion(path: &Path, harness: &str, artifact: &str) -> Result<bool> {
    let mut config = load_or_default(path)?;
    let entry = config.harness.entry(harness.to_string()).or_default();

    if entry.exclude.iter().any(|e| e == artifact) {
        return Ok(false);
    }
    entry.exclude.push(artifact.to_string());

    write_file(path, &config)?;
    tracing::info!(harness, artifact, "Added exclusion");
    Ok(true)
}

/// Remove `artifact` from the exclude list of `harness`.
///
/// Returns `false` when nothing was removed.
pub fn remove_exclusion(path: &Path, harness: &str, artifact: &str) -> Result<bool> {
    let mut config = load_file(path)?;
    let Some(entry) = config.harness.get_mut(harness) else {
        return Ok(false);
    };

    let before = entry.exclude.len();
    entry.exclude.retain(|e| e != artifact);
    if entry.exclude.len() == before {
        return Ok(false);
    }

    write_file(path, &config)?;
    Ok(true)
}
