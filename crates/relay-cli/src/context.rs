//! Invocation context: working directory and configuration locations

use std::path::{Path, PathBuf};

use relay_fs::RelayPath;
use relay_meta::{Config, ConfigLoader, load_file, merge};

use crate::error::Result;

/// Where the CLI was started and which configuration files apply
#[derive(Debug, Clone)]
pub struct Context {
    cwd: PathBuf,
    project_config: Option<PathBuf>,
    global_config: Option<PathBuf>,
}

impl Context {
    pub fn new(
        cwd: impl Into<PathBuf>,
        project_config: Option<PathBuf>,
        global_config: Option<PathBuf>,
    ) -> Self {
        let cwd = cwd.into();
        // Relative paths from the command line are relative to cwd
        let project_config = project_config.map(|p| cwd.join(p));
        let global_config = global_config.map(|p| cwd.join(p));
        Self {
            cwd,
            project_config,
            global_config,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Resolve a user-supplied path against the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }

    /// The project configuration file, explicit or `./relay.toml`
    pub fn project_config_path(&self) -> PathBuf {
        self.project_config
            .clone()
            .unwrap_or_else(|| self.cwd.join(RelayPath::ProjectConfig))
    }

    pub fn loader(&self) -> ConfigLoader {
        match &self.global_config {
            Some(global) => ConfigLoader::with_global_path(&self.cwd, global),
            None => ConfigLoader::new(&self.cwd),
        }
    }

    /// Load the merged configuration
    ///
    /// An explicit `--config` file must exist; the default project file is
    /// optional.
    pub fn load_config(&self) -> Result<Config> {
        let loader = self.loader();
        let Some(path) = &self.project_config else {
            return Ok(loader.load()?);
        };

        let project = load_file(path)?;
        Ok(match loader.load_global()? {
            Some(global) => merge(global, project),
            None => project,
        })
    }
}
