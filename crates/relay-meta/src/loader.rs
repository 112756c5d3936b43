//! Layered configuration loading
//!
//! Configuration is read from two optional files, later overriding
//! earlier:
//!
//! 1. Global config (`<config_dir>/relay/config.toml`)
//! 2. Project config (`relay.toml` in the project directory)
//!
//! When neither exists an empty configuration is returned.

use std::path::{Path, PathBuf};

use relay_fs::{RelayPath, io};

use crate::config::{Config, Harness};
use crate::{Error, Result};

/// Parse a configuration file.
///
/// # Errors
///
/// Returns `ConfigNotFound` when the file is missing and
/// `InvalidConfig` when it is not valid relay TOML.
pub fn load_file(path: &Path) -> Result<Config> {
    let content = match io::read_text_if_exists(path)? {
        Some(content) => content,
        None => {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    toml::from_str(&content).map_err(|e| Error::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolves configuration by merging the global and project files.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    project_dir: PathBuf,
    global_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader for `project_dir` using the platform config directory
    /// for the global file.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            global_path: dirs::config_dir().map(|d| d.join("relay").join("config.toml")),
        }
    }

    /// Create a loader with an explicit global config path.
    pub fn with_global_path(project_dir: impl Into<PathBuf>, global_path: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            global_path: Some(global_path.into()),
        }
    }

    pub fn global_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    pub fn project_path(&self) -> PathBuf {
        self.project_dir.join(RelayPath::ProjectConfig)
    }

    /// Load the global file, `None` when absent.
    pub fn load_global(&self) -> Result<Option<Config>> {
        match &self.global_path {
            Some(path) => load_optional(path),
            None => Ok(None),
        }
    }

    /// Load the project file, `None` when absent.
    pub fn load_project(&self) -> Result<Option<Config>> {
        load_optional(&self.project_path())
    }

    /// Load and merge both layers.
    pub fn load(&self) -> Result<Config> {
        let global = self.load_global()?;
        let project = self.load_project()?;

        let config = match (global, project) {
            (None, None) => Config::default(),
            (Some(global), None) => global,
            (None, Some(project)) => project,
            (Some(global), Some(project)) => merge(global, project),
        };

        tracing::debug!(
            harnesses = config.harness.len(),
            defaults = ?config.default_harnesses,
            "Resolved configuration"
        );
        Ok(config)
    }
}

fn load_optional(path: &Path) -> Result<Option<Config>> {
    match load_file(path) {
        Ok(config) => Ok(Some(config)),
        Err(Error::ConfigNotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Merge a project configuration over a global one.
///
/// Non-empty project lists replace global ones and each `[conflict]` field
/// the project sets overrides the global one. Harness tables merge per
/// name: a non-empty path or a set layout overrides, the command flag is
/// OR-ed, variables
/// and mappings merge with the project winning, and include/exclude lists
/// are appended without duplicates.
pub fn merge(global: Config, project: Config) -> Config {
    let mut result = global;

    if !project.default_harnesses.is_empty() {
        result.default_harnesses = project.default_harnesses;
    }
    if !project.default_artifacts.is_empty() {
        result.default_artifacts = project.default_artifacts;
    }
    result.conflict.file_exists = project.conflict.file_exists.or(result.conflict.file_exists);
    result.conflict.duplicate_artifact = project
        .conflict
        .duplicate_artifact
        .or(result.conflict.duplicate_artifact);
    if !project.manifest.skills.is_empty() {
        result.manifest.skills = project.manifest.skills;
    }
    if !project.manifest.commands.is_empty() {
        result.manifest.commands = project.manifest.commands;
    }
    if !project.manifest.agents.is_empty() {
        result.manifest.agents = project.manifest.agents;
    }

    for (name, overlay) in project.harness {
        let merged = match result.harness.remove(&name) {
            Some(base) => merge_harness(base, overlay),
            None => overlay,
        };
        result.harness.insert(name, merged);
    }

    result
}

fn merge_harness(mut base: Harness, overlay: Harness) -> Harness {
    if !overlay.path.is_empty() {
        base.path = overlay.path;
    }
    base.layout = overlay.layout.or(base.layout);
    base.generate_commands_from_skills |= overlay.generate_commands_from_skills;
    base.variables.extend(overlay.variables);
    base.mappings.extend(overlay.mappings);
    append_unique(&mut base.include, overlay.include);
    append_unique(&mut base.exclude, overlay.exclude);
    base
}

fn append_unique(list: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !list.contains(&item) {
            list.push(item);
        }
    }
}
