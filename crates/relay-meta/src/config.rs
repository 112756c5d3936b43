//! Configuration types for relay
//!
//! A configuration names the destinations (harnesses) artifacts are synced
//! to, and carries each destination's layout, variables and key mappings.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kind directories scanned when a configuration does not name any.
pub const DEFAULT_ARTIFACT_DIRS: [&str; 3] = ["skills", "commands", "agents"];

/// Directory convention used when writing into a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// `kind/name/MAIN_FILE`, resources next to the main file.
    #[default]
    Nested,
    /// `kind/name.md`, resources in a sibling `kind/name/` directory.
    Flat,
}

impl FromStr for LayoutKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nested" => Ok(LayoutKind::Nested),
            "flat" => Ok(LayoutKind::Flat),
            _ => Err(Error::InvalidLayout {
                layout: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Nested => write!(f, "nested"),
            LayoutKind::Flat => write!(f, "flat"),
        }
    }
}

/// What to do when several sources provide an artifact with the same
/// name and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail detection.
    #[default]
    Error,
    /// Keep the artifact from the earliest source.
    First,
    /// Keep the artifact from the latest source.
    Last,
}

/// How the CLI treats existing unmanaged files when not told otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileExistsPolicy {
    /// Ask on a terminal, fail otherwise.
    #[default]
    Prompt,
    /// Report the conflicts and fail.
    Error,
    /// Leave the existing files alone.
    Skip,
    /// Replace the existing files.
    Overwrite,
}

/// Conflict handling settings
///
/// Fields left unset fall through to the layer below when configs merge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_exists: Option<FileExistsPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_artifact: Option<DuplicatePolicy>,
}

impl ConflictConfig {
    pub fn file_exists(&self) -> FileExistsPolicy {
        self.file_exists.unwrap_or_default()
    }

    pub fn duplicate_artifact(&self) -> DuplicatePolicy {
        self.duplicate_artifact.unwrap_or_default()
    }
}

/// Artifact names recorded by `relay init`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<String>,
}

impl ManifestConfig {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.commands.is_empty() && self.agents.is_empty()
    }
}

/// Settings for one destination.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Harness {
    /// Base directory; `~/` is expanded by [`Harness::base_path`].
    pub path: String,
    /// Unset means [`LayoutKind::Nested`]; see [`Harness::layout`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutKind>,
    /// Synthesize command stubs from user-invocable skills.
    pub generate_commands_from_skills: bool,
    /// Allow-list of artifact names; empty means everything.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    /// Template variables available as `{{.name}}`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
    /// Metadata key renames, old name to new name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub mappings: BTreeMap<String, String>,
}

impl Harness {
    /// Create a harness rooted at `path` with default settings.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout.unwrap_or_default()
    }

    /// The destination root with `~` expanded.
    pub fn base_path(&self) -> PathBuf {
        relay_fs::expand_tilde(&self.path)
    }

    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn with_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.mappings.insert(from.into(), to.into());
        self
    }

    pub fn with_generated_commands(mut self, enabled: bool) -> Self {
        self.generate_commands_from_skills = enabled;
        self
    }

    /// Whether an artifact name passes the include and exclude lists.
    ///
    /// A non-empty include list is a strict allow-list. The exclude list
    /// is applied after it and always wins.
    pub fn allows(&self, name: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|i| i == name) {
            return false;
        }
        !self.exclude.iter().any(|e| e == name)
    }
}

/// Resolved relay configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Destinations synced when none are requested explicitly.
    pub default_harnesses: Vec<String>,
    /// Kind directories scanned in each source.
    pub default_artifacts: Vec<String>,
    pub conflict: ConflictConfig,
    #[serde(skip_serializing_if = "ManifestConfig::is_empty")]
    pub manifest: ManifestConfig,
    pub harness: BTreeMap<String, Harness>,
}

impl Config {
    /// Kind directories to scan, falling back to [`DEFAULT_ARTIFACT_DIRS`].
    pub fn artifact_dirs(&self) -> Vec<String> {
        if self.default_artifacts.is_empty() {
            DEFAULT_ARTIFACT_DIRS.iter().map(|s| s.to_string()).collect()
        } else {
            self.default_artifacts.clone()
        }
    }

    pub fn harness(&self, name: &str) -> Option<&Harness> {
        self.harness.get(name)
    }

    /// Add or replace a destination, builder style.
    pub fn with_harness(mut self, name: impl Into<String>, harness: Harness) -> Self {
        self.harness.insert(name.into(), harness);
        self
    }
}
