//! The artifact model
//!
//! An artifact is a markdown document with an optional YAML header,
//! discovered under one of the kind directories of a source tree.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::Result;
use crate::frontmatter;

/// Header metadata, sorted by key.
pub type Metadata = BTreeMap<String, Value>;

/// Category of an artifact, bound to a directory and a main file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Skill,
    Command,
    Agent,
    Unknown,
}

impl ArtifactKind {
    /// The kinds that can be written to a destination.
    pub const KNOWN: [ArtifactKind; 3] = [Self::Skill, Self::Command, Self::Agent];

    /// Directory holding artifacts of this kind.
    pub fn dir_name(&self) -> Option<&'static str> {
        match self {
            Self::Skill => Some("skills"),
            Self::Command => Some("commands"),
            Self::Agent => Some("agents"),
            Self::Unknown => None,
        }
    }

    /// Main file of a container artifact of this kind.
    pub fn main_file(&self) -> Option<&'static str> {
        match self {
            Self::Skill => Some("SKILL.md"),
            Self::Command => Some("COMMAND.md"),
            Self::Agent => Some("AGENT.md"),
            Self::Unknown => None,
        }
    }

    pub fn from_dir_name(dir: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|k| k.dir_name() == Some(dir))
            .unwrap_or(Self::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Command => "command",
            Self::Agent => "agent",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered (or synthesized) artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub name: String,
    pub kind: ArtifactKind,
    /// Discovered as a directory with a main file.
    pub is_container: bool,
    pub metadata: Metadata,
    pub body: String,
    /// Entry names next to the main file, excluding it. Sorted.
    pub resources: Vec<String>,
    /// Container directory or single file the artifact was read from.
    pub source_path: PathBuf,
}

impl Artifact {
    pub fn new(name: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_container: false,
            metadata: Metadata::new(),
            body: String::new(),
            resources: Vec::new(),
            source_path: PathBuf::new(),
        }
    }

    /// Build an artifact from file content, splitting off the header.
    pub fn parse(
        name: impl Into<String>,
        kind: ArtifactKind,
        content: &str,
        source_path: impl Into<PathBuf>,
    ) -> Self {
        let (metadata, body) = frontmatter::parse(content);
        Self {
            metadata,
            body,
            source_path: source_path.into(),
            ..Self::new(name, kind)
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// String value of a metadata key, `None` when absent or not a string.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Whether the header sets `user-invocable: true`.
    pub fn is_user_invocable(&self) -> bool {
        self.metadata
            .get("user-invocable")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Render back to file content.
    pub fn render(&self) -> Result<String> {
        frontmatter::render(&self.metadata, &self.body)
    }
}
