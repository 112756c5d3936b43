//! Published list of the artifacts in a source tree.
//!
//! Written as YAML to `.relay/manifest.yaml` at the source root.

use std::path::{Path, PathBuf};

use relay_fs::{RelayPath, io};
use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, ArtifactKind};
use crate::discovery::discover;
use crate::{Error, Result};

/// Artifact names per kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceManifest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<String>,
}

impl SourceManifest {
    /// Discover artifacts under `root` and list their names.
    pub fn generate<S: AsRef<str>>(root: &Path, kind_dirs: &[S]) -> Result<Self> {
        Ok(Self::from_artifacts(&discover(root, kind_dirs)?))
    }

    pub fn from_artifacts(artifacts: &[Artifact]) -> Self {
        let mut manifest = Self::default();
        for artifact in artifacts {
            let list = match artifact.kind {
                ArtifactKind::Skill => &mut manifest.skills,
                ArtifactKind::Command => &mut manifest.commands,
                ArtifactKind::Agent => &mut manifest.agents,
                ArtifactKind::Unknown => continue,
            };
            if !list.contains(&artifact.name) {
                list.push(artifact.name.clone());
            }
        }
        manifest
    }

    pub fn names(&self, kind: ArtifactKind) -> &[String] {
        match kind {
            ArtifactKind::Skill => &self.skills,
            ArtifactKind::Command => &self.commands,
            ArtifactKind::Agent => &self.agents,
            ArtifactKind::Unknown => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.skills.len() + self.commands.len() + self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Location of the manifest inside a source tree.
    pub fn path(root: &Path) -> PathBuf {
        root.join(RelayPath::MetaDir).join(RelayPath::ManifestFile)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Serialize {
            format: "YAML".to_string(),
            message: e.to_string(),
        })
    }

    /// Write the manifest under `root`, returning the file path.
    pub fn write(&self, root: &Path) -> Result<PathBuf> {
        let path = Self::path(root);
        io::write_text(&path, &self.to_yaml()?)?;
        tracing::info!(path = %path.display(), artifacts = self.len(), "Wrote source manifest");
        Ok(path)
    }

    /// Read the manifest under `root`, `None` when absent.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let path = Self::path(root);
        let Some(content) = io::read_text_if_exists(&path)? else {
            return Ok(None);
        };
        serde_yaml::from_str(&content)
            .map(Some)
            .map_err(|e| Error::ManifestParse {
                path,
                message: e.to_string(),
            })
    }
}
