//! `<kind>/<name>.md` layout

use std::path::{Path, PathBuf};

use relay_content::Artifact;
use relay_meta::LayoutKind;

use super::{DestinationLayout, kind_dir};
use crate::Result;

/// Main files sit directly in the kind directory; resources go to a
/// sibling directory named after the artifact.
#[derive(Debug, Clone)]
pub struct FlatLayout {
    base: PathBuf,
}

impl FlatLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl DestinationLayout for FlatLayout {
    fn base(&self) -> &Path {
        &self.base
    }

    fn kind(&self) -> LayoutKind {
        LayoutKind::Flat
    }

    fn target_path(&self, artifact: &Artifact) -> Result<PathBuf> {
        Ok(kind_dir(&self.base, artifact)?.join(format!("{}.md", artifact.name)))
    }

    fn resource_dir(&self, artifact: &Artifact) -> Result<PathBuf> {
        Ok(kind_dir(&self.base, artifact)?.join(&artifact.name))
    }
}
