//! `<kind>/<name>/<MAIN_FILE>` layout

use std::path::{Path, PathBuf};

use relay_content::Artifact;
use relay_meta::LayoutKind;

use super::{DestinationLayout, kind_dir, main_file};
use crate::Result;

/// Every artifact gets its own directory; resources sit next to the main
/// file.
#[derive(Debug, Clone)]
pub struct NestedLayout {
    base: PathBuf,
}

impl NestedLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl DestinationLayout for NestedLayout {
    fn base(&self) -> &Path {
        &self.base
    }

    fn kind(&self) -> LayoutKind {
        LayoutKind::Nested
    }

    fn target_path(&self, artifact: &Artifact) -> Result<PathBuf> {
        Ok(self.resource_dir(artifact)?.join(main_file(artifact)?))
    }

    fn resource_dir(&self, artifact: &Artifact) -> Result<PathBuf> {
        Ok(kind_dir(&self.base, artifact)?.join(&artifact.name))
    }
}
