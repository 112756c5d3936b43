//! Destination layouts
//!
//! A layout maps an artifact to paths inside a destination and writes it
//! there. Two conventions exist:
//!
//! - [`NestedLayout`]: `<kind>/<name>/<MAIN_FILE>`
//! - [`FlatLayout`]: `<kind>/<name>.md` with resources in `<kind>/<name>/`

mod flat;
mod nested;

pub use flat::FlatLayout;
pub use nested::NestedLayout;

use std::path::{Path, PathBuf};

use relay_content::Artifact;
use relay_fs::io;
use relay_meta::LayoutKind;

use crate::{Error, Result};

/// A file produced by [`DestinationLayout::write`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub resource: bool,
}

/// Directory convention for one destination
pub trait DestinationLayout {
    /// Destination root
    fn base(&self) -> &Path;

    fn kind(&self) -> LayoutKind;

    /// Path of the artifact's main file
    fn target_path(&self, artifact: &Artifact) -> Result<PathBuf>;

    /// Directory resources are copied into
    fn resource_dir(&self, artifact: &Artifact) -> Result<PathBuf>;

    /// Whether the main file is already present. Resources are not checked.
    fn exists(&self, artifact: &Artifact) -> Result<(bool, PathBuf)> {
        let path = self.target_path(artifact)?;
        Ok((path.exists(), path))
    }

    /// Write the rendered artifact, then copy its resources
    ///
    /// Returns every file written, main file first. A failed resource copy
    /// aborts the write; files already written stay in place.
    fn write(&self, artifact: &Artifact) -> Result<Vec<WrittenFile>> {
        let target = self.target_path(artifact)?;
        io::write_text(&target, &artifact.render()?)?;

        let mut written = vec![WrittenFile {
            path: target,
            resource: false,
        }];

        if artifact.resources.is_empty() {
            return Ok(written);
        }

        let resource_dir = self.resource_dir(artifact)?;
        for resource in &artifact.resources {
            let src = artifact.source_path.join(resource);
            if !src.exists() {
                tracing::warn!(
                    artifact = %artifact.name,
                    resource = %resource,
                    "Resource vanished from source, skipping"
                );
                continue;
            }

            let dst = resource_dir.join(resource);
            io::copy_tree(&src, &dst)?;

            // Only files that came from the source; the destination
            // directory may hold files the user put there.
            for file in io::list_files(&src)? {
                let Ok(relative) = file.strip_prefix(&src) else {
                    continue;
                };
                let path = if relative.as_os_str().is_empty() {
                    dst.clone()
                } else {
                    dst.join(relative)
                };
                written.push(WrittenFile {
                    path,
                    resource: true,
                });
            }
        }

        tracing::debug!(
            artifact = %artifact.name,
            files = written.len(),
            layout = %self.kind(),
            "Wrote artifact"
        );
        Ok(written)
    }
}

/// Build the layout for a destination rooted at `base`
pub fn layout_for(kind: LayoutKind, base: impl Into<PathBuf>) -> Box<dyn DestinationLayout> {
    match kind {
        LayoutKind::Nested => Box::new(NestedLayout::new(base)),
        LayoutKind::Flat => Box::new(FlatLayout::new(base)),
    }
}

/// `<base>/<kind dir>` for a writable artifact kind
fn kind_dir(base: &Path, artifact: &Artifact) -> Result<PathBuf> {
    artifact
        .kind
        .dir_name()
        .map(|dir| base.join(dir))
        .ok_or_else(|| Error::UnsupportedKind {
            name: artifact.name.clone(),
            kind: artifact.kind,
        })
}

fn main_file(artifact: &Artifact) -> Result<&'static str> {
    artifact.kind.main_file().ok_or_else(|| Error::UnsupportedKind {
        name: artifact.name.clone(),
        kind: artifact.kind,
    })
}
