//! Artifact discovery in a source tree
//!
//! A source tree holds one directory per kind (`skills/`, `commands/`,
//! `agents/`). Inside, an artifact is either a single `<name>.md` file or a
//! `<name>/` directory containing the kind's main file plus resources.

use std::fs;
use std::path::{Path, PathBuf};

use relay_fs::io;

use crate::artifact::{Artifact, ArtifactKind};
use crate::{Error, Result};

/// Discover artifacts under `root` for the given kind directory names.
///
/// Kinds are visited in the order given and entries within a kind are
/// sorted by file name. A missing kind directory yields nothing. Unknown
/// kind directory names are skipped.
///
/// # Errors
///
/// Fails when a directory exists but cannot be read, or an artifact file
/// cannot be read.
pub fn discover<S: AsRef<str>>(root: &Path, kind_dirs: &[S]) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();

    for dir_name in kind_dirs {
        let dir_name = dir_name.as_ref();
        let kind = ArtifactKind::from_dir_name(dir_name);
        if kind == ArtifactKind::Unknown {
            tracing::warn!(dir = dir_name, "Skipping unknown artifact directory");
            continue;
        }

        let dir = root.join(dir_name);
        let Some(entries) = sorted_entries(&dir)? else {
            tracing::debug!(dir = %dir.display(), "Artifact directory not present");
            continue;
        };

        for (name, path) in entries {
            if let Some(artifact) = read_entry(kind, &name, &path)? {
                tracing::debug!(artifact = %artifact.name, kind = %kind, "Discovered artifact");
                artifacts.push(artifact);
            }
        }
    }

    tracing::debug!(root = %root.display(), count = artifacts.len(), "Discovery complete");
    Ok(artifacts)
}

fn read_entry(kind: ArtifactKind, name: &str, path: &Path) -> Result<Option<Artifact>> {
    let Some(main_file) = kind.main_file() else {
        return Ok(None);
    };

    if path.is_dir() {
        let main = path.join(main_file);
        if !main.is_file() {
            tracing::debug!(dir = %path.display(), main_file, "Directory has no main file");
            return Ok(None);
        }

        let content = io::read_text(&main)?;
        let mut artifact = Artifact::parse(name, kind, &content, path);
        artifact.is_container = true;
        artifact.resources = sorted_entries(path)?
            .unwrap_or_default()
            .into_iter()
            .map(|(entry, _)| entry)
            .filter(|entry| entry != main_file)
            .collect();
        return Ok(Some(artifact));
    }

    let Some(stem) = name.strip_suffix(".md") else {
        return Ok(None);
    };
    if stem.is_empty() {
        return Ok(None);
    }

    let content = io::read_text(path)?;
    Ok(Some(Artifact::parse(stem, kind, &content, path)))
}

/// Entries of `dir` sorted by name, `None` when the directory is missing.
fn sorted_entries(dir: &Path) -> Result<Option<Vec<(String, PathBuf)>>> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::discovery(dir, e)),
    };

    let mut entries = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| Error::discovery(dir, e))?;
        match entry.file_name().into_string() {
            Ok(name) => entries.push((name, entry.path())),
            Err(raw) => {
                tracing::warn!(name = ?raw, dir = %dir.display(), "Skipping non UTF-8 entry");
            }
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(Some(entries))
}
