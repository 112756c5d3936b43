//! Ledger of managed files
//!
//! Each destination keeps a `.relay.lock` file at its root listing the
//! files relay wrote there. A file at an artifact's target path that is not
//! in the ledger belongs to the user and is never overwritten silently.

mod entry;

pub use entry::LedgerEntry;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use relay_fs::{RelayPath, io};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Managed files of one destination, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    files: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of the ledger file for a destination root
    pub fn path(base: &Path) -> PathBuf {
        base.join(RelayPath::LedgerFile)
    }

    /// Load the ledger of the destination at `base` with a shared lock
    ///
    /// A missing file yields an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns `LedgerParse` when the file is not a valid ledger, or an I/O
    /// error when it cannot be read.
    pub fn load(base: &Path) -> Result<Self> {
        let path = Self::path(base);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(relay_fs::Error::io(&path, e).into()),
        };
        file.lock_shared()
            .map_err(|_| relay_fs::Error::LockFailed { path: path.clone() })?;

        // Read through the locked handle
        let mut content = String::new();
        (&file)
            .read_to_string(&mut content)
            .map_err(|e| relay_fs::Error::io(&path, e))?;

        toml::from_str(&content).map_err(|e| Error::LedgerParse {
            path,
            message: e.to_string(),
        })
    }

    /// Persist the ledger under `base`
    ///
    /// Skips the write when the serialized form equals the file on disk,
    /// and when an empty ledger has no file yet. Returns whether it wrote.
    pub fn save(&self, base: &Path) -> Result<bool> {
        let path = Self::path(base);
        let content = toml::to_string_pretty(self).map_err(|e| Error::LedgerSerialize {
            message: e.to_string(),
        })?;

        match io::read_text_if_exists(&path)? {
            Some(existing) if existing == content => {
                tracing::debug!(path = %path.display(), "Ledger unchanged");
                return Ok(false);
            }
            None if self.is_empty() => return Ok(false),
            _ => {}
        }

        io::write_text(&path, &content)?;
        tracing::debug!(path = %path.display(), entries = self.files.len(), "Saved ledger");
        Ok(true)
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether relay wrote the file at this relative path
    pub fn is_managed(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn get(&self, path: &str) -> Option<&LedgerEntry> {
        self.files.iter().find(|e| e.path == path)
    }

    /// Insert an entry, replacing any entry for the same path in place
    pub fn add(&mut self, entry: LedgerEntry) {
        match self.files.iter_mut().find(|e| e.path == entry.path) {
            Some(existing) => *existing = entry,
            None => self.files.push(entry),
        }
    }

    /// Remove the entry for a path
    ///
    /// Returns the removed entry if found, None otherwise.
    pub fn remove(&mut self, path: &str) -> Option<LedgerEntry> {
        let pos = self.files.iter().position(|e| e.path == path)?;
        Some(self.files.remove(pos))
    }

    /// All entries written for an artifact
    pub fn get_by_artifact(&self, name: &str) -> Vec<&LedgerEntry> {
        self.files.iter().filter(|e| e.artifact == name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_content::ArtifactKind;

    fn entry(path: &str, checksum: &str) -> LedgerEntry {
        LedgerEntry::main(path, checksum, "code-test", ArtifactKind::Skill)
    }

    #[test]
    fn add_replaces_in_place() {
        let mut ledger = Ledger::new();
        ledger.add(entry("a", "sha256:1"));
        ledger.add(entry("b", "sha256:2"));
        ledger.add(entry("a", "sha256:3"));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].path, "a");
        assert_eq!(ledger.entries()[0].checksum, "sha256:3");
    }

    #[test]
    fn remove_returns_entry() {
        let mut ledger = Ledger::new();
        ledger.add(entry("a", "sha256:1"));

        assert!(ledger.remove("missing").is_none());
        assert_eq!(ledger.remove("a").unwrap().checksum, "sha256:1");
        assert!(!ledger.is_managed("a"));
    }

    #[test]
    fn resource_flag_omitted_when_false() {
        let mut ledger = Ledger::new();
        ledger.add(entry("skills/x/SKILL.md", "sha256:1"));
        ledger.add(LedgerEntry::resource(
            "skills/x/run.sh",
            "sha256:2",
            "x",
            ArtifactKind::Skill,
        ));

        let serialized = toml::to_string_pretty(&ledger).unwrap();
        assert_eq!(serialized.matches("resource = true").count(), 1);
        assert!(!serialized.contains("resource = false"));
        assert!(serialized.contains("kind = \"skill\""));
    }
}
