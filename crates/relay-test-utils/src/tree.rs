//! Temporary source trees and destinations for sync scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary artifact source directory.
///
/// # Example
///
/// ```rust
/// use relay_test_utils::SourceTree;
///
/// let tree = SourceTree::new()
///     .skill_dir("code-test", "---\nname: code-test\n---\n\nBody\n")
///     .resource("skills/code-test/scripts/run.sh", "echo hi\n")
///     .command("review", "Review the diff.\n");
/// assert!(tree.root().join("skills/code-test/SKILL.md").exists());
/// ```
pub struct SourceTree {
    temp_dir: TempDir,
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self) -> PathBuf {
        self.root().to_path_buf()
    }

    /// Write `content` to `rel` (relative to the root), creating parents.
    pub fn file(self, rel: &str, content: &str) -> Self {
        let full = self.root().join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
        self
    }

    /// A container skill: `skills/<name>/SKILL.md`.
    pub fn skill_dir(self, name: &str, content: &str) -> Self {
        self.file(&format!("skills/{name}/SKILL.md"), content)
    }

    /// A single-file skill: `skills/<name>.md`.
    pub fn skill(self, name: &str, content: &str) -> Self {
        self.file(&format!("skills/{name}.md"), content)
    }

    pub fn command(self, name: &str, content: &str) -> Self {
        self.file(&format!("commands/{name}.md"), content)
    }

    pub fn agent(self, name: &str, content: &str) -> Self {
        self.file(&format!("agents/{name}.md"), content)
    }

    /// Alias of [`SourceTree::file`] that reads better for resource files.
    pub fn resource(self, rel: &str, content: &str) -> Self {
        self.file(rel, content)
    }
}

/// A temporary destination directory with assertion helpers.
pub struct TargetDir {
    temp_dir: TempDir,
}

impl Default for TargetDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The root as a string, for use as a harness path.
    pub fn path_str(&self) -> String {
        self.root().to_string_lossy().into_owned()
    }

    /// Pre-create a file the sync engine does not manage.
    pub fn seed(&self, rel: &str, content: &str) {
        let full = self.root().join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        let full = self.root().join(rel);
        fs::read_to_string(&full)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full.display()))
    }

    /// Number of regular files under the root, recursively.
    pub fn file_count(&self) -> usize {
        fn walk(dir: &Path) -> usize {
            let Ok(entries) = fs::read_dir(dir) else {
                return 0;
            };
            entries
                .flatten()
                .map(|e| {
                    let path = e.path();
                    if path.is_dir() { walk(&path) } else { 1 }
                })
                .sum()
        }
        walk(self.root())
    }

    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, rel: &str) {
        let full = self.root().join(rel);
        assert!(full.exists(), "Expected file to exist: {}", full.display());
    }

    /// # Panics
    /// Panics if the path exists.
    pub fn assert_not_exists(&self, rel: &str) {
        let full = self.root().join(rel);
        assert!(!full.exists(), "Expected file NOT to exist: {}", full.display());
    }

    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_contains(&self, rel: &str, content: &str) {
        let actual = self.read(rel);
        assert!(
            actual.contains(content),
            "File {rel} does not contain expected content.\nExpected: {content}\nActual: {actual}"
        );
    }
}
