//! Reserved file and directory names.

use std::path::Path;

/// Well-known relay paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayPath {
    /// Ledger file in every destination root
    LedgerFile,
    /// Project configuration file in a source tree
    ProjectConfig,
    /// Metadata directory in a source tree
    MetaDir,
    /// Source manifest inside the metadata directory
    ManifestFile,
}

impl RelayPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LedgerFile => ".relay.lock",
            Self::ProjectConfig => "relay.toml",
            Self::MetaDir => ".relay",
            Self::ManifestFile => "manifest.yaml",
        }
    }
}

impl AsRef<Path> for RelayPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for RelayPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for RelayPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
