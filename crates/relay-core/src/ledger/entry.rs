//! Ledger entry type

use relay_content::ArtifactKind;
use serde::{Deserialize, Serialize};

/// One managed file in a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Destination-relative path with `/` separators
    pub path: String,
    /// `sha256:<hex>` of the file as written
    pub checksum: String,
    /// Name of the artifact that produced the file
    pub artifact: String,
    pub kind: ArtifactKind,
    /// True for files copied from an artifact's resources
    #[serde(default, skip_serializing_if = "is_false")]
    pub resource: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl LedgerEntry {
    /// Entry for an artifact's main file
    pub fn main(
        path: impl Into<String>,
        checksum: impl Into<String>,
        artifact: impl Into<String>,
        kind: ArtifactKind,
    ) -> Self {
        Self {
            path: path.into(),
            checksum: checksum.into(),
            artifact: artifact.into(),
            kind,
            resource: false,
        }
    }

    /// Entry for a resource file
    pub fn resource(
        path: impl Into<String>,
        checksum: impl Into<String>,
        artifact: impl Into<String>,
        kind: ArtifactKind,
    ) -> Self {
        Self {
            resource: true,
            ..Self::main(path, checksum, artifact, kind)
        }
    }
}
