//! Error types for relay-core

use std::path::PathBuf;

use relay_content::ArtifactKind;

/// Result type for relay-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in relay-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Ledger file exists but could not be parsed
    #[error("Failed to parse ledger {path}: {message}")]
    LedgerParse { path: PathBuf, message: String },

    #[error("Failed to serialize ledger: {message}")]
    LedgerSerialize { message: String },

    /// Template expansion failed for one field of an artifact
    #[error("Transform failed for {field}: {source}")]
    Transform {
        field: String,
        #[source]
        source: relay_content::Error,
    },

    /// Artifact kind has no directory in a destination
    #[error("Cannot write {kind} artifact '{name}'")]
    UnsupportedKind { name: String, kind: ArtifactKind },

    /// Two sources provide the same artifact
    #[error("Duplicate {kind} '{name}' in {first} and {second}")]
    DuplicateArtifact {
        name: String,
        kind: ArtifactKind,
        first: PathBuf,
        second: PathBuf,
    },

    /// Destination name missing from the configuration
    #[error("Unknown destination: {name}")]
    UnknownDestination { name: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from relay-fs
    #[error(transparent)]
    Fs(#[from] relay_fs::Error),

    /// Configuration error from relay-meta
    #[error(transparent)]
    Meta(#[from] relay_meta::Error),

    /// Content error from relay-content
    #[error(transparent)]
    Content(#[from] relay_content::Error),
}
