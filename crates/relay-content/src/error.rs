//! Error types for relay-content

use std::path::PathBuf;

/// Result type for relay-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in relay-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] relay_fs::Error),

    #[error("Failed to read {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template parse error at byte {position}: {message}")]
    TemplateParse { position: usize, message: String },

    #[error("Undefined template variable: {name}")]
    UndefinedVariable { name: String },

    #[error("Invalid manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("Failed to serialize {format}: {message}")]
    Serialize { format: String, message: String },
}

impl Error {
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::TemplateParse {
            position,
            message: message.into(),
        }
    }

    pub fn discovery(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Discovery {
            path: path.into(),
            source,
        }
    }
}
