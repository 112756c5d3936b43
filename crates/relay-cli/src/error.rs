//! Error types for relay-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Everything a command can fail with. `User` carries a message meant
/// for the terminal as-is.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] relay_core::Error),

    /// Configuration loading or editing failed
    #[error(transparent)]
    Meta(#[from] relay_meta::Error),

    #[error(transparent)]
    Content(#[from] relay_content::Error),

    #[error(transparent)]
    Fs(#[from] relay_fs::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
