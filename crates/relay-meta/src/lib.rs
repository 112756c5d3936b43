//! Configuration management for relay.
//!
//! This crate provides the configuration types consumed by the sync
//! engine, layered loading from global and project TOML files, the
//! built-in defaults, and small editing helpers used by the CLI.

pub mod config;
pub mod defaults;
pub mod edit;
pub mod error;
pub mod loader;

pub use config::{
    Config, ConflictConfig, DEFAULT_ARTIFACT_DIRS, DuplicatePolicy, FileExistsPolicy, Harness,
    LayoutKind, ManifestConfig,
};
pub use edit::{add_exclusion, remove_exclusion, write_file};
pub use error::{Error, Result};
pub use loader::{ConfigLoader, load_file, merge};
