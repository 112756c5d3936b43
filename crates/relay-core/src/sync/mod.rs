//! Sync orchestration
//!
//! This module provides:
//! - **detect**: discover, filter and derive artifacts, find conflicts
//! - **apply**: transform and write artifacts under caller resolutions
//! - **sync**: detect then apply, leaving every conflict skipped
//! - **check**: compare ledgers against the files on disk

mod apply;
mod check;
mod derive;
mod detect;
mod types;

pub use apply::{apply, sync};
pub use check::{CheckReport, CheckStatus, DriftItem, check};
pub use derive::derive_commands;
pub use detect::detect;
pub use types::{
    ApplyOptions, Conflict, DetectOptions, Detection, DetectionError, DetectionResult,
    Resolution, ResolutionMap, SyncError, SyncOptions, SyncResult, conflict_key,
};
