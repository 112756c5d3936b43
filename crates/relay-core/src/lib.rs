//! Sync engine for relay
//!
//! This crate implements:
//!
//! - **Ledger**: per-destination record of managed files and checksums
//! - **Transform**: variable expansion and metadata key renaming
//! - **Layouts**: nested and flat destination directory conventions
//! - **Sync**: two-phase detect/apply orchestration and drift checks
//!
//! # Architecture
//!
//! ```text
//!                 relay-cli
//!                     |
//!                relay-core
//!                     |
//!      +--------------+--------------+
//!      |              |              |
//!  relay-fs      relay-meta    relay-content
//! ```

pub mod error;
pub mod layout;
pub mod ledger;
pub mod sync;
pub mod transform;

pub use error::{Error, Result};
pub use layout::{DestinationLayout, FlatLayout, NestedLayout, WrittenFile, layout_for};
pub use ledger::{Ledger, LedgerEntry};
pub use sync::{
    ApplyOptions, CheckReport, CheckStatus, Conflict, DetectOptions, Detection,
    DetectionError, DetectionResult, DriftItem, Resolution, ResolutionMap, SyncError,
    SyncOptions, SyncResult, apply, check, conflict_key, detect, sync,
};
pub use transform::transform;
