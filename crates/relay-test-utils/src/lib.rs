//! Shared test utilities for the relay workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`SourceTree`] builder for artifact source directories and
//!   [`TargetDir`] for asserting on sync destinations

pub mod tree;

pub use tree::{SourceTree, TargetDir};
