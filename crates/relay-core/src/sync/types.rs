//! Types passed between the detect and apply phases

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use relay_content::Artifact;
use relay_meta::Harness;

use crate::Error;
use crate::ledger::Ledger;

/// Caller's decision for one conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Skip,
    Overwrite,
}

/// Resolutions keyed by [`conflict_key`]
pub type ResolutionMap = HashMap<String, Resolution>;

/// Key identifying an artifact within a destination, `<destination>:<artifact>`
pub fn conflict_key(destination: &str, artifact: &str) -> String {
    format!("{destination}:{artifact}")
}

/// An unmanaged file already sits at an artifact's target path
#[derive(Debug, Clone)]
pub struct Conflict {
    pub artifact: Artifact,
    pub destination: String,
    pub existing_path: PathBuf,
}

impl Conflict {
    pub fn key(&self) -> String {
        conflict_key(&self.destination, &self.artifact.name)
    }

    /// Whether this conflict belongs to `artifact` (same name and kind)
    pub fn matches(&self, artifact: &Artifact) -> bool {
        self.artifact.name == artifact.name && self.artifact.kind == artifact.kind
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetectOptions {
    /// Source trees, in priority order
    pub source_paths: Vec<PathBuf>,
    /// Destination names; empty means the configured defaults
    pub destinations: Vec<String>,
}

/// Detection outcome for one destination
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub destination: String,
    pub harness: Harness,
    /// Artifacts to sync, discovered ones first, then generated commands
    pub artifacts: Vec<Artifact>,
    pub conflicts: Vec<Conflict>,
    /// Number of generated commands at the end of `artifacts`
    pub generated: usize,
    pub ledger: Ledger,
}

/// A destination that could not be analysed
#[derive(Debug)]
pub struct DetectionError {
    pub destination: String,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct Detection {
    pub results: Vec<DetectionResult>,
    pub errors: Vec<DetectionError>,
}

impl Detection {
    pub fn conflicts(&self) -> impl Iterator<Item = &Conflict> {
        self.results.iter().flat_map(|r| r.conflicts.iter())
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflicts().next().is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    pub resolutions: ResolutionMap,
    /// Count would-be writes without touching the filesystem
    pub dry_run: bool,
    /// Overwrite conflicting and unmanaged files
    pub force: bool,
}

/// Options for the one-shot [`sync`](crate::sync::sync)
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub source_paths: Vec<PathBuf>,
    pub destinations: Vec<String>,
    pub dry_run: bool,
    pub force: bool,
}

impl SyncOptions {
    pub fn detect_options(&self) -> DetectOptions {
        DetectOptions {
            source_paths: self.source_paths.clone(),
            destinations: self.destinations.clone(),
        }
    }
}

/// A failure that did not stop the run
#[derive(Debug)]
pub struct SyncError {
    pub destination: String,
    /// `None` for destination-level failures
    pub artifact: Option<String>,
    pub error: Error,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.artifact {
            Some(artifact) => write!(f, "{}: {}: {}", self.destination, artifact, self.error),
            None => write!(f, "{}: {}", self.destination, self.error),
        }
    }
}

/// Totals from an apply run
#[derive(Debug, Default)]
pub struct SyncResult {
    pub synced: usize,
    pub skipped: usize,
    pub generated: usize,
    pub errors: Vec<SyncError>,
}

impl SyncResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
