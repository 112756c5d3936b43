//! Ledger checksums
//!
//! Managed files are recorded as `sha256:<hex>` of their full content.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

use crate::{Error, Result};

const PREFIX: &str = "sha256:";

/// Checksum of the file at `path`, read in chunks.
///
/// # Errors
///
/// Returns an `Io` error carrying `path` if the file cannot be opened or
/// read.
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| Error::io(path, e))?;
    Ok(format!("{PREFIX}{:x}", hasher.finalize()))
}
