//! Filesystem primitives for relay
//!
//! Provides checksums, atomic writes, recursive resource copying and
//! the path helpers shared by the sync engine and the CLI.

pub mod checksum;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::compute_file_checksum;
pub use constants::RelayPath;
pub use error::{Error, Result};
pub use path::{expand_tilde, relative_slash_path};
