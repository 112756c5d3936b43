//! Path helpers

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~/` (or a bare `~`) to the user's home directory.
///
/// Paths without a tilde, or when no home directory is known, are
/// returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Express `full` relative to `base` using forward slashes.
///
/// Ledger entries are stored in this form so they compare equal across
/// platforms. If `full` is not under `base` the full path is returned
/// with normalized separators.
pub fn relative_slash_path(base: &Path, full: &Path) -> String {
    let relative = full.strip_prefix(base).unwrap_or(full);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::RootDir => Some(String::new()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
