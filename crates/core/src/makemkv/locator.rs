//! Locates the `makemkvcon` binary.

use std::path::{Path, PathBuf};

/// Name of the MakeMKV command line binary.
pub const MAKEMKV_BINARY: &str = "makemkvcon";

/// Resolves the MakeMKV binary.
///
/// An explicitly configured path is used when it points to a file; otherwise
/// `makemkvcon` is searched on `PATH`. Returns `None` when MakeMKV is not
/// installed.
pub fn find_makemkv_binary(configured: Option<&Path>) -> Option<PathBuf> {
    resolve(configured, || which::which(MAKEMKV_BINARY).ok())
}

fn resolve(configured: Option<&Path>, search: impl FnOnce() -> Option<PathBuf>) -> Option<PathBuf> {
    match configured {
        Some(path) if path.is_file() => Some(path.to_path_buf()),
        Some(path) => {
            tracing::debug!(
                "Configured MakeMKV binary {} not found, searching PATH",
                path.display()
            );
            search()
        }
        None => search(),
    }
}
