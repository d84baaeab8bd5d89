//! Error types for the disc module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while looking for discs.
#[derive(Debug, Error)]
pub enum DiscError {
    /// The directory to search does not exist.
    #[error("Download directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// The directory tree could not be traversed.
    #[error("Failed to walk download directory: {0}")]
    Walk(#[from] walkdir::Error),
}
