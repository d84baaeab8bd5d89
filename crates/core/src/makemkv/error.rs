//! Error types for the makemkv module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running `makemkvcon`.
#[derive(Debug, Error)]
pub enum MakemkvError {
    /// The binary could not be found or started.
    #[error("MakeMKV binary not found: {binary}")]
    ToolNotFound { binary: PathBuf },

    /// I/O error while talking to the process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MakemkvError {
    /// Creates a tool not found error.
    pub fn tool_not_found(binary: impl Into<PathBuf>) -> Self {
        Self::ToolNotFound {
            binary: binary.into(),
        }
    }

    /// Whether this error means no MakeMKV run can succeed on this host.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ToolNotFound { .. })
    }
}
