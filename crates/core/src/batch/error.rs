//! Error types for the batch module.

use std::path::PathBuf;
use thiserror::Error;

use crate::disc::DiscError;
use crate::makemkv::MakemkvError;

/// Errors that stop a batch before or while it runs.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The downloader reported a failed download.
    #[error("Download is not complete (status: {status})")]
    DownloadFailed { status: String },

    /// A required setting is missing.
    #[error("Missing required option: {option}")]
    MissingOption { option: &'static str },

    /// No disc was found in the download.
    #[error("No Blu-Ray disc found in {path}")]
    NoDiscFound { path: PathBuf },

    #[error(transparent)]
    Disc(#[from] DiscError),

    #[error(transparent)]
    Makemkv(#[from] MakemkvError),

    /// The output directory could not be prepared.
    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BatchError {
    /// Creates a missing option error.
    pub fn missing_option(option: &'static str) -> Self {
        Self::MissingOption { option }
    }
}
