//! Types for the batch module.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::error::BatchError;
use crate::config::Config;
use crate::disc::Disc;
use crate::extraction::ConversionResult;

/// Download status NZBGet reports for a complete, verified download.
pub const SUCCESSFUL_DOWNLOAD_STATUS: &str = "SUCCESS";

/// Resolved settings of one conversion batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub download_directory: PathBuf,
    pub download_status: Option<String>,
    pub movie_name: String,
    pub output_directory: PathBuf,
    pub profile: Option<PathBuf>,
    /// Movie titles to extract from each disc.
    pub titles: i32,
    /// Maximum number of discs to process.
    pub discs: i32,
}

impl BatchJob {
    /// Builds a job from a loaded configuration.
    ///
    /// The movie name falls back to the download directory's name, which is
    /// what NZBGet names it after.
    pub fn from_config(config: &Config) -> Result<Self, BatchError> {
        let download_directory = config
            .job
            .download_directory
            .clone()
            .ok_or_else(|| BatchError::missing_option("job.download_directory"))?;
        let output_directory = config
            .output
            .directory
            .clone()
            .ok_or_else(|| BatchError::missing_option("output.directory"))?;

        let movie_name = match &config.job.movie_name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => directory_name(&download_directory)
                .ok_or_else(|| BatchError::missing_option("job.movie_name"))?,
        };

        Ok(Self {
            download_directory,
            download_status: config.job.download_status.clone(),
            movie_name,
            output_directory,
            profile: config.makemkv.profile.clone(),
            titles: config.job.titles,
            discs: config.job.discs,
        })
    }

    /// Whether the downloader reported the download as usable.
    pub fn download_succeeded(&self) -> bool {
        self.download_status
            .as_deref()
            .is_none_or(|status| status.eq_ignore_ascii_case(SUCCESSFUL_DOWNLOAD_STATUS))
    }
}

fn directory_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .filter(|name| !name.is_empty())
}

/// Outcome of one disc.
#[derive(Debug, Clone, Serialize)]
pub struct DiscReport {
    pub disc: Disc,
    /// One result per selected title, in selection order. Empty when no
    /// movie title could be identified.
    pub results: Vec<ConversionResult>,
}

impl DiscReport {
    pub fn converted(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.converted()
    }

    /// Whether no title was identified on this disc.
    pub fn skipped(&self) -> bool {
        self.results.is_empty()
    }
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub movie_name: String,
    pub discs: Vec<DiscReport>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.discs.iter().map(DiscReport::converted).sum()
    }

    pub fn failed(&self) -> usize {
        self.discs.iter().map(DiscReport::failed).sum()
    }

    /// At least one title was converted and no extraction failed.
    pub fn is_success(&self) -> bool {
        self.converted() > 0 && self.failed() == 0
    }

    /// Final paths of the converted titles.
    pub fn converted_paths(&self) -> Vec<&Path> {
        self.discs
            .iter()
            .flat_map(|d| d.results.iter().filter_map(ConversionResult::path))
            .collect()
    }

    pub fn status(&self) -> PostProcessStatus {
        if self.is_success() {
            PostProcessStatus::Success
        } else {
            PostProcessStatus::Error
        }
    }
}

/// Post-processing outcome, as understood by NZBGet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcessStatus {
    Success,
    Error,
}

impl PostProcessStatus {
    /// Process exit code NZBGet maps to this status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success => 93,
            Self::Error => 94,
        }
    }
}
