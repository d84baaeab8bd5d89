use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub makemkv: MakemkvConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub job: JobConfig,
}

/// MakeMKV command line tool configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MakemkvConfig {
    /// Explicit path to `makemkvcon`. Looked up on `PATH` when unset.
    #[serde(default)]
    pub binary: Option<PathBuf>,
    /// MakeMKV XML profile used for every invocation.
    #[serde(default)]
    pub profile: Option<PathBuf>,
}

/// Where converted movies end up
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// Per-download settings, usually filled in by NZBGet
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobConfig {
    /// Directory holding the downloaded disc(s).
    #[serde(default)]
    pub download_directory: Option<PathBuf>,
    /// Total status reported by the downloader (e.g. "SUCCESS").
    #[serde(default)]
    pub download_status: Option<String>,
    /// Movie name used for output files. Defaults to the download directory name.
    #[serde(default)]
    pub movie_name: Option<String>,
    /// Number of movie titles to extract from each disc.
    #[serde(default = "default_titles")]
    pub titles: i32,
    /// Number of discs to process.
    #[serde(default = "default_discs")]
    pub discs: i32,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            download_status: None,
            movie_name: None,
            titles: default_titles(),
            discs: default_discs(),
        }
    }
}

fn default_titles() -> i32 {
    1
}

fn default_discs() -> i32 {
    1
}
