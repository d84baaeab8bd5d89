//! Types for the extraction module.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::disc::Disc;
use crate::titles::TitleRecord;

/// Everything needed to extract one title.
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    /// Movie name, used to build the final file name.
    pub movie_name: String,
    pub disc: Disc,
    pub title: TitleRecord,
    /// Directory MakeMKV writes into.
    pub destination: PathBuf,
    /// MakeMKV profile passed to `makemkvcon`.
    pub profile: Option<PathBuf>,
}

impl ExtractionJob {
    /// Path of the file as written by MakeMKV.
    pub fn tool_output_path(&self) -> PathBuf {
        self.destination.join(&self.title.output_file_name)
    }

    /// File name given to the extracted title, e.g. `Super Movie - 4.mkv`.
    ///
    /// The disc ordinal is only spelled out for the second disc onwards so a
    /// single-disc movie keeps a short name.
    pub fn canonical_file_name(&self) -> String {
        match self.disc.ordinal() {
            0 | 1 => format!("{} - {}.mkv", self.movie_name, self.title.index),
            ordinal => format!(
                "{} - disc {} - {}.mkv",
                self.movie_name, ordinal, self.title.index
            ),
        }
    }

    pub fn canonical_path(&self) -> PathBuf {
        self.destination.join(self.canonical_file_name())
    }
}

/// How the extracted file ended up being named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalName {
    /// Moved to the canonical movie name.
    Renamed,
    /// The rename failed, MakeMKV's own file name was kept.
    KeptOriginalName,
}

/// Outcome of one title extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionResult {
    Succeeded { path: PathBuf, naming: FinalName },
    Failed { diagnostic: String },
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Final path of the extracted file, if the extraction succeeded.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Succeeded { path, .. } => Some(path),
            Self::Failed { .. } => None,
        }
    }

    /// Last MakeMKV output line, if the extraction failed.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed { diagnostic } => Some(diagnostic),
        }
    }

    /// Terminal state this result corresponds to.
    pub fn state(&self) -> ExtractionState {
        match self {
            Self::Succeeded { naming, .. } => ExtractionState::Succeeded(*naming),
            Self::Failed { .. } => ExtractionState::Failed,
        }
    }
}

/// Lifecycle of a title extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionState {
    NotStarted,
    Running,
    Succeeded(FinalName),
    Failed,
}

impl ExtractionState {
    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(&self, next: ExtractionState) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::Running)
                | (Self::Running, Self::Succeeded(_))
                | (Self::Running, Self::Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed)
    }
}

impl fmt::Display for ExtractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("not started"),
            Self::Running => f.write_str("running"),
            Self::Succeeded(FinalName::Renamed) => f.write_str("succeeded (renamed)"),
            Self::Succeeded(FinalName::KeptOriginalName) => {
                f.write_str("succeeded (kept original name)")
            }
            Self::Failed => f.write_str("failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::DiscKind;
    use crate::testing::fixtures;

    fn job(ordinal: usize) -> ExtractionJob {
        ExtractionJob {
            movie_name: "Super Movie".to_string(),
            disc: Disc::new(DiscKind::Image, "/downloads/movie.iso", ordinal),
            title: fixtures::title_record(4, 16, 8074, 31.8),
            destination: PathBuf::from("/library/movies"),
            profile: None,
        }
    }

    #[test]
    fn test_paths() {
        let job = job(1);
        assert_eq!(
            job.tool_output_path(),
            PathBuf::from("/library/movies/MOVIE_t04.mkv")
        );
        assert_eq!(
            job.canonical_path(),
            PathBuf::from("/library/movies/Super Movie - 4.mkv")
        );
    }

    #[test]
    fn test_canonical_name_on_later_discs() {
        assert_eq!(job(2).canonical_file_name(), "Super Movie - disc 2 - 4.mkv");
    }

    #[test]
    fn test_state_transitions() {
        use ExtractionState::*;

        assert!(NotStarted.can_transition_to(Running));
        assert!(Running.can_transition_to(Succeeded(FinalName::Renamed)));
        assert!(Running.can_transition_to(Succeeded(FinalName::KeptOriginalName)));
        assert!(Running.can_transition_to(Failed));

        assert!(!NotStarted.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Running));
        assert!(!Succeeded(FinalName::Renamed).can_transition_to(Failed));
        assert!(Failed.is_terminal());
        assert!(!Running.is_terminal());
    }

    #[test]
    fn test_result_accessors() {
        let ok = ConversionResult::Succeeded {
            path: PathBuf::from("/library/movies/Super Movie - 4.mkv"),
            naming: FinalName::Renamed,
        };
        assert!(ok.is_success());
        assert_eq!(ok.state(), ExtractionState::Succeeded(FinalName::Renamed));
        assert!(ok.diagnostic().is_none());

        let failed = ConversionResult::Failed {
            diagnostic: "Copy complete. 0 titles saved, 1 failed.".to_string(),
        };
        assert!(failed.path().is_none());
        assert_eq!(failed.state(), ExtractionState::Failed);
        assert_eq!(
            serde_json::to_value(&failed).unwrap()["status"],
            "failed"
        );
    }
}
