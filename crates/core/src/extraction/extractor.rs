//! Runs `makemkvcon mkv` for one title.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::monitor::OutputMonitor;
use super::types::{ConversionResult, ExtractionJob, ExtractionState, FinalName};
use crate::makemkv::{extract_args, MakemkvError, ToolRunner};
use crate::reporter::Reporter;

/// Extracts titles to MKV files.
pub struct TitleExtractor<R> {
    runner: R,
    reporter: Arc<dyn Reporter>,
}

impl<R: ToolRunner> TitleExtractor<R> {
    pub fn new(runner: R, reporter: Arc<dyn Reporter>) -> Self {
        Self { runner, reporter }
    }

    /// Extracts the title described by `job`.
    ///
    /// Every output line is reported at debug level. On success the file is
    /// moved to [`ExtractionJob::canonical_path`]; if that fails the file
    /// keeps the name MakeMKV gave it. On failure whatever MakeMKV wrote is
    /// deleted and the last output line is returned as the diagnostic.
    ///
    /// Errors are only returned when MakeMKV could not be run at all.
    pub async fn extract(&self, job: &ExtractionJob) -> Result<ConversionResult, MakemkvError> {
        let mut state = ExtractionState::NotStarted;
        let args = extract_args(
            &job.disc,
            job.title.index,
            &job.destination,
            job.profile.as_deref(),
        );

        let mut output = self.runner.spawn(args).await?;
        advance(&mut state, ExtractionState::Running);
        self.reporter.info(&format!(
            "Converting title {} of {} ({}, {} GB)",
            job.title.index,
            job.disc.location().display(),
            format_duration(job.title.duration.as_secs()),
            job.title.size_gib
        ));

        let mut monitor = OutputMonitor::new();
        while let Some(line) = output.next_line().await {
            self.reporter.debug(&line);
            monitor.observe(&line);
        }
        // Success is decided by the output alone, the exit code is informative
        match output.finish().await {
            Ok(exit_code) => tracing::debug!(
                runner = self.runner.name(),
                title = job.title.index,
                exit_code = ?exit_code,
                "Extraction finished"
            ),
            Err(e) => self.reporter.warning(&format!(
                "Unable to wait for {} after title {}: {}",
                self.runner.name(),
                job.title.index,
                e
            )),
        }

        let result = if monitor.succeeded() {
            let (path, naming) = self.rename(job).await;
            ConversionResult::Succeeded { path, naming }
        } else {
            self.reporter.error(&format!(
                "Unable to convert the title {} from disc {}: {}",
                job.title.index,
                job.disc.location().display(),
                monitor.diagnostic()
            ));
            self.remove_partial_output(&job.tool_output_path()).await;
            ConversionResult::Failed {
                diagnostic: monitor.diagnostic(),
            }
        };

        advance(&mut state, result.state());
        Ok(result)
    }

    /// Moves the extracted file to its canonical name without overwriting
    /// anything already there.
    async fn rename(&self, job: &ExtractionJob) -> (PathBuf, FinalName) {
        let source = job.tool_output_path();
        let target = job.canonical_path();

        match rename_no_clobber(&source, &target).await {
            Ok(()) => {
                self.reporter.info(&format!(
                    "Title {} saved as {}",
                    job.title.index,
                    target.display()
                ));
                (target, FinalName::Renamed)
            }
            Err(e) => {
                self.reporter.warning(&format!(
                    "Unable to rename {} to {}: {}",
                    source.display(),
                    target.display(),
                    e
                ));
                (source, FinalName::KeptOriginalName)
            }
        }
    }

    async fn remove_partial_output(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => self
                .reporter
                .debug(&format!("Removed partial output {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => self.reporter.warning(&format!(
                "Unable to remove partial output {}: {}",
                path.display(),
                e
            )),
        }
    }
}

fn advance(state: &mut ExtractionState, next: ExtractionState) {
    debug_assert!(
        state.can_transition_to(next),
        "invalid extraction transition {} -> {}",
        state,
        next
    );
    tracing::trace!("Extraction {} -> {}", state, next);
    *state = next;
}

/// Moves `source` to `target`, failing with `AlreadyExists` instead of
/// replacing an existing file.
///
/// Linking fails atomically when `target` exists. Filesystems without hard
/// links fall back to a check followed by a rename.
async fn rename_no_clobber(source: &Path, target: &Path) -> io::Result<()> {
    match tokio::fs::hard_link(source, target).await {
        Ok(()) => {
            if let Err(e) = tokio::fs::remove_file(source).await {
                // Leave a single copy behind, under the original name
                let _ = tokio::fs::remove_file(target).await;
                return Err(e);
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(e),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(e),
        Err(_) => {
            if tokio::fs::try_exists(target).await? {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "target file already exists",
                ));
            }
            tokio::fs::rename(source, target).await
        }
    }
}

fn format_duration(secs: u64) -> String {
    format!("{}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::{Disc, DiscKind};
    use crate::testing::{fixtures, MockToolRunner, RecordingReporter, ScriptedRun};

    struct Fixture {
        runner: MockToolRunner,
        reporter: Arc<RecordingReporter>,
        extractor: TitleExtractor<MockToolRunner>,
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let runner = MockToolRunner::new();
            let reporter = Arc::new(RecordingReporter::new());
            let extractor = TitleExtractor::new(runner.clone(), reporter.clone());
            Self {
                runner,
                reporter,
                extractor,
                dir: tempfile::tempdir().unwrap(),
            }
        }

        fn job(&self) -> ExtractionJob {
            ExtractionJob {
                movie_name: "Super Movie".to_string(),
                disc: Disc::new(DiscKind::Image, "/downloads/movie.iso", 1),
                title: fixtures::title_record(4, 16, 8074, 31.8),
                destination: self.dir.path().to_path_buf(),
                profile: None,
            }
        }
    }

    #[tokio::test]
    async fn test_successful_extraction_is_renamed() {
        let fx = Fixture::new();
        let job = fx.job();
        fx.runner
            .push_run(
                ScriptedRun::new(fixtures::EXTRACTION_SUCCESS_OUTPUT.lines())
                    .creating(job.tool_output_path()),
            )
            .await;

        let result = fx.extractor.extract(&job).await.unwrap();

        let expected = fx.dir.path().join("Super Movie - 4.mkv");
        assert_eq!(
            result,
            ConversionResult::Succeeded {
                path: expected.clone(),
                naming: FinalName::Renamed
            }
        );
        assert!(expected.exists());
        assert!(!job.tool_output_path().exists());

        let invocations = fx.runner.invocations().await;
        assert_eq!(
            invocations[0],
            vec![
                "mkv".to_string(),
                "iso:/downloads/movie.iso".to_string(),
                "4".to_string(),
                fx.dir.path().to_string_lossy().to_string(),
            ]
        );
        assert!(fx
            .reporter
            .debugs()
            .contains(&"Copy complete. 1 titles saved.".to_string()));
    }

    #[tokio::test]
    async fn test_clean_exit_without_marker_is_a_failure() {
        let fx = Fixture::new();
        let job = fx.job();
        fx.runner
            .push_run(
                ScriptedRun::new(fixtures::EXTRACTION_FAILURE_OUTPUT.lines())
                    .creating(job.tool_output_path()),
            )
            .await;

        let result = fx.extractor.extract(&job).await.unwrap();

        assert_eq!(
            result.diagnostic(),
            Some("Copy complete. 0 titles saved, 1 failed.")
        );
        assert!(!job.tool_output_path().exists());
        assert!(!job.canonical_path().exists());
        assert!(fx.reporter.errors()[0].starts_with("Unable to convert the title 4 from disc"));
    }

    #[tokio::test]
    async fn test_marker_wins_over_exit_code() {
        let fx = Fixture::new();
        let job = fx.job();
        fx.runner
            .push_run(
                ScriptedRun::new(fixtures::EXTRACTION_SUCCESS_OUTPUT.lines())
                    .with_exit_code(Some(1))
                    .creating(job.tool_output_path()),
            )
            .await;

        let result = fx.extractor.extract(&job).await.unwrap();
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_rename_collision_keeps_original_name() {
        let fx = Fixture::new();
        let job = fx.job();
        std::fs::write(job.canonical_path(), b"previous rip").unwrap();
        fx.runner
            .push_run(
                ScriptedRun::new(fixtures::EXTRACTION_SUCCESS_OUTPUT.lines())
                    .creating(job.tool_output_path()),
            )
            .await;

        let result = fx.extractor.extract(&job).await.unwrap();

        assert_eq!(
            result,
            ConversionResult::Succeeded {
                path: job.tool_output_path(),
                naming: FinalName::KeptOriginalName
            }
        );
        assert_eq!(std::fs::read(job.canonical_path()).unwrap(), b"previous rip");
        assert_eq!(fx.reporter.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_wait_error_after_success_keeps_the_title() {
        let fx = Fixture::new();
        let job = fx.job();
        fx.runner
            .push_run(
                ScriptedRun::new(fixtures::EXTRACTION_SUCCESS_OUTPUT.lines())
                    .creating(job.tool_output_path())
                    .failing_wait(io::ErrorKind::Interrupted),
            )
            .await;

        let result = fx.extractor.extract(&job).await.unwrap();

        assert_eq!(
            result,
            ConversionResult::Succeeded {
                path: job.canonical_path(),
                naming: FinalName::Renamed
            }
        );
        assert!(fx.reporter.warnings()[0].starts_with("Unable to wait for mock-makemkvcon"));
    }

    #[tokio::test]
    async fn test_missing_output_file_keeps_original_name() {
        let fx = Fixture::new();
        fx.runner
            .push_run(ScriptedRun::new(fixtures::EXTRACTION_SUCCESS_OUTPUT.lines()))
            .await;

        let result = fx.extractor.extract(&fx.job()).await.unwrap();
        assert_eq!(result.state(), ExtractionState::Succeeded(FinalName::KeptOriginalName));
    }

    #[tokio::test]
    async fn test_no_output() {
        let fx = Fixture::new();

        let result = fx.extractor.extract(&fx.job()).await.unwrap();
        assert_eq!(result.diagnostic(), Some("no output from makemkvcon"));
    }

    #[tokio::test]
    async fn test_profile_is_passed() {
        let fx = Fixture::new();
        let mut job = fx.job();
        job.profile = Some(PathBuf::from("/profiles/default.mmcp.xml"));

        fx.extractor.extract(&job).await.unwrap();
        assert_eq!(
            fx.runner.invocations().await[0][0],
            "--profile=/profiles/default.mmcp.xml"
        );
    }

    #[tokio::test]
    async fn test_missing_makemkv() {
        let fx = Fixture::new();
        fx.runner.set_missing(true).await;

        let err = fx.extractor.extract(&fx.job()).await.unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_rename_moves_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("MOVIE_t04.mkv");
        let target = dir.path().join("Super Movie - 4.mkv");
        std::fs::write(&source, b"matroska").unwrap();

        rename_no_clobber(&source, &target).await.unwrap();

        assert!(!source.exists());
        assert_eq!(std::fs::read(&target).unwrap(), b"matroska");
    }

    #[tokio::test]
    async fn test_rename_never_replaces_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("MOVIE_t04.mkv");
        let target = dir.path().join("Super Movie - 4.mkv");
        std::fs::write(&source, b"new rip").unwrap();
        std::fs::write(&target, b"previous rip").unwrap();

        let err = rename_no_clobber(&source, &target).await.unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read(&source).unwrap(), b"new rip");
        assert_eq!(std::fs::read(&target).unwrap(), b"previous rip");
    }

    #[tokio::test]
    async fn test_rename_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Super Movie - 4.mkv");

        let err = rename_no_clobber(&dir.path().join("MOVIE_t04.mkv"), &target)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!target.exists());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(8074), "2:14:34");
        assert_eq!(format_duration(59), "0:00:59");
    }
}
