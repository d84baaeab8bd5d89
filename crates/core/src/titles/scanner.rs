//! Runs MakeMKV in info mode and feeds its output to the parser.

use std::path::Path;
use std::sync::Arc;

use super::parser::{TitleScan, TitleStreamParser};
use super::selector::TitleSelector;
use super::types::TitleSelection;
use crate::disc::Disc;
use crate::makemkv::{info_args, MakemkvError, ToolRunner};
use crate::reporter::Reporter;

/// Discovers the movie titles of a disc.
pub struct TitleScanner<R> {
    runner: R,
    selector: TitleSelector,
    reporter: Arc<dyn Reporter>,
}

impl<R: ToolRunner> TitleScanner<R> {
    /// Creates a scanner using the default selector.
    pub fn new(runner: R, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            runner,
            selector: TitleSelector::default(),
            reporter,
        }
    }

    /// Replaces the title selector.
    pub fn with_selector(mut self, selector: TitleSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn selector(&self) -> &TitleSelector {
        &self.selector
    }

    /// Runs `makemkvcon -r info` on `disc` and parses every title it reports.
    pub async fn scan(&self, disc: &Disc, profile: Option<&Path>) -> Result<TitleScan, MakemkvError> {
        let mut output = self.runner.spawn(info_args(disc, profile)).await?;

        let mut parser = TitleStreamParser::new();
        while let Some(line) = output.next_line().await {
            parser.feed(&line);
        }
        // Every line has been read: a failed wait only loses the exit code
        let exit_code = match output.finish().await {
            Ok(code) => code,
            Err(e) => {
                self.reporter.warning(&format!(
                    "Unable to wait for {}: {}",
                    self.runner.name(),
                    e
                ));
                None
            }
        };

        let scan = parser.finish();
        for index in &scan.discarded {
            self.reporter.debug(&format!(
                "Title {} of {} was only partially described, ignoring it",
                index,
                disc.location().display()
            ));
        }
        self.reporter.debug(&format!(
            "{} titles found on {} ({} exit code: {:?})",
            scan.records.len(),
            disc.location().display(),
            self.runner.name(),
            exit_code
        ));

        Ok(scan)
    }

    /// Returns the `count` most relevant movie titles of `disc`.
    ///
    /// A disc can hold several movie titles and additional features; when
    /// there is any doubt about which title is the movie, nothing is returned.
    /// `count <= 0` returns an empty selection without running MakeMKV.
    pub async fn identify_movie_titles(
        &self,
        disc: &Disc,
        profile: Option<&Path>,
        count: i32,
    ) -> Result<TitleSelection, MakemkvError> {
        if count <= 0 {
            return Ok(TitleSelection::empty());
        }

        let scan = self.scan(disc, profile).await?;
        let selection = self
            .selector
            .select(&scan.records, count as usize, self.reporter.as_ref());

        if selection.is_empty() {
            self.reporter.warning(&format!(
                "No movie title could be identified on {}",
                disc.location().display()
            ));
        }

        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::DiscKind;
    use crate::testing::{fixtures, MockToolRunner, RecordingReporter, ScriptedRun};

    fn scanner(runner: &MockToolRunner) -> (TitleScanner<MockToolRunner>, Arc<RecordingReporter>) {
        let reporter = Arc::new(RecordingReporter::new());
        (TitleScanner::new(runner.clone(), reporter.clone()), reporter)
    }

    fn disc() -> Disc {
        Disc::new(DiscKind::Image, "/downloads/movie.iso", 1)
    }

    #[tokio::test]
    async fn test_no_title_requested_does_not_run_makemkv() {
        let runner = MockToolRunner::new();
        let (scanner, _) = scanner(&runner);

        for count in [-1, 0] {
            let selection = scanner
                .identify_movie_titles(&disc(), None, count)
                .await
                .unwrap();
            assert!(selection.is_empty());
        }
        assert_eq!(runner.invocation_count().await, 0);
    }

    #[tokio::test]
    async fn test_identify_movie_titles() {
        let runner = MockToolRunner::new();
        let (scanner, _) = scanner(&runner);

        for count in 1..=5 {
            runner
                .push_run(ScriptedRun::new(fixtures::INFO_OUTPUT.lines()))
                .await;
            let selection = scanner
                .identify_movie_titles(&disc(), None, count)
                .await
                .unwrap();

            let expected: Vec<_> = fixtures::movie_titles()
                .into_iter()
                .rev()
                .take(count as usize)
                .collect();
            assert_eq!(selection.titles(), expected.as_slice());
        }

        let invocations = runner.invocations().await;
        assert_eq!(invocations.len(), 5);
        assert_eq!(invocations[0], vec!["-r", "info", "iso:/downloads/movie.iso"]);
    }

    #[tokio::test]
    async fn test_scan_passes_profile_and_reports_discarded_titles() {
        let runner = MockToolRunner::new();
        runner
            .push_run(ScriptedRun::new(fixtures::INFO_OUTPUT.lines()))
            .await;
        let (scanner, reporter) = scanner(&runner);

        let scan = scanner
            .scan(&disc(), Some(Path::new("/profiles/default.mmcp.xml")))
            .await
            .unwrap();
        assert_eq!(scan.records.len(), 5);
        assert_eq!(scan.discarded, vec![5]);

        let invocations = runner.invocations().await;
        assert_eq!(invocations[0][1], "--profile=/profiles/default.mmcp.xml");
        assert!(reporter
            .debugs()
            .iter()
            .any(|m| m.contains("Title 5") && m.contains("partially described")));
    }

    #[tokio::test]
    async fn test_ambiguous_disc_yields_nothing() {
        let runner = MockToolRunner::new();
        runner
            .push_run(ScriptedRun::new(fixtures::AMBIGUOUS_INFO_OUTPUT.lines()))
            .await;
        let (scanner, reporter) = scanner(&runner);

        let selection = scanner
            .identify_movie_titles(&disc(), None, 1)
            .await
            .unwrap();
        assert!(selection.is_empty());
        assert!(reporter
            .warnings()
            .iter()
            .any(|m| m.contains("Identical movie titles")));
    }

    #[tokio::test]
    async fn test_missing_makemkv() {
        let runner = MockToolRunner::new();
        runner.set_missing(true).await;
        let (scanner, _) = scanner(&runner);

        let err = scanner
            .identify_movie_titles(&disc(), None, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, MakemkvError::ToolNotFound { .. }));
    }

    #[tokio::test]
    async fn test_wait_error_keeps_parsed_titles() {
        let runner = MockToolRunner::new();
        runner
            .push_run(
                ScriptedRun::new(fixtures::INFO_OUTPUT.lines())
                    .failing_wait(std::io::ErrorKind::Other),
            )
            .await;
        let (scanner, reporter) = scanner(&runner);

        let scan = scanner.scan(&disc(), None).await.unwrap();
        assert_eq!(scan.records.len(), 5);
        assert_eq!(reporter.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_exit_code_does_not_matter_for_scans() {
        let runner = MockToolRunner::new();
        runner
            .push_run(ScriptedRun::new(fixtures::INFO_OUTPUT.lines()).with_exit_code(Some(1)))
            .await;
        let (scanner, _) = scanner(&runner);

        let scan = scanner.scan(&disc(), None).await.unwrap();
        assert_eq!(scan.records.len(), 5);
    }
}
