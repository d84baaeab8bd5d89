//! Batch driver.

use std::sync::Arc;

use super::error::BatchError;
use super::types::{BatchJob, BatchReport, DiscReport};
use crate::disc::find_blu_ray_discs;
use crate::extraction::{ExtractionJob, TitleExtractor};
use crate::makemkv::ToolRunner;
use crate::reporter::Reporter;
use crate::titles::{TitleScanner, TitleSelector};

/// Converts every movie title of a download.
pub struct ConversionBatch<R> {
    scanner: TitleScanner<R>,
    extractor: TitleExtractor<R>,
    reporter: Arc<dyn Reporter>,
}

impl<R: ToolRunner + Clone> ConversionBatch<R> {
    pub fn new(runner: R, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            scanner: TitleScanner::new(runner.clone(), reporter.clone()),
            extractor: TitleExtractor::new(runner, reporter.clone()),
            reporter,
        }
    }

    /// Replaces the title selector used on every disc.
    pub fn with_selector(mut self, selector: TitleSelector) -> Self {
        self.scanner = self.scanner.with_selector(selector);
        self
    }

    /// Runs the batch.
    ///
    /// Discs are handled one at a time, and all titles of a disc are
    /// selected before the first one is extracted. A disc without an
    /// identifiable movie title is skipped; the report tells whether the
    /// batch as a whole succeeded.
    pub async fn run(&self, job: &BatchJob) -> Result<BatchReport, BatchError> {
        if !job.download_succeeded() {
            return Err(BatchError::DownloadFailed {
                status: job.download_status.clone().unwrap_or_default(),
            });
        }

        let discs = find_blu_ray_discs(
            &job.download_directory,
            job.discs,
            self.reporter.as_ref(),
        )?;
        if discs.is_empty() {
            return Err(BatchError::NoDiscFound {
                path: job.download_directory.clone(),
            });
        }
        tracing::info!(
            movie = %job.movie_name,
            discs = discs.len(),
            "Starting conversion batch"
        );

        tokio::fs::create_dir_all(&job.output_directory)
            .await
            .map_err(|source| BatchError::OutputDirectory {
                path: job.output_directory.clone(),
                source,
            })?;

        let mut reports = Vec::with_capacity(discs.len());
        for disc in discs {
            let selection = self
                .scanner
                .identify_movie_titles(&disc, job.profile.as_deref(), job.titles)
                .await?;

            if selection.is_empty() {
                self.reporter.error(&format!(
                    "No movie title found on disc {}",
                    disc.location().display()
                ));
                reports.push(DiscReport {
                    disc,
                    results: Vec::new(),
                });
                continue;
            }

            let mut results = Vec::with_capacity(selection.len());
            for title in selection {
                let extraction = ExtractionJob {
                    movie_name: job.movie_name.clone(),
                    disc: disc.clone(),
                    title,
                    destination: job.output_directory.clone(),
                    profile: job.profile.clone(),
                };
                results.push(self.extractor.extract(&extraction).await?);
            }
            reports.push(DiscReport { disc, results });
        }

        let report = BatchReport {
            movie_name: job.movie_name.clone(),
            discs: reports,
        };
        if report.is_success() {
            self.reporter.info(&format!(
                "Successfully converted {} to MKV.",
                report.movie_name
            ));
        } else {
            self.reporter.error(&format!(
                "Conversion of {} to MKV failed: {} titles converted, {} failed",
                report.movie_name,
                report.converted(),
                report.failed()
            ));
        }

        Ok(report)
    }
}
