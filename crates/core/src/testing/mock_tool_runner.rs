//! Mock tool runner for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::makemkv::{MakemkvError, ToolOutput, ToolRunner};

/// One canned `makemkvcon` run.
#[derive(Debug, Clone)]
pub struct ScriptedRun {
    /// Lines printed by the run.
    pub lines: Vec<String>,
    /// Exit code reported once the output is drained.
    pub exit_code: Option<i32>,
    /// Files the run leaves behind, as MakeMKV would.
    pub creates: Vec<PathBuf>,
    /// Error returned when waiting for the process.
    pub wait_error: Option<io::ErrorKind>,
}

impl ScriptedRun {
    /// A run printing `lines` and exiting with 0.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            exit_code: Some(0),
            creates: Vec::new(),
            wait_error: None,
        }
    }

    pub fn with_exit_code(mut self, exit_code: Option<i32>) -> Self {
        self.exit_code = exit_code;
        self
    }

    /// Makes waiting for the process fail once the output is drained.
    pub fn failing_wait(mut self, kind: io::ErrorKind) -> Self {
        self.wait_error = Some(kind);
        self
    }

    /// Writes an empty file at `path` when the run starts.
    pub fn creating(mut self, path: impl Into<PathBuf>) -> Self {
        self.creates.push(path.into());
        self
    }
}

/// Mock implementation of the ToolRunner trait.
///
/// Runs are replayed in the order they were pushed; once the queue is empty
/// every run prints nothing and exits with 0. Clones share their state, so a
/// test can keep one handle and give another to the code under test.
#[derive(Debug, Clone, Default)]
pub struct MockToolRunner {
    /// Queued runs.
    runs: Arc<RwLock<VecDeque<ScriptedRun>>>,
    /// Arguments of every spawn, in order.
    invocations: Arc<RwLock<Vec<Vec<String>>>>,
    /// Behave as if the binary were not installed.
    missing: Arc<RwLock<bool>>,
}

impl MockToolRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a run.
    pub async fn push_run(&self, run: ScriptedRun) {
        self.runs.write().await.push_back(run);
    }

    /// Makes every spawn fail with [`MakemkvError::ToolNotFound`].
    pub async fn set_missing(&self, missing: bool) {
        *self.missing.write().await = missing;
    }

    /// Arguments of every spawn so far.
    pub async fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations.read().await.clone()
    }

    pub async fn invocation_count(&self) -> usize {
        self.invocations.read().await.len()
    }
}

#[async_trait]
impl ToolRunner for MockToolRunner {
    fn name(&self) -> &str {
        "mock-makemkvcon"
    }

    async fn spawn(&self, args: Vec<String>) -> Result<ToolOutput, MakemkvError> {
        self.invocations.write().await.push(args);

        if *self.missing.read().await {
            return Err(MakemkvError::tool_not_found("makemkvcon"));
        }

        let run = self
            .runs
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| ScriptedRun::new(Vec::<String>::new()));

        for path in &run.creates {
            tokio::fs::write(path, b"").await?;
        }

        let output = ToolOutput::scripted(run.lines, run.exit_code);
        Ok(match run.wait_error {
            Some(kind) => output.with_wait_error(kind),
            None => output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_runs_are_replayed_in_order() {
        let runner = MockToolRunner::new();
        runner.push_run(ScriptedRun::new(["first"])).await;
        runner
            .push_run(ScriptedRun::new(["second"]).with_exit_code(Some(2)))
            .await;

        let mut output = runner.spawn(vec!["info".to_string()]).await.unwrap();
        assert_eq!(output.next_line().await.as_deref(), Some("first"));
        assert_eq!(output.finish().await.unwrap(), Some(0));

        let mut output = runner.spawn(vec!["mkv".to_string()]).await.unwrap();
        assert_eq!(output.next_line().await.as_deref(), Some("second"));
        assert_eq!(output.finish().await.unwrap(), Some(2));

        let mut output = runner.spawn(Vec::new()).await.unwrap();
        assert!(output.next_line().await.is_none());

        assert_eq!(runner.invocation_count().await, 3);
        assert_eq!(runner.invocations().await[1], vec!["mkv"]);
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let runner = MockToolRunner::new();
        runner.set_missing(true).await;

        let err = runner.spawn(Vec::new()).await.unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(runner.invocation_count().await, 1);
    }

    #[tokio::test]
    async fn test_created_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MOVIE_t00.mkv");

        let runner = MockToolRunner::new();
        runner
            .push_run(ScriptedRun::new(["Copy complete. 1 titles saved."]).creating(&path))
            .await;
        runner.spawn(Vec::new()).await.unwrap();

        assert!(path.exists());
    }
}
