//! Process-backed tool runner.

use async_trait::async_trait;
use std::io::{self, BufRead, BufReader, PipeReader};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;

use super::error::MakemkvError;
use super::traits::ToolRunner;

/// Number of lines buffered between the pipe readers and the consumer.
const LINE_BUFFER: usize = 256;

/// Line-by-line output of one `makemkvcon` run.
///
/// Stdout and stderr share one pipe, so lines arrive in the order the tool
/// wrote them. The stream ends once the pipe is closed.
#[derive(Debug)]
pub struct ToolOutput {
    lines: mpsc::Receiver<String>,
    child: Option<Child>,
    scripted_exit: Result<Option<i32>, io::ErrorKind>,
}

impl ToolOutput {
    /// Builds an output from canned lines, for runners that do not start a
    /// real process.
    pub fn scripted<I, S>(lines: I, exit_code: Option<i32>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let (tx, rx) = mpsc::channel(lines.len().max(1));
        for line in lines {
            // Capacity covers every line
            let _ = tx.try_send(line);
        }

        Self {
            lines: rx,
            child: None,
            scripted_exit: Ok(exit_code),
        }
    }

    /// Makes [`finish`](Self::finish) fail as if waiting for the process
    /// failed. Only meaningful on scripted outputs.
    pub fn with_wait_error(mut self, kind: io::ErrorKind) -> Self {
        self.scripted_exit = Err(kind);
        self
    }

    /// Returns the next output line, or `None` at end of stream.
    pub async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }

    /// Drains any unread output, waits for the process and returns its exit
    /// code (`None` when killed by a signal).
    pub async fn finish(mut self) -> Result<Option<i32>, MakemkvError> {
        while self.lines.recv().await.is_some() {}

        match self.child.take() {
            Some(mut child) => Ok(child.wait().await?.code()),
            None => self
                .scripted_exit
                .map_err(|kind| MakemkvError::Io(kind.into())),
        }
    }
}

/// Runs the real `makemkvcon` binary.
#[derive(Debug, Clone)]
pub struct MakemkvRunner {
    binary: PathBuf,
}

impl MakemkvRunner {
    /// Creates a runner for the given binary path.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl ToolRunner for MakemkvRunner {
    fn name(&self) -> &str {
        "makemkvcon"
    }

    async fn spawn(&self, args: Vec<String>) -> Result<ToolOutput, MakemkvError> {
        tracing::debug!("Running {} {}", self.binary.display(), args.join(" "));

        let (reader, writer) = io::pipe()?;
        let child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(writer.try_clone()?))
            .stderr(Stdio::from(writer))
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    MakemkvError::tool_not_found(&self.binary)
                } else {
                    MakemkvError::Io(e)
                }
            })?;
        // The command and its copies of the write end are gone: the pipe
        // closes when the tool exits.

        let (tx, rx) = mpsc::channel(LINE_BUFFER);
        tokio::task::spawn_blocking(move || forward_lines(reader, tx));

        Ok(ToolOutput {
            lines: rx,
            child: Some(child),
            scripted_exit: Ok(None),
        })
    }
}

fn forward_lines(pipe: PipeReader, tx: mpsc::Sender<String>) {
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!("Stopped reading makemkvcon output: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_output() {
        let mut output = ToolOutput::scripted(["first", "", "last"], Some(1));
        assert_eq!(output.next_line().await.as_deref(), Some("first"));
        assert_eq!(output.next_line().await.as_deref(), Some(""));
        assert_eq!(output.finish().await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_scripted_empty_output() {
        let mut output = ToolOutput::scripted(Vec::<String>::new(), None);
        assert_eq!(output.next_line().await, None);
        assert_eq!(output.finish().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_binary_is_tool_not_found() {
        let runner = MakemkvRunner::new("/nonexistent/bin/makemkvcon");
        let err = runner.spawn(vec!["info".to_string()]).await.unwrap_err();
        assert!(matches!(err, MakemkvError::ToolNotFound { .. }));
        assert!(err.is_fatal());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_real_process_output_is_merged() {
        let runner = MakemkvRunner::new("/bin/sh");
        let mut output = runner
            .spawn(vec![
                "-c".to_string(),
                "echo out; echo err 1>&2; exit 3".to_string(),
            ])
            .await
            .unwrap();

        let mut lines = Vec::new();
        while let Some(line) = output.next_line().await {
            lines.push(line);
        }
        assert_eq!(lines, vec!["out", "err"]);
        assert_eq!(output.finish().await.unwrap(), Some(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stderr_after_stdout_flood_is_the_last_line() {
        let runner = MakemkvRunner::new("/bin/sh");
        let script = "i=0; while [ $i -lt 3000 ]; do echo \"progress $i\"; i=$((i+1)); done; \
                      echo 'Error: disc read failed' 1>&2";

        for _ in 0..5 {
            let mut output = runner
                .spawn(vec!["-c".to_string(), script.to_string()])
                .await
                .unwrap();

            let mut count = 0;
            let mut last = None;
            while let Some(line) = output.next_line().await {
                count += 1;
                last = Some(line);
            }
            assert_eq!(count, 3001);
            assert_eq!(last.as_deref(), Some("Error: disc read failed"));
            assert_eq!(output.finish().await.unwrap(), Some(0));
        }
    }

    #[tokio::test]
    async fn test_scripted_wait_error() {
        let output = ToolOutput::scripted(["Copy complete. 1 titles saved."], Some(0))
            .with_wait_error(io::ErrorKind::Other);
        assert!(matches!(
            output.finish().await,
            Err(MakemkvError::Io(_))
        ));
    }
}
