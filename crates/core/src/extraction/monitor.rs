//! Success detection on `makemkvcon mkv` output.

use crate::makemkv::SUCCESS_MARKER;

/// Watches extraction output lines.
///
/// MakeMKV often exits with 0 after a failed copy, so success is decided only
/// by the presence of [`SUCCESS_MARKER`]. Once seen, later lines cannot undo
/// it. Without it, the last non-empty line is the best diagnostic available.
#[derive(Debug, Default, Clone)]
pub struct OutputMonitor {
    succeeded: bool,
    last_line: Option<String>,
}

impl OutputMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, line: &str) {
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        if line.contains(SUCCESS_MARKER) {
            self.succeeded = true;
        }
        self.last_line = Some(line.to_string());
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn last_line(&self) -> Option<&str> {
        self.last_line.as_deref()
    }

    /// Diagnostic to report when no success line was seen.
    pub fn diagnostic(&self) -> String {
        self.last_line()
            .unwrap_or("no output from makemkvcon")
            .to_string()
    }
}
