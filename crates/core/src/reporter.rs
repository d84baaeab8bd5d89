//! Logging collaborator handed to the scanner, selector and extractor.
//!
//! Components never reach for a global logger: they report through a
//! [`Reporter`] so the host decides where messages go. The CLI uses
//! [`TracingReporter`] when run by hand and [`NzbgetReporter`] when run as an
//! NZBGet post-processing script.

use std::io::Write;

/// Sink for progress and diagnostic messages.
pub trait Reporter: Send + Sync {
    /// Fine-grained detail, e.g. every line printed by `makemkvcon`.
    fn debug(&self, message: &str);

    fn info(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);
}

/// Forwards messages to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Prints messages on stdout using the NZBGet script log prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NzbgetReporter;

impl NzbgetReporter {
    /// Formats a message the way NZBGet expects it on a script's stdout.
    pub fn format(level: &str, message: &str) -> String {
        format!("[{}] {}", level, message)
    }

    fn emit(level: &str, message: &str) {
        let mut stdout = std::io::stdout().lock();
        // NZBGet reads the stream line by line, a lost line is not worth a panic
        let _ = writeln!(stdout, "{}", Self::format(level, message));
        let _ = stdout.flush();
    }
}

impl Reporter for NzbgetReporter {
    fn debug(&self, message: &str) {
        Self::emit("DETAIL", message);
    }

    fn info(&self, message: &str) {
        Self::emit("INFO", message);
    }

    fn warning(&self, message: &str) {
        Self::emit("WARNING", message);
    }

    fn error(&self, message: &str) {
        Self::emit("ERROR", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nzbget_format() {
        assert_eq!(
            NzbgetReporter::format("DETAIL", "Copy complete."),
            "[DETAIL] Copy complete."
        );
        assert_eq!(
            NzbgetReporter::format("ERROR", "MakeMKV binary not found."),
            "[ERROR] MakeMKV binary not found."
        );
    }

    #[test]
    fn test_reporters_are_object_safe() {
        let reporters: Vec<Box<dyn Reporter>> =
            vec![Box::new(TracingReporter), Box::new(NzbgetReporter)];
        for reporter in &reporters {
            reporter.debug("detail");
        }
    }
}
