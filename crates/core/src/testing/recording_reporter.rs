//! Reporter that keeps every message.

use std::sync::Mutex;

use crate::reporter::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

/// Reporter storing messages in memory for assertions.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    entries: Mutex<Vec<(Level, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debugs(&self) -> Vec<String> {
        self.messages(Level::Debug)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages(Level::Info)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::Warning)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Level::Error)
    }

    fn messages(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    fn record(&self, level: Level, message: &str) {
        self.lock().push((level, message.to_string()));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Level, String)>> {
        // A test that panicked while holding the lock already failed
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Reporter for RecordingReporter {
    fn debug(&self, message: &str) {
        self.record(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    fn warning(&self, message: &str) {
        self.record(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }
}
