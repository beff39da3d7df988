//! Logger callback consumed by the store
//!
//! The store never decides where log lines go. It hands a severity and a
//! formatted message to whatever `LogSink` the configuration carries.

use std::fmt;
use std::sync::{Arc, Mutex};

use super::logger::{Logger, Severity};

type LogFn = dyn Fn(Severity, &str) + Send + Sync;

/// Cloneable `(level, message)` callback
#[derive(Clone)]
pub struct LogSink {
    f: Arc<LogFn>,
}

impl LogSink {
    /// Wrap an arbitrary callback
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Severity, &str) + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Structured JSON lines through [`Logger`]
    pub fn json() -> Self {
        Self::from_fn(|severity, message| Logger::emit(severity, "mockblock", message))
    }

    /// Structured JSON lines, all on stderr
    pub fn json_stderr() -> Self {
        Self::from_fn(|severity, message| Logger::emit_stderr(severity, "mockblock", message))
    }

    /// Drop every message
    pub fn discard() -> Self {
        Self::from_fn(|_, _| {})
    }

    /// Record every message in memory, for assertions in tests
    pub fn memory() -> (Self, LogCapture) {
        let capture = LogCapture::default();
        let lines = Arc::clone(&capture.lines);
        let sink = Self::from_fn(move |severity, message| {
            if let Ok(mut lines) = lines.lock() {
                lines.push((severity, message.to_string()));
            }
        });
        (sink, capture)
    }

    /// Deliver one message
    #[inline]
    pub fn log(&self, severity: Severity, message: &str) {
        (self.f)(severity, message)
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::json()
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LogSink")
    }
}

/// Handle onto the messages recorded by [`LogSink::memory`]
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    lines: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl LogCapture {
    /// All recorded messages, oldest first
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Messages recorded at exactly `severity`
    pub fn at(&self, severity: Severity) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m)
            .collect()
    }

    /// Whether any recorded message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, m)| m.contains(needle))
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}
