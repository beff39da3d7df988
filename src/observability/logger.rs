//! Structured JSON logger
//!
//! - One log line = one message
//! - Fixed key order (`severity`, `component`, `message`)
//! - Synchronous, no buffering
//! - Info and below go to stdout, Error and above to stderr

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Data corruption, not retryable without repair
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Serialize)]
struct LogLine<'a> {
    severity: Severity,
    component: &'a str,
    message: &'a str,
}

/// Writes structured log lines for a named component
pub struct Logger;

impl Logger {
    /// Emit one line, routed to stdout or stderr by severity
    pub fn emit(severity: Severity, component: &str, message: &str) {
        if severity >= Severity::Error {
            Self::emit_to_writer(severity, component, message, &mut io::stderr());
        } else {
            Self::emit_to_writer(severity, component, message, &mut io::stdout());
        }
    }

    /// Emit one line to stderr regardless of severity
    ///
    /// For processes whose stdout carries command output.
    pub fn emit_stderr(severity: Severity, component: &str, message: &str) {
        Self::emit_to_writer(severity, component, message, &mut io::stderr());
    }

    fn emit_to_writer<W: Write>(severity: Severity, component: &str, message: &str, writer: &mut W) {
        let line = LogLine {
            severity,
            component,
            message,
        };
        let mut output = match serde_json::to_string(&line) {
            Ok(s) => s,
            // Logging never fails the caller
            Err(_) => return,
        };
        output.push('\n');

        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }
}

#[cfg(test)]
pub(crate) fn capture_line(severity: Severity, component: &str, message: &str) -> String {
    let mut buffer = Vec::new();
    Logger::emit_to_writer(severity, component, message, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
