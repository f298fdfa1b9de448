//! Injected logging
//!
//! Waits and instrumented operations report through a [`Logger`] handed to
//! them rather than a process-wide logger. The default, [`TracingLogger`],
//! forwards to `tracing`; [`MemoryLogger`] captures entries for assertions.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    /// Very fine-grained detail (every poll attempt)
    Trace,
    /// Diagnostic detail
    Debug,
    /// Normal progress
    Info,
    /// Recoverable problem
    Warn,
    /// Failure
    Error,
}

impl LogLevel {
    /// Lowercase level name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for log entries
pub trait Logger: Send + Sync + std::fmt::Debug {
    /// Record a message at `level`
    fn log(&self, level: LogLevel, message: &str);
}

/// Thread-safe logger handle
pub type SharedLogger = Arc<dyn Logger>;

/// Logger that forwards to the `tracing` macros under the `mapprobe` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "mapprobe", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "mapprobe", "{message}"),
            LogLevel::Info => tracing::info!(target: "mapprobe", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "mapprobe", "{message}"),
            LogLevel::Error => tracing::error!(target: "mapprobe", "{message}"),
        }
    }
}

/// Logger that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Severity
    pub level: LogLevel,
    /// Message text
    pub message: String,
}

/// Logger that keeps every entry in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    /// Create an empty memory logger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared memory logger
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of all entries so far
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Entries at exactly `level`
    #[must_use]
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == level)
            .collect()
    }

    /// Whether some entry at `level` contains `needle`
    #[must_use]
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|entry| entry.level == level && entry.message.contains(needle))
    }

    /// Drop all entries
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
    }
}

/// The default logger: [`TracingLogger`]
#[must_use]
pub fn default_logger() -> SharedLogger {
    Arc::new(TracingLogger)
}
