//! Result and error types for mapprobe.

use thiserror::Error;

/// Result type for mapprobe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur in mapprobe
///
/// Geodesy never produces these: range and shape problems are reported as
/// `false` from the validators. Only waits, accessors and configuration fail.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A wait condition was never satisfied within its time budget
    #[error("Timed out after {timeout_ms}ms waiting for {description} ({attempts} attempt(s))")]
    Timeout {
        /// What was waited for
        description: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
        /// Number of predicate evaluations made
        attempts: usize,
        /// Last transient predicate error, if any
        last_error: Option<String>,
    },

    /// A wait was cancelled before its condition was satisfied
    #[error("Wait for {description} cancelled after {attempts} attempt(s)")]
    Cancelled {
        /// What was waited for
        description: String,
        /// Number of predicate evaluations made
        attempts: usize,
    },

    /// Invalid configuration (e.g. a zero poll interval)
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// The page-state accessor could not report map state
    #[error("Map state unavailable: {message}")]
    MapState {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ProbeError {
    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a map state error
    #[must_use]
    pub fn map_state(message: impl Into<String>) -> Self {
        Self::MapState {
            message: message.into(),
        }
    }

    /// Whether this error is a wait timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether this error is a wait cancellation
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
