//! CLI configuration

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use mapprobe::{ProbeConfig, MAX_PRECISION};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - progress logging
    Verbose,
    /// Debug - instrumented calls
    Debug,
    /// Trace - every poll attempt
    Trace,
}

impl Verbosity {
    /// Verbosity from the `-q` flag and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Default `tracing` filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Output format
    pub format: OutputFormat,
    /// Library configuration (precision, tolerances, wait defaults)
    pub probe: ProbeConfig,
}

impl CliConfig {
    /// Create a new CLI configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set output format
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the library configuration
    #[must_use]
    pub fn with_probe(mut self, probe: ProbeConfig) -> Self {
        self.probe = probe;
        self
    }

    /// Load the library configuration from `path`
    pub fn load_probe(self, path: &Path) -> CliResult<Self> {
        let probe = ProbeConfig::load(path).map_err(|e| {
            CliError::config(format!("failed to load {}: {e}", path.display()))
        })?;
        Ok(self.with_probe(probe))
    }

    /// Decimals used when printing coordinates and distances
    #[must_use]
    pub fn precision(&self) -> usize {
        self.probe.precision.min(MAX_PRECISION)
    }
}
