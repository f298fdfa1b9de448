//! Probe configuration
//!
//! Wait defaults, comparison tolerances and output precision, loadable from
//! YAML or JSON. Every field is optional in the file:
//!
//! ```yaml
//! wait:
//!   timeout_ms: 10000
//!   interval_ms: 100
//! tolerance:
//!   center_km: 0.05
//!   zoom: 0.001
//! precision: 6
//! max_zoom: 18
//! ```

use crate::geo::{DEFAULT_PRECISION, MAX_PRECISION};
use crate::map_state::{MapStateAccessor, MapWaiter, Tolerance, DEFAULT_MAX_ZOOM};
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{PollOptions, Poller, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default timeout and interval for waits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Complete probe configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Wait defaults
    pub wait: WaitConfig,
    /// Map comparison tolerances
    pub tolerance: Tolerance,
    /// Decimals when formatting coordinates
    pub precision: usize,
    /// Highest zoom level considered valid
    pub max_zoom: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            wait: WaitConfig::default(),
            tolerance: Tolerance::default(),
            precision: DEFAULT_PRECISION,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl ProbeConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wait timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.wait.timeout_ms = timeout_ms;
        self
    }

    /// Set the wait interval
    #[must_use]
    pub const fn with_interval(mut self, interval_ms: u64) -> Self {
        self.wait.interval_ms = interval_ms;
        self
    }

    /// Set the formatting precision
    #[must_use]
    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Parse YAML
    pub fn from_yaml_str(yaml: &str) -> ProbeResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON
    pub fn from_json_str(json: &str) -> ProbeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            _ => Err(ProbeError::invalid_config(format!(
                "unsupported config format: {} (expected .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> ProbeResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Reject values that would make waits or comparisons meaningless
    pub fn validate(&self) -> ProbeResult<()> {
        if self.wait.interval_ms == 0 {
            return Err(ProbeError::invalid_config("wait.interval_ms must be positive"));
        }
        if !is_non_negative(self.tolerance.center_km) || !is_non_negative(self.tolerance.zoom) {
            return Err(ProbeError::invalid_config("tolerances must be non-negative"));
        }
        if self.precision > MAX_PRECISION {
            return Err(ProbeError::invalid_config(format!(
                "precision must be at most {MAX_PRECISION}, got {}",
                self.precision
            )));
        }
        if !is_non_negative(self.max_zoom) {
            return Err(ProbeError::invalid_config("max_zoom must be non-negative"));
        }
        Ok(())
    }

    /// Poll options using the configured timeout and interval
    #[must_use]
    pub fn poll_options(&self, description: impl Into<String>) -> PollOptions {
        PollOptions::new()
            .with_timeout(self.wait.timeout_ms)
            .with_interval(self.wait.interval_ms)
            .with_description(description)
    }

    /// Map waiter configured from this config
    pub fn map_waiter<A: MapStateAccessor>(&self, accessor: A, poller: Poller) -> MapWaiter<A> {
        MapWaiter::new(accessor)
            .with_poller(poller)
            .with_defaults(self.poll_options("map state"))
            .with_tolerance(self.tolerance)
    }
}

/// False for negative values and NaN
fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}
