//! Mapprobe: Geodesy and Condition Waits for Leaflet Map Tests
//!
//! Browser tests against a slippy map need two things the DOM alone does not
//! give them: trustworthy geographic math to check what the map reports, and
//! a way to wait until asynchronous map state (zoom animations, tile loads,
//! pans) settles before asserting on it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    MAPPROBE Architecture                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Map State  │    │ MapWaiter  │    │ Poller     │            │
//! │   │ Accessor   │───►│ (zoom,     │───►│ (Clock,    │            │
//! │   │ (driver)   │    │  tiles...) │    │  Logger)   │            │
//! │   └────────────┘    └─────┬──────┘    └────────────┘            │
//! │                           │                                     │
//! │                           ▼                                     │
//! │                    ┌────────────┐                               │
//! │                    │ geo        │  distance, bearing, bounds    │
//! │                    └────────────┘                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use mapprobe::{calculate_distance, wait_until_sync};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let km = calculate_distance(51.5074, -0.1278, 48.8566, 2.3522);
//! assert!((km - 343.5).abs() < 1.0);
//!
//! wait_until_sync(|| true, 1_000).await.unwrap();
//! # });
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// Injected time source for waits
pub mod clock;

/// Geographic math: distance, bearing, DMS, validation
pub mod geo;

/// Higher-order logging wrappers
pub mod instrument;

/// Injected loggers
pub mod logging;

/// Map state snapshots and map-specific waits
pub mod map_state;

/// Condition polling engine
pub mod wait;

/// Configuration loaded from YAML or JSON
pub mod config;

mod result;

pub use clock::{Clock, FakeClock, SharedClock, SystemClock};
pub use config::{ProbeConfig, WaitConfig};
pub use geo::{
    calculate_bearing, calculate_destination, calculate_distance, calculate_midpoint,
    calculate_polygon_area, format_coordinates, from_dms, is_point_in_bounds, normalize_latitude,
    normalize_longitude, to_dms, validate_bounds, validate_coordinates, Bounds, Coordinate, Dms,
    Hemisphere, EARTH_RADIUS_KM, MAX_PRECISION,
};
pub use instrument::{instrument, instrument_async};
pub use logging::{LogLevel, Logger, MemoryLogger, NullLogger, SharedLogger, TracingLogger};
pub use map_state::{
    validate_map_state, MapState, MapStateAccessor, MapStateViolation, MapWaiter,
    ScriptedAccessor, Tolerance,
};
pub use result::{ProbeError, ProbeResult};
pub use wait::{
    wait_until, wait_until_sync, CancelFlag, Check, FnCondition, PollOptions, PollOutcome,
    Poller, WaitCondition, WaitResult, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};
