//! Map state access and map-specific waits
//!
//! Page objects expose the live map through a [`MapStateAccessor`]. How the
//! state is read (evaluating `map.getZoom()` in the page, an app API, ...) is
//! up to the implementation. [`MapWaiter`] builds the common readiness waits
//! on top of it, and [`validate_map_state`] checks a snapshot for
//! consistency using the geodesy functions.

use crate::geo::{Bounds, Coordinate};
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{PollOptions, Poller, WaitResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Leaflet's usual maximum zoom for OSM tiles
pub const DEFAULT_MAX_ZOOM: f64 = 19.0;

/// Default distance within which a center counts as "at" its target
pub const DEFAULT_CENTER_TOLERANCE_KM: f64 = 0.01;

/// Default tolerance for fractional zoom comparisons
pub const DEFAULT_ZOOM_TOLERANCE: f64 = 1e-6;

/// Snapshot of what the map reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapState {
    /// Current center
    pub center: Coordinate,
    /// Current zoom level (may be fractional)
    pub zoom: f64,
    /// Currently visible bounds
    pub bounds: Bounds,
    /// Whether all visible tiles have loaded
    pub tiles_loaded: bool,
    /// Whether a zoom/pan animation is running
    pub animating: bool,
}

impl MapState {
    /// Settled, fully loaded state
    #[must_use]
    pub fn new(center: Coordinate, zoom: f64, bounds: Bounds) -> Self {
        Self {
            center,
            zoom,
            bounds,
            tiles_loaded: true,
            animating: false,
        }
    }

    /// Set the tile-load flag
    #[must_use]
    pub fn with_tiles_loaded(mut self, loaded: bool) -> Self {
        self.tiles_loaded = loaded;
        self
    }

    /// Set the animation flag
    #[must_use]
    pub fn with_animating(mut self, animating: bool) -> Self {
        self.animating = animating;
        self
    }

    /// Tiles loaded and no animation running
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.tiles_loaded && !self.animating
    }

    /// Whether `validate_map_state` finds nothing wrong
    #[must_use]
    pub fn is_consistent(&self, max_zoom: f64) -> bool {
        validate_map_state(self, max_zoom).is_empty()
    }
}

/// Source of live map state
#[async_trait]
pub trait MapStateAccessor: Send + Sync {
    /// Read the current state; failures are treated as transient by waits
    async fn map_state(&self) -> ProbeResult<MapState>;
}

#[async_trait]
impl<A: MapStateAccessor + ?Sized> MapStateAccessor for Arc<A> {
    async fn map_state(&self) -> ProbeResult<MapState> {
        (**self).map_state().await
    }
}

/// A problem found in a map state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapStateViolation {
    /// Center outside the valid latitude/longitude range
    InvalidCenter {
        /// Reported latitude
        lat: f64,
        /// Reported longitude
        lng: f64,
    },
    /// Bounds empty, inverted or out of range
    InvalidBounds(Bounds),
    /// Center not within the visible bounds
    CenterOutsideBounds,
    /// Zoom below 0 or above the maximum
    ZoomOutOfRange {
        /// Reported zoom
        zoom: f64,
        /// Maximum allowed zoom
        max_zoom: f64,
    },
}

impl std::fmt::Display for MapStateViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCenter { lat, lng } => write!(f, "center ({lat}, {lng}) is out of range"),
            Self::InvalidBounds(b) => write!(
                f,
                "bounds N{} S{} E{} W{} are not a valid box",
                b.north, b.south, b.east, b.west
            ),
            Self::CenterOutsideBounds => f.write_str("center lies outside the visible bounds"),
            Self::ZoomOutOfRange { zoom, max_zoom } => {
                write!(f, "zoom {zoom} is outside [0, {max_zoom}]")
            }
        }
    }
}

/// Check a snapshot for internal consistency
#[must_use]
pub fn validate_map_state(state: &MapState, max_zoom: f64) -> Vec<MapStateViolation> {
    let mut violations = Vec::new();

    if !state.center.is_valid() {
        violations.push(MapStateViolation::InvalidCenter {
            lat: state.center.lat,
            lng: state.center.lng,
        });
    }
    if !state.bounds.is_valid() {
        violations.push(MapStateViolation::InvalidBounds(state.bounds));
    }
    if !state.bounds.contains(state.center.lat, state.center.lng) {
        violations.push(MapStateViolation::CenterOutsideBounds);
    }
    if !(0.0..=max_zoom).contains(&state.zoom) {
        violations.push(MapStateViolation::ZoomOutOfRange {
            zoom: state.zoom,
            max_zoom,
        });
    }

    violations
}

/// Tolerances for map-state comparisons
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Max distance for "center near target", kilometres
    pub center_km: f64,
    /// Max difference for "zoom equals"
    pub zoom: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            center_km: DEFAULT_CENTER_TOLERANCE_KM,
            zoom: DEFAULT_ZOOM_TOLERANCE,
        }
    }
}

/// Map readiness waits over a [`MapStateAccessor`]
#[derive(Debug)]
pub struct MapWaiter<A> {
    accessor: A,
    poller: Poller,
    defaults: PollOptions,
    tolerance: Tolerance,
}

impl<A: MapStateAccessor> MapWaiter<A> {
    /// Waiter with default poller, timeouts and tolerances
    pub fn new(accessor: A) -> Self {
        Self {
            accessor,
            poller: Poller::new(),
            defaults: PollOptions::default(),
            tolerance: Tolerance::default(),
        }
    }

    /// Use a specific poller (clock, logger, cancellation)
    #[must_use]
    pub fn with_poller(mut self, poller: Poller) -> Self {
        self.poller = poller;
        self
    }

    /// Timeout and interval applied to every wait
    #[must_use]
    pub fn with_defaults(mut self, defaults: PollOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Comparison tolerances
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The underlying accessor
    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    fn options(&self, description: impl Into<String>) -> PollOptions {
        self.defaults.clone().with_description(description)
    }

    /// Wait until `predicate` holds for the reported state
    pub async fn wait_for_state<P>(
        &self,
        description: impl Into<String>,
        predicate: P,
    ) -> ProbeResult<WaitResult>
    where
        P: Fn(&MapState) -> bool,
    {
        let accessor = &self.accessor;
        let predicate = &predicate;
        self.poller
            .wait_for(
                move || async move { accessor.map_state().await.map(|state| predicate(&state)) },
                &self.options(description),
            )
            .await
    }

    /// Wait until the map reports `level`
    pub async fn wait_for_zoom(&self, level: f64) -> ProbeResult<WaitResult> {
        let tolerance = self.tolerance.zoom;
        self.wait_for_state(format!("zoom level {level}"), |state| {
            (state.zoom - level).abs() <= tolerance
        })
        .await
    }

    /// Wait until every visible tile has loaded
    pub async fn wait_for_tiles_loaded(&self) -> ProbeResult<WaitResult> {
        self.wait_for_state("tiles loaded", |state| state.tiles_loaded)
            .await
    }

    /// Wait until no zoom/pan animation is running
    pub async fn wait_for_animation_settled(&self) -> ProbeResult<WaitResult> {
        self.wait_for_state("animation settled", |state| !state.animating)
            .await
    }

    /// Wait until tiles are loaded and the map is not animating
    pub async fn wait_for_ready(&self) -> ProbeResult<WaitResult> {
        self.wait_for_state("map ready", MapState::is_ready).await
    }

    /// Wait until the center is within `tolerance_km` of `target`
    /// (the configured center tolerance when `None`)
    pub async fn wait_for_center_near(
        &self,
        target: &Coordinate,
        tolerance_km: Option<f64>,
    ) -> ProbeResult<WaitResult> {
        let tolerance_km = tolerance_km.unwrap_or(self.tolerance.center_km);
        self.wait_for_state(
            format!("center within {tolerance_km} km of {target}"),
            |state| state.center.distance_to(target) <= tolerance_km,
        )
        .await
    }

    /// Wait until `point` lies within the visible bounds
    pub async fn wait_for_point_visible(&self, point: &Coordinate) -> ProbeResult<WaitResult> {
        self.wait_for_state(format!("{point} visible"), |state| {
            state.bounds.contains(point.lat, point.lng)
        })
        .await
    }
}

/// Accessor replaying a scripted sequence of states and failures.
///
/// Each read consumes one entry; the final entry repeats forever.
#[derive(Debug, Default)]
pub struct ScriptedAccessor {
    script: Mutex<VecDeque<Result<MapState, String>>>,
    reads: AtomicUsize,
}

impl ScriptedAccessor {
    /// Accessor replaying `states` in order
    pub fn new(states: impl IntoIterator<Item = MapState>) -> Self {
        Self {
            script: Mutex::new(states.into_iter().map(Ok).collect()),
            reads: AtomicUsize::new(0),
        }
    }

    /// Append a state
    #[must_use]
    pub fn then_state(self, state: MapState) -> Self {
        self.push(Ok(state));
        self
    }

    /// Append a failed read
    #[must_use]
    pub fn then_error(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    fn push(&self, entry: Result<MapState, String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(entry);
        }
    }

    /// Number of reads so far
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MapStateAccessor for ScriptedAccessor {
    async fn map_state(&self) -> ProbeResult<MapState> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut script = self
            .script
            .lock()
            .map_err(|_| ProbeError::map_state("script lock poisoned"))?;

        let entry = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };

        match entry {
            Some(Ok(state)) => Ok(state),
            Some(Err(message)) => Err(ProbeError::map_state(message)),
            None => Err(ProbeError::map_state("no map state scripted")),
        }
    }
}
