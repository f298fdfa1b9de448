//! Condition Polling
//!
//! Re-evaluates a predicate at a fixed interval until it holds or a timeout
//! elapses. Predicates may be synchronous or asynchronous, and may fail:
//! a failed evaluation is logged and counted as "not yet", so a page that is
//! briefly unavailable does not abort the wait. Only the timeout (or an
//! explicit cancellation) ends a wait unsuccessfully.
//!
//! ```no_run
//! use mapprobe::{PollOptions, Poller};
//!
//! # async fn demo(zoom: impl Fn() -> f64) -> mapprobe::ProbeResult<()> {
//! let options = PollOptions::new()
//!     .with_timeout(5_000)
//!     .with_interval(100)
//!     .with_description("zoom level 12");
//! Poller::new().wait_for_sync(|| zoom() == 12.0, &options).await?;
//! # Ok(())
//! # }
//! ```

use crate::clock::{SharedClock, SystemClock};
use crate::logging::{default_logger, LogLevel, SharedLogger};
use crate::result::{ProbeError, ProbeResult};
use async_trait::async_trait;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// POLL OPTIONS
// =============================================================================

/// Options for a single wait
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOptions {
    /// Total time budget in milliseconds
    pub timeout_ms: u64,
    /// Delay between evaluations in milliseconds (must be positive)
    pub interval_ms: u64,
    /// What is being waited for, used in logs and errors
    pub description: String,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            description: "condition".to_string(),
        }
    }
}

impl PollOptions {
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_interval(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Interval as Duration
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Reject a zero interval, which would spin
    pub fn validate(&self) -> ProbeResult<()> {
        if self.interval_ms == 0 {
            return Err(ProbeError::invalid_config(format!(
                "poll interval for {} must be positive",
                self.description
            )));
        }
        Ok(())
    }
}

// =============================================================================
// PREDICATE RESULTS
// =============================================================================

/// Result of one predicate evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// The condition holds
    Satisfied,
    /// The condition does not hold yet
    Pending,
    /// The evaluation itself failed; treated as pending
    Failed(String),
}

impl Check {
    /// Whether the condition holds
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied)
    }
}

impl From<bool> for Check {
    fn from(value: bool) -> Self {
        if value {
            Self::Satisfied
        } else {
            Self::Pending
        }
    }
}

impl<E: Display> From<Result<bool, E>> for Check {
    fn from(value: Result<bool, E>) -> Self {
        match value {
            Ok(satisfied) => satisfied.into(),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

// =============================================================================
// WAIT CONDITION TRAIT
// =============================================================================

/// A named, reusable wait condition
#[async_trait]
pub trait WaitCondition: Send + Sync {
    /// Evaluate the condition once
    async fn check(&self) -> Check;

    /// Description for logs and errors
    fn description(&self) -> String;
}

/// A function-based wait condition
pub struct FnCondition<F: Fn() -> bool + Send + Sync> {
    func: F,
    description: String,
}

impl<F: Fn() -> bool + Send + Sync> std::fmt::Debug for FnCondition<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<F: Fn() -> bool + Send + Sync> FnCondition<F> {
    /// Create a new function condition
    pub fn new(func: F, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
        }
    }
}

#[async_trait]
impl<F: Fn() -> bool + Send + Sync> WaitCondition for FnCondition<F> {
    async fn check(&self) -> Check {
        (self.func)().into()
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

// =============================================================================
// WAIT RESULT
// =============================================================================

/// A satisfied wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Number of predicate evaluations, including the successful one
    pub attempts: usize,
    /// Description of what was waited for
    pub waited_for: String,
}

impl WaitResult {
    /// Create a successful wait result
    #[must_use]
    pub fn success(elapsed: Duration, attempts: usize, waited_for: impl Into<String>) -> Self {
        Self {
            elapsed,
            attempts,
            waited_for: waited_for.into(),
        }
    }
}

/// How a wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PollOutcome {
    /// The predicate returned true before the timeout
    Satisfied,
    /// The predicate never returned true within the timeout
    TimedOut,
    /// The wait was cancelled
    Cancelled,
}

impl PollOutcome {
    /// Classify a wait result; `None` for errors that are not wait outcomes
    #[must_use]
    pub const fn of(result: &ProbeResult<WaitResult>) -> Option<Self> {
        match result {
            Ok(_) => Some(Self::Satisfied),
            Err(ProbeError::Timeout { .. }) => Some(Self::TimedOut),
            Err(ProbeError::Cancelled { .. }) => Some(Self::Cancelled),
            Err(_) => None,
        }
    }
}

// =============================================================================
// CANCELLATION
// =============================================================================

/// Cancellation signal shared between a wait and whoever may abort it
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelFlag {
    /// Create an unset flag
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every wait observing this flag
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Whether the flag has been set
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolve once the flag is set
    pub async fn cancelled(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

// =============================================================================
// POLLER
// =============================================================================

/// Polling engine
///
/// Cheap to clone; concurrent waits on clones share nothing but the clock,
/// logger and cancellation flag handles.
#[derive(Debug, Clone)]
pub struct Poller {
    clock: SharedClock,
    logger: SharedLogger,
    cancel: Option<CancelFlag>,
}

impl Default for Poller {
    fn default() -> Self {
        Self::new()
    }
}

impl Poller {
    /// Poller on the system clock, logging through `tracing`
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock::new()),
            logger: default_logger(),
            cancel: None,
        }
    }

    /// Use a different clock
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Use a different logger
    #[must_use]
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Observe a cancellation flag
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The logger waits report to
    #[must_use]
    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }

    /// Sleep for `duration`, waking early if cancelled
    async fn pause(&self, duration: Duration) {
        match &self.cancel {
            Some(cancel) => {
                tokio::select! {
                    () = self.clock.sleep(duration) => {}
                    () = cancel.cancelled() => {}
                }
            }
            None => self.clock.sleep(duration).await,
        }
    }

    /// Wait until an asynchronous predicate holds.
    ///
    /// The predicate is always evaluated at least once; with a zero timeout
    /// exactly once. Failed evaluations, including a predicate that panics,
    /// count toward the same timeout.
    ///
    /// # Errors
    ///
    /// - [`ProbeError::InvalidConfig`] if `interval_ms` is zero
    /// - [`ProbeError::Timeout`] if the predicate never holds in time
    /// - [`ProbeError::Cancelled`] if the cancellation flag is set
    pub async fn wait_for<F, Fut, T>(
        &self,
        mut predicate: F,
        options: &PollOptions,
    ) -> ProbeResult<WaitResult>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = T>,
        T: Into<Check>,
    {
        options.validate()?;

        let description = options.description.as_str();
        let timeout = options.timeout();
        let start = self.clock.now();
        let mut attempts = 0usize;
        let mut last_error: Option<String> = None;

        self.logger.log(
            LogLevel::Debug,
            &format!(
                "waiting up to {}ms for {description} (every {}ms)",
                options.timeout_ms, options.interval_ms
            ),
        );

        loop {
            if attempts > 0 && self.is_cancelled() {
                self.logger.log(
                    LogLevel::Info,
                    &format!("wait for {description} cancelled after {attempts} attempt(s)"),
                );
                return Err(ProbeError::Cancelled {
                    description: description.to_string(),
                    attempts,
                });
            }

            attempts += 1;
            let evaluation = AssertUnwindSafe(async { Into::<Check>::into(predicate().await) })
                .catch_unwind()
                .await;
            match evaluation.unwrap_or_else(|payload| Check::Failed(panic_message(&*payload))) {
                Check::Satisfied => {
                    let elapsed = self.clock.now().saturating_sub(start);
                    self.logger.log(
                        LogLevel::Debug,
                        &format!(
                            "{description} satisfied after {}ms ({attempts} attempt(s))",
                            elapsed.as_millis()
                        ),
                    );
                    return Ok(WaitResult::success(elapsed, attempts, description));
                }
                Check::Pending => {
                    self.logger.log(
                        LogLevel::Trace,
                        &format!("{description} not satisfied on attempt {attempts}"),
                    );
                }
                Check::Failed(message) => {
                    self.logger.log(
                        LogLevel::Warn,
                        &format!("{description}: predicate failed on attempt {attempts}: {message}"),
                    );
                    last_error = Some(message);
                }
            }

            let elapsed = self.clock.now().saturating_sub(start);
            if elapsed >= timeout {
                self.logger.log(
                    LogLevel::Warn,
                    &format!(
                        "timed out after {}ms waiting for {description}",
                        options.timeout_ms
                    ),
                );
                return Err(ProbeError::Timeout {
                    description: description.to_string(),
                    timeout_ms: options.timeout_ms,
                    attempts,
                    last_error,
                });
            }

            self.pause(options.interval().min(timeout - elapsed)).await;
        }
    }

    /// Wait until a synchronous predicate holds.
    ///
    /// Same contract as [`Poller::wait_for`]; the predicate is called
    /// directly, never awaited.
    pub async fn wait_for_sync<F, T>(
        &self,
        mut predicate: F,
        options: &PollOptions,
    ) -> ProbeResult<WaitResult>
    where
        F: FnMut() -> T,
        T: Into<Check>,
    {
        self.wait_for(move || std::future::ready(predicate()), options)
            .await
    }

    /// Wait for a [`WaitCondition`], described by the condition itself
    pub async fn wait_for_condition<C: WaitCondition + ?Sized>(
        &self,
        condition: &C,
        options: &PollOptions,
    ) -> ProbeResult<WaitResult> {
        let options = options.clone().with_description(condition.description());
        self.wait_for(|| condition.check(), &options).await
    }
}

/// Text of a caught panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .map_or_else(
            || "predicate panicked".to_string(),
            |message| format!("predicate panicked: {message}"),
        )
}

// =============================================================================
// CONVENIENCE FUNCTIONS
// =============================================================================

/// Wait for an asynchronous predicate with the default poller and interval
pub async fn wait_until<F, Fut, T>(predicate: F, timeout_ms: u64) -> ProbeResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = T>,
    T: Into<Check>,
{
    let options = PollOptions::new().with_timeout(timeout_ms);
    Poller::new().wait_for(predicate, &options).await?;
    Ok(())
}

/// Wait for a synchronous predicate with the default poller and interval
pub async fn wait_until_sync<F, T>(predicate: F, timeout_ms: u64) -> ProbeResult<()>
where
    F: FnMut() -> T,
    T: Into<Check>,
{
    let options = PollOptions::new().with_timeout(timeout_ms);
    Poller::new().wait_for_sync(predicate, &options).await?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use crate::logging::MemoryLogger;
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    fn fake_poller() -> (Poller, Arc<FakeClock>) {
        let clock = FakeClock::shared();
        let poller = Poller::new().with_clock(clock.clone());
        (poller, clock)
    }

    mod poll_options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let opts = PollOptions::default();
            assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
            assert_eq!(opts.interval_ms, DEFAULT_POLL_INTERVAL_MS);
            assert_eq!(opts.description, "condition");
        }

        #[test]
        fn test_chained() {
            let opts = PollOptions::new()
                .with_timeout(10_000)
                .with_interval(200)
                .with_description("tiles loaded");
            assert_eq!(opts.timeout(), Duration::from_secs(10));
            assert_eq!(opts.interval(), Duration::from_millis(200));
            assert_eq!(opts.description, "tiles loaded");
        }

        #[test]
        fn test_zero_interval_rejected() {
            let err = PollOptions::new().with_interval(0).validate().unwrap_err();
            assert!(matches!(err, ProbeError::InvalidConfig { .. }));
        }
    }

    mod check_tests {
        use super::*;

        #[test]
        fn test_from_bool() {
            assert_eq!(Check::from(true), Check::Satisfied);
            assert_eq!(Check::from(false), Check::Pending);
        }

        #[test]
        fn test_from_result() {
            assert!(Check::from(Ok::<bool, String>(true)).is_satisfied());
            assert_eq!(Check::from(Ok::<bool, String>(false)), Check::Pending);
            assert_eq!(
                Check::from(Err::<bool, &str>("no map")),
                Check::Failed("no map".into())
            );
        }
    }

    mod outcome_tests {
        use super::*;

        #[test]
        fn test_classify() {
            let ok: ProbeResult<WaitResult> = Ok(WaitResult::success(Duration::ZERO, 1, "x"));
            assert_eq!(PollOutcome::of(&ok), Some(PollOutcome::Satisfied));
            let timeout: ProbeResult<WaitResult> = Err(ProbeError::Timeout {
                description: "x".into(),
                timeout_ms: 1,
                attempts: 1,
                last_error: None,
            });
            assert_eq!(PollOutcome::of(&timeout), Some(PollOutcome::TimedOut));
            let cancelled: ProbeResult<WaitResult> = Err(ProbeError::Cancelled {
                description: "x".into(),
                attempts: 1,
            });
            assert_eq!(PollOutcome::of(&cancelled), Some(PollOutcome::Cancelled));
            let other: ProbeResult<WaitResult> = Err(ProbeError::invalid_config("x"));
            assert_eq!(PollOutcome::of(&other), None);
        }
    }

    mod fake_clock_tests {
        use super::*;

        #[tokio::test]
        async fn test_immediately_true_does_not_sleep() {
            let (poller, clock) = fake_poller();
            let result = poller
                .wait_for_sync(|| true, &PollOptions::new())
                .await
                .unwrap();
            assert_eq!(result.attempts, 1);
            assert_eq!(result.elapsed, Duration::ZERO);
            assert_eq!(clock.sleep_count(), 0);
        }

        #[tokio::test]
        async fn test_never_true_times_out_at_deadline() {
            let (poller, clock) = fake_poller();
            let opts = PollOptions::new()
                .with_timeout(200)
                .with_interval(50)
                .with_description("zoom 12");
            let err = poller.wait_for_sync(|| false, &opts).await.unwrap_err();
            match err {
                ProbeError::Timeout {
                    description,
                    timeout_ms,
                    attempts,
                    last_error,
                } => {
                    assert_eq!(description, "zoom 12");
                    assert_eq!(timeout_ms, 200);
                    // t = 0, 50, 100, 150, 200
                    assert_eq!(attempts, 5);
                    assert!(last_error.is_none());
                }
                other => panic!("expected Timeout, got {other:?}"),
            }
            assert_eq!(clock.now_ms(), 200);
        }

        #[tokio::test]
        async fn test_last_sleep_capped_to_remaining_time() {
            let (poller, clock) = fake_poller();
            let opts = PollOptions::new().with_timeout(120).with_interval(50);
            let err = poller.wait_for_sync(|| false, &opts).await.unwrap_err();
            assert!(err.is_timeout());
            assert_eq!(clock.now_ms(), 120);
        }

        #[tokio::test]
        async fn test_zero_timeout_single_attempt() {
            let (poller, clock) = fake_poller();
            let mut calls = 0;
            let opts = PollOptions::new().with_timeout(0);
            let err = poller
                .wait_for_sync(
                    || {
                        calls += 1;
                        false
                    },
                    &opts,
                )
                .await
                .unwrap_err();
            assert!(err.is_timeout());
            assert_eq!(calls, 1);
            assert_eq!(clock.sleep_count(), 0);
        }

        #[tokio::test]
        async fn test_zero_interval_fails_fast() {
            let (poller, _clock) = fake_poller();
            let mut calls = 0;
            let opts = PollOptions::new().with_interval(0);
            let err = poller
                .wait_for_sync(
                    || {
                        calls += 1;
                        true
                    },
                    &opts,
                )
                .await
                .unwrap_err();
            assert!(matches!(err, ProbeError::InvalidConfig { .. }));
            assert_eq!(calls, 0);
        }

        #[tokio::test]
        async fn test_becomes_true_on_third_attempt() {
            let (poller, clock) = fake_poller();
            let mut calls = 0;
            let opts = PollOptions::new().with_timeout(1_000).with_interval(100);
            let result = poller
                .wait_for_sync(
                    || {
                        calls += 1;
                        calls == 3
                    },
                    &opts,
                )
                .await
                .unwrap();
            assert_eq!(result.attempts, 3);
            assert_eq!(result.elapsed, Duration::from_millis(200));
            assert_eq!(clock.sleep_count(), 2);
        }

        #[tokio::test]
        async fn test_transient_errors_do_not_abort() {
            let logger = MemoryLogger::shared();
            let (poller, _clock) = fake_poller();
            let poller = poller.with_logger(logger.clone());
            let calls = AtomicUsize::new(0);
            let opts = PollOptions::new()
                .with_timeout(1_000)
                .with_interval(50)
                .with_description("map ready");

            let result = poller
                .wait_for(
                    || {
                        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                        async move {
                            if n < 3 {
                                Err(format!("page not ready ({n})"))
                            } else {
                                Ok(true)
                            }
                        }
                    },
                    &opts,
                )
                .await
                .unwrap();

            assert_eq!(result.attempts, 3);
            assert_eq!(logger.at_level(LogLevel::Warn).len(), 2);
            assert!(logger.contains(LogLevel::Warn, "page not ready (1)"));
        }

        #[tokio::test]
        async fn test_panicking_predicate_is_transient() {
            let logger = MemoryLogger::shared();
            let (poller, _clock) = fake_poller();
            let poller = poller.with_logger(logger.clone());
            let mut calls = 0;
            let opts = PollOptions::new().with_timeout(1_000).with_interval(50);

            let result = poller
                .wait_for_sync(
                    || {
                        calls += 1;
                        let zoom: Option<f64> = (calls > 1).then_some(12.0);
                        zoom.expect("map not initialised") == 12.0
                    },
                    &opts,
                )
                .await
                .unwrap();

            assert_eq!(result.attempts, 2);
            assert!(logger.contains(LogLevel::Warn, "predicate panicked: map not initialised"));
        }

        #[tokio::test]
        async fn test_always_panicking_predicate_times_out() {
            let (poller, _clock) = fake_poller();
            let opts = PollOptions::new().with_timeout(100).with_interval(50);
            let err = poller
                .wait_for_sync(|| -> bool { panic!("boom") }, &opts)
                .await
                .unwrap_err();
            match err {
                ProbeError::Timeout {
                    attempts,
                    last_error,
                    ..
                } => {
                    assert_eq!(attempts, 3);
                    assert_eq!(last_error.as_deref(), Some("predicate panicked: boom"));
                }
                other => panic!("expected Timeout, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_errors_count_toward_timeout() {
            let (poller, clock) = fake_poller();
            let poller = poller.with_logger(Arc::new(crate::logging::NullLogger));
            let opts = PollOptions::new().with_timeout(100).with_interval(25);
            let err = poller
                .wait_for(|| async { Err::<bool, _>("boom") }, &opts)
                .await
                .unwrap_err();
            match err {
                ProbeError::Timeout { last_error, .. } => {
                    assert_eq!(last_error.as_deref(), Some("boom"));
                }
                other => panic!("expected Timeout, got {other:?}"),
            }
            assert_eq!(clock.now_ms(), 100);
        }

        #[tokio::test]
        async fn test_cancel_distinct_from_timeout() {
            let (poller, _clock) = fake_poller();
            let cancel = CancelFlag::new();
            let poller = poller.with_cancel(cancel.clone());
            let mut calls = 0;
            let opts = PollOptions::new().with_timeout(10_000).with_interval(10);
            let err = poller
                .wait_for_sync(
                    || {
                        calls += 1;
                        if calls == 2 {
                            cancel.cancel();
                        }
                        false
                    },
                    &opts,
                )
                .await
                .unwrap_err();
            match err {
                ProbeError::Cancelled { attempts, .. } => assert_eq!(attempts, 2),
                other => panic!("expected Cancelled, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_precancelled_still_evaluates_once() {
            let cancel = CancelFlag::new();
            cancel.cancel();
            let (poller, _clock) = fake_poller();
            let poller = poller.with_cancel(cancel);
            let result = poller.wait_for_sync(|| true, &PollOptions::new()).await;
            assert!(result.is_ok());
        }

        #[tokio::test]
        async fn test_wait_for_condition_uses_its_description() {
            let (poller, _clock) = fake_poller();
            let condition = FnCondition::new(|| false, "marker visible");
            let opts = PollOptions::new().with_timeout(50).with_interval(10);
            let err = poller
                .wait_for_condition(&condition, &opts)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("marker visible"));
        }
    }

    mod system_clock_tests {
        use super::*;

        #[tokio::test]
        async fn test_immediate_success_is_fast() {
            let start = Instant::now();
            let opts = PollOptions::new().with_timeout(5_000).with_interval(1_000);
            Poller::new().wait_for_sync(|| true, &opts).await.unwrap();
            assert!(start.elapsed() < Duration::from_millis(1_000));
        }

        #[tokio::test]
        async fn test_timeout_after_about_200ms() {
            let start = Instant::now();
            let opts = PollOptions::new().with_timeout(200).with_interval(50);
            let err = Poller::new()
                .wait_for_sync(|| false, &opts)
                .await
                .unwrap_err();
            let elapsed = start.elapsed();
            assert!(err.is_timeout());
            assert!(elapsed >= Duration::from_millis(150), "{elapsed:?}");
            assert!(elapsed <= Duration::from_millis(400), "{elapsed:?}");
        }

        #[tokio::test]
        async fn test_cancel_wakes_sleeping_wait() {
            let cancel = CancelFlag::new();
            let poller = Poller::new().with_cancel(cancel.clone());
            let opts = PollOptions::new()
                .with_timeout(60_000)
                .with_interval(10_000);

            let canceller = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                cancel.cancel();
            });

            let start = Instant::now();
            let err = poller.wait_for_sync(|| false, &opts).await.unwrap_err();
            canceller.await.unwrap();
            assert!(err.is_cancelled());
            assert!(start.elapsed() < Duration::from_secs(5));
        }

        #[tokio::test]
        async fn test_concurrent_waits_are_independent() {
            let flag = Arc::new(AtomicBool::new(false));
            let setter = flag.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(30)).await;
                setter.store(true, Ordering::SeqCst);
            });

            let poller = Poller::new();
            let waits_for_flag = PollOptions::new().with_timeout(1_000).with_interval(5);
            let never = PollOptions::new().with_timeout(60).with_interval(5);
            let (a, b) = tokio::join!(
                poller.wait_for_sync(|| flag.load(Ordering::SeqCst), &waits_for_flag),
                poller.wait_for_sync(|| false, &never),
            );
            assert!(a.is_ok());
            assert!(b.unwrap_err().is_timeout());
        }
    }

    mod convenience_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_until_sync_success() {
            assert!(wait_until_sync(|| true, 100).await.is_ok());
        }

        #[tokio::test]
        async fn test_wait_until_timeout() {
            let result = wait_until(|| async { false }, 100).await;
            assert!(result.unwrap_err().is_timeout());
        }
    }
}
