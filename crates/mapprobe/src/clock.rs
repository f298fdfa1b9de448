//! Clocks for the polling engine
//!
//! The poller never reads time or sleeps directly; it goes through a
//! [`Clock`]. [`SystemClock`] uses tokio timers; [`FakeClock`] keeps virtual
//! time that only moves when a wait sleeps or a test fast-forwards it, so
//! timeout behaviour can be tested deterministically.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Time source and sleep primitive used by waits
#[async_trait]
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Monotonic time elapsed since the clock was created
    fn now(&self) -> Duration;

    /// Suspend the current task for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Thread-safe clock handle
pub type SharedClock = Arc<dyn Clock>;

/// Real time, backed by `std::time::Instant` and `tokio::time::sleep`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is now
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Virtual clock for deterministic tests
///
/// `sleep` advances virtual time by the requested duration and yields to the
/// scheduler instead of waiting.
#[derive(Debug, Default)]
pub struct FakeClock {
    current_ms: AtomicU64,
    sleeps: AtomicUsize,
}

impl FakeClock {
    /// Create a fake clock at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared fake clock
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Current virtual time in milliseconds
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.current_ms.load(Ordering::SeqCst)
    }

    /// Fast-forward virtual time
    pub fn fast_forward(&self, duration: Duration) {
        self.current_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }

    /// Fast-forward virtual time by milliseconds
    pub fn fast_forward_ms(&self, ms: u64) {
        self.fast_forward(Duration::from_millis(ms));
    }

    /// Set virtual time
    pub fn set_time_ms(&self, ms: u64) {
        self.current_ms.store(ms, Ordering::SeqCst);
    }

    /// Number of times `sleep` has been called
    #[must_use]
    pub fn sleep_count(&self) -> usize {
        self.sleeps.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms())
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        self.fast_forward(duration);
        tokio::task::yield_now().await;
    }
}
