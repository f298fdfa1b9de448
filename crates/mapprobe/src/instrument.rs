//! Call instrumentation
//!
//! Wraps an operation in a closure that logs its arguments, its result and
//! how long it took. Multi-argument operations take a tuple.
//!
//! ```
//! use mapprobe::geo::calculate_distance;
//! use mapprobe::instrument::instrument;
//! use mapprobe::logging::MemoryLogger;
//!
//! let logger = MemoryLogger::shared();
//! let distance = instrument(
//!     "calculate_distance",
//!     logger.clone(),
//!     |(a, b, c, d): (f64, f64, f64, f64)| calculate_distance(a, b, c, d),
//! );
//! let km = distance((0.0, 0.0, 1.0, 0.0));
//! assert!(km > 110.0);
//! assert_eq!(logger.entries().len(), 2);
//! ```

use crate::logging::{LogLevel, SharedLogger};
use futures::future::{BoxFuture, FutureExt};
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// Wrap a synchronous operation with entry/exit logging
pub fn instrument<A, R, F>(
    name: impl Into<String>,
    logger: SharedLogger,
    op: F,
) -> impl Fn(A) -> R
where
    A: Debug,
    R: Debug,
    F: Fn(A) -> R,
{
    let name = name.into();
    move |args: A| {
        logger.log(LogLevel::Debug, &format!("-> {name}{args:?}"));
        let start = Instant::now();
        let result = op(args);
        logger.log(
            LogLevel::Debug,
            &format!(
                "<- {name} = {result:?} ({:.3}ms)",
                start.elapsed().as_secs_f64() * 1000.0
            ),
        );
        result
    }
}

/// Wrap an asynchronous operation with entry/exit logging
///
/// Entry is logged when the returned closure is called, exit when the
/// future completes.
pub fn instrument_async<A, R, F, Fut>(
    name: impl Into<String>,
    logger: SharedLogger,
    op: F,
) -> impl Fn(A) -> BoxFuture<'static, R>
where
    A: Debug,
    R: Debug + Send + 'static,
    F: Fn(A) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
{
    let name: Arc<str> = Arc::from(name.into());
    move |args: A| {
        logger.log(LogLevel::Debug, &format!("-> {name}{args:?}"));
        let future = op(args);
        let logger = logger.clone();
        let name = name.clone();
        async move {
            let start = Instant::now();
            let result = future.await;
            logger.log(
                LogLevel::Debug,
                &format!(
                    "<- {name} = {result:?} ({:.3}ms)",
                    start.elapsed().as_secs_f64() * 1000.0
                ),
            );
            result
        }
        .boxed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::geo::{normalize_longitude, Coordinate};
    use crate::logging::MemoryLogger;

    #[test]
    fn test_instrument_returns_result_and_logs() {
        let logger = MemoryLogger::shared();
        let normalize = instrument("normalize_longitude", logger.clone(), normalize_longitude);
        assert_eq!(normalize(200.0), -160.0);

        let entries = logger.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "-> normalize_longitude200.0");
        assert!(entries[1].message.starts_with("<- normalize_longitude = -160.0"));
    }

    #[test]
    fn test_instrument_tuple_arguments() {
        let logger = MemoryLogger::shared();
        let midpoint = instrument("midpoint", logger.clone(), |(a, b): (Coordinate, Coordinate)| {
            a.midpoint(&b)
        });
        let mid = midpoint((Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 90.0)));
        assert!((mid.lng - 45.0).abs() < 1e-9);
        assert!(logger.contains(LogLevel::Debug, "-> midpoint("));
    }

    #[test]
    fn test_instrument_is_reusable() {
        let logger = MemoryLogger::shared();
        let double = instrument("double", logger.clone(), |x: i32| x * 2);
        assert_eq!(double(2), 4);
        assert_eq!(double(5), 10);
        assert_eq!(logger.entries().len(), 4);
    }

    #[tokio::test]
    async fn test_instrument_async_logs_on_completion() {
        let logger = MemoryLogger::shared();
        let fetch_zoom = instrument_async("fetch_zoom", logger.clone(), |level: u8| async move {
            Ok::<f64, String>(f64::from(level))
        });

        let pending = fetch_zoom(12);
        assert_eq!(logger.entries().len(), 1);
        assert_eq!(pending.await, Ok(12.0));

        let entries = logger.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].message.starts_with("<- fetch_zoom = Ok(12.0)"));
    }
}
