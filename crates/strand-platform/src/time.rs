//! Wall-clock helpers.
//!
//! [`Instant`] comes from `web-time`, which is `std::time::Instant` on native
//! and `performance.now()` in the browser.

use std::time::Duration;

pub use web_time::Instant;

#[cfg(not(target_arch = "wasm32"))]
pub use tokio::time::sleep;

/// Best-effort sleep for wasm32: yields once instead of arming a timer.
///
/// Browser timers are `Rc`-based and `!Send`; nothing in the worker relies on
/// sleeping for an exact duration.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(_duration: Duration) {
    crate::yield_now().await;
}

/// Milliseconds elapsed since `start`, as a float.
#[must_use]
pub fn elapsed_millis(start: Instant) -> f64 {
    millis(start.elapsed())
}

/// Converts a duration to fractional milliseconds.
#[must_use]
pub fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
