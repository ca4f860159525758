use std::time::Duration;

use strand_platform::time::Instant;

/// Rate limiter for progress events.
///
/// Fires on the first call and then only once `interval` has passed since
/// the last time it fired.
#[derive(Clone, Debug)]
pub struct ProgressThrottle {
    interval: Duration,
    last_emit: Option<Instant>,
}

impl ProgressThrottle {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
        }
    }

    /// Returns `true` and records `now` if an event may be emitted.
    pub fn should_emit(&mut self, now: Instant) -> bool {
        let due = self
            .last_emit
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if due {
            self.last_emit = Some(now);
        }
        due
    }
}
