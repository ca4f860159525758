/// Number of cumulative byte counts kept for rate estimation.
pub const RING_SLOTS: usize = 4;

/// Samples are taken roughly every 250ms; four of them span about a second.
const SAMPLES_PER_SECOND: f64 = 4.0;
/// A new estimate above `SPIKE_RATIO × previous` is treated as jitter...
const SPIKE_RATIO: f64 = 1.5;
/// ...and replaced by `DAMPED_RATIO × previous`.
const DAMPED_RATIO: f64 = 1.2;

/// Remaining-time estimator for one download.
///
/// Every call to [`update`](Self::update) pushes the cumulative byte count
/// into a [`RING_SLOTS`]-entry ring (zero-filled at start). The rate is the
/// mean of the deltas between adjacent entries scaled to bytes per second,
/// which assumes samples arrive at the throttle cadence rather than
/// measuring wall-clock time.
#[derive(Clone, Debug, Default)]
pub struct EtaEstimator {
    ring: [u64; RING_SLOTS],
    last_estimate: Option<f64>,
}

impl EtaEstimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ring contents, oldest first.
    #[must_use]
    pub fn ring(&self) -> &[u64; RING_SLOTS] {
        &self.ring
    }

    #[must_use]
    pub fn last_estimate(&self) -> Option<f64> {
        self.last_estimate
    }

    /// Projected bytes per second from the current ring.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "byte deltas fit f64 mantissa")]
    pub fn rate(&self) -> f64 {
        let delta_sum: u64 = self
            .ring
            .windows(2)
            .map(|pair| pair[1].saturating_sub(pair[0]))
            .sum();
        let per_sample = delta_sum as f64 / (RING_SLOTS - 1) as f64;
        per_sample * SAMPLES_PER_SECOND
    }

    /// Records `received` and returns the smoothed seconds remaining.
    ///
    /// `None` when the total is unknown (`0`) or no progress was made across
    /// the ring; a stalled rate also forgets the previous estimate so the
    /// next known value is not clamped against a stale one.
    #[expect(clippy::cast_precision_loss, reason = "byte counts fit f64 mantissa")]
    pub fn update(&mut self, received: u64, total: u64) -> Option<f64> {
        self.ring.rotate_left(1);
        self.ring[RING_SLOTS - 1] = received;

        let rate = self.rate();
        if total == 0 || rate <= 0.0 {
            self.last_estimate = None;
            return None;
        }

        let remaining = total.saturating_sub(received) as f64;
        let raw = (remaining / rate).abs();
        let estimate = clamp_estimate(self.last_estimate, raw);
        self.last_estimate = Some(estimate);
        Some(estimate)
    }
}

/// Anti-jitter clamp: a jump above 1.5× a nonzero previous estimate becomes
/// 1.2× that estimate; anything else passes through unchanged.
#[must_use]
pub fn clamp_estimate(previous: Option<f64>, next: f64) -> f64 {
    match previous {
        Some(prev) if prev > 0.0 && next > prev * SPIKE_RATIO => prev * DAMPED_RATIO,
        _ => next,
    }
}
