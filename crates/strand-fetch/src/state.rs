use std::time::Duration;

use strand_core::truncate_2dp;
use strand_events::DownloadProgress;
use strand_platform::time::Instant;
use url::Url;

use crate::{EtaEstimator, ProgressThrottle};

/// Book-keeping for one in-flight download.
#[derive(Clone, Debug)]
pub struct DownloadState {
    url: Url,
    total: Option<u64>,
    received: u64,
    estimator: EtaEstimator,
    throttle: ProgressThrottle,
}

impl DownloadState {
    /// A declared length of `0` counts as unknown.
    #[must_use]
    pub fn new(url: Url, total: Option<u64>, progress_interval: Duration) -> Self {
        Self {
            url,
            total: total.filter(|t| *t > 0),
            received: 0,
            estimator: EtaEstimator::new(),
            throttle: ProgressThrottle::new(progress_interval),
        }
    }

    #[must_use]
    pub fn received(&self) -> u64 {
        self.received
    }

    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Accounts for one received chunk.
    pub fn advance(&mut self, chunk_len: usize) {
        self.received = self.received.saturating_add(chunk_len as u64);
    }

    /// A progress snapshot if the throttle allows one at `now`.
    ///
    /// The estimator only samples on emitted ticks.
    pub fn tick(&mut self, now: Instant) -> Option<DownloadProgress> {
        if !self.throttle.should_emit(now) {
            return None;
        }
        let eta_secs = self
            .estimator
            .update(self.received, self.total.unwrap_or(0));
        Some(DownloadProgress {
            url: self.url.clone(),
            received: self.received,
            total: self.total,
            percent: self.percent(),
            eta_secs,
        })
    }

    #[expect(clippy::cast_precision_loss, reason = "percentage for display")]
    fn percent(&self) -> Option<f64> {
        self.total
            .map(|total| truncate_2dp(self.received as f64 / total as f64 * 100.0))
    }
}
