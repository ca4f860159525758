#![forbid(unsafe_code)]

use std::fmt::Write;

use strand_core::{human_duration, human_size};
use url::Url;

/// Snapshot of one download, emitted at most once per throttle interval.
#[derive(Clone, Debug, PartialEq)]
pub struct DownloadProgress {
    pub url: Url,
    pub received: u64,
    /// Declared length; `None` when the server sent none.
    pub total: Option<u64>,
    /// Percentage truncated to two decimals; `None` when `total` is unknown.
    pub percent: Option<f64>,
    /// Smoothed seconds remaining; `None` while unknown.
    pub eta_secs: Option<f64>,
}

impl DownloadProgress {
    /// The four-line report shown to the user.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "display only")]
    pub fn message(&self) -> String {
        let mut out = String::new();
        let received = human_size(self.received as f64);
        match self.percent {
            Some(percent) => {
                let _ = writeln!(out, "Downloading... {percent}% ({received})");
            }
            None => {
                let _ = writeln!(out, "Downloading... ({received})");
            }
        }
        let eta = self.eta_secs.map_or_else(|| "unknown".to_owned(), human_duration);
        let _ = writeln!(out, "Estimated time remaining: {eta} (may be inaccurate)");
        let total = self
            .total
            .map_or_else(|| "unknown".to_owned(), |t| human_size(t as f64));
        let _ = writeln!(out, "Total size: {total}");
        let _ = write!(out, "Download URL: {}", self.url);
        out
    }
}
