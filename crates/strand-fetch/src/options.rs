use std::time::Duration;

use strand_net::CachePolicy;

#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Minimum spacing between two progress events of one download.
    pub progress_interval: Duration,
    /// Caching semantics requested from intermediaries.
    pub cache_policy: CachePolicy,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_millis(250),
            cache_policy: CachePolicy::ForceCache,
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    #[must_use]
    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }
}
