use std::{collections::HashMap, time::Duration};

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header names are stored lowercase.
    pub fn insert<K: AsRef<str>, V: Into<String>>(&mut self, key: K, value: V) {
        self.inner
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// How hard intermediaries may lean on cached copies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// No extra request headers.
    Default,
    /// Accept stale cached responses (`Cache-Control: max-stale`).
    #[default]
    ForceCache,
}

impl CachePolicy {
    /// Request headers that express this policy, or `None` if there are none.
    pub fn headers(self) -> Option<Headers> {
        match self {
            Self::Default => None,
            Self::ForceCache => {
                let mut headers = Headers::new();
                headers.insert("Cache-Control", "max-stale");
                Some(headers)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct NetOptions {
    /// Bounds opening a transfer, up to the response headers. Body streaming
    /// is never timed out.
    pub request_timeout: Duration,
    /// Max idle connections per host.
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 4,
            user_agent: concat!("strand/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl NetOptions {
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
