use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::{
    error::{NetError, NetResult},
    traits::{Net, NetResponse},
    types::Headers,
};

/// Timeout decorator for [`Net`] implementations.
pub struct TimeoutNet<N> {
    inner: N,
    timeout: Duration,
}

impl<N: Net> TimeoutNet<N> {
    pub fn new(inner: N, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<N: Net> Net for TimeoutNet<N> {
    async fn stream(&self, url: Url, headers: Option<Headers>) -> NetResult<NetResponse> {
        // Only the request/response phase is bounded; the body may take arbitrarily long.
        tokio::time::timeout(self.timeout, self.inner.stream(url, headers))
            .await
            .map_err(|_| NetError::Timeout)?
    }
}
