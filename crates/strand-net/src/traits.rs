use std::{fmt, pin::Pin, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use url::Url;

use crate::{
    error::NetResult,
    timeout::TimeoutNet,
    types::Headers,
};

pub type ByteStream = Pin<Box<dyn Stream<Item = NetResult<Bytes>> + Send>>;

/// An open response whose body has not been read yet.
pub struct NetResponse {
    /// Declared body length (`Content-Length`), if the server sent one.
    pub content_length: Option<u64>,
    /// Body chunks in arrival order. Polling suspends until the next chunk or EOF.
    pub body: ByteStream,
}

impl fmt::Debug for NetResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetResponse")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Net: Send + Sync {
    /// Open a URL and hand back its body as a chunk stream
    async fn stream(&self, url: Url, headers: Option<Headers>) -> NetResult<NetResponse>;
}

pub trait NetExt: Net + Sized {
    /// Bound the request/response phase of every call.
    fn with_timeout(self, timeout: Duration) -> TimeoutNet<Self> {
        TimeoutNet::new(self, timeout)
    }
}

impl<T: Net> NetExt for T {}
