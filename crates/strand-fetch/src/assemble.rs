use bytes::{Bytes, BytesMut};
use futures::future::try_join_all;
use tracing::debug;
use url::Url;

use crate::{FetchResult, ProgressiveFetcher};

impl ProgressiveFetcher {
    /// Fetches all `urls` concurrently and concatenates them in input order.
    ///
    /// Progress of the individual shards interleaves freely on the bus.
    ///
    /// # Errors
    ///
    /// The first shard failure; remaining shards are dropped.
    pub async fn assemble(&self, urls: &[Url]) -> FetchResult<Bytes> {
        let parts = try_join_all(urls.iter().map(|url| self.fetch(url))).await?;

        let total = parts.iter().map(Bytes::len).sum();
        let mut buf = BytesMut::with_capacity(total);
        for part in &parts {
            buf.extend_from_slice(part);
        }
        debug!(shards = parts.len(), bytes = total, "assembled");
        Ok(buf.freeze())
    }
}
