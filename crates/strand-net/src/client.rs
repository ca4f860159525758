use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::Client;
use tracing::{debug, trace};
use url::Url;

use crate::{
    error::{NetError, NetResult},
    traits::{Net, NetResponse},
    types::{Headers, NetOptions},
};

#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// # Errors
    ///
    /// Returns [`NetError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(options: NetOptions) -> NetResult<Self> {
        let inner = Client::builder()
            .pool_max_idle_per_host(options.pool_max_idle_per_host)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(|e| NetError::http(e.to_string()))?;
        Ok(Self { inner })
    }

    fn apply_headers(
        mut req: reqwest::RequestBuilder,
        headers: Option<Headers>,
    ) -> reqwest::RequestBuilder {
        if let Some(headers) = headers {
            for (k, v) in headers.iter() {
                req = req.header(k, v);
            }
        }
        req
    }

    async fn send(&self, url: &Url, req: reqwest::RequestBuilder) -> NetResult<reqwest::Response> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "request rejected");
            return Err(NetError::http_status(status.as_u16(), url.as_str()));
        }
        Ok(resp)
    }
}

#[async_trait]
impl Net for HttpClient {
    async fn stream(&self, url: Url, headers: Option<Headers>) -> NetResult<NetResponse> {
        // No timeout for streaming - downloads can take arbitrary time
        let req = Self::apply_headers(self.inner.get(url.clone()), headers);
        let resp = self.send(&url, req).await?;

        let content_length = resp.content_length();
        trace!(url = %url, ?content_length, "stream opened");

        let body = resp.bytes_stream().map_err(NetError::from);
        Ok(NetResponse {
            content_length,
            body: Box::pin(body),
        })
    }
}
