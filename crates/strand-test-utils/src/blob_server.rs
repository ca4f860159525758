//! HTTP server that streams fixed byte blobs in paced chunks.
//!
//! Each [`Blob`] controls its chunking, per-chunk delay, whether a
//! `Content-Length` header is sent, and an optional mid-stream failure.
//! Requests are counted per path so tests can assert cache hits never
//! reach the network.

use std::{collections::HashMap, io, sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use bytes::Bytes;
use futures::StreamExt;
use parking_lot::Mutex;
use url::Url;

use crate::TestHttpServer;

#[derive(Clone, Debug)]
pub struct Blob {
    data: Bytes,
    chunk_size: usize,
    chunk_delay: Duration,
    content_length: bool,
    fail_after: Option<usize>,
    status: StatusCode,
}

impl Blob {
    /// Served in one chunk with a `Content-Length` header.
    pub fn new(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            chunk_size: data.len().max(1),
            data,
            chunk_delay: Duration::ZERO,
            content_length: true,
            fail_after: None,
            status: StatusCode::OK,
        }
    }

    #[must_use]
    pub fn chunked(mut self, chunk_size: usize, chunk_delay: Duration) -> Self {
        self.chunk_size = chunk_size.max(1);
        self.chunk_delay = chunk_delay;
        self
    }

    /// Uses chunked transfer encoding so the client sees no declared length.
    #[must_use]
    pub fn without_content_length(mut self) -> Self {
        self.content_length = false;
        self
    }

    /// Aborts the body after `chunks` chunks have been sent.
    #[must_use]
    pub fn fail_after(mut self, chunks: usize) -> Self {
        self.fail_after = Some(chunks);
        self
    }

    /// Responds with `status` and an empty body.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = StatusCode::from_u16(status).unwrap();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub cache_control: Option<String>,
}

#[derive(Default)]
struct ServerState {
    blobs: HashMap<String, Blob>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct BlobServer {
    server: TestHttpServer,
    state: Arc<ServerState>,
}

impl BlobServer {
    /// Serves each `(path, blob)` pair; paths are given without a leading `/`.
    pub async fn new<I, P>(blobs: I) -> Self
    where
        I: IntoIterator<Item = (P, Blob)>,
        P: Into<String>,
    {
        let blobs = blobs
            .into_iter()
            .map(|(path, blob)| (path.into().trim_start_matches('/').to_owned(), blob))
            .collect();
        let state = Arc::new(ServerState {
            blobs,
            requests: Mutex::default(),
        });
        let router = Router::new()
            .route("/{*path}", get(serve_blob))
            .with_state(Arc::clone(&state));
        Self {
            server: TestHttpServer::new(router).await,
            state,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.server.url(path)
    }

    /// Number of requests received for `path`.
    #[must_use]
    pub fn hits(&self, path: &str) -> usize {
        let path = path.trim_start_matches('/');
        self.state
            .requests
            .lock()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }
}

async fn serve_blob(
    State(state): State<Arc<ServerState>>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.requests.lock().push(RecordedRequest {
        path: path.clone(),
        cache_control: headers
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
    });

    let Some(blob) = state.blobs.get(&path).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if !blob.status.is_success() {
        return blob.status.into_response();
    }

    let total = blob.data.len();
    let chunks: Vec<Bytes> = (0..total)
        .step_by(blob.chunk_size)
        .map(|start| blob.data.slice(start..(start + blob.chunk_size).min(total)))
        .collect();
    let delay = blob.chunk_delay;
    let fail_after = blob.fail_after;
    let stream = futures::stream::iter(chunks.into_iter().enumerate()).then(
        move |(index, chunk)| async move {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if fail_after.is_some_and(|n| index >= n) {
                return Err(io::Error::other("injected body failure"));
            }
            Ok(chunk)
        },
    );

    let mut response = Response::new(Body::from_stream(stream));
    if blob.content_length {
        response
            .headers_mut()
            .insert(header::CONTENT_LENGTH, HeaderValue::from(total));
    }
    response
}
