#![forbid(unsafe_code)]
#![expect(clippy::unwrap_used, reason = "test utility crate")]
#![expect(clippy::missing_panics_doc, reason = "test utility crate")]

//! Shared test utilities for the strand workspace.

pub mod blob_server;
pub mod http_server;
pub mod rng;

pub use blob_server::{Blob, BlobServer, RecordedRequest};
pub use http_server::TestHttpServer;
pub use rng::{Xorshift64, pattern_bytes};
