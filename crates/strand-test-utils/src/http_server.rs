//! Async HTTP test server on a random localhost port.

use axum::Router;
use tokio::net::TcpListener;
use url::Url;

/// Serves an axum [`Router`] until dropped.
pub struct TestHttpServer {
    base_url: Url,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestHttpServer {
    /// Spawn `router` on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind.
    pub async fn new(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server = axum::serve(listener, router).with_graceful_shutdown(async {
            shutdown_rx.await.ok();
        });
        tokio::spawn(async move {
            let _ = server.await;
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}")).unwrap(),
            shutdown_tx: Some(shutdown_tx),
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).unwrap()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Drop for TestHttpServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
