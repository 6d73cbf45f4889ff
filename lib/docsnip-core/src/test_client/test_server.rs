use std::future::Future;
use std::net::TcpListener;
use std::time::Duration;

use crate::{DocClient, DocClientBuilder};

/// A server implementation the test harness can boot.
///
/// Implementations bind the provided listener and serve until the task is
/// aborted. The harness picks the port, so servers must not assume one.
///
/// ```rust,no_run
/// use docsnip_core::test_client::TestServer;
/// use std::net::TcpListener;
///
/// #[derive(Debug)]
/// struct MyServer;
///
/// impl TestServer for MyServer {
///     async fn launch(&self, listener: TcpListener) {
///         listener.set_nonblocking(true).expect("set non-blocking");
///         let listener = tokio::net::TcpListener::from_std(listener).expect("valid listener");
///         // axum::serve(listener, router()).await.expect("server running");
///         # let _ = listener;
///     }
/// }
/// ```
pub trait TestServer {
    /// Serves on the provided listener until the surrounding task is aborted.
    fn launch(&self, listener: TcpListener) -> impl Future<Output = ()> + Send;

    /// Optional readiness probe.
    ///
    /// Return `Some(true)`/`Some(false)` to report health explicitly, or
    /// `None` (the default) to fall back to a TCP connection test.
    fn is_healthy(&self, _client: &mut DocClient) -> impl Future<Output = Option<bool>> + Send {
        std::future::ready(None)
    }

    /// Configuration for the harness; defaults are fine for most servers.
    fn config(&self) -> TestServerConfig {
        TestServerConfig::default()
    }
}

/// Tuning knobs for [`TestClient::start`](super::TestClient::start).
#[derive(derive_more::Debug)]
pub struct TestServerConfig {
    /// Pre-configured client builder; the harness fills in the port.
    #[debug(skip)]
    pub doc_client: Option<DocClientBuilder>,
    /// Initial delay between health probes.
    pub min_backoff_delay: Duration,
    /// Ceiling for the probe delay.
    pub max_backoff_delay: Duration,
    /// Whether probe delays are jittered.
    pub backoff_jitter: bool,
    /// How many probes to attempt before giving up.
    pub max_retry_attempts: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            doc_client: None,
            min_backoff_delay: Duration::from_millis(25),
            max_backoff_delay: Duration::from_secs(2),
            backoff_jitter: true,
            max_retry_attempts: 15,
        }
    }
}
