//! Generic test harness for booting a server and documenting it.
//!
//! [`TestClient<T>`] binds an OS-assigned localhost port, launches any
//! [`TestServer`] implementation on it in a background task, waits for the
//! server to become healthy, and dereferences to a ready
//! [`DocClient`](crate::DocClient):
//!
//! ```rust,no_run
//! use docsnip_core::{DocContext, document};
//! use docsnip_core::test_client::{TestClient, TestServer};
//! use std::net::TcpListener;
//!
//! # #[derive(Debug)]
//! # struct MyServer;
//! # impl TestServer for MyServer {
//! #     async fn launch(&self, listener: TcpListener) {
//! #         let _ = listener;
//! #     }
//! # }
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let docs = DocContext::new("target/generated-snippets");
//! let client = TestClient::start_with(MyServer, docs.configurer()).await?;
//!
//! client.get("/")?.await?.consume_with(&document("index"))?;
//! # Ok(())
//! # }
//! ```

use std::net::{Ipv4Addr, SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use tracing::debug;

use crate::DocClient;
use crate::configurer::DocConfigurer;

mod error;
pub use self::error::TestAppError;

mod test_server;
pub use self::test_server::{TestServer, TestServerConfig};

/// A running test server and a client pointed at it.
///
/// Dereferences to [`DocClient`], so every client method is available
/// directly. The server task is aborted when the `TestClient` is dropped.
#[derive(Debug, derive_more::Deref, derive_more::DerefMut)]
pub struct TestClient<T> {
    local_addr: SocketAddr,
    #[deref]
    #[deref_mut]
    client: DocClient,
    handle: Option<tokio::task::JoinHandle<()>>,
    test_server: Arc<T>,
}

impl<T> TestClient<T>
where
    T: TestServer + Send + Sync + 'static,
{
    /// Starts the server and waits until it is healthy.
    pub async fn start(test_server: T) -> Result<Self, TestAppError> {
        Self::start_inner(test_server, None).await
    }

    /// Starts the server with a documentation configurer installed on the
    /// client, in addition to whatever the server's
    /// [`config`](TestServer::config) sets up.
    pub async fn start_with(
        test_server: T,
        configurer: DocConfigurer,
    ) -> Result<Self, TestAppError> {
        Self::start_inner(test_server, Some(configurer)).await
    }

    async fn start_inner(
        test_server: T,
        configurer: Option<DocConfigurer>,
    ) -> Result<Self, TestAppError> {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 0));
        let listener = TcpListener::bind(addr)?;
        let local_addr = listener.local_addr()?;

        let test_server = Arc::new(test_server);
        let handle = tokio::spawn({
            let server = Arc::clone(&test_server);
            async move {
                server.launch(listener).await;
            }
        });

        let TestServerConfig {
            doc_client,
            min_backoff_delay,
            max_backoff_delay,
            backoff_jitter,
            max_retry_attempts,
        } = test_server.config();

        let mut builder = doc_client
            .unwrap_or_else(DocClient::builder)
            .with_host(Ipv4Addr::LOCALHOST.to_string())
            .with_port(local_addr.port());
        if let Some(configurer) = configurer {
            builder = builder.with_filter(configurer);
        }
        let client = builder.build()?;

        let healthy = wait_for_health(
            &test_server,
            &client,
            local_addr,
            min_backoff_delay,
            max_backoff_delay,
            backoff_jitter,
            max_retry_attempts,
        )
        .await;
        if !healthy {
            return Err(TestAppError::UnhealthyServer {
                timeout: max_backoff_delay,
            });
        }
        debug!(%local_addr, "test server ready");

        Ok(Self {
            local_addr,
            client,
            handle: Some(handle),
            test_server,
        })
    }

    /// The address the server is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The server implementation, e.g. to reach shared state in assertions.
    pub fn server(&self) -> &T {
        &self.test_server
    }
}

async fn wait_for_health<T>(
    server: &Arc<T>,
    client: &DocClient,
    addr: SocketAddr,
    min_delay: Duration,
    max_delay: Duration,
    jitter: bool,
    max_attempts: usize,
) -> bool
where
    T: TestServer + Send + Sync,
{
    let probe = || async {
        let mut probe_client = client.clone();
        let healthy = match server.is_healthy(&mut probe_client).await {
            Some(healthy) => healthy,
            None => tokio::net::TcpStream::connect(addr).await.is_ok(),
        };
        if healthy {
            Ok(())
        } else {
            Err(std::io::Error::other("server not ready"))
        }
    };

    let mut backoff = ExponentialBuilder::default()
        .with_min_delay(min_delay)
        .with_max_delay(max_delay)
        .with_max_times(max_attempts);
    if jitter {
        backoff = backoff.with_jitter();
    }

    probe.retry(backoff).await.is_ok()
}

impl<T> Drop for TestClient<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
