use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use headers::HeaderMapExt;
use http::{HeaderMap, Method};
use tracing::debug;
use url::Url;

use super::{CallBody, DocClientError};

/// Future type returned by [`ExchangeFilter::filter`] and [`Next::run`].
pub type FilterFuture<'a> =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, DocClientError>> + Send + 'a>>;

/// An outbound request travelling down the filter chain.
///
/// Filters may inspect or augment it before handing it to [`Next::run`]; the
/// terminal step of the chain executes it with reqwest.
#[derive(Clone, derive_more::Debug)]
pub struct ExchangeRequest {
    pub(super) method: Method,
    pub(super) url: Url,
    pub(super) headers: HeaderMap,
    #[debug(skip)]
    pub(super) body: Option<CallBody>,
}

impl ExchangeRequest {
    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The fully resolved URL, including the query string.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers, including the reserved request-identity header.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable header access for filters that augment the request.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

/// A request filter installed on the client.
///
/// Filters run in installation order on every exchange. A filter must call
/// [`Next::run`] to forward the request; not doing so aborts the exchange
/// with whatever error the filter returns.
pub trait ExchangeFilter: Send + Sync + 'static {
    /// Processes an outbound request and forwards it downstream.
    fn filter<'a>(&'a self, request: ExchangeRequest, next: Next<'a>) -> FilterFuture<'a>;
}

/// The remainder of the filter chain, ending at the reqwest executor.
pub struct Next<'a> {
    client: &'a reqwest::Client,
    filters: &'a [Arc<dyn ExchangeFilter>],
}

impl std::fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("client", &self.client)
            .field("filters_len", &self.filters.len())
            .finish()
    }
}

impl<'a> Next<'a> {
    pub(super) fn new(client: &'a reqwest::Client, filters: &'a [Arc<dyn ExchangeFilter>]) -> Self {
        Self { client, filters }
    }

    /// Runs the remaining filters and finally executes the request.
    pub fn run(self, request: ExchangeRequest) -> FilterFuture<'a> {
        match self.filters.split_first() {
            Some((head, rest)) => head.filter(request, Next::new(self.client, rest)),
            None => Box::pin(execute(self.client, request)),
        }
    }
}

async fn execute(
    client: &reqwest::Client,
    request: ExchangeRequest,
) -> Result<reqwest::Response, DocClientError> {
    let ExchangeRequest {
        method,
        url,
        headers,
        body,
    } = request;

    let mut outbound = reqwest::Request::new(method, url);
    *outbound.headers_mut() = headers;
    if let Some(body) = body {
        outbound.headers_mut().typed_insert(body.content_type.clone());
        *outbound.body_mut() = Some(reqwest::Body::from(body.data));
    }

    debug!(?outbound, "sending...");
    let response = client.execute(outbound).await?;
    debug!(?response, "...receiving");
    Ok(response)
}
