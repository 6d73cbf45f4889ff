//! The request filter that attaches documentation configuration to each
//! outbound exchange.

use http::HeaderMap;
use tracing::debug;

use crate::client::{DocClientError, ExchangeFilter, ExchangeRequest, FilterFuture, Next};
use crate::correlation::{ConfigurationStore, REQUEST_ID_HEADER};
use crate::docs::DocContext;

/// Deposits a configuration snapshot for every request that passes through.
///
/// Built from a [`DocContext`] via [`DocContext::configurer`] and installed
/// on the client as a filter. For each request it reads the identity token
/// from the reserved header, snapshots the context's currently-effective
/// options, deposits the snapshot in the process-wide store under that token,
/// and forwards the request downstream unmodified.
///
/// The reserved header must already be present; the client injects it on
/// every exchange.
#[derive(Clone, derive_more::Debug)]
pub struct DocConfigurer {
    #[debug(skip)]
    context: DocContext,
}

impl DocConfigurer {
    pub(crate) fn new(context: DocContext) -> Self {
        Self { context }
    }

    /// Reads the token off the request headers and deposits one snapshot.
    ///
    /// Exposed for filter implementations that wrap this one; the normal path
    /// is the [`ExchangeFilter`] impl.
    pub fn deposit_configuration(&self, headers: &HeaderMap) -> Result<String, DocClientError> {
        let token = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(DocClientError::MissingRequestId {
                header: REQUEST_ID_HEADER,
            })?
            .to_owned();
        ConfigurationStore::global().deposit(token.clone(), self.context.snapshot());
        debug!(%token, "configuration deposited");
        Ok(token)
    }
}

impl ExchangeFilter for DocConfigurer {
    fn filter<'a>(&'a self, request: ExchangeRequest, next: Next<'a>) -> FilterFuture<'a> {
        match self.deposit_configuration(request.headers()) {
            Ok(_) => next.run(request),
            Err(error) => Box::pin(async move { Err(error) }),
        }
    }
}
