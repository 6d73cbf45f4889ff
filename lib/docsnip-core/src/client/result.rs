use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use crate::document::DocumentationConsumer;
use crate::operation::{OperationRequest, OperationResponse};

use super::DocClientError;

/// A completed exchange: the request as sent and the response as received.
///
/// This is what documentation consumers operate on:
///
/// ```rust,no_run
/// use docsnip_core::document;
///
/// # async fn example(client: docsnip_core::DocClient) -> Result<(), docsnip_core::DocClientError> {
/// client
///     .get("/")?
///     .await?
///     .consume_with(&document("default-snippets"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, derive_more::Debug)]
pub struct ExchangeResult {
    request: OperationRequest,
    response: OperationResponse,
}

impl ExchangeResult {
    pub(crate) fn new(request: OperationRequest, response: OperationResponse) -> Self {
        Self { request, response }
    }

    /// The request descriptor captured when the exchange was sent.
    pub fn request(&self) -> &OperationRequest {
        &self.request
    }

    /// The response descriptor.
    pub fn response(&self) -> &OperationResponse {
        &self.response
    }

    /// The response status code.
    pub fn status_code(&self) -> StatusCode {
        self.response.status()
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    /// The raw response body.
    pub fn body(&self) -> &[u8] {
        self.response.body()
    }

    /// Deserializes the response body as JSON.
    pub fn as_json<T: DeserializeOwned>(&self) -> Result<T, DocClientError> {
        Ok(serde_json::from_slice(self.response.body())?)
    }

    /// Documents this exchange with the given consumer.
    ///
    /// Returns `self` so assertions can continue on the same result. Fails
    /// when no configuration was deposited for the exchange (the
    /// documentation filter is not installed) or when snippet rendering or
    /// writing fails.
    pub fn consume_with(&self, consumer: &DocumentationConsumer) -> Result<&Self, DocClientError> {
        consumer.consume(self)?;
        Ok(self)
    }
}
