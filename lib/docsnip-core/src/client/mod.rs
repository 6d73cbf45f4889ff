//! The documenting HTTP client: builder, verb methods, filter chain, and
//! exchange capture.

use std::sync::Arc;

use http::{Method, Uri};

mod builder;
pub use self::builder::DocClientBuilder;

mod call;
pub use self::call::DocCall;

mod path;
pub use self::path::CallPath;

mod query;
pub use self::query::CallQuery;

mod body;
pub use self::body::{CallBody, MultipartForm, MultipartPart};

mod filter;
pub use self::filter::{ExchangeFilter, ExchangeRequest, FilterFuture, Next};

mod status;
pub use self::status::ExpectedStatusCodes;

mod result;
pub use self::result::ExchangeResult;

mod error;
pub use self::error::DocClientError;

/// Async HTTP client that captures every exchange for documentation.
///
/// Each request is tagged with a unique identity token in the reserved
/// header, passed through the installed [`ExchangeFilter`]s, and returned as
/// an [`ExchangeResult`] holding both sides of the exchange. Install a
/// [`DocContext`](crate::DocContext) configurer as a filter to make the
/// results documentable:
///
/// ```rust,no_run
/// use docsnip_core::{DocClient, DocContext, document};
///
/// # async fn example() -> Result<(), docsnip_core::DocClientError> {
/// let docs = DocContext::new("target/generated-snippets");
/// let client = DocClient::builder()
///     .with_host("127.0.0.1")
///     .with_port(8080)
///     .with_filter(docs.configurer())
///     .build()?;
///
/// client
///     .get("/")?
///     .await?
///     .consume_with(&document("index"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, derive_more::Debug)]
pub struct DocClient {
    pub(super) client: reqwest::Client,
    pub(super) base_uri: Uri,
    #[debug(skip)]
    pub(super) filters: Vec<Arc<dyn ExchangeFilter>>,
}

impl DocClient {
    /// Creates a builder.
    pub fn builder() -> DocClientBuilder {
        DocClientBuilder::default()
    }

    /// Starts a request with an arbitrary method.
    pub fn call(&self, method: Method, path: CallPath) -> Result<DocCall, DocClientError> {
        Ok(DocCall::build(
            self.client.clone(),
            self.base_uri.clone(),
            self.filters.clone(),
            method,
            path,
        ))
    }

    /// Starts a GET request.
    pub fn get(&self, path: impl Into<CallPath>) -> Result<DocCall, DocClientError> {
        self.call(Method::GET, path.into())
    }

    /// Starts a POST request.
    pub fn post(&self, path: impl Into<CallPath>) -> Result<DocCall, DocClientError> {
        self.call(Method::POST, path.into())
    }

    /// Starts a PUT request.
    pub fn put(&self, path: impl Into<CallPath>) -> Result<DocCall, DocClientError> {
        self.call(Method::PUT, path.into())
    }

    /// Starts a DELETE request.
    pub fn delete(&self, path: impl Into<CallPath>) -> Result<DocCall, DocClientError> {
        self.call(Method::DELETE, path.into())
    }

    /// Starts a PATCH request.
    pub fn patch(&self, path: impl Into<CallPath>) -> Result<DocCall, DocClientError> {
        self.call(Method::PATCH, path.into())
    }
}
