use std::borrow::Cow;

use http::{HeaderMap, Method, StatusCode};
use indexmap::IndexMap;
use url::Url;

use crate::docs::ConfigurationSnapshot;

/// A finished request/response exchange together with the documentation
/// configuration recovered for it.
///
/// An `Operation` is what the snippet engine consumes: every built-in
/// [`Snippet`](crate::snippet::Snippet) renders one aspect of it (the curl
/// invocation, the response body, a parameter table, ...). Instances are
/// assembled by [`DocumentationConsumer`](crate::DocumentationConsumer) when a
/// completed exchange is documented.
#[derive(Clone, derive_more::Debug)]
pub struct Operation {
    identifier: String,
    request: OperationRequest,
    response: OperationResponse,
    #[debug(skip)]
    configuration: ConfigurationSnapshot,
}

impl Operation {
    pub(crate) fn new(
        identifier: String,
        request: OperationRequest,
        response: OperationResponse,
        configuration: ConfigurationSnapshot,
    ) -> Self {
        Self {
            identifier,
            request,
            response,
            configuration,
        }
    }

    /// The caller-supplied name of this operation; snippets are written under
    /// `<output-directory>/<identifier>/`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The request as it was sent over the wire.
    pub fn request(&self) -> &OperationRequest {
        &self.request
    }

    /// Mutable access for operation preprocessors.
    pub fn request_mut(&mut self) -> &mut OperationRequest {
        &mut self.request
    }

    /// The response as it was received.
    pub fn response(&self) -> &OperationResponse {
        &self.response
    }

    /// Mutable access for operation preprocessors.
    pub fn response_mut(&mut self) -> &mut OperationResponse {
        &mut self.response
    }

    /// The configuration snapshot deposited when the request passed the
    /// documentation filter.
    pub fn configuration(&self) -> &ConfigurationSnapshot {
        &self.configuration
    }
}

/// The request half of an [`Operation`].
#[derive(Clone, derive_more::Debug)]
pub struct OperationRequest {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) path_template: Option<String>,
    pub(crate) path_parameters: IndexMap<String, String>,
    pub(crate) headers: HeaderMap,
    #[debug(ignore)]
    pub(crate) body: Vec<u8>,
    pub(crate) parts: Vec<OperationPart>,
}

impl OperationRequest {
    /// The HTTP method of the request.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The URL actually sent, including the expanded path and query string.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The templated path the caller used, e.g. `/users/{id}`, when one was
    /// used at all.
    pub fn path_template(&self) -> Option<&str> {
        self.path_template.as_deref()
    }

    /// The values bound to the path template, in binding order.
    pub fn path_parameters(&self) -> &IndexMap<String, String> {
        &self.path_parameters
    }

    /// Request headers as sent.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access for operation preprocessors.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// A single header value, rendered as text.
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }

    /// The raw request body bytes; empty when the request had no body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Mutable access for operation preprocessors.
    pub fn body_mut(&mut self) -> &mut Vec<u8> {
        &mut self.body
    }

    /// The request body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Query parameters parsed from the URL, in query-string order.
    pub fn query_parameters(&self) -> IndexMap<String, String> {
        self.url
            .query_pairs()
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect()
    }

    /// The multipart parts of the request body, when it was multipart.
    pub fn parts(&self) -> &[OperationPart] {
        &self.parts
    }

    /// Looks up a multipart part by name.
    pub fn part(&self, name: &str) -> Option<&OperationPart> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// The `Host` line for the request, derived from the URL.
    pub fn host(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        }
    }

    /// Path and query exactly as they appear on the request line.
    pub fn path_and_query(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{query}", self.url.path()),
            None => self.url.path().to_owned(),
        }
    }
}

/// The response half of an [`Operation`].
#[derive(Clone, derive_more::Debug)]
pub struct OperationResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    #[debug(ignore)]
    pub(crate) body: Vec<u8>,
}

impl OperationResponse {
    /// The HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers as received.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access for operation preprocessors.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The raw response body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Mutable access for operation preprocessors.
    pub fn body_mut(&mut self) -> &mut Vec<u8> {
        &mut self.body
    }

    /// The response body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// One part of a multipart request body: its name, headers, and raw content.
#[derive(Clone, derive_more::Debug)]
pub struct OperationPart {
    pub(crate) name: String,
    pub(crate) headers: HeaderMap,
    #[debug(ignore)]
    pub(crate) body: Vec<u8>,
}

impl OperationPart {
    /// The part name from its content disposition.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Part headers, e.g. its content type.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw part content.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The part content as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
