use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, Uri};
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::correlation::REQUEST_ID_HEADER;
use crate::operation::{OperationRequest, OperationResponse};

use super::filter::Next;
use super::{
    CallBody, CallPath, CallQuery, DocClientError, ExchangeFilter, ExchangeRequest,
    ExchangeResult, ExpectedStatusCodes, MultipartForm,
};

pub(super) const BODY_MAX_LENGTH: usize = 1024;

/// A single request under construction.
///
/// Created by the verb methods on [`DocClient`](super::DocClient) and executed
/// by awaiting it directly:
///
/// ```rust,no_run
/// # async fn example(client: docsnip_core::DocClient) -> Result<(), docsnip_core::DocClientError> {
/// let result = client
///     .get("/{foo}/{bar}")?
///     .with_path_param("foo", 1)
///     .with_path_param("bar", 2)
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// Execution injects a fresh identity token into the reserved header, runs
/// the installed filters, sends the request, and captures both sides of the
/// exchange for documentation.
#[derive(derive_more::Debug)]
pub struct DocCall {
    pub(super) client: reqwest::Client,
    pub(super) base_uri: Uri,
    #[debug(skip)]
    pub(super) filters: Vec<Arc<dyn ExchangeFilter>>,

    pub(super) method: Method,
    pub(super) path: CallPath,
    pub(super) query: CallQuery,
    pub(super) headers: Vec<(String, String)>,
    #[debug(ignore)]
    pub(super) body: Option<CallBody>,
    pub(super) expected_status_codes: ExpectedStatusCodes,
}

impl DocCall {
    pub(super) fn build(
        client: reqwest::Client,
        base_uri: Uri,
        filters: Vec<Arc<dyn ExchangeFilter>>,
        method: Method,
        path: CallPath,
    ) -> Self {
        Self {
            client,
            base_uri,
            filters,
            method,
            path,
            query: CallQuery::default(),
            headers: Vec::new(),
            body: None,
            expected_status_codes: ExpectedStatusCodes::default(),
        }
    }

    /// Binds a path template parameter.
    #[must_use]
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path = self.path.add_param(name, value);
        self
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: CallQuery) -> Self {
        self.query = query;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query = self.query.add_param(name, value);
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a JSON request body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, DocClientError> {
        self.body = Some(CallBody::json(body)?);
        Ok(self)
    }

    /// Sets a plain text request body.
    #[must_use]
    pub fn text(mut self, body: &str) -> Self {
        self.body = Some(CallBody::text(body));
        self
    }

    /// Sets a raw request body with an explicit content type.
    #[must_use]
    pub fn raw(mut self, data: Vec<u8>, content_type: headers::ContentType) -> Self {
        self.body = Some(CallBody::raw(data, content_type));
        self
    }

    /// Sets a multipart request body.
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(CallBody::multipart(form));
        self
    }

    /// Replaces the expected status codes (default: 200-499).
    #[must_use]
    pub fn with_expected_status_codes(mut self, codes: ExpectedStatusCodes) -> Self {
        self.expected_status_codes = codes;
        self
    }

    async fn exchange(self) -> Result<ExchangeResult, DocClientError> {
        let Self {
            client,
            base_uri,
            filters,
            method,
            path,
            query,
            headers,
            body,
            expected_status_codes,
        } = self;

        let url = build_url(&base_uri, &path, &query)?;

        let mut header_map = HeaderMap::new();
        let token = Uuid::new_v4().to_string();
        header_map.insert(
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderValue::from_str(&token)?,
        );
        for (name, value) in &headers {
            header_map.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }
        if let Some(body) = &body
            && let Ok(value) = body.content_type.to_string().parse()
        {
            header_map.insert(http::header::CONTENT_TYPE, value);
        }

        // Captured before the filters run; the chain forwards the request
        // unmodified apart from augmentation filters the caller installed.
        let request_descriptor = OperationRequest {
            method: method.clone(),
            url: url.clone(),
            path_template: path.is_templated().then(|| path.path.clone()),
            path_parameters: path.args().clone(),
            headers: header_map.clone(),
            body: body.as_ref().map(|body| body.data.clone()).unwrap_or_default(),
            parts: body
                .as_ref()
                .map(|body| body.parts.iter().map(|part| part.to_operation_part()).collect())
                .unwrap_or_default(),
        };

        let request = ExchangeRequest {
            method,
            url,
            headers: header_map,
            body,
        };
        let response = Next::new(&client, &filters).run(request).await?;

        let status = response.status();
        if !expected_status_codes.contains(status.as_u16()) {
            let body = response
                .text()
                .await
                .map(|text| {
                    if text.len() > BODY_MAX_LENGTH {
                        let truncated: String = text.chars().take(BODY_MAX_LENGTH).collect();
                        format!("{truncated}... (truncated)")
                    } else {
                        text
                    }
                })
                .unwrap_or_else(|error| format!("<unable to read response body: {error}>"));
            return Err(DocClientError::UnexpectedStatusCode {
                status_code: status.as_u16(),
                body,
            });
        }

        let response_headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        let response_descriptor = OperationResponse {
            status,
            headers: response_headers,
            body,
        };

        Ok(ExchangeResult::new(request_descriptor, response_descriptor))
    }
}

fn build_url(base_uri: &Uri, path: &CallPath, query: &CallQuery) -> Result<Url, DocClientError> {
    let resolved = path.resolve()?;
    let base = base_uri.to_string();
    let url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        resolved.trim_start_matches('/')
    );
    let mut url = url.parse::<Url>()?;

    if !query.is_empty() {
        let query_string = query.to_query_string()?;
        url.set_query(Some(&query_string));
    }

    Ok(url)
}

/// Implement IntoFuture for DocCall to enable direct .await syntax.
impl IntoFuture for DocCall {
    type Output = Result<ExchangeResult, DocClientError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.exchange())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(path: &str) -> DocCall {
        DocCall::build(
            reqwest::Client::new(),
            "http://localhost:8080".parse().expect("valid uri"),
            Vec::new(),
            Method::GET,
            CallPath::from(path),
        )
    }

    #[test]
    fn test_build_url_joins_base_and_path() {
        let call = call("/users");
        let url = build_url(&call.base_uri, &call.path, &call.query).expect("built");
        assert_eq!(url.as_str(), "http://localhost:8080/users");
    }

    #[test]
    fn test_build_url_appends_query() {
        let call = call("/").with_query_param("a", "alpha").with_query_param("b", "bravo");
        let url = build_url(&call.base_uri, &call.path, &call.query).expect("built");
        assert_eq!(url.as_str(), "http://localhost:8080/?a=alpha&b=bravo");
    }

    #[test]
    fn test_build_url_resolves_path_template() {
        let call = call("/{foo}/{bar}")
            .with_path_param("foo", 1)
            .with_path_param("bar", 2);
        let url = build_url(&call.base_uri, &call.path, &call.query).expect("built");
        assert_eq!(url.as_str(), "http://localhost:8080/1/2");
    }

    #[test]
    fn test_build_url_fails_on_unresolved_template() {
        let call = call("/{foo}");
        let error = build_url(&call.base_uri, &call.path, &call.query).expect_err("unresolved");
        assert!(matches!(error, DocClientError::PathUnresolved { .. }));
    }
}
