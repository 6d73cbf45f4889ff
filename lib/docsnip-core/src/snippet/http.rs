//! Raw HTTP exchange snippets: request line, response line, headers, bodies.

use crate::operation::Operation;

use super::{Snippet, SnippetError};

/// Renders the request as it went over the wire.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpRequestSnippet;

/// Creates the `http-request` snippet.
pub fn http_request() -> HttpRequestSnippet {
    HttpRequestSnippet
}

impl Snippet for HttpRequestSnippet {
    fn name(&self) -> String {
        "http-request".to_string()
    }

    fn render(&self, operation: &Operation) -> Result<String, SnippetError> {
        let request = operation.request();
        let mut raw = format!(
            "{} {} HTTP/1.1\n",
            request.method(),
            request.path_and_query()
        );
        raw.push_str(&format!("Host: {}\n", request.host()));
        for (name, value) in request.headers() {
            raw.push_str(&format!("{name}: {}\n", String::from_utf8_lossy(value.as_bytes())));
        }
        raw.push('\n');
        raw.push_str(&request.body_text());
        let format = operation.configuration().template_format();
        Ok(format.code_block(Some("http"), true, &raw))
    }
}

/// Renders the response as it came back over the wire.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpResponseSnippet;

/// Creates the `http-response` snippet.
pub fn http_response() -> HttpResponseSnippet {
    HttpResponseSnippet
}

impl Snippet for HttpResponseSnippet {
    fn name(&self) -> String {
        "http-response".to_string()
    }

    fn render(&self, operation: &Operation) -> Result<String, SnippetError> {
        let response = operation.response();
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default();
        let mut raw = format!("HTTP/1.1 {} {reason}\n", status.as_u16());
        for (name, value) in response.headers() {
            raw.push_str(&format!("{name}: {}\n", String::from_utf8_lossy(value.as_bytes())));
        }
        raw.push('\n');
        raw.push_str(&response.body_text());
        let format = operation.configuration().template_format();
        Ok(format.code_block(Some("http"), true, &raw))
    }
}

/// Renders the raw request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBodySnippet;

/// Creates the `request-body` snippet.
pub fn request_body() -> RequestBodySnippet {
    RequestBodySnippet
}

impl Snippet for RequestBodySnippet {
    fn name(&self) -> String {
        "request-body".to_string()
    }

    fn render(&self, operation: &Operation) -> Result<String, SnippetError> {
        let format = operation.configuration().template_format();
        Ok(format.code_block(None, true, &operation.request().body_text()))
    }
}

/// Renders the raw response body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseBodySnippet;

/// Creates the `response-body` snippet.
pub fn response_body() -> ResponseBodySnippet {
    ResponseBodySnippet
}

impl Snippet for ResponseBodySnippet {
    fn name(&self) -> String {
        "response-body".to_string()
    }

    fn render(&self, operation: &Operation) -> Result<String, SnippetError> {
        let format = operation.configuration().template_format();
        Ok(format.code_block(None, true, &operation.response().body_text()))
    }
}
