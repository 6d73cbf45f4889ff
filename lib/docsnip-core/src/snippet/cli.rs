//! Command-line invocation snippets: curl and HTTPie.

use http::{HeaderMap, Method};

use crate::operation::Operation;

use super::{Snippet, SnippetError};

// Multipart boundaries are generated per request and would make the rendered
// command non-reproducible.
fn header_pairs(headers: &HeaderMap) -> impl Iterator<Item = (String, String)> + '_ {
    headers.iter().map(|(name, value)| {
        let mut value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        if name == &http::header::CONTENT_TYPE
            && let Some(index) = value.find("; boundary=")
        {
            value.truncate(index);
        }
        (name.to_string(), value)
    })
}

/// Renders the operation as a curl invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlRequestSnippet;

/// Creates the `curl-request` snippet.
pub fn curl_request() -> CurlRequestSnippet {
    CurlRequestSnippet
}

impl Snippet for CurlRequestSnippet {
    fn name(&self) -> String {
        "curl-request".to_string()
    }

    fn render(&self, operation: &Operation) -> Result<String, SnippetError> {
        let request = operation.request();
        let mut command = format!("$ curl '{}' -i", request.url());
        if request.method() != Method::GET {
            command.push_str(&format!(" -X {}", request.method()));
        }
        for (name, value) in header_pairs(request.headers()) {
            command.push_str(&format!(" -H '{name}: {value}'"));
        }
        if request.parts().is_empty() {
            if !request.body().is_empty() {
                command.push_str(&format!(" -d '{}'", request.body_text()));
            }
        } else {
            for part in request.parts() {
                command.push_str(&format!(" -F '{}={}", part.name(), part.body_text()));
                if let Some(content_type) = part.headers().get(http::header::CONTENT_TYPE) {
                    command.push_str(&format!(
                        ";type={}",
                        String::from_utf8_lossy(content_type.as_bytes())
                    ));
                }
                command.push('\'');
            }
        }
        command.push('\n');
        let format = operation.configuration().template_format();
        Ok(format.code_block(Some("bash"), false, &command))
    }
}

/// Renders the operation as an HTTPie invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpieRequestSnippet;

/// Creates the `httpie-request` snippet.
pub fn httpie_request() -> HttpieRequestSnippet {
    HttpieRequestSnippet
}

impl Snippet for HttpieRequestSnippet {
    fn name(&self) -> String {
        "httpie-request".to_string()
    }

    fn render(&self, operation: &Operation) -> Result<String, SnippetError> {
        let request = operation.request();
        let mut command = String::from("$ ");
        let has_raw_body = request.parts().is_empty() && !request.body().is_empty();
        if has_raw_body {
            command.push_str(&format!("echo '{}' | ", request.body_text()));
        }
        command.push_str("http");
        if !request.parts().is_empty() {
            command.push_str(" --ignore-stdin --multipart");
        }
        command.push_str(&format!(" {} '{}'", request.method(), request.url()));
        for (name, value) in header_pairs(request.headers()) {
            command.push_str(&format!(" '{name}:{value}'"));
        }
        for part in request.parts() {
            command.push_str(&format!(" '{}'='{}'", part.name(), part.body_text()));
        }
        command.push('\n');
        let format = operation.configuration().template_format();
        Ok(format.code_block(Some("bash"), false, &command))
    }
}
