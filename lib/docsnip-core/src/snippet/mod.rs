//! Documentation snippet rendering.
//!
//! A [`Snippet`] turns one aspect of a finished exchange into a single
//! documentation fragment. The canonical set (curl invocation, HTTPie
//! invocation, raw HTTP request/response, request/response body) is rendered
//! for every documented operation; parameter tables and multipart snippets are
//! opt-in and carry caller-supplied descriptions.
//!
//! Rendered fragments are written to
//! `<output-directory>/<identifier>/<snippet-name>.<ext>` where the extension
//! is decided by the configured [`TemplateFormat`].

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::operation::Operation;

mod format;
pub use self::format::TemplateFormat;

mod cli;
pub use self::cli::{CurlRequestSnippet, HttpieRequestSnippet, curl_request, httpie_request};

mod http;
pub use self::http::{
    HttpRequestSnippet, HttpResponseSnippet, RequestBodySnippet, ResponseBodySnippet,
    http_request, http_response, request_body, response_body,
};

mod request;
pub use self::request::{
    PathParametersSnippet, RequestParametersSnippet, RequestPartBodySnippet,
    RequestPartFieldsSnippet, RequestPartsSnippet, path_parameters, request_parameters,
    request_part_body, request_part_fields, request_parts,
};

/// One documentation fragment produced for one aspect of an operation.
///
/// Implementations render markup text from the operation record; writing the
/// result to disk is handled by the engine. The configured
/// [`TemplateFormat`] is available on the operation's configuration snapshot.
pub trait Snippet: Send + Sync {
    /// The snippet name; doubles as the file stem of the rendered fragment.
    fn name(&self) -> String;

    /// Renders the fragment for the given operation.
    fn render(&self, operation: &Operation) -> Result<String, SnippetError>;
}

/// Errors reported by snippet rendering or the file writes beneath it.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum SnippetError {
    /// Filesystem error while writing a rendered fragment.
    Io(std::io::Error),

    /// A part payload could not be parsed as JSON.
    Json(serde_json::Error),

    /// The operation has no multipart part with the requested name.
    #[display("no request part named '{name}'")]
    #[from(skip)]
    MissingPart {
        /// The part name that was requested.
        name: String,
    },

    /// A documented field path does not exist in the part payload.
    #[display("no field at path '{path}' in part '{part}'")]
    #[from(skip)]
    MissingField {
        /// The part whose payload was inspected.
        part: String,
        /// The dotted field path that could not be resolved.
        path: String,
    },
}

/// Describes one named parameter (path or query) for a parameter table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub(crate) name: String,
    pub(crate) description: String,
}

/// Creates a [`ParameterDescriptor`].
pub fn param(name: impl Into<String>, description: impl Into<String>) -> ParameterDescriptor {
    ParameterDescriptor {
        name: name.into(),
        description: description.into(),
    }
}

/// Describes one multipart part for the request-parts table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartDescriptor {
    pub(crate) name: String,
    pub(crate) description: String,
}

/// Creates a [`PartDescriptor`].
pub fn part(name: impl Into<String>, description: impl Into<String>) -> PartDescriptor {
    PartDescriptor {
        name: name.into(),
        description: description.into(),
    }
}

/// Describes one field of a JSON payload, addressed by dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub(crate) path: String,
    pub(crate) description: String,
}

/// Creates a [`FieldDescriptor`].
pub fn field(path: impl Into<String>, description: impl Into<String>) -> FieldDescriptor {
    FieldDescriptor {
        path: path.into(),
        description: description.into(),
    }
}

/// The canonical snippets rendered for every documented operation: curl and
/// HTTPie invocations, the raw HTTP request and response, and both bodies.
pub fn default_snippets() -> Vec<Arc<dyn Snippet>> {
    vec![
        Arc::new(curl_request()),
        Arc::new(httpie_request()),
        Arc::new(http_request()),
        Arc::new(http_response()),
        Arc::new(request_body()),
        Arc::new(response_body()),
    ]
}

/// Renders a snippet and writes it under the operation's output directory.
pub(crate) fn write(snippet: &dyn Snippet, operation: &Operation) -> Result<PathBuf, SnippetError> {
    let content = snippet.render(operation)?;
    let directory = operation
        .configuration()
        .output_dir()
        .join(operation.identifier());
    fs::create_dir_all(&directory)?;
    let extension = operation.configuration().template_format().extension();
    let file = directory.join(format!("{}.{extension}", snippet.name()));
    fs::write(&file, content)?;
    debug!(file = %file.display(), "snippet written");
    Ok(file)
}

#[cfg(test)]
pub(crate) mod test_support {
    use http::{HeaderMap, Method, StatusCode};
    use indexmap::IndexMap;

    use crate::docs::DocContext;
    use crate::operation::{Operation, OperationPart, OperationRequest, OperationResponse};

    pub(crate) fn operation(url: &str) -> Operation {
        operation_with(Method::GET, url, Vec::new(), Vec::new())
    }

    pub(crate) fn operation_with(
        method: Method,
        url: &str,
        body: Vec<u8>,
        parts: Vec<OperationPart>,
    ) -> Operation {
        let request = OperationRequest {
            method,
            url: url.parse().expect("valid url"),
            path_template: None,
            path_parameters: IndexMap::new(),
            headers: HeaderMap::new(),
            body,
            parts,
        };
        let response = OperationResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
        };
        let configuration = DocContext::new("target/generated-snippets").snapshot();
        Operation::new("test-operation".to_string(), request, response, configuration)
    }

    pub(crate) fn text_part(name: &str, body: &str) -> OperationPart {
        OperationPart {
            name: name.to_string(),
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }
}
