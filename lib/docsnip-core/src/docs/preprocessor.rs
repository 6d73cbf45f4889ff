//! Operation preprocessors, applied to the record before snippets render.

use http::HeaderMap;

use crate::operation::Operation;

/// Transforms an operation record before it is handed to the snippets.
///
/// Preprocessors registered on the [`DocContext`](super::DocContext) run in
/// registration order on every documented operation.
pub trait OperationPreprocessor: Send + Sync {
    /// Returns the operation to render, derived from the recorded one.
    fn process(&self, operation: Operation) -> Operation;
}

/// Strips named headers from both the request and the response.
#[derive(Debug, Clone)]
pub struct RemoveHeadersPreprocessor {
    names: Vec<String>,
}

/// Creates a preprocessor removing the named request and response headers.
pub fn remove_headers<I, S>(names: I) -> RemoveHeadersPreprocessor
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    RemoveHeadersPreprocessor {
        names: names.into_iter().map(Into::into).collect(),
    }
}

impl RemoveHeadersPreprocessor {
    fn strip(&self, headers: &mut HeaderMap) {
        for name in &self.names {
            headers.remove(name.as_str());
        }
    }
}

impl OperationPreprocessor for RemoveHeadersPreprocessor {
    fn process(&self, mut operation: Operation) -> Operation {
        self.strip(operation.request_mut().headers_mut());
        self.strip(operation.response_mut().headers_mut());
        operation
    }
}

/// Re-indents JSON request and response bodies; other bodies pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyPrintJsonPreprocessor;

/// Creates a preprocessor pretty-printing JSON bodies.
pub fn pretty_print_json() -> PrettyPrintJsonPreprocessor {
    PrettyPrintJsonPreprocessor
}

fn prettify(body: &mut Vec<u8>) {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body)
        && let Ok(pretty) = serde_json::to_vec_pretty(&value)
    {
        *body = pretty;
    }
}

impl OperationPreprocessor for PrettyPrintJsonPreprocessor {
    fn process(&self, mut operation: Operation) -> Operation {
        prettify(operation.request_mut().body_mut());
        prettify(operation.response_mut().body_mut());
        operation
    }
}
