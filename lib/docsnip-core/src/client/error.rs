use crate::snippet::SnippetError;

/// Errors that can occur when using the documentation client.
///
/// Everything is fatal to the test that triggered it; nothing is recovered
/// locally. All variants implement `std::error::Error` and carry enough
/// context to diagnose a misconfigured client or filter chain.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum DocClientError {
    /// HTTP client error from the underlying reqwest library.
    ReqwestError(reqwest::Error),

    /// URL parsing error when constructing request URLs.
    UrlError(url::ParseError),

    /// HTTP protocol error from the http crate.
    HttpError(http::Error),

    /// Invalid base URI configuration.
    InvalidUri(http::uri::InvalidUri),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// JSON serialization error while building a request body.
    JsonValueError(serde_json::Error),

    /// Query parameter serialization error.
    QuerySerializationError(serde_urlencoded::ser::Error),

    /// Snippet rendering or snippet file I/O failure.
    Snippet(SnippetError),

    /// Path template contains unresolved parameters.
    #[display("Path '{path}' is missing required arguments: {missings:?}")]
    #[from(skip)]
    PathUnresolved {
        /// The path template that couldn't be resolved.
        path: String,
        /// List of missing parameter names.
        missings: Vec<String>,
    },

    /// Server returned an unexpected HTTP status code.
    #[display("Unexpected status code {status_code}: {body}")]
    #[from(skip)]
    UnexpectedStatusCode {
        /// The unexpected HTTP status code received.
        status_code: u16,
        /// The response body for debugging.
        body: String,
    },

    /// The reserved request-identity header was absent when the documentation
    /// filter ran. The client injects it on every exchange, so this indicates
    /// the filter was invoked outside the client.
    #[display("request is missing the '{header}' header")]
    #[from(skip)]
    MissingRequestId {
        /// The reserved header name.
        header: &'static str,
    },

    /// No configuration was deposited for the exchange being documented.
    /// This indicates the documentation filter is not installed on the
    /// client that sent the request.
    #[display("no documentation configuration found for request '{token}'")]
    #[from(skip)]
    MissingConfiguration {
        /// The identity token of the undocumentable exchange.
        token: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_client_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<DocClientError>();
        assert_sync::<DocClientError>();
    }

    #[test]
    fn test_missing_configuration_display_names_the_token() {
        let error = DocClientError::MissingConfiguration {
            token: "abc".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "no documentation configuration found for request 'abc'"
        );
    }
}
