//! # Docsnip Core
//!
//! Generate Asciidoctor documentation snippets from your HTTP client test
//! code.
//!
//! Tests drive a [`DocClient`] against a running server; every exchange the
//! client performs can be documented by a consumer created with
//! [`document`], which writes one snippet file per documented aspect
//! (the curl invocation, the raw HTTP exchange, parameter tables, ...) under
//! `<output-directory>/<identifier>/`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docsnip_core::{DocClient, DocContext, document};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let docs = DocContext::new("target/generated-snippets");
//! let client = DocClient::builder()
//!     .with_host("127.0.0.1")
//!     .with_port(8080)
//!     .with_filter(docs.configurer())
//!     .build()?;
//!
//! client
//!     .get("/")?
//!     .await?  // ← Direct await using IntoFuture
//!     .consume_with(&document("index"))?;
//!
//! // target/generated-snippets/index/ now holds the default snippets:
//! // curl-request.adoc, httpie-request.adoc, http-request.adoc,
//! // http-response.adoc, request-body.adoc, response-body.adoc
//! # Ok(())
//! # }
//! ```
//!
//! ## How an exchange becomes documentation
//!
//! The [`DocContext`] holds the effective options (output directory, template
//! format, default snippets, preprocessors). Installing its
//! [`configurer`](DocContext::configurer) as a client filter deposits an
//! immutable snapshot of those options for every request, keyed by the
//! identity token the client injects into the reserved
//! [`REQUEST_ID_HEADER`]. When the test documents the finished exchange, the
//! consumer retrieves the snapshot by that token — exactly once — and hands
//! the assembled operation to the snippets.
//!
//! Because the token travels with the request itself, any number of requests
//! may be in flight concurrently on one shared client; each recovers its own
//! configuration.
//!
//! ## Documenting parameters and multipart requests
//!
//! ```rust,no_run
//! use docsnip_core::{MultipartForm, document};
//! use docsnip_core::snippet::{
//!     field, param, part, path_parameters, request_part_fields, request_parts,
//! };
//!
//! # async fn example(client: docsnip_core::DocClient) -> Result<(), Box<dyn std::error::Error>> {
//! client
//!     .get("/{foo}/{bar}")?
//!     .with_path_param("foo", 1)
//!     .with_path_param("bar", 2)
//!     .await?
//!     .consume_with(&document("path-parameters").with_snippet(path_parameters([
//!         param("foo", "Foo description"),
//!         param("bar", "Bar description"),
//!     ])))?;
//!
//! let form = MultipartForm::new()
//!     .add_text("a", "alpha")
//!     .add_json("b", &serde_json::json!({"c": "charlie"}))?;
//! client
//!     .post("/upload")?
//!     .multipart(form)
//!     .await?
//!     .consume_with(
//!         &document("multipart")
//!             .with_snippet(request_parts([part("a", "Part a"), part("b", "Part b")]))
//!             .with_snippet(request_part_fields("b", [field("c", "One")])),
//!     )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The library provides two main error types:
//! - [`DocClientError`] - client, filter-chain, and consumer errors
//! - [`snippet::SnippetError`] - snippet rendering and file I/O errors
//!
//! Everything is fatal to the test that triggered it: this is test-support
//! code, and a silent failure would be worse than a loud one.

mod client;

mod configurer;
mod correlation;
mod document;
mod docs;
mod operation;

pub mod snippet;

pub mod test_client;

// Public API - only expose user-facing types and functions
pub use self::client::{
    CallBody, CallPath, CallQuery, DocCall, DocClient, DocClientBuilder, DocClientError,
    ExchangeFilter, ExchangeRequest, ExchangeResult, ExpectedStatusCodes, FilterFuture,
    MultipartForm, MultipartPart, Next,
};
pub use self::configurer::DocConfigurer;
pub use self::correlation::{ConfigurationStore, REQUEST_ID_HEADER};
pub use self::document::{DocumentationConsumer, document};
pub use self::docs::{
    ConfigurationSnapshot, DocContext, OperationPreprocessor, PrettyPrintJsonPreprocessor,
    RemoveHeadersPreprocessor, pretty_print_json, remove_headers,
};
pub use self::operation::{Operation, OperationPart, OperationRequest, OperationResponse};

/// Creates an [`ExpectedStatusCodes`] instance with the specified status codes
/// and ranges.
///
/// # Syntax
///
/// - Single codes: `200`, `201`, `404`
/// - Inclusive ranges: `200-299` (includes both endpoints)
/// - Exclusive ranges: `200..300` (excludes 300)
/// - Mixed: `200, 201-204, 400..500`
///
/// # Examples
///
/// ```rust
/// use docsnip_core::expected_status_codes;
///
/// let codes = expected_status_codes!(200, 201, 204);
/// let success = expected_status_codes!(200-299);
/// let client_errors = expected_status_codes!(400..500);
/// ```
#[macro_export]
macro_rules! expected_status_codes {
    // Empty case
    () => {
        $crate::ExpectedStatusCodes::default()
    };

    // Single element
    ($single:literal) => {
        $crate::ExpectedStatusCodes::from_single($single)
    };

    // Single range (inclusive)
    ($start:literal - $end:literal) => {
        $crate::ExpectedStatusCodes::from_inclusive_range($start..=$end)
    };

    // Single range (exclusive)
    ($start:literal .. $end:literal) => {
        $crate::ExpectedStatusCodes::from_exclusive_range($start..$end)
    };

    // Multiple elements - single code followed by more
    ($first:literal, $($rest:tt)*) => {{
        #[allow(unused_mut)]
        let mut codes = $crate::ExpectedStatusCodes::from_single($first);
        $crate::expected_status_codes!(@accumulate codes, $($rest)*);
        codes
    }};

    // Multiple elements - inclusive range followed by more
    ($start:literal - $end:literal, $($rest:tt)*) => {{
        #[allow(unused_mut)]
        let mut codes = $crate::ExpectedStatusCodes::from_inclusive_range($start..=$end);
        $crate::expected_status_codes!(@accumulate codes, $($rest)*);
        codes
    }};

    // Internal accumulator - empty (base case for trailing commas)
    (@accumulate $codes:ident,) => {};

    // Internal accumulator - single code
    (@accumulate $codes:ident, $single:literal) => {
        $codes = $codes.add_single($single);
    };

    // Internal accumulator - single code followed by more
    (@accumulate $codes:ident, $single:literal, $($rest:tt)*) => {
        $codes = $codes.add_single($single);
        $crate::expected_status_codes!(@accumulate $codes, $($rest)*);
    };

    // Internal accumulator - inclusive range
    (@accumulate $codes:ident, $start:literal - $end:literal) => {
        $codes = $codes.add_inclusive_range($start..=$end);
    };

    // Internal accumulator - inclusive range followed by more
    (@accumulate $codes:ident, $start:literal - $end:literal, $($rest:tt)*) => {
        $codes = $codes.add_inclusive_range($start..=$end);
        $crate::expected_status_codes!(@accumulate $codes, $($rest)*);
    };

    // Internal accumulator - exclusive range
    (@accumulate $codes:ident, $start:literal .. $end:literal) => {
        $codes = $codes.add_exclusive_range($start..$end);
    };

    // Internal accumulator - empty (catch all for trailing cases)
    (@accumulate $codes:ident) => {};
}
