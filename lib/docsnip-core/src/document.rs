//! Turning completed exchanges into documentation.

use std::sync::Arc;

use tracing::debug;

use crate::client::{DocClientError, ExchangeResult};
use crate::correlation::{ConfigurationStore, REQUEST_ID_HEADER};
use crate::operation::Operation;
use crate::snippet::{self, Snippet};

/// Creates a consumer that documents an exchange under `identifier`.
///
/// The identifier names the directory the snippets are written into. The
/// configured default snippets are always rendered; additional snippets are
/// attached with [`with_snippet`](DocumentationConsumer::with_snippet):
///
/// ```rust,no_run
/// use docsnip_core::document;
/// use docsnip_core::snippet::{param, path_parameters};
///
/// # async fn example(client: docsnip_core::DocClient) -> Result<(), docsnip_core::DocClientError> {
/// client
///     .get("/{foo}/{bar}")?
///     .with_path_param("foo", 1)
///     .with_path_param("bar", 2)
///     .await?
///     .consume_with(&document("path-parameters").with_snippet(path_parameters([
///         param("foo", "Foo description"),
///         param("bar", "Bar description"),
///     ])))?;
/// # Ok(())
/// # }
/// ```
pub fn document(identifier: impl Into<String>) -> DocumentationConsumer {
    DocumentationConsumer {
        identifier: identifier.into(),
        snippets: Vec::new(),
    }
}

/// Documents completed exchanges; see [`document`].
#[derive(derive_more::Debug)]
pub struct DocumentationConsumer {
    identifier: String,
    #[debug(skip)]
    snippets: Vec<Arc<dyn Snippet>>,
}

impl DocumentationConsumer {
    /// Attaches an additional snippet to render.
    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Snippet + 'static) -> Self {
        self.snippets.push(Arc::new(snippet));
        self
    }

    /// Attaches several additional snippets to render.
    #[must_use]
    pub fn with_snippets(mut self, snippets: impl IntoIterator<Item = Arc<dyn Snippet>>) -> Self {
        self.snippets.extend(snippets);
        self
    }

    /// Documents the given exchange.
    ///
    /// Recovers the configuration deposited for the exchange's identity
    /// token (single use: a second consumer for the same exchange finds
    /// nothing), assembles the operation record, applies the configured
    /// preprocessors, and renders every effective snippet into
    /// `<output-directory>/<identifier>/`.
    pub fn consume(&self, result: &ExchangeResult) -> Result<(), DocClientError> {
        let token = result
            .request()
            .header(REQUEST_ID_HEADER)
            .unwrap_or_default();
        let configuration = ConfigurationStore::global().retrieve(&token).ok_or(
            DocClientError::MissingConfiguration {
                token: token.clone(),
            },
        )?;

        let mut operation = Operation::new(
            self.identifier.clone(),
            result.request().clone(),
            result.response().clone(),
            configuration,
        );
        // The reserved header is exchange plumbing, not part of the API being
        // documented.
        operation.request_mut().headers_mut().remove(REQUEST_ID_HEADER);

        for preprocessor in operation.configuration().preprocessors().to_vec() {
            operation = preprocessor.process(operation);
        }

        let defaults = operation.configuration().default_snippets().to_vec();
        for snippet in defaults.iter().chain(self.snippets.iter()) {
            snippet::write(snippet.as_ref(), &operation)?;
        }
        debug!(
            identifier = %self.identifier,
            snippets = defaults.len() + self.snippets.len(),
            "operation documented"
        );
        Ok(())
    }
}
