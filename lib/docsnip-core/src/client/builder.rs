use std::sync::Arc;

use http::Uri;

use super::{DocClient, DocClientError, ExchangeFilter};

/// Builder for [`DocClient`] instances.
///
/// ```rust
/// use docsnip_core::{DocClient, DocContext};
///
/// # fn example() -> Result<(), docsnip_core::DocClientError> {
/// let docs = DocContext::new("target/generated-snippets");
/// let client = DocClient::builder()
///     .with_host("api.example.com")
///     .with_filter(docs.configurer())
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(derive_more::Debug, Default)]
pub struct DocClientBuilder {
    scheme: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    base_uri: Option<Uri>,
    #[debug(skip)]
    filters: Vec<Arc<dyn ExchangeFilter>>,
}

impl DocClientBuilder {
    /// Sets the scheme (default `http`).
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the host (default `localhost`).
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the port (default: none, the scheme's default port).
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the complete base URI, overriding scheme/host/port.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: Uri) -> Self {
        self.base_uri = Some(base_uri);
        self
    }

    /// Appends a request filter; filters run in installation order.
    #[must_use]
    pub fn with_filter(mut self, filter: impl ExchangeFilter) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<DocClient, DocClientError> {
        let Self {
            scheme,
            host,
            port,
            base_uri,
            filters,
        } = self;

        let base_uri = match base_uri {
            Some(base_uri) => base_uri,
            None => {
                let scheme = scheme.unwrap_or_else(|| "http".to_string());
                let host = host.unwrap_or_else(|| "localhost".to_string());
                let authority = match port {
                    Some(port) => format!("{host}:{port}"),
                    None => host,
                };
                format!("{scheme}://{authority}").parse::<Uri>()?
            }
        };

        Ok(DocClient {
            client: reqwest::Client::new(),
            base_uri,
            filters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_uri() {
        let client = DocClientBuilder::default().build().expect("built");
        assert_eq!(client.base_uri.to_string(), "http://localhost/");
    }

    #[test]
    fn test_host_and_port() {
        let client = DocClientBuilder::default()
            .with_scheme("https")
            .with_host("api.example.com")
            .with_port(8443)
            .build()
            .expect("built");
        assert_eq!(client.base_uri.to_string(), "https://api.example.com:8443/");
    }

    #[test]
    fn test_explicit_base_uri_wins() {
        let client = DocClientBuilder::default()
            .with_host("ignored")
            .with_base_uri("http://127.0.0.1:3000".parse().expect("valid uri"))
            .build()
            .expect("built");
        assert_eq!(client.base_uri.to_string(), "http://127.0.0.1:3000/");
    }
}
