use indexmap::IndexMap;

use super::DocClientError;

/// Query parameters for a request, kept in insertion order.
///
/// ```rust
/// use docsnip_core::CallQuery;
///
/// let query = CallQuery::new()
///     .add_param("a", "alpha")
///     .add_param("b", "bravo");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallQuery {
    params: IndexMap<String, String>,
}

impl CallQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn add_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Whether any parameter has been added.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encodes the parameters as a query string, without the leading `?`.
    pub(super) fn to_query_string(&self) -> Result<String, DocClientError> {
        let pairs: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        Ok(serde_urlencoded::to_string(pairs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        assert!(CallQuery::new().is_empty());
        assert_eq!(CallQuery::new().to_query_string().expect("encoded"), "");
    }

    #[test]
    fn test_query_string_preserves_order() {
        let query = CallQuery::new().add_param("b", "bravo").add_param("a", 1);
        assert_eq!(query.to_query_string().expect("encoded"), "b=bravo&a=1");
    }

    #[test]
    fn test_query_string_encodes_reserved_characters() {
        let query = CallQuery::new().add_param("q", "a b&c");
        assert_eq!(query.to_query_string().expect("encoded"), "q=a+b%26c");
    }
}
