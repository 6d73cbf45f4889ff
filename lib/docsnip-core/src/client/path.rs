use std::sync::LazyLock;

use indexmap::IndexMap;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

use super::DocClientError;

/// Regular expression for matching path parameters in the format `{param_name}`.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w+)}").expect("a valid regex"));

fn encode_path_param_value(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// A parameterized HTTP path with named parameter substitution.
///
/// Templates use `{parameter_name}` placeholders. The template and its
/// bindings are kept alongside the resolved path so the documented operation
/// can report which template a request was built from.
///
/// ```rust
/// use docsnip_core::CallPath;
///
/// let path = CallPath::from("/{foo}/{bar}")
///     .add_param("foo", "1")
///     .add_param("bar", "2");
/// // Resolves to /1/2, remembering the template and both bindings.
/// ```
#[derive(Debug, Clone, Default, derive_more::Display)]
#[display("{path}")]
pub struct CallPath {
    pub(super) path: String,
    args: IndexMap<String, String>,
}

impl CallPath {
    /// Binds a path parameter. The rendered value is percent-encoded when the
    /// path is resolved.
    #[must_use]
    pub fn add_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.args.insert(name.into(), value.to_string());
        self
    }

    /// Whether the path contains `{...}` placeholders.
    pub(super) fn is_templated(&self) -> bool {
        RE.is_match(&self.path)
    }

    /// The bound parameter values, in binding order.
    pub(super) fn args(&self) -> &IndexMap<String, String> {
        &self.args
    }

    /// Substitutes every placeholder, failing when any is left unbound.
    pub(super) fn resolve(&self) -> Result<String, DocClientError> {
        let mut resolved = self.path.clone();
        for (name, value) in &self.args {
            let pattern = ["{", name, "}"].concat();
            resolved = resolved.replace(&pattern, &encode_path_param_value(value));
        }

        let missings: Vec<String> = RE
            .captures_iter(&resolved)
            .map(|capture| capture["name"].to_string())
            .collect();
        if missings.is_empty() {
            Ok(resolved)
        } else {
            Err(DocClientError::PathUnresolved {
                path: self.path.clone(),
                missings,
            })
        }
    }
}

impl From<&str> for CallPath {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<String> for CallPath {
    fn from(value: String) -> Self {
        Self {
            path: value,
            args: IndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_path() {
        let path = CallPath::from("/users");
        assert_eq!(path.resolve().expect("resolved"), "/users");
        assert!(!path.is_templated());
    }

    #[test]
    fn test_resolve_substitutes_parameters() {
        let path = CallPath::from("/{foo}/{bar}")
            .add_param("foo", 1)
            .add_param("bar", 2);
        assert_eq!(path.resolve().expect("resolved"), "/1/2");
        assert!(path.is_templated());
    }

    #[test]
    fn test_resolve_percent_encodes_values() {
        let path = CallPath::from("/search/{term}").add_param("term", "a b/c");
        assert_eq!(path.resolve().expect("resolved"), "/search/a%20b%2Fc");
    }

    #[test]
    fn test_resolve_reports_missing_parameters() {
        let path = CallPath::from("/{foo}/{bar}").add_param("foo", 1);
        let error = path.resolve().expect_err("unresolved");
        let DocClientError::PathUnresolved { path, missings } = error else {
            panic!("expected PathUnresolved, got {error:?}");
        };
        assert_eq!(path, "/{foo}/{bar}");
        assert_eq!(missings, vec!["bar".to_string()]);
    }

    #[test]
    fn test_duplicate_placeholders_share_one_binding() {
        let path = CallPath::from("/test/{id}/{id}").add_param("id", 123);
        assert_eq!(path.resolve().expect("resolved"), "/test/123/123");
    }
}
