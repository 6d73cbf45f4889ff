use headers::ContentType;
use serde::Serialize;

use crate::operation::OperationPart;

use super::DocClientError;

/// The body of an outbound request: its content type and raw bytes, plus the
/// individual parts when the body is multipart.
#[derive(Clone, derive_more::Debug)]
pub struct CallBody {
    pub(super) content_type: ContentType,
    #[debug(ignore)]
    pub(super) data: Vec<u8>,
    pub(super) parts: Vec<MultipartPart>,
}

impl CallBody {
    /// Creates a JSON body from a serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, DocClientError> {
        let data = serde_json::to_vec(value)?;
        Ok(Self {
            content_type: ContentType::json(),
            data,
            parts: Vec::new(),
        })
    }

    /// Creates a plain text body.
    pub fn text(text: &str) -> Self {
        Self::raw(text.as_bytes().to_vec(), ContentType::text())
    }

    /// Creates a raw body with an explicit content type.
    pub fn raw(data: Vec<u8>, content_type: ContentType) -> Self {
        Self {
            content_type,
            data,
            parts: Vec::new(),
        }
    }

    /// Encodes a multipart form, keeping the part list for documentation.
    pub fn multipart(form: MultipartForm) -> Self {
        let boundary = format!("----docsnip-{}", uuid::Uuid::new_v4());

        let mut data = Vec::new();
        for part in &form.parts {
            data.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            data.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
            );
            if let Some(content_type) = &part.content_type {
                data.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
            }
            data.extend_from_slice(b"\r\n");
            data.extend_from_slice(&part.data);
            data.extend_from_slice(b"\r\n");
        }
        data.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let mime = format!("multipart/form-data; boundary={boundary}")
            .parse::<mime::Mime>()
            .expect("a valid multipart mime type");
        Self {
            content_type: ContentType::from(mime),
            data,
            parts: form.parts,
        }
    }
}

/// A multipart form under construction.
///
/// ```rust
/// use docsnip_core::MultipartForm;
///
/// # fn example() -> Result<(), docsnip_core::DocClientError> {
/// let form = MultipartForm::new()
///     .add_text("a", "alpha")
///     .add_json("b", &serde_json::json!({"c": "charlie"}))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<MultipartPart>,
}

impl MultipartForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text part without a content type.
    #[must_use]
    pub fn add_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            content_type: None,
            data: value.into().into_bytes(),
        });
        self
    }

    /// Appends a JSON part from a serializable value.
    pub fn add_json<T: Serialize>(
        mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self, DocClientError> {
        self.parts.push(MultipartPart {
            name: name.into(),
            content_type: Some(ContentType::json()),
            data: serde_json::to_vec(value)?,
        });
        Ok(self)
    }

    /// Appends a part with explicit content.
    #[must_use]
    pub fn add_part(mut self, part: MultipartPart) -> Self {
        self.parts.push(part);
        self
    }
}

/// One part of a [`MultipartForm`].
#[derive(Clone, derive_more::Debug)]
pub struct MultipartPart {
    pub(super) name: String,
    pub(super) content_type: Option<ContentType>,
    #[debug(ignore)]
    pub(super) data: Vec<u8>,
}

impl MultipartPart {
    /// Creates a part with a name, content, and content type.
    pub fn new(name: impl Into<String>, data: Vec<u8>, content_type: ContentType) -> Self {
        Self {
            name: name.into(),
            content_type: Some(content_type),
            data,
        }
    }

    pub(crate) fn to_operation_part(&self) -> OperationPart {
        let mut headers = http::HeaderMap::new();
        if let Some(content_type) = &self.content_type
            && let Ok(value) = content_type.to_string().parse()
        {
            headers.insert(http::header::CONTENT_TYPE, value);
        }
        OperationPart {
            name: self.name.clone(),
            headers,
            body: self.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body() {
        let body = CallBody::json(&serde_json::json!({"a": 1})).expect("serialized");
        assert_eq!(body.data, b"{\"a\":1}");
        assert_eq!(body.content_type, ContentType::json());
        assert!(body.parts.is_empty());
    }

    #[test]
    fn test_multipart_encoding_contains_all_parts() {
        let form = MultipartForm::new()
            .add_text("a", "alpha")
            .add_json("b", &serde_json::json!({"c": "charlie"}))
            .expect("serialized");
        let body = CallBody::multipart(form);
        let encoded = String::from_utf8(body.data.clone()).expect("utf-8");

        assert!(encoded.contains("Content-Disposition: form-data; name=\"a\"\r\n\r\nalpha\r\n"));
        assert!(encoded.contains("Content-Disposition: form-data; name=\"b\"\r\n"));
        assert!(encoded.contains("Content-Type: application/json\r\n\r\n{\"c\":\"charlie\"}\r\n"));
        assert!(encoded.ends_with("--\r\n"));
        assert_eq!(body.parts.len(), 2);
    }

    #[test]
    fn test_multipart_part_to_operation_part() {
        let part = MultipartPart::new("b", b"{}".to_vec(), ContentType::json());
        let operation_part = part.to_operation_part();
        assert_eq!(operation_part.name(), "b");
        assert_eq!(
            operation_part.headers().get(http::header::CONTENT_TYPE),
            Some(&http::HeaderValue::from_static("application/json"))
        );
    }
}
