//! Parameter and multipart documentation snippets.

use serde_json::Value;

use crate::operation::Operation;

use super::{FieldDescriptor, ParameterDescriptor, PartDescriptor, Snippet, SnippetError};

fn code(text: &str) -> String {
    format!("`{text}`")
}

/// Documents the parameters of a templated request path.
#[derive(Debug, Clone)]
pub struct PathParametersSnippet {
    descriptors: Vec<ParameterDescriptor>,
}

/// Creates the `path-parameters` snippet from parameter descriptors.
pub fn path_parameters(
    descriptors: impl IntoIterator<Item = ParameterDescriptor>,
) -> PathParametersSnippet {
    PathParametersSnippet {
        descriptors: descriptors.into_iter().collect(),
    }
}

impl Snippet for PathParametersSnippet {
    fn name(&self) -> String {
        "path-parameters".to_string()
    }

    fn render(&self, operation: &Operation) -> Result<String, SnippetError> {
        let request = operation.request();
        let title = request
            .path_template()
            .map(str::to_owned)
            .unwrap_or_else(|| request.url().path().to_owned());
        let rows: Vec<Vec<String>> = self
            .descriptors
            .iter()
            .map(|descriptor| vec![code(&descriptor.name), descriptor.description.clone()])
            .collect();
        let format = operation.configuration().template_format();
        Ok(format.table(Some(&title), &["Parameter", "Description"], &rows))
    }
}

/// Documents the query parameters of the request.
#[derive(Debug, Clone)]
pub struct RequestParametersSnippet {
    descriptors: Vec<ParameterDescriptor>,
}

/// Creates the `request-parameters` snippet from parameter descriptors.
pub fn request_parameters(
    descriptors: impl IntoIterator<Item = ParameterDescriptor>,
) -> RequestParametersSnippet {
    RequestParametersSnippet {
        descriptors: descriptors.into_iter().collect(),
    }
}

impl Snippet for RequestParametersSnippet {
    fn name(&self) -> String {
        "request-parameters".to_string()
    }

    fn render(&self, operation: &Operation) -> Result<String, SnippetError> {
        let rows: Vec<Vec<String>> = self
            .descriptors
            .iter()
            .map(|descriptor| vec![code(&descriptor.name), descriptor.description.clone()])
            .collect();
        let format = operation.configuration().template_format();
        Ok(format.table(None, &["Parameter", "Description"], &rows))
    }
}

/// Documents the parts of a multipart request.
#[derive(Debug, Clone)]
pub struct RequestPartsSnippet {
    descriptors: Vec<PartDescriptor>,
}

/// Creates the `request-parts` snippet from part descriptors.
pub fn request_parts(descriptors: impl IntoIterator<Item = PartDescriptor>) -> RequestPartsSnippet {
    RequestPartsSnippet {
        descriptors: descriptors.into_iter().collect(),
    }
}

impl Snippet for RequestPartsSnippet {
    fn name(&self) -> String {
        "request-parts".to_string()
    }

    fn render(&self, operation: &Operation) -> Result<String, SnippetError> {
        let rows: Vec<Vec<String>> = self
            .descriptors
            .iter()
            .map(|descriptor| vec![code(&descriptor.name), descriptor.description.clone()])
            .collect();
        let format = operation.configuration().template_format();
        Ok(format.table(None, &["Part", "Description"], &rows))
    }
}

/// Documents the raw payload of one multipart part.
#[derive(Debug, Clone)]
pub struct RequestPartBodySnippet {
    part: String,
}

/// Creates the `request-part-<name>-body` snippet for the named part.
pub fn request_part_body(part: impl Into<String>) -> RequestPartBodySnippet {
    RequestPartBodySnippet { part: part.into() }
}

impl Snippet for RequestPartBodySnippet {
    fn name(&self) -> String {
        format!("request-part-{}-body", self.part)
    }

    fn render(&self, operation: &Operation) -> Result<String, SnippetError> {
        let part = operation
            .request()
            .part(&self.part)
            .ok_or_else(|| SnippetError::MissingPart {
                name: self.part.clone(),
            })?;
        let format = operation.configuration().template_format();
        Ok(format.code_block(None, true, &part.body_text()))
    }
}

/// Documents the fields of one multipart part's JSON payload.
#[derive(Debug, Clone)]
pub struct RequestPartFieldsSnippet {
    part: String,
    descriptors: Vec<FieldDescriptor>,
}

/// Creates the `request-part-<name>-fields` snippet for the named part.
pub fn request_part_fields(
    part: impl Into<String>,
    descriptors: impl IntoIterator<Item = FieldDescriptor>,
) -> RequestPartFieldsSnippet {
    RequestPartFieldsSnippet {
        part: part.into(),
        descriptors: descriptors.into_iter().collect(),
    }
}

impl Snippet for RequestPartFieldsSnippet {
    fn name(&self) -> String {
        format!("request-part-{}-fields", self.part)
    }

    fn render(&self, operation: &Operation) -> Result<String, SnippetError> {
        let part = operation
            .request()
            .part(&self.part)
            .ok_or_else(|| SnippetError::MissingPart {
                name: self.part.clone(),
            })?;
        let payload: Value = serde_json::from_slice(part.body())?;
        let rows = self
            .descriptors
            .iter()
            .map(|descriptor| {
                let field_type = resolve_type(&payload, &descriptor.path).ok_or_else(|| {
                    SnippetError::MissingField {
                        part: self.part.clone(),
                        path: descriptor.path.clone(),
                    }
                })?;
                Ok(vec![
                    code(&descriptor.path),
                    code(field_type),
                    descriptor.description.clone(),
                ])
            })
            .collect::<Result<Vec<_>, SnippetError>>()?;
        let format = operation.configuration().template_format();
        Ok(format.table(None, &["Path", "Type", "Description"], &rows))
    }
}

/// Walks a dotted path through a JSON value and names the type found there.
fn resolve_type(payload: &Value, path: &str) -> Option<&'static str> {
    let mut current = payload;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    let name = match current {
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    };
    Some(name)
}
