//! Core types shared across the dereferencer, extractor, and page model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP method keys recognised under a path item, in OpenAPI order.
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Media type whose schema is extracted from request bodies and responses.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// The only response status inspected by the extractor.
pub const SUCCESS_STATUS: &str = "200";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Identifies one operation under `paths.<path>.<method>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationKey {
    pub path: String,
    /// Normalized to lowercase.
    pub method: String,
}

impl OperationKey {
    /// Method is normalized to lowercase so `GET` and `get` address the same entry.
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into().to_lowercase(),
        }
    }
}

/// Dereferenced request and response schemas of a single operation.
///
/// Either side is `None` when the document declares no JSON schema for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationSchemas {
    pub request_schema: Option<Value>,
    pub response_schema: Option<Value>,
}

/// One entry of the path listing shown next to the browse form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPath {
    pub path: String,
    pub methods: Vec<String>,
}
