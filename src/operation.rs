//! Operation lookup in an OpenAPI document.

use serde_json::Value;

use crate::deref::Dereferencer;
use crate::error::DerefError;
use crate::types::{
    ApiPath, OperationKey, OperationSchemas, HTTP_METHODS, JSON_MEDIA_TYPE, SUCCESS_STATUS,
};

/// Extract the dereferenced request and `200` response JSON schemas of
/// `paths.<path>.<method>`.
///
/// The method is matched case-insensitively. A missing path or method, or an
/// operation without a JSON request body or `200` JSON response, yields
/// `None` on that side rather than an error. Only status `200` is inspected.
///
/// # Errors
///
/// Returns `DerefError` if dereferencing either schema fails.
pub fn extract(document: &Value, path: &str, method: &str) -> Result<OperationSchemas, DerefError> {
    extract_with(
        &Dereferencer::new(),
        document,
        &OperationKey::new(path, method),
    )
}

/// [`extract`] with an explicit dereferencer and pre-normalized key.
///
/// # Errors
///
/// Returns `DerefError` if dereferencing either schema fails.
pub fn extract_with(
    dereferencer: &Dereferencer,
    document: &Value,
    key: &OperationKey,
) -> Result<OperationSchemas, DerefError> {
    let Some(operation) = find_operation(document, key) else {
        tracing::debug!(path = %key.path, method = %key.method, "operation not found");
        return Ok(OperationSchemas::default());
    };

    let request = operation.get("requestBody").and_then(json_schema_of);
    let response = operation
        .get("responses")
        .and_then(|responses| responses.get(SUCCESS_STATUS))
        .and_then(json_schema_of);

    Ok(OperationSchemas {
        request_schema: request
            .map(|schema| dereferencer.dereference(document, schema))
            .transpose()?,
        response_schema: response
            .map(|schema| dereferencer.dereference(document, schema))
            .transpose()?,
    })
}

/// List every path in the document with the HTTP methods it declares.
///
/// Paths and methods keep document order. Path-item keys that are not HTTP
/// methods (`parameters`, `summary`, `servers`, ...) are skipped.
pub fn list_operations(document: &Value) -> Vec<ApiPath> {
    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        return Vec::new();
    };

    paths
        .iter()
        .map(|(path, item)| ApiPath {
            path: path.clone(),
            methods: item
                .as_object()
                .map(|item| {
                    item.keys()
                        .filter(|key| HTTP_METHODS.contains(&key.as_str()))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

fn find_operation<'a>(document: &'a Value, key: &OperationKey) -> Option<&'a Value> {
    document
        .get("paths")?
        .get(key.path.as_str())?
        .get(key.method.as_str())
}

/// `<node>.content["application/json"].schema`
fn json_schema_of(node: &Value) -> Option<&Value> {
    node.get("content")?.get(JSON_MEDIA_TYPE)?.get("schema")
}
