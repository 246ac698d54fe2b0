//! Instance validation against (dereferenced, tightened) schemas.

use serde_json::Value;

use crate::deref::dereference;
use crate::error::{DerefError, SchemaError, ValidateError};
use crate::strict::tighten;

/// Validate `instance` against `schema`, one readable message per violation.
///
/// An empty list means the instance is valid. Schemas are compiled as
/// Draft 4, which OpenAPI 3.0 schema objects are based on.
///
/// # Errors
///
/// Returns `ValidateError::InvalidSchema` if the schema itself does not compile.
pub fn validate(schema: &Value, instance: &Value) -> Result<Vec<String>, ValidateError> {
    Ok(validate_detailed(schema, instance)?
        .iter()
        .map(ToString::to_string)
        .collect())
}

/// Like [`validate`] but keeps the instance path apart from the message.
///
/// # Errors
///
/// Returns `ValidateError::InvalidSchema` if the schema itself does not compile.
pub fn validate_detailed(
    schema: &Value,
    instance: &Value,
) -> Result<Vec<SchemaError>, ValidateError> {
    let validator = jsonschema::options()
        .with_draft(jsonschema::Draft::Draft4)
        .build(schema)
        .map_err(|e| ValidateError::InvalidSchema {
            message: e.to_string(),
        })?;

    let errors: Vec<SchemaError> = validator
        .iter_errors(instance)
        .map(|e| SchemaError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    tracing::debug!(violations = errors.len(), "validated instance");
    Ok(errors)
}

/// Tighten `schema` and validate `instance` against it.
///
/// # Errors
///
/// Returns `ValidateError::InvalidSchema` if the schema itself does not compile.
pub fn validate_strict(schema: Value, instance: &Value) -> Result<Vec<String>, ValidateError> {
    validate(&tighten(schema), instance)
}

/// Dereference a standalone schema against itself, then tighten it.
///
/// This is the order validation needs: tightening first would make the
/// `$ref` targets carry `additionalProperties` before they are looked up.
///
/// # Errors
///
/// Returns `DerefError` if dereferencing fails.
pub fn prepare_strict(schema: &Value) -> Result<Value, DerefError> {
    Ok(tighten(dereference(schema, schema)?))
}
