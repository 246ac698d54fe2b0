//! OpenAPI operation inspection.
//!
//! Dereferences the request and response schemas of an OpenAPI operation
//! into a self-contained JSON Schema tree, and validates JSON instances
//! against schemas with closed-object (`additionalProperties: false`)
//! semantics.
//!
//! # Example
//!
//! ```
//! use oas_inspect::extract;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "paths": {
//!         "/users": {
//!             "get": {
//!                 "responses": {
//!                     "200": {
//!                         "content": {
//!                             "application/json": {
//!                                 "schema": { "$ref": "#/components/schemas/User" }
//!                             }
//!                         }
//!                     }
//!                 }
//!             }
//!         }
//!     },
//!     "components": {
//!         "schemas": {
//!             "User": { "type": "object", "properties": { "id": { "type": "integer" } } }
//!         }
//!     }
//! });
//!
//! let schemas = extract(&doc, "/users", "get").unwrap();
//! assert_eq!(schemas.response_schema.unwrap()["properties"]["id"]["type"], "integer");
//! assert!(schemas.request_schema.is_none());
//! ```
//!
//! # Dereferencing Rules
//!
//! | Node | Result |
//! |------|--------|
//! | `{"$ref": "#/s/t/n"}` | target at `root.s.t.n`, dereferenced; siblings ignored |
//! | `{"oneOf": [A, ...]}` | `A`, dereferenced |
//! | `{"allOf": [A, ...]}` | `A`, dereferenced (no merge) |
//! | `{"anyOf": [A, B]}` | `{"anyOf": [A', B']}` |
//! | `{"not": S}` | `{"not": S'}` |
//!
//! A reference whose target is missing becomes `{}`. Reference cycles are
//! reported as [`DerefError::CyclicReference`].
//!
//! # Strict Validation
//!
//! ```
//! use oas_inspect::{tighten, validate};
//! use serde_json::json;
//!
//! let schema = tighten(json!({
//!     "type": "object",
//!     "properties": { "foo": { "type": "string" } }
//! }));
//!
//! let errors = validate(&schema, &json!({ "foo": "x", "bar": 1 })).unwrap();
//! assert_eq!(errors.len(), 1);
//! ```

mod audit;
mod deref;
mod error;
mod fixtures;
mod loader;
mod operation;
mod page;
mod reference;
mod strict;
mod types;
mod validator;

pub use audit::{audit_refs, has_errors, Diagnostic, Severity};
pub use deref::{dereference, Dereferencer};
pub use error::{DerefError, LoadError, SchemaError, ValidateError};
pub use fixtures::{fixture, fixture_names, DEFAULT_FIXTURE};
pub use loader::{is_url, load_document, load_document_auto, load_document_str};
pub use operation::{extract, extract_with, list_operations};
pub use page::{
    handle, Page, Submission, INVALID_JSON_MESSAGE, INVALID_OPENAPI_MESSAGE, VALID_RESULT,
};
pub use reference::{lookup, resolve, Lookup, RefPointer};
pub use strict::{tighten, tighten_in_place};
pub use types::{json_type_name, ApiPath, OperationKey, OperationSchemas};
pub use validator::{prepare_strict, validate, validate_detailed, validate_strict};

#[cfg(feature = "remote")]
pub use loader::load_document_url;
