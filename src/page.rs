//! Form-handler model for the two-mode inspection page.
//!
//! A host web layer turns the posted form into a [`Submission`], calls
//! [`handle`], and renders the serialized [`Page`] with its template.
//! A `GET` renders [`Page::empty`].

use serde::Serialize;
use serde_json::Value;

use crate::fixtures::{fixture, DEFAULT_FIXTURE};
use crate::loader::load_document_str;
use crate::operation::{extract, list_operations};
use crate::types::{ApiPath, OperationSchemas};
use crate::validator::{prepare_strict, validate};

/// Shown when the instance in validation mode does not parse.
pub const INVALID_JSON_MESSAGE: &str =
    "Invalid JSON format. Please ensure the input is a valid JSON string.";

/// Shown when the document in browse mode does not parse.
pub const INVALID_OPENAPI_MESSAGE: &str =
    "Invalid OpenAPI JSON format. Please ensure the input is a valid JSON string.";

/// Shown when validation finds no violations.
pub const VALID_RESULT: &str = "JSON is valid!";

/// A posted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Validate `json_data` against the default response fixture.
    Validate { json_data: String },
    /// List the document's operations, and show one if selected.
    Browse {
        openapi_schema: String,
        selected_path: Option<String>,
        selected_method: Option<String>,
    },
}

impl Submission {
    /// Build a submission from raw form fields.
    ///
    /// `json_data` selects validation mode, otherwise `openapi_schema` selects
    /// browse mode. Blank selection fields count as unselected. Returns `None`
    /// when neither text field is present.
    pub fn from_form<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Option<Self> {
        let mut json_data = None;
        let mut openapi_schema = None;
        let mut selected_path = None;
        let mut selected_method = None;

        for (name, value) in fields {
            match name {
                "json_data" => json_data = Some(value.to_string()),
                "openapi_schema" => openapi_schema = Some(value.to_string()),
                "selected_path" => selected_path = non_blank(value),
                "selected_method" => selected_method = non_blank(value),
                _ => {}
            }
        }

        if let Some(json_data) = json_data {
            return Some(Submission::Validate { json_data });
        }
        openapi_schema.map(|openapi_schema| Submission::Browse {
            openapi_schema,
            selected_path,
            selected_method,
        })
    }
}

/// Everything the template needs to render the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub errors: Vec<String>,
    pub result: Option<String>,
    pub api_info: Vec<ApiPath>,
    pub selected_schema: Option<OperationSchemas>,
    pub selected_path: Option<String>,
    pub selected_method: Option<String>,
}

impl Page {
    /// The page rendered for a plain `GET`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validation mode against an explicit schema.
    ///
    /// The schema is dereferenced against itself and tightened before the
    /// instance is checked, so unknown properties are reported.
    pub fn validation(schema: &Value, json_data: &str) -> Self {
        let Ok(instance) = load_document_str(json_data) else {
            return Self::failed(INVALID_JSON_MESSAGE);
        };

        let outcome = prepare_strict(schema)
            .map_err(|e| e.to_string())
            .and_then(|strict| validate(&strict, &instance).map_err(|e| e.to_string()));

        match outcome {
            Ok(errors) if errors.is_empty() => Self {
                result: Some(VALID_RESULT.to_string()),
                ..Self::default()
            },
            Ok(errors) => Self {
                errors,
                ..Self::default()
            },
            Err(message) => Self::failed(&message),
        }
    }

    /// Browse mode: list operations, and extract one when both a path and a
    /// method are selected. Whatever was selected is echoed back.
    pub fn browse(
        openapi_schema: &str,
        selected_path: Option<&str>,
        selected_method: Option<&str>,
    ) -> Self {
        let Ok(document) = load_document_str(openapi_schema) else {
            return Self::failed(INVALID_OPENAPI_MESSAGE);
        };

        let mut page = Self {
            api_info: list_operations(&document),
            ..Self::default()
        };

        if let (Some(path), Some(method)) = (selected_path, selected_method) {
            match extract(&document, path, method) {
                Ok(schemas) => page.selected_schema = Some(schemas),
                Err(e) => page.errors.push(e.to_string()),
            }
        }
        page.selected_path = selected_path.map(str::to_string);
        page.selected_method = selected_method.map(str::to_string);

        page
    }

    fn failed(message: &str) -> Self {
        Self {
            errors: vec![message.to_string()],
            ..Self::default()
        }
    }
}

/// Handle a posted form.
pub fn handle(submission: &Submission) -> Page {
    match submission {
        Submission::Validate { json_data } => match fixture(DEFAULT_FIXTURE) {
            Some(schema) => Page::validation(&schema, json_data),
            None => Page::failed(&format!("schema fixture {DEFAULT_FIXTURE} is not available")),
        },
        Submission::Browse {
            openapi_schema,
            selected_path,
            selected_method,
        } => Page::browse(
            openapi_schema,
            selected_path.as_deref(),
            selected_method.as_deref(),
        ),
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOC: &str = r##"{
        "paths": {
            "/users": {
                "get": {
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/User" }
                                }
                            }
                        }
                    }
                },
                "post": {}
            }
        },
        "components": {
            "schemas": {
                "User": { "type": "object", "properties": { "id": { "type": "integer" } } }
            }
        }
    }"##;

    #[test]
    fn from_form_prefers_validation_mode() {
        let submission =
            Submission::from_form([("json_data", "{}"), ("openapi_schema", "{}")]).unwrap();
        assert_eq!(
            submission,
            Submission::Validate {
                json_data: "{}".into()
            }
        );
    }

    #[test]
    fn from_form_browse_with_blank_selection() {
        let submission = Submission::from_form([
            ("openapi_schema", "{}"),
            ("selected_path", "/users"),
            ("selected_method", "  "),
        ])
        .unwrap();
        assert_eq!(
            submission,
            Submission::Browse {
                openapi_schema: "{}".into(),
                selected_path: Some("/users".into()),
                selected_method: None,
            }
        );
    }

    #[test]
    fn from_form_without_text_fields() {
        assert!(Submission::from_form([("selected_path", "/users")]).is_none());
    }

    #[test]
    fn malformed_json_gives_single_error() {
        let page = handle(&Submission::Validate {
            json_data: "{invalid".into(),
        });
        assert_eq!(page.errors, [INVALID_JSON_MESSAGE]);
        assert!(page.result.is_none());
        assert!(page.api_info.is_empty());
    }

    #[test]
    fn validation_success_sets_result() {
        let schema = json!({ "type": "object", "properties": { "foo": { "type": "string" } } });
        let page = Page::validation(&schema, r#"{"foo": "x"}"#);
        assert!(page.errors.is_empty());
        assert_eq!(page.result.as_deref(), Some(VALID_RESULT));
    }

    #[test]
    fn validation_is_strict() {
        let schema = json!({ "type": "object", "properties": { "foo": { "type": "string" } } });
        let page = Page::validation(&schema, r#"{"foo": "x", "bar": 1}"#);
        assert_eq!(page.errors.len(), 1);
        assert!(page.result.is_none());
    }

    #[test]
    fn validation_against_default_fixture() {
        let page = handle(&Submission::Validate {
            json_data: r#"{
                "status": "SUCCESS",
                "message": "registered",
                "data": { "device_id": "d-1", "servergen_id": "s-1" }
            }"#
            .into(),
        });
        assert!(page.errors.is_empty(), "{:?}", page.errors);
        assert_eq!(page.result.as_deref(), Some(VALID_RESULT));

        let page = handle(&Submission::Validate {
            json_data: r#"{
                "status": "SUCCESS",
                "message": "registered",
                "data": { "device_id": "d-1", "servergen_id": "s-1", "pin": "1234" }
            }"#
            .into(),
        });
        assert_eq!(page.errors.len(), 1);
    }

    #[test]
    fn browse_lists_operations() {
        let page = Page::browse(DOC, None, None);
        assert!(page.errors.is_empty());
        assert_eq!(
            page.api_info,
            [ApiPath {
                path: "/users".into(),
                methods: vec!["get".into(), "post".into()],
            }]
        );
        assert!(page.selected_schema.is_none());
        assert!(page.selected_path.is_none());
    }

    #[test]
    fn browse_selection_is_extracted_and_echoed() {
        let page = Page::browse(DOC, Some("/users"), Some("GET"));
        let schemas = page.selected_schema.unwrap();
        assert_eq!(
            schemas.response_schema,
            Some(json!({ "type": "object", "properties": { "id": { "type": "integer" } } }))
        );
        assert!(schemas.request_schema.is_none());
        assert_eq!(page.selected_path.as_deref(), Some("/users"));
        assert_eq!(page.selected_method.as_deref(), Some("GET"));
    }

    #[test]
    fn browse_partial_selection_is_echoed() {
        let page = Page::browse(DOC, Some("/users"), None);
        assert!(page.errors.is_empty());
        assert!(page.selected_schema.is_none());
        assert_eq!(page.selected_path.as_deref(), Some("/users"));
        assert!(page.selected_method.is_none());
        assert_eq!(page.api_info.len(), 1);

        let page = Page::browse(DOC, None, Some("post"));
        assert!(page.selected_schema.is_none());
        assert!(page.selected_path.is_none());
        assert_eq!(page.selected_method.as_deref(), Some("post"));
    }

    #[test]
    fn browse_malformed_document() {
        let page = Page::browse("{invalid", Some("/users"), Some("get"));
        assert_eq!(page.errors, [INVALID_OPENAPI_MESSAGE]);
        assert!(page.api_info.is_empty());
        assert!(page.selected_path.is_none());
        assert!(page.selected_schema.is_none());
    }

    #[test]
    fn browse_deref_failure_is_reported() {
        let doc = r##"{
            "paths": { "/a": { "get": { "responses": { "200": { "content": {
                "application/json": { "schema": { "$ref": "#/components/schemas/A" } }
            } } } } } },
            "components": { "schemas": { "A": { "$ref": "#/components/schemas/A" } } }
        }"##;
        let page = Page::browse(doc, Some("/a"), Some("get"));
        assert_eq!(page.errors.len(), 1);
        assert!(page.errors[0].contains("cyclic"));
        assert!(page.selected_schema.is_none());
    }

    #[test]
    fn empty_page_serializes_all_fields() {
        let value = serde_json::to_value(Page::empty()).unwrap();
        assert_eq!(
            value,
            json!({
                "errors": [],
                "result": null,
                "api_info": [],
                "selected_schema": null,
                "selected_path": null,
                "selected_method": null
            })
        );
    }
}
