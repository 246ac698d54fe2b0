//! Static `$ref` audit - reports references that dereferencing would reject
//! or silently replace with an empty schema.

use serde::Serialize;
use serde_json::Value;

use crate::reference::{lookup, Lookup, RefPointer};
use crate::types::json_type_name;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding about one `$ref` node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    /// JSON pointer to the node carrying the `$ref` (e.g. "/paths/~1users/get").
    pub path: String,
    pub message: String,
}

/// Walk the whole document and report every problematic `$ref`.
///
/// - `unsupported-pointer` (error): not a string, or not `#/<section>/<type>/<name>`
/// - `unresolved-ref` (warning): well-formed but the target is missing
///
/// Diagnostics come out in document order.
pub fn audit_refs(document: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    walk(document, document, "", &mut diagnostics);
    diagnostics
}

/// True if any diagnostic is an error.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}

fn walk(root: &Value, value: &Value, path: &str, diagnostics: &mut Vec<Diagnostic>) {
    match value {
        Value::Object(map) => {
            // A $ref node is a leaf: its siblings are never dereferenced.
            if let Some(reference) = map.get("$ref") {
                if let Some(diagnostic) = check_ref(root, reference, path) {
                    diagnostics.push(diagnostic);
                }
                return;
            }
            for (key, child) in map {
                let child_path = format!("{}/{}", path, escape(key));
                walk(root, child, &child_path, diagnostics);
            }
        }
        Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                walk(root, item, &format!("{}/{}", path, i), diagnostics);
            }
        }
        _ => {}
    }
}

fn check_ref(root: &Value, reference: &Value, path: &str) -> Option<Diagnostic> {
    let Some(raw) = reference.as_str() else {
        return Some(Diagnostic {
            severity: Severity::Error,
            code: "unsupported-pointer".to_string(),
            path: path.to_string(),
            message: format!("$ref must be a string, got {}", json_type_name(reference)),
        });
    };

    let pointer = match RefPointer::parse(raw) {
        Ok(pointer) => pointer,
        Err(e) => {
            return Some(Diagnostic {
                severity: Severity::Error,
                code: "unsupported-pointer".to_string(),
                path: path.to_string(),
                message: e.to_string(),
            })
        }
    };

    match lookup(root, &pointer) {
        Lookup::Found(_) => None,
        Lookup::NotFound { missing } => Some(Diagnostic {
            severity: Severity::Warning,
            code: "unresolved-ref".to_string(),
            path: path.to_string(),
            message: format!("{raw} does not resolve: nothing at {missing}"),
        }),
    }
}

/// RFC 6901 escaping for a single path segment.
fn escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
