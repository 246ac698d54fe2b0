//! Schema dereferencing - substitutes `$ref` targets and collapses combinators.
//!
//! Policy per mapping node, first match wins:
//!
//! | Node carries | Result |
//! |--------------|--------|
//! | `$ref` | dereferenced target; sibling keys are ignored |
//! | `oneOf` | dereferenced first alternative only |
//! | `allOf` | dereferenced first member only, no merge |
//! | anything else | same keys, every value dereferenced |
//!
//! `anyOf` and `not` fall into the last row, so every `anyOf` branch is kept
//! in order and the `not` schema is dereferenced in place.

use serde_json::{Map, Value};

use crate::error::DerefError;
use crate::reference::{lookup, Lookup, RefPointer};
use crate::types::json_type_name;

/// Configurable schema dereferencer.
///
/// The default policy substitutes `{}` for references that do not resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dereferencer {
    deny_unresolved: bool,
}

impl Dereferencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `DerefError::UnresolvedReference` instead of substituting `{}`.
    pub fn deny_unresolved(mut self, deny: bool) -> Self {
        self.deny_unresolved = deny;
        self
    }

    /// Dereference `schema`, looking every pointer up in `root`.
    ///
    /// `root` is only read; `schema` may be a fragment of it or a separate tree.
    ///
    /// # Errors
    ///
    /// Returns `DerefError` on a pointer of unsupported shape, a non-string
    /// `$ref`, a reference cycle, or (when denied) an unresolved reference.
    pub fn dereference(&self, root: &Value, schema: &Value) -> Result<Value, DerefError> {
        let mut walk = Walk {
            root,
            deny_unresolved: self.deny_unresolved,
            active: Vec::new(),
        };
        walk.value(schema, "")
    }
}

/// Dereference `schema` against `root` with the default policy.
///
/// # Errors
///
/// See [`Dereferencer::dereference`].
pub fn dereference(root: &Value, schema: &Value) -> Result<Value, DerefError> {
    Dereferencer::new().dereference(root, schema)
}

// --- Internal implementation ---

struct Walk<'a> {
    root: &'a Value,
    deny_unresolved: bool,
    /// Pointers currently being expanded, outermost first.
    active: Vec<String>,
}

impl Walk<'_> {
    fn value(&mut self, value: &Value, path: &str) -> Result<Value, DerefError> {
        match value {
            Value::Object(map) => self.object(map, path),
            Value::Array(arr) => self.array(arr, path),
            // Primitives pass through unchanged
            other => Ok(other.clone()),
        }
    }

    fn object(&mut self, map: &Map<String, Value>, path: &str) -> Result<Value, DerefError> {
        if let Some(reference) = map.get("$ref") {
            return self.reference(reference, path);
        }

        for combinator in ["oneOf", "allOf"] {
            if let Some(first) = map
                .get(combinator)
                .and_then(Value::as_array)
                .and_then(|branches| branches.first())
            {
                return self.value(first, &format!("{}/{}/0", path, combinator));
            }
        }

        let mut result = Map::new();
        for (key, value) in map {
            let child_path = format!("{}/{}", path, key);
            result.insert(key.clone(), self.value(value, &child_path)?);
        }
        Ok(Value::Object(result))
    }

    fn array(&mut self, arr: &[Value], path: &str) -> Result<Value, DerefError> {
        let mut result = Vec::with_capacity(arr.len());
        for (i, item) in arr.iter().enumerate() {
            let item_path = format!("{}/{}", path, i);
            result.push(self.value(item, &item_path)?);
        }
        Ok(Value::Array(result))
    }

    fn reference(&mut self, reference: &Value, path: &str) -> Result<Value, DerefError> {
        let Some(raw) = reference.as_str() else {
            return Err(DerefError::InvalidRefType {
                path: format!("{}/$ref", path),
                actual: json_type_name(reference).to_string(),
            });
        };
        let pointer = RefPointer::parse(raw)?;

        if self.active.iter().any(|p| p == raw) {
            let mut chain = self.active.clone();
            chain.push(raw.to_string());
            return Err(DerefError::CyclicReference {
                pointer: raw.to_string(),
                chain,
            });
        }

        let target = match lookup(self.root, &pointer) {
            Lookup::NotFound { missing } if self.deny_unresolved => {
                return Err(DerefError::UnresolvedReference {
                    pointer: raw.to_string(),
                    missing,
                });
            }
            outcome => outcome.or_empty(&pointer),
        };

        tracing::debug!(%pointer, at = path, "resolved $ref");
        self.active.push(raw.to_string());
        // Errors inside the target are reported at the target's own location.
        let resolved = self.value(&target, raw.trim_start_matches('#'));
        self.active.pop();
        resolved
    }
}
