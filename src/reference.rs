//! `$ref` pointer parsing and lookup against a root document.
//!
//! Only local component pointers of exactly four segments are supported:
//! `#/<section>/<type>/<name>`, e.g. `#/components/schemas/User`. Segments
//! are taken by position; `~0`/`~1` escapes are not decoded.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::DerefError;

/// A parsed `#/<section>/<type>/<name>` pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefPointer {
    raw: String,
    section: String,
    kind: String,
    name: String,
}

impl RefPointer {
    /// Parse a `$ref` string.
    ///
    /// # Errors
    ///
    /// Returns `DerefError::UnsupportedPointer` unless the string has exactly
    /// four `/`-separated segments, the first being `#`.
    pub fn parse(pointer: &str) -> Result<Self, DerefError> {
        let segments: Vec<&str> = pointer.split('/').collect();
        match segments.as_slice() {
            ["#", section, kind, name] => Ok(Self {
                raw: pointer.to_string(),
                section: (*section).to_string(),
                kind: (*kind).to_string(),
                name: (*name).to_string(),
            }),
            _ => Err(DerefError::UnsupportedPointer {
                pointer: pointer.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RefPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Outcome of looking a pointer up in a root document.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Value),
    /// `missing` is the pointer prefix of the first level that was absent,
    /// e.g. `#/components/schemas` when the document has no `schemas` map.
    NotFound { missing: String },
}

impl<'a> Lookup<'a> {
    pub fn found(self) -> Option<&'a Value> {
        match self {
            Lookup::Found(node) => Some(node),
            Lookup::NotFound { .. } => None,
        }
    }

    /// The target, or an empty schema (`{}`) when `pointer` did not resolve.
    ///
    /// A miss is logged as a warning: the reference imposes no constraints.
    pub fn or_empty(self, pointer: &RefPointer) -> Cow<'a, Value> {
        match self {
            Lookup::Found(node) => Cow::Borrowed(node),
            Lookup::NotFound { missing } => {
                tracing::warn!(%pointer, %missing, "unresolved $ref, substituting empty schema");
                Cow::Owned(Value::Object(Map::new()))
            }
        }
    }
}

/// Look up `root[section][type][name]`, reporting which level is missing.
pub fn lookup<'a>(root: &'a Value, pointer: &RefPointer) -> Lookup<'a> {
    let mut current = root;
    let mut prefix = String::from("#");

    for segment in [pointer.section(), pointer.kind(), pointer.name()] {
        prefix.push('/');
        prefix.push_str(segment);
        match current.as_object().and_then(|map| map.get(segment)) {
            Some(next) => current = next,
            None => return Lookup::NotFound { missing: prefix },
        }
    }

    Lookup::Found(current)
}

/// Resolve a `$ref` string against `root`.
///
/// A pointer that does not resolve yields an empty schema (`{}`): the
/// reference imposes no constraints. Use [`lookup`] to tell the cases apart.
///
/// # Errors
///
/// Returns `DerefError::UnsupportedPointer` if the pointer shape is not
/// `#/<section>/<type>/<name>`.
pub fn resolve(root: &Value, pointer: &str) -> Result<Value, DerefError> {
    let pointer = RefPointer::parse(pointer)?;
    Ok(lookup(root, &pointer).or_empty(&pointer).into_owned())
}
