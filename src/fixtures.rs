//! Named response schemas bundled with the crate.
//!
//! The JSON sources live in `schemas/` and are compiled into the binary.
//! They are parsed once on first access; every caller gets its own copy,
//! so tightening a fixture never leaks into the next request.

use std::sync::OnceLock;

use serde_json::Value;

/// Fixture used by the validation form.
pub const DEFAULT_FIXTURE: &str = "register_response_schema";

const SOURCES: &[(&str, &str)] = &[
    (
        "register_response_schema",
        include_str!("../schemas/register_response.json"),
    ),
    (
        "check_device_status_response_schema",
        include_str!("../schemas/check_device_status_response.json"),
    ),
    (
        "reverify_servergen_id_response_schema",
        include_str!("../schemas/reverify_servergen_id_response.json"),
    ),
    (
        "user_bank_account_list_response_schema",
        include_str!("../schemas/user_bank_account_list_response.json"),
    ),
    (
        "check_vpa_response_schema",
        include_str!("../schemas/check_vpa_response.json"),
    ),
];

fn parsed() -> &'static [(&'static str, Value)] {
    static PARSED: OnceLock<Vec<(&'static str, Value)>> = OnceLock::new();
    PARSED.get_or_init(|| parse_sources(SOURCES))
}

/// Parse `(name, json)` pairs, dropping any entry that is not valid JSON.
fn parse_sources(sources: &[(&'static str, &str)]) -> Vec<(&'static str, Value)> {
    sources
        .iter()
        .filter_map(|(name, source)| match serde_json::from_str::<Value>(source) {
            Ok(schema) => Some((*name, schema)),
            Err(e) => {
                tracing::error!(fixture = *name, error = %e, "skipping unparseable fixture");
                None
            }
        })
        .collect()
}

/// Names of all available fixtures, in a stable order.
pub fn fixture_names() -> impl Iterator<Item = &'static str> {
    parsed().iter().map(|(name, _)| *name)
}

/// A fresh copy of the named fixture, or `None` if there is no such fixture.
pub fn fixture(name: &str) -> Option<Value> {
    parsed()
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, schema)| schema.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strict::tighten_in_place;

    #[test]
    fn every_fixture_parses_as_object_schema() {
        for name in fixture_names() {
            let schema = fixture(name).unwrap();
            assert_eq!(schema["type"], "object", "{name}");
        }
    }

    #[test]
    fn every_fixture_compiles() {
        for name in fixture_names() {
            let schema = fixture(name).unwrap();
            assert!(
                crate::validate(&schema, &serde_json::json!({})).is_ok(),
                "{name}"
            );
        }
    }

    #[test]
    fn default_fixture_exists() {
        assert!(fixture(DEFAULT_FIXTURE).is_some());
        assert_eq!(fixture_names().count(), 5);
    }

    #[test]
    fn unparseable_source_is_skipped() {
        let parsed = parse_sources(&[
            ("good", r#"{"type": "object"}"#),
            ("broken", r#"{"type": "#),
            ("also_good", r#"{"type": "string"}"#),
        ]);
        let names: Vec<_> = parsed.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["good", "also_good"]);
        assert_eq!(parsed[1].1["type"], "string");
    }

    #[test]
    fn unknown_fixture_is_none() {
        assert!(fixture("login_response_schema").is_none());
    }

    #[test]
    fn copies_are_independent() {
        let mut first = fixture(DEFAULT_FIXTURE).unwrap();
        tighten_in_place(&mut first);
        let second = fixture(DEFAULT_FIXTURE).unwrap();
        assert!(second.get("additionalProperties").is_none());
    }
}
