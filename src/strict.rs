//! Closed-object tightening: `additionalProperties: false` on object schemas.

use serde_json::Value;

/// Set `additionalProperties: false` on every `"type": "object"` node that
/// does not already declare `additionalProperties`.
///
/// Takes the schema by value and returns the tightened tree, so a shared
/// schema is never altered behind its other holders. Clone first to keep the
/// original. Applying it twice gives the same result as applying it once.
///
/// Run this after dereferencing: `$ref` targets are looked up in the
/// untightened root.
pub fn tighten(mut schema: Value) -> Value {
    tighten_in_place(&mut schema);
    schema
}

/// In-place form of [`tighten`] for callers that own the tree outright.
///
/// Recurses into every value of every mapping and every sequence element,
/// whatever the key, so combinator branches, `properties`, `items` and
/// nested definitions are all covered. An existing `additionalProperties`
/// (including `true` or a schema) is left untouched.
pub fn tighten_in_place(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            let is_object_type = map.get("type").and_then(Value::as_str) == Some("object");
            if is_object_type && !map.contains_key("additionalProperties") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            for child in map.values_mut() {
                tighten_in_place(child);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                tighten_in_place(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn adds_false_to_object_type() {
        let schema = tighten(json!({
            "type": "object",
            "properties": { "foo": { "type": "string" } }
        }));
        assert_eq!(schema["additionalProperties"], json!(false));
        assert!(schema["properties"]["foo"].get("additionalProperties").is_none());
    }

    #[test]
    fn preserves_existing_value() {
        let schema = tighten(json!({
            "type": "object",
            "additionalProperties": true
        }));
        assert_eq!(schema["additionalProperties"], json!(true));

        let schema = tighten(json!({
            "type": "object",
            "additionalProperties": { "type": "string" }
        }));
        assert_eq!(schema["additionalProperties"], json!({ "type": "string" }));
    }

    #[test]
    fn recurses_through_additional_properties_schema() {
        let schema = tighten(json!({
            "type": "object",
            "additionalProperties": { "type": "object" }
        }));
        assert_eq!(
            schema["additionalProperties"],
            json!({ "type": "object", "additionalProperties": false })
        );
    }

    #[test]
    fn untyped_properties_node_is_left_open() {
        // Only an explicit "type": "object" triggers the injection.
        let schema = tighten(json!({ "properties": { "a": { "type": "string" } } }));
        assert!(schema.get("additionalProperties").is_none());
    }

    #[test]
    fn walks_combinators_and_arrays() {
        let schema = tighten(json!({
            "anyOf": [
                { "type": "object" },
                { "type": "array", "items": { "type": "object" } }
            ],
            "not": { "type": "object" }
        }));
        assert_eq!(schema["anyOf"][0]["additionalProperties"], json!(false));
        assert_eq!(schema["anyOf"][1]["items"]["additionalProperties"], json!(false));
        assert!(schema["anyOf"][1].get("additionalProperties").is_none());
        assert_eq!(schema["not"]["additionalProperties"], json!(false));
    }

    #[test]
    fn walks_under_any_key() {
        let schema = tighten(json!({
            "x-custom": { "nested": [{ "type": "object" }] }
        }));
        assert_eq!(
            schema["x-custom"]["nested"][0]["additionalProperties"],
            json!(false)
        );
    }

    #[test]
    fn idempotent() {
        let original = json!({
            "type": "object",
            "properties": {
                "a": { "type": "object", "properties": { "b": { "type": "integer" } } },
                "c": { "type": "array", "items": { "type": "object" } }
            }
        });
        let once = tighten(original);
        let twice = tighten(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn scalars_unchanged() {
        assert_eq!(tighten(json!("object")), json!("object"));
        assert_eq!(tighten(json!(null)), json!(null));
    }

    #[test]
    fn in_place_mutates_argument() {
        let mut schema = json!({ "type": "object" });
        tighten_in_place(&mut schema);
        assert_eq!(schema, json!({ "type": "object", "additionalProperties": false }));
    }
}
