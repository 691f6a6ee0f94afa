//! Walks nested field specifications such as
//! `[1, 2, {"a": ["1", {"b": ["1", "2"]}]}]` and reports every mapping key.
//!
//! Scalars are skipped. A key's value is walked again when it is a sequence;
//! a mapping value is walked as a one-element sequence.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

/// Keys from the outermost mapping down to a discovered key.
pub type FieldPath = Vec<String>;

/// Every key reachable from `fields`, depth-first in document order.
pub fn validate(fields: &[Value]) -> Vec<FieldPath> {
    let mut found = Vec::new();
    let mut prefix = Vec::new();
    walk(fields, &mut prefix, &mut found);
    found
}

/// The distinct key names, ignoring where they were found.
pub fn field_keys(fields: &[Value]) -> BTreeSet<String> {
    validate(fields)
        .into_iter()
        .filter_map(|mut path| path.pop())
        .collect()
}

fn walk(fields: &[Value], prefix: &mut Vec<String>, found: &mut Vec<FieldPath>) {
    for field in fields {
        let Value::Object(mapping) = field else {
            continue;
        };

        for (key, value) in mapping {
            debug!("field {}", key);
            prefix.push(key.clone());
            found.push(prefix.clone());

            match value {
                Value::Array(nested) => walk(nested, prefix, found),
                Value::Object(_) => walk(std::slice::from_ref(value), prefix, found),
                _ => {}
            }

            prefix.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(fields: Value) -> Vec<String> {
        let Value::Array(fields) = fields else {
            panic!("fields must be a sequence");
        };
        validate(&fields).iter().map(|p| p.join(".")).collect()
    }

    #[test]
    fn scalars_only_yield_nothing() {
        assert!(paths(json!([1, "two", 3.0, null, true])).is_empty());
    }

    #[test]
    fn walks_nested_sequences() {
        let found = paths(json!([1, 2, 3, {"a": ["1", "2", "3", {"b": ["1", "2", "3"]}]}]));
        assert_eq!(found, vec!["a", "a.b"]);
    }

    #[test]
    fn mapping_values_are_walked_too() {
        let found = paths(json!([{"a": {"b": [{"c": 1}]}}]));
        assert_eq!(found, vec!["a", "a.b", "a.b.c"]);
    }

    #[test]
    fn keeps_document_order_across_siblings() {
        let found = paths(json!([{"z": [], "a": [{"m": []}]}, {"b": "leaf"}]));
        assert_eq!(found, vec!["z", "a", "a.m", "b"]);
    }

    #[test]
    fn flat_keys_are_deduplicated() {
        let fields = json!([{"a": [{"id": 1}]}, {"b": [{"id": 2}]}]);
        let keys = field_keys(fields.as_array().unwrap());
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "id"]);
    }
}
