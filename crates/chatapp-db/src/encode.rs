use bson::{Bson, Document};
use chatapp_types::epoch::epoch_seconds;
use serde_json::{Map, Number, Value};

/// Render a stored document as JSON for the wire.
///
/// Date-times become epoch seconds; anything JSON cannot express natively
/// (object ids, binary, decimals, regexes, non-finite doubles...) becomes its
/// string form.
pub fn document_to_json(document: &Document) -> Value {
    let fields: Map<String, Value> = document
        .iter()
        .map(|(key, value)| (key.clone(), bson_to_json(value)))
        .collect();
    Value::Object(fields)
}

pub fn bson_to_json(value: &Bson) -> Value {
    match value {
        Bson::Null => Value::Null,
        Bson::Boolean(b) => Value::Bool(*b),
        Bson::Int32(n) => Value::from(*n),
        Bson::Int64(n) => Value::from(*n),
        Bson::Double(f) => match Number::from_f64(*f) {
            Some(n) => Value::Number(n),
            None => Value::String(f.to_string()),
        },
        Bson::String(s) => Value::String(s.clone()),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_json).collect()),
        Bson::Document(document) => document_to_json(document),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(at) => epoch_to_json(epoch_seconds(at.to_chrono().naive_utc())),
        other => Value::String(other.to_string()),
    }
}

fn epoch_to_json(seconds: f64) -> Value {
    Number::from_f64(seconds)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(seconds.to_string()))
}
