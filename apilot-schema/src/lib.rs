//! JSON Schema example generation.
//!
//! Builds a representative example value from a JSON Schema fragment, used by
//! the request builder to prefill request bodies. Pure structural recursion:
//! no I/O, no `$ref` resolution (references render as marker strings), and a
//! depth guard so self-referential schemas terminate.

use serde_json::{Map, Value};

/// Nesting depth past which generation yields `null` instead of recursing.
/// Bounds self-referential or adversarially deep schemas.
const MAX_DEPTH: usize = 32;

/// Produces an example value for a schema fragment.
///
/// Precedence: an explicit `example` wins; `$ref` becomes a `"<ref>"` marker
/// string; otherwise the declared `type` drives generation, with `enum` and
/// `format` refining the sample. Unknown or missing types yield `null`.
/// Object properties keep their declared order.
pub fn to_example(schema: &Value) -> Value {
    example_at(schema, 0)
}

fn example_at(schema: &Value, depth: usize) -> Value {
    if depth >= MAX_DEPTH {
        return Value::Null;
    }
    let Some(obj) = schema.as_object() else {
        return Value::Null;
    };

    if let Some(example) = obj.get("example") {
        return example.clone();
    }

    if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
        return Value::String(format!("<{reference}>"));
    }

    match obj.get("type").and_then(Value::as_str) {
        Some("object") => object_example(obj, depth),
        Some("array") => array_example(obj, depth),
        Some("string") => string_example(obj),
        Some("number") | Some("integer") => enum_first(obj).unwrap_or(Value::from(0)),
        Some("boolean") => Value::Bool(true),
        _ => Value::Null,
    }
}

fn object_example(obj: &Map<String, Value>, depth: usize) -> Value {
    let mut out = Map::new();
    if let Some(properties) = obj.get("properties").and_then(Value::as_object) {
        for (name, property) in properties {
            out.insert(name.clone(), example_at(property, depth + 1));
        }
    }
    Value::Object(out)
}

/// A single-element sequence from the item schema.
fn array_example(obj: &Map<String, Value>, depth: usize) -> Value {
    let item = obj
        .get("items")
        .map_or(Value::Null, |items| example_at(items, depth + 1));
    Value::Array(vec![item])
}

fn string_example(obj: &Map<String, Value>) -> Value {
    if let Some(first) = enum_first(obj) {
        return first;
    }
    let sample = match obj.get("format").and_then(Value::as_str) {
        Some("date") => "2024-01-01",
        Some("date-time") => "2024-01-01T00:00:00Z",
        Some("email") => "user@example.com",
        Some("uri") | Some("url") => "https://example.com",
        Some("uuid") => "00000000-0000-0000-0000-000000000000",
        _ => "string",
    };
    Value::String(sample.to_string())
}

fn enum_first(obj: &Map<String, Value>) -> Option<Value> {
    obj.get("enum")
        .and_then(Value::as_array)
        .and_then(|members| members.first())
        .cloned()
}
