use apilot_schema::to_example;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

// ── Precedence ──

#[test]
fn explicit_example_wins() {
    let schema = json!({"type": "string", "example": "live-value"});
    assert_eq!(to_example(&schema), json!("live-value"));
}

#[test]
fn example_wins_over_enum_and_format() {
    let schema = json!({
        "type": "string",
        "format": "email",
        "enum": ["x", "y"],
        "example": "chosen"
    });
    assert_eq!(to_example(&schema), json!("chosen"));
}

#[test]
fn ref_becomes_marker_string() {
    let schema = json!({"$ref": "#/components/schemas/Pet"});
    assert_eq!(to_example(&schema), json!("<#/components/schemas/Pet>"));
}

// ── Scalars ──

#[test]
fn string_default() {
    assert_eq!(to_example(&json!({"type": "string"})), json!("string"));
}

#[test]
fn string_enum_takes_first_member() {
    let schema = json!({"type": "string", "enum": ["x", "y"]});
    assert_eq!(to_example(&schema), json!("x"));
}

#[test]
fn string_formats_have_fixed_samples() {
    let cases = [
        ("date", "2024-01-01"),
        ("date-time", "2024-01-01T00:00:00Z"),
        ("email", "user@example.com"),
        ("uri", "https://example.com"),
        ("uuid", "00000000-0000-0000-0000-000000000000"),
    ];
    for (format, expected) in cases {
        let schema = json!({"type": "string", "format": format});
        assert_eq!(to_example(&schema), json!(expected), "format {format}");
    }
}

#[test]
fn integer_and_number_default_to_zero() {
    assert_eq!(to_example(&json!({"type": "integer"})), json!(0));
    assert_eq!(to_example(&json!({"type": "number"})), json!(0));
}

#[test]
fn numeric_enum_takes_first_member() {
    let schema = json!({"type": "integer", "enum": [5, 7]});
    assert_eq!(to_example(&schema), json!(5));
}

#[test]
fn boolean_defaults_to_true() {
    assert_eq!(to_example(&json!({"type": "boolean"})), json!(true));
}

#[test]
fn unknown_or_missing_type_yields_null() {
    assert_eq!(to_example(&json!({"type": "frobnicate"})), Value::Null);
    assert_eq!(to_example(&json!({})), Value::Null);
    assert_eq!(to_example(&json!(true)), Value::Null);
}

// ── Compounds ──

#[test]
fn object_recurses_over_properties() {
    let schema = json!({
        "type": "object",
        "properties": {
            "a": {"type": "string"},
            "b": {"type": "integer"}
        }
    });
    assert_eq!(to_example(&schema), json!({"a": "string", "b": 0}));
}

#[test]
fn object_preserves_property_order() {
    let schema = json!({
        "type": "object",
        "properties": {
            "zulu": {"type": "string"},
            "alpha": {"type": "integer"},
            "mike": {"type": "boolean"}
        }
    });
    let example = to_example(&schema);
    let keys: Vec<&String> = example.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["zulu", "alpha", "mike"]);
}

#[test]
fn object_without_properties_is_empty() {
    assert_eq!(to_example(&json!({"type": "object"})), json!({}));
}

#[test]
fn array_is_single_element_from_items() {
    let schema = json!({"type": "array", "items": {"type": "string"}});
    assert_eq!(to_example(&schema), json!(["string"]));
}

#[test]
fn array_without_items_holds_null() {
    assert_eq!(to_example(&json!({"type": "array"})), json!([null]));
}

#[test]
fn nested_structures_recurse() {
    let schema = json!({
        "type": "object",
        "properties": {
            "user": {
                "type": "object",
                "properties": {
                    "email": {"type": "string", "format": "email"},
                    "tags": {"type": "array", "items": {"type": "string"}}
                }
            }
        }
    });
    assert_eq!(
        to_example(&schema),
        json!({"user": {"email": "user@example.com", "tags": ["string"]}})
    );
}

// ── Depth Guard ──

#[test]
fn deeply_nested_schema_terminates_with_null_leaf() {
    let mut schema = json!({"type": "string"});
    for _ in 0..100 {
        schema = json!({"type": "object", "properties": {"child": schema}});
    }

    let mut value = to_example(&schema);
    let mut depth = 0;
    while let Some(child) = value.as_object().and_then(|o| o.get("child")) {
        value = child.clone();
        depth += 1;
    }
    assert_eq!(value, Value::Null);
    assert!(depth <= 33, "guard must cut recursion, walked {depth} levels");
}

#[test]
fn array_nesting_is_also_bounded() {
    let mut schema = json!({"type": "string"});
    for _ in 0..100 {
        schema = json!({"type": "array", "items": schema});
    }

    let mut value = to_example(&schema);
    let mut depth = 0;
    while let Some(item) = value.as_array().and_then(|a| a.first()) {
        value = item.clone();
        depth += 1;
    }
    assert_eq!(value, Value::Null);
    assert!(depth <= 33);
}
