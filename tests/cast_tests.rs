use brrtrouter_cast::cast::{
    cast_value, cast_values, CastDeclaration, CastType, InputRecord, TagPolicy, ARRAY, BOOLEAN,
    INTEGER, STRING,
};
use serde_json::{json, Value};

mod common;
use common::record;

const ALL_TYPES: [CastType; 4] = [CastType::Int, CastType::String, CastType::Array, CastType::Boolean];

#[test]
fn test_end_to_end_request_scenario() {
    let decl = CastDeclaration::from_pairs(
        [
            ("name", STRING),
            ("tags", ARRAY),
            ("active", BOOLEAN),
            ("count", INTEGER),
        ],
        TagPolicy::Strict,
    )
    .unwrap();
    let mut input = record(json!({"name": 123, "tags": "x", "active": "0", "count": "7"}));

    cast_values(&mut input, &decl);

    assert_eq!(
        Value::Object(input),
        json!({"name": "123", "tags": ["x"], "active": false, "count": 7})
    );
}

#[test]
fn test_end_to_end_with_spelled_out_aliases() {
    let decl = CastDeclaration::from_pairs(
        [("name", "string"), ("tags", "array"), ("active", "boolean"), ("count", "integer")],
        TagPolicy::Strict,
    )
    .unwrap();
    let mut input = record(json!({"name": 123, "tags": "x", "active": "0", "count": "7"}));
    cast_values(&mut input, &decl);
    assert_eq!(input.get("count"), Some(&json!(7)));
    assert_eq!(input.get("active"), Some(&json!(false)));
}

#[test]
fn test_null_propagates_through_every_type() {
    for ty in ALL_TYPES {
        let decl = CastDeclaration::new().field("f", ty);
        let mut input = record(json!({"f": null}));
        cast_values(&mut input, &decl);
        assert_eq!(input.get("f"), Some(&Value::Null), "type {ty}");
    }
}

#[test]
fn test_absent_field_is_created_as_null() {
    for ty in ALL_TYPES {
        let decl = CastDeclaration::new().field("age", ty);
        let mut input = record(json!({}));
        cast_values(&mut input, &decl);
        assert!(input.has("age"), "type {ty}");
        assert_eq!(input.get("age"), Some(&Value::Null), "type {ty}");
    }
}

#[test]
fn test_reapplying_declaration_is_idempotent() {
    let decl = CastDeclaration::new()
        .field("n", CastType::Int)
        .field("b", CastType::Boolean)
        .field("s", CastType::String)
        .field("a", CastType::Array)
        .field("missing", CastType::Int);
    let mut input = record(json!({"n": "12.5kg", "b": "no", "s": 4.25, "a": {"x": 1}}));

    cast_values(&mut input, &decl);
    let once = input.clone();
    cast_values(&mut input, &decl);

    assert_eq!(input, once);
    assert_eq!(
        Value::Object(once),
        json!({"n": 12, "b": true, "s": "4.25", "a": [1], "missing": null})
    );
}

#[test]
fn test_structured_values_never_stringify() {
    let decl = CastDeclaration::new()
        .field("list", CastType::String)
        .field("obj", CastType::String)
        .field("empty", CastType::String);
    let mut input = record(json!({"list": ["a", "b"], "obj": {"k": "v"}, "empty": []}));
    cast_values(&mut input, &decl);
    assert_eq!(
        Value::Object(input),
        json!({"list": null, "obj": null, "empty": null})
    );
}

#[test]
fn test_boolean_truthiness() {
    let cases = [
        (json!("0"), false),
        (json!("0.0"), true),
        (json!(1), true),
        (json!(0), false),
        (json!([]), false),
        (json!([0]), true),
        (json!(""), false),
        (json!("off"), true),
    ];
    for (value, expected) in cases {
        assert_eq!(
            cast_value(CastType::Boolean, value.clone()),
            json!(expected),
            "truthiness of {value}"
        );
    }
}

#[test]
fn test_integer_parsing() {
    assert_eq!(cast_value(CastType::Int, json!("42abc")), json!(42));
    assert_eq!(cast_value(CastType::Int, json!("abc")), json!(0));
    assert_eq!(cast_value(CastType::Int, json!(true)), json!(1));
    assert_eq!(cast_value(CastType::Int, json!(false)), json!(0));
    assert_eq!(cast_value(CastType::Int, json!(" 10 ")), json!(10));
}

#[test]
fn test_floats_stringify_with_14_significant_digits() {
    let decl = CastDeclaration::new()
        .field("sum", CastType::String)
        .field("third", CastType::String)
        .field("big", CastType::String)
        .field("whole", CastType::String);
    let mut input = record(json!({"sum": 0.1 + 0.2, "third": 1.0 / 3.0, "big": 1e14, "whole": 7.0}));

    cast_values(&mut input, &decl);

    assert_eq!(
        Value::Object(input),
        json!({"sum": "0.3", "third": "0.33333333333333", "big": "1.0E+14", "whole": "7"})
    );
}

#[test]
fn test_array_wrapping() {
    assert_eq!(cast_value(CastType::Array, json!(5)), json!([5]));
    assert_eq!(cast_value(CastType::Array, Value::Null), Value::Null);
    assert_eq!(cast_value(CastType::Array, json!(["a"])), json!(["a"]));
    assert_eq!(
        cast_value(CastType::Array, json!({"first": "a", "second": "b"})),
        json!(["a", "b"])
    );
}

#[test]
fn test_unknown_tag_falls_back_to_string_when_lenient() {
    let map = record(json!({"age": "integr", "tags": "array"}));
    let decl = CastDeclaration::from_map(&map, TagPolicy::Lenient).unwrap();
    let mut input = record(json!({"age": 30, "tags": "solo"}));
    cast_values(&mut input, &decl);
    assert_eq!(input.get("age"), Some(&json!("30")));
    assert_eq!(input.get("tags"), Some(&json!(["solo"])));
}

#[test]
fn test_unknown_tag_rejected_when_strict() {
    let map = record(json!({"age": "integr"}));
    let err = CastDeclaration::from_map(&map, TagPolicy::Strict).unwrap_err();
    assert!(err.to_string().contains("Unknown cast type 'integr' for field 'age'"));
}

#[test]
fn test_declaration_order_does_not_change_outcome() {
    let forward = CastDeclaration::new()
        .field("a", CastType::Int)
        .field("b", CastType::Boolean);
    let backward = CastDeclaration::new()
        .field("b", CastType::Boolean)
        .field("a", CastType::Int);
    let mut left = record(json!({"a": "1", "b": "1"}));
    let mut right = left.clone();
    cast_values(&mut left, &forward);
    cast_values(&mut right, &backward);
    assert_eq!(Value::Object(left), Value::Object(right));
}
