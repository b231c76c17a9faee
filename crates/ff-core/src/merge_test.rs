use super::*;
use crate::field::{FieldSpec, FieldType};
use serde_json::json;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("materialized", FieldType::String),
    FieldSpec::new("tags", FieldType::StringOrList).append(),
    FieldSpec::new("quoting", FieldType::Map).update(),
];

fn dict(value: Value) -> ConfigDict {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn test_clobber_takes_incoming() {
    let merged =
        merge_field_value("x", MergeBehavior::Clobber, &json!([1, 2]), json!("new")).unwrap();
    assert_eq!(merged, json!("new"));
}

#[test]
fn test_append_concatenates_lists_in_order() {
    let merged = merge_field_value(
        "tags",
        MergeBehavior::Append,
        &json!(["a", "b"]),
        json!(["b", "c"]),
    )
    .unwrap();
    assert_eq!(merged, json!(["a", "b", "b", "c"]));
}

#[test]
fn test_append_listifies_scalars() {
    let merged =
        merge_field_value("tags", MergeBehavior::Append, &json!("a"), json!(["b"])).unwrap();
    assert_eq!(merged, json!(["a", "b"]));

    let merged =
        merge_field_value("tags", MergeBehavior::Append, &json!(["a"]), json!("b")).unwrap();
    assert_eq!(merged, json!(["a", "b"]));
}

#[test]
fn test_update_overlays_mappings() {
    let merged = merge_field_value(
        "quoting",
        MergeBehavior::Update,
        &json!({"a": 1, "b": 2}),
        json!({"b": 3, "c": 4}),
    )
    .unwrap();
    assert_eq!(merged, json!({"a": 1, "b": 3, "c": 4}));
}

#[test]
fn test_update_rejects_non_mappings() {
    let err = merge_field_value("quoting", MergeBehavior::Update, &json!([1]), json!({}))
        .unwrap_err();
    assert!(matches!(err, ConfigError::MergeType { ref field, .. } if field == "quoting"));

    let err = merge_field_value("quoting", MergeBehavior::Update, &json!({}), json!("x"))
        .unwrap_err();
    assert!(err.to_string().contains("expected dict"));
}

#[test]
fn test_extract_dict_merges_and_consumes_covered_keys() {
    let fields = FieldSet::new(&[FIELDS]);
    let src = dict(json!({
        "materialized": "view",
        "tags": ["nightly"],
        "quoting": {"database": true}
    }));
    let data = dict(json!({
        "materialized": "table",
        "tags": "finance",
        "quoting": {"schema": false},
        "colour": "blue"
    }));

    let Extraction { merged, remainder } = extract_dict(&fields, &src, data).unwrap();

    assert_eq!(
        Value::Object(merged),
        json!({
            "materialized": "table",
            "tags": ["nightly", "finance"],
            "quoting": {"database": true, "schema": false}
        })
    );
    assert_eq!(Value::Object(remainder), json!({"colour": "blue"}));
}

#[test]
fn test_extract_dict_field_missing_from_source_is_taken_verbatim() {
    let fields = FieldSet::new(&[FIELDS]);
    let src = ConfigDict::new();
    let data = dict(json!({"tags": "finance", "quoting": "not a dict"}));

    let extraction = extract_dict(&fields, &src, data).unwrap();
    assert_eq!(extraction.merged.get("tags"), Some(&json!("finance")));
    assert_eq!(extraction.merged.get("quoting"), Some(&json!("not a dict")));
    assert!(extraction.remainder.is_empty());
}

#[test]
fn test_extract_dict_only_returns_present_fields() {
    let fields = FieldSet::new(&[FIELDS]);
    let src = dict(json!({"materialized": "view"}));
    let extraction = extract_dict(&fields, &src, dict(json!({"colour": 1}))).unwrap();
    assert!(extraction.merged.is_empty());
    assert_eq!(extraction.remainder.len(), 1);
}

#[test]
fn test_extract_dict_propagates_merge_errors() {
    let fields = FieldSet::new(&[FIELDS]);
    let src = dict(json!({"quoting": {"database": true}}));
    let result = extract_dict(&fields, &src, dict(json!({"quoting": ["bad"]})));
    assert!(matches!(result, Err(ConfigError::MergeType { .. })));
}
