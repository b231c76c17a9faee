use super::*;
use crate::policy::{CompareBehavior, MergeBehavior, ShowBehavior};

const BASE: &[FieldSpec] = &[
    FieldSpec::new("enabled", FieldType::Bool),
    FieldSpec::new("post-hook", FieldType::Hooks)
        .with_ident("post_hook")
        .append(),
];

const EXTENSION: &[FieldSpec] = &[
    FieldSpec::new("alias", FieldType::String)
        .nullable()
        .exclude(),
    FieldSpec::new("unique_key", FieldType::String).required(),
];

const FIELDS: FieldSet = FieldSet::new(&[BASE, EXTENSION]);

#[test]
fn test_field_set_iterates_in_declaration_order() {
    let names: Vec<&str> = FIELDS.names().collect();
    assert_eq!(names, vec!["enabled", "post-hook", "alias", "unique_key"]);
    assert_eq!(FIELDS.len(), 4);
    assert!(!FIELDS.is_empty());
    assert!(FieldSet::EMPTY.is_empty());
}

#[test]
fn test_find_by_wire_name_or_ident() {
    let by_name = FIELDS.find("post-hook").unwrap();
    let by_ident = FIELDS.find("post_hook").unwrap();
    assert_eq!(by_name, by_ident);
    assert_eq!(by_name.policies.merge, MergeBehavior::Append);
    assert!(FIELDS.find("materialized").is_none());
}

#[test]
fn test_untagged_field_resolves_to_defaults() {
    let enabled = FIELDS.find("enabled").unwrap();
    assert_eq!(enabled.policies.merge, MergeBehavior::Clobber);
    assert_eq!(enabled.policies.show, ShowBehavior::Show);
    assert_eq!(enabled.policies.compare, CompareBehavior::Include);
}

#[test]
fn test_json_schema_lists_properties_and_required() {
    let schema = FIELDS.json_schema();
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["additionalProperties"], true);
    assert_eq!(schema["required"], serde_json::json!(["unique_key"]));
    assert_eq!(schema["properties"]["enabled"], serde_json::json!({"type": "boolean"}));
    assert_eq!(
        schema["properties"]["alias"],
        serde_json::json!({"anyOf": [{"type": "string"}, {"type": "null"}]})
    );
}

#[test]
fn test_json_schema_omits_empty_required() {
    let schema = FieldSet::new(&[BASE]).json_schema();
    assert!(schema.get("required").is_none());
}

#[test]
fn test_strategy_schema_restricts_value() {
    let schema = FieldType::Strategy("check").json_schema();
    assert_eq!(schema, serde_json::json!({"type": "string", "enum": ["check"]}));
}

#[test]
fn test_declared_field_schemas_constrain_values() {
    use crate::config::{NodeConfig, SeedConfig, SourceConfig, TestConfig};
    use crate::record::ConfigRecord;
    use crate::snapshot::{CheckSnapshotConfig, GenericSnapshotConfig, TimestampSnapshotConfig};

    let sets = [
        SourceConfig::FIELDS,
        NodeConfig::FIELDS,
        SeedConfig::FIELDS,
        TestConfig::FIELDS,
        TimestampSnapshotConfig::FIELDS,
        CheckSnapshotConfig::FIELDS,
        GenericSnapshotConfig::FIELDS,
    ];
    for set in sets {
        for field in set.iter() {
            let schema = field.ty.json_schema();
            assert!(
                schema.get("type").is_some() || schema.get("anyOf").is_some(),
                "{} has an open schema: {schema}",
                field.name
            );
        }
    }
}
