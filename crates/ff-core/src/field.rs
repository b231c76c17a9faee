//! Static field tables for config records.
//!
//! Each record type declares its fields once, in declaration order, as a
//! [`FieldSet`]. The table carries the wire name, the value shape used to
//! build the record's JSON schema, and the field's [`FieldPolicies`]. Nothing
//! here is inferred from values at runtime.

use crate::hook::hook_schema;
use crate::policy::FieldPolicies;
use crate::severity::severity_pattern;
use serde_json::{json, Map, Value};

/// Value shape of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Bool,
    String,
    /// Arbitrary string-keyed mapping
    Map,
    /// A single string or a list of strings
    StringOrList,
    /// List of hook entries (bare SQL strings or hook mappings)
    Hooks,
    /// Case-insensitive `warn` / `error`
    Severity,
    /// The literal `all` or a list of column names
    CheckCols,
    /// A string restricted to exactly one value
    Strategy(&'static str),
}

impl FieldType {
    /// JSON schema fragment for this shape
    pub fn json_schema(&self) -> Value {
        match self {
            FieldType::Bool => json!({"type": "boolean"}),
            FieldType::String => json!({"type": "string"}),
            FieldType::Map => json!({"type": "object"}),
            FieldType::StringOrList => json!({
                "anyOf": [
                    {"type": "string"},
                    {"type": "array", "items": {"type": "string"}}
                ]
            }),
            FieldType::Hooks => json!({"type": "array", "items": hook_schema()}),
            FieldType::Severity => json!({"type": "string", "pattern": severity_pattern()}),
            FieldType::CheckCols => json!({
                "anyOf": [
                    {"type": "string", "enum": ["all"]},
                    {"type": "array", "items": {"type": "string"}}
                ]
            }),
            FieldType::Strategy(value) => json!({"type": "string", "enum": [value]}),
        }
    }
}

/// One declared field of a config record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name on the wire and in serialized dicts
    pub name: &'static str,
    /// Rust-side identifier; differs from `name` only for hyphenated keys
    pub ident: &'static str,
    pub ty: FieldType,
    /// Accepts null
    pub nullable: bool,
    /// Must be present for the record to validate
    pub required: bool,
    pub policies: FieldPolicies,
}

impl FieldSpec {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ident: name,
            ty,
            nullable: false,
            required: false,
            policies: FieldPolicies::DEFAULT,
        }
    }

    /// Use a different internal identifier than the wire name
    pub const fn with_ident(self, ident: &'static str) -> Self {
        Self { ident, ..self }
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn append(self) -> Self {
        Self {
            policies: self.policies.append(),
            ..self
        }
    }

    pub const fn update(self) -> Self {
        Self {
            policies: self.policies.update(),
            ..self
        }
    }

    pub const fn hide(self) -> Self {
        Self {
            policies: self.policies.hide(),
            ..self
        }
    }

    pub const fn exclude(self) -> Self {
        Self {
            policies: self.policies.exclude(),
            ..self
        }
    }

    /// True when `key` is this field's wire name or internal identifier
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.ident == key
    }

    /// JSON schema fragment for this field, including nullability
    pub fn json_schema(&self) -> Value {
        let schema = self.ty.json_schema();
        if self.nullable {
            json!({"anyOf": [schema, {"type": "null"}]})
        } else {
            schema
        }
    }
}

/// Ordered field table of a record type.
///
/// A specialization lists its base's group first and its own fields after,
/// so iteration yields base fields before the ones the specialization adds.
#[derive(Debug, Clone, Copy)]
pub struct FieldSet {
    groups: &'static [&'static [FieldSpec]],
}

impl FieldSet {
    /// A field set with no declared fields
    pub const EMPTY: FieldSet = FieldSet { groups: &[] };

    pub const fn new(groups: &'static [&'static [FieldSpec]]) -> Self {
        Self { groups }
    }

    /// Iterate declared fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &'static FieldSpec> {
        let groups = self.groups;
        groups.iter().flat_map(|group| group.iter())
    }

    /// Find a field by wire name or internal identifier
    pub fn find(&self, key: &str) -> Option<&'static FieldSpec> {
        self.iter().find(|field| field.matches(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wire names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.iter().map(|field| field.name)
    }

    /// Object schema for a record with these fields. Unknown keys are allowed;
    /// they land in the record's extra bucket.
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in self.iter() {
            properties.insert(field.name.to_string(), field.json_schema());
            if field.required {
                required.push(Value::String(field.name.to_string()));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        schema.insert("additionalProperties".to_string(), Value::Bool(true));
        Value::Object(schema)
    }
}

#[cfg(test)]
#[path = "field_test.rs"]
mod tests;
