//! Snapshot config records and the strategy-tagged variant union.
//!
//! A snapshot config starts out as [`EmptySnapshotConfig`] while project
//! layers are applied, must carry a unique key and target schema once it is
//! a [`SnapshotConfig`], and finally resolves to one [`SnapshotVariant`]
//! selected by its `strategy` key: `timestamp`, `check`, or any other
//! strategy name, which resolves to the generic shape.

use crate::config::{NodeConfig, NODE_FIELDS};
use crate::error::{ConfigError, ConfigResult};
use crate::field::{FieldSet, FieldSpec, FieldType};
use crate::record::{ConfigDict, ConfigRecord};
use crate::validation::{check, StructuralValidator};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

const SNAPSHOT_OVERRIDES: &[(&str, &str)] = &[("materialized", "snapshot")];

const SNAPSHOT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("unique_key", FieldType::String).required(),
    FieldSpec::new("target_schema", FieldType::String).required(),
    FieldSpec::new("target_database", FieldType::String).nullable(),
];

const TIMESTAMP_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("strategy", FieldType::Strategy("timestamp")).required(),
    FieldSpec::new("updated_at", FieldType::String).required(),
];

const CHECK_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("strategy", FieldType::Strategy("check")).required(),
    FieldSpec::new("check_cols", FieldType::CheckCols).required(),
];

const GENERIC_FIELDS: &[FieldSpec] = &[FieldSpec::new("strategy", FieldType::String).required()];

/// Strategy for detecting changes in snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotStrategy {
    /// Detect changes using a timestamp column
    Timestamp,
    /// Detect changes by comparing specific columns
    Check,
}

impl SnapshotStrategy {
    pub const ALL: [SnapshotStrategy; 2] = [SnapshotStrategy::Timestamp, SnapshotStrategy::Check];

    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotStrategy::Timestamp => "timestamp",
            SnapshotStrategy::Check => "check",
        }
    }

    /// The strategy named by `value`, matched exactly
    pub fn from_tag(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for SnapshotStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Columns the check strategy compares: every column, or a named list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckCols {
    All,
    Columns(Vec<String>),
}

impl Serialize for CheckCols {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CheckCols::All => serializer.serialize_str("all"),
            CheckCols::Columns(columns) => columns.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for CheckCols {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Sentinel(String),
            Columns(Vec<String>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Sentinel(s) if s == "all" => Ok(CheckCols::All),
            Raw::Sentinel(s) => Err(serde::de::Error::custom(format!(
                "check_cols must be \"all\" or a list of columns, got \"{s}\""
            ))),
            Raw::Columns(columns) => Ok(CheckCols::Columns(columns)),
        }
    }
}

/// Snapshot config with no mandatory keys, used while layering project
/// defaults onto a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptySnapshotConfig {
    #[serde(flatten)]
    pub node: NodeConfig,
}

impl Default for EmptySnapshotConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::materialized_as("snapshot"),
        }
    }
}

impl ConfigRecord for EmptySnapshotConfig {
    const FIELDS: FieldSet = FieldSet::new(&[NODE_FIELDS]);
    const DEFAULT_OVERRIDES: &'static [(&'static str, &'static str)] = SNAPSHOT_OVERRIDES;

    fn extra(&self) -> &ConfigDict {
        &self.node.extra
    }

    fn extra_mut(&mut self) -> &mut ConfigDict {
        &mut self.node.extra
    }

    fn unchecked(&self) -> &ConfigDict {
        &self.node.unchecked
    }

    fn unchecked_mut(&mut self) -> &mut ConfigDict {
        &mut self.node.unchecked
    }
}

/// Snapshot config with its identity keys in place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(flatten)]
    pub node: NodeConfig,

    /// Column that uniquely identifies a record
    pub unique_key: String,

    pub target_schema: String,

    #[serde(default)]
    pub target_database: Option<String>,
}

impl SnapshotConfig {
    pub fn new(unique_key: impl Into<String>, target_schema: impl Into<String>) -> Self {
        Self {
            node: NodeConfig::materialized_as("snapshot"),
            unique_key: unique_key.into(),
            target_schema: target_schema.into(),
            target_database: None,
        }
    }
}

impl ConfigRecord for SnapshotConfig {
    const FIELDS: FieldSet = FieldSet::new(&[NODE_FIELDS, SNAPSHOT_FIELDS]);
    const DEFAULT_OVERRIDES: &'static [(&'static str, &'static str)] = SNAPSHOT_OVERRIDES;

    fn extra(&self) -> &ConfigDict {
        &self.node.extra
    }

    fn extra_mut(&mut self) -> &mut ConfigDict {
        &mut self.node.extra
    }

    fn unchecked(&self) -> &ConfigDict {
        &self.node.unchecked
    }

    fn unchecked_mut(&mut self) -> &mut ConfigDict {
        &mut self.node.unchecked
    }
}

/// Snapshot tracked through an `updated_at` column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampSnapshotConfig {
    #[serde(flatten)]
    pub snapshot: SnapshotConfig,

    pub strategy: SnapshotStrategy,

    pub updated_at: String,
}

impl ConfigRecord for TimestampSnapshotConfig {
    const FIELDS: FieldSet = FieldSet::new(&[NODE_FIELDS, SNAPSHOT_FIELDS, TIMESTAMP_FIELDS]);
    const DEFAULT_OVERRIDES: &'static [(&'static str, &'static str)] = SNAPSHOT_OVERRIDES;

    fn extra(&self) -> &ConfigDict {
        &self.snapshot.node.extra
    }

    fn extra_mut(&mut self) -> &mut ConfigDict {
        &mut self.snapshot.node.extra
    }

    fn unchecked(&self) -> &ConfigDict {
        &self.snapshot.node.unchecked
    }

    fn unchecked_mut(&mut self) -> &mut ConfigDict {
        &mut self.snapshot.node.unchecked
    }
}

/// Snapshot tracked by diffing a set of columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSnapshotConfig {
    #[serde(flatten)]
    pub snapshot: SnapshotConfig,

    pub strategy: SnapshotStrategy,

    pub check_cols: CheckCols,
}

impl ConfigRecord for CheckSnapshotConfig {
    const FIELDS: FieldSet = FieldSet::new(&[NODE_FIELDS, SNAPSHOT_FIELDS, CHECK_FIELDS]);
    const DEFAULT_OVERRIDES: &'static [(&'static str, &'static str)] = SNAPSHOT_OVERRIDES;

    fn extra(&self) -> &ConfigDict {
        &self.snapshot.node.extra
    }

    fn extra_mut(&mut self) -> &mut ConfigDict {
        &mut self.snapshot.node.extra
    }

    fn unchecked(&self) -> &ConfigDict {
        &self.snapshot.node.unchecked
    }

    fn unchecked_mut(&mut self) -> &mut ConfigDict {
        &mut self.snapshot.node.unchecked
    }
}

/// Snapshot using a strategy other than `timestamp` or `check`, such as a
/// project-defined one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericSnapshotConfig {
    #[serde(flatten)]
    pub snapshot: SnapshotConfig,

    pub strategy: String,
}

impl ConfigRecord for GenericSnapshotConfig {
    const FIELDS: FieldSet = FieldSet::new(&[NODE_FIELDS, SNAPSHOT_FIELDS, GENERIC_FIELDS]);
    const DEFAULT_OVERRIDES: &'static [(&'static str, &'static str)] = SNAPSHOT_OVERRIDES;

    fn extra(&self) -> &ConfigDict {
        &self.snapshot.node.extra
    }

    fn extra_mut(&mut self) -> &mut ConfigDict {
        &mut self.snapshot.node.extra
    }

    fn unchecked(&self) -> &ConfigDict {
        &self.snapshot.node.unchecked
    }

    fn unchecked_mut(&mut self) -> &mut ConfigDict {
        &mut self.snapshot.node.unchecked
    }

    fn json_schema() -> Value {
        generic_snapshot_schema()
    }
}

/// A fully resolved snapshot config
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SnapshotVariant {
    Timestamp(TimestampSnapshotConfig),
    Check(CheckSnapshotConfig),
    Generic(GenericSnapshotConfig),
}

impl SnapshotVariant {
    /// Strategy name the variant was selected by
    pub fn strategy(&self) -> &str {
        match self {
            SnapshotVariant::Timestamp(_) => SnapshotStrategy::Timestamp.as_str(),
            SnapshotVariant::Check(_) => SnapshotStrategy::Check.as_str(),
            SnapshotVariant::Generic(config) => &config.strategy,
        }
    }

    /// Keys shared by every strategy
    pub fn snapshot(&self) -> &SnapshotConfig {
        match self {
            SnapshotVariant::Timestamp(config) => &config.snapshot,
            SnapshotVariant::Check(config) => &config.snapshot,
            SnapshotVariant::Generic(config) => &config.snapshot,
        }
    }

    pub fn to_dict(&self, omit_none: bool, omit_hidden: bool) -> ConfigResult<ConfigDict> {
        match self {
            SnapshotVariant::Timestamp(config) => config.to_dict(omit_none, omit_hidden),
            SnapshotVariant::Check(config) => config.to_dict(omit_none, omit_hidden),
            SnapshotVariant::Generic(config) => config.to_dict(omit_none, omit_hidden),
        }
    }
}

/// Schema accepting any strategy other than the specialized ones
fn generic_snapshot_schema() -> Value {
    let mut schema = GenericSnapshotConfig::FIELDS.json_schema();
    let not_specialized: Vec<Value> = SnapshotStrategy::ALL
        .iter()
        .map(|strategy| json!({"not": {"enum": [strategy.as_str()]}}))
        .collect();

    if let Some(Value::Object(properties)) = schema.get_mut("properties") {
        let mut all_of = vec![json!({"type": "string"})];
        all_of.extend(not_specialized);
        properties.insert("strategy".to_string(), json!({"allOf": all_of}));
    }
    schema
}

fn wrap_config_schema(config_schema: Value) -> Value {
    json!({
        "type": "object",
        "required": ["config"],
        "properties": {"config": config_schema}
    })
}

/// Schema of a `{config: ...}` snapshot document across every variant
pub fn snapshot_document_schema() -> Value {
    wrap_config_schema(json!({
        "anyOf": [
            TimestampSnapshotConfig::json_schema(),
            CheckSnapshotConfig::json_schema(),
            GenericSnapshotConfig::json_schema(),
        ]
    }))
}

fn resolve_variant<C: ConfigRecord>(
    validator: &dyn StructuralValidator,
    document: &Value,
) -> ConfigResult<C> {
    check(validator, &wrap_config_schema(C::json_schema()), document)?;
    config_record(document)
}

fn config_record<C: ConfigRecord>(document: &Value) -> ConfigResult<C> {
    match document.get("config") {
        Some(Value::Object(config)) => C::from_dict(config.clone()),
        _ => Err(ConfigError::Validation {
            path: "config".to_string(),
            message: "snapshot config must be a mapping".to_string(),
        }),
    }
}

/// Resolve a `{config: ...}` document to its snapshot variant.
///
/// The `strategy` tag picks the schema: `timestamp` and `check` are checked
/// against their own variant only, so a missing `updated_at` is reported as
/// such rather than as a strategy mismatch. Anything else is checked against
/// the full union and, when it passes, resolves to the generic variant.
pub fn validate_snapshot_document(
    validator: &dyn StructuralValidator,
    document: &Value,
) -> ConfigResult<SnapshotVariant> {
    let tag = document
        .get("config")
        .and_then(|config| config.get("strategy"))
        .and_then(Value::as_str);

    log::debug!("Resolving snapshot config with strategy {:?}", tag);

    match tag.and_then(SnapshotStrategy::from_tag) {
        Some(SnapshotStrategy::Timestamp) => {
            resolve_variant::<TimestampSnapshotConfig>(validator, document)
                .map(SnapshotVariant::Timestamp)
        }
        Some(SnapshotStrategy::Check) => {
            resolve_variant::<CheckSnapshotConfig>(validator, document).map(SnapshotVariant::Check)
        }
        None => {
            check(validator, &snapshot_document_schema(), document)?;
            config_record::<GenericSnapshotConfig>(document).map(SnapshotVariant::Generic)
        }
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
