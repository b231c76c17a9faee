//! Adapter-specific config extensions.
//!
//! A database adapter may declare extra config fields (Snowflake's
//! `cluster_by`, `transient`, ...) with their own merge policies. Layering
//! consults the adapter's field table after the record's own fields, so the
//! base record types never need to know about them.

use crate::error::{ConfigError, ConfigResult};
use crate::field::{FieldSet, FieldSpec, FieldType};
use crate::record::{ConfigDict, ConfigRecord};
use crate::serde_helpers::optional_string_or_list;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Adapter used when none is configured
pub const DEFAULT_ADAPTER: &str = "duckdb";

/// DuckDB adds no config fields of its own
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuckDbConfig {
    #[serde(flatten)]
    pub extra: ConfigDict,

    /// Declared-field writes that do not fit the field's type yet
    #[serde(skip)]
    pub unchecked: ConfigDict,
}

impl ConfigRecord for DuckDbConfig {
    const FIELDS: FieldSet = FieldSet::EMPTY;

    fn extra(&self) -> &ConfigDict {
        &self.extra
    }

    fn extra_mut(&mut self) -> &mut ConfigDict {
        &mut self.extra
    }

    fn unchecked(&self) -> &ConfigDict {
        &self.unchecked
    }

    fn unchecked_mut(&mut self) -> &mut ConfigDict {
        &mut self.unchecked
    }
}

const SNOWFLAKE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("transient", FieldType::Bool).nullable(),
    FieldSpec::new("cluster_by", FieldType::StringOrList).nullable(),
    FieldSpec::new("automatic_clustering", FieldType::Bool).nullable(),
    FieldSpec::new("secure", FieldType::Bool).nullable(),
    FieldSpec::new("copy_grants", FieldType::Bool).nullable(),
    FieldSpec::new("snowflake_warehouse", FieldType::String).nullable(),
    FieldSpec::new("query_tag", FieldType::String).nullable(),
];

/// Snowflake table and session options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub transient: Option<bool>,

    #[serde(default, deserialize_with = "optional_string_or_list")]
    pub cluster_by: Option<Vec<String>>,

    #[serde(default)]
    pub automatic_clustering: Option<bool>,

    #[serde(default)]
    pub secure: Option<bool>,

    #[serde(default)]
    pub copy_grants: Option<bool>,

    /// Warehouse to switch to while building the node
    #[serde(default)]
    pub snowflake_warehouse: Option<String>,

    #[serde(default)]
    pub query_tag: Option<String>,

    #[serde(flatten)]
    pub extra: ConfigDict,

    /// Declared-field writes that do not fit the field's type yet
    #[serde(skip)]
    pub unchecked: ConfigDict,
}

impl ConfigRecord for SnowflakeConfig {
    const FIELDS: FieldSet = FieldSet::new(&[SNOWFLAKE_FIELDS]);

    fn extra(&self) -> &ConfigDict {
        &self.extra
    }

    fn extra_mut(&mut self) -> &mut ConfigDict {
        &mut self.extra
    }

    fn unchecked(&self) -> &ConfigDict {
        &self.unchecked
    }

    fn unchecked_mut(&mut self) -> &mut ConfigDict {
        &mut self.unchecked
    }
}

/// Adapter name to the field table of its config extension
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<String, FieldSet>,
}

impl AdapterRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the adapters that ship with Featherflow
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register::<DuckDbConfig>("duckdb");
        registry.register::<SnowflakeConfig>("snowflake");
        registry
    }

    /// Register the config record of an adapter, replacing any previous one
    pub fn register<C: ConfigRecord>(&mut self, name: impl Into<String>) {
        self.register_fields(name, C::FIELDS);
    }

    pub fn register_fields(&mut self, name: impl Into<String>, fields: FieldSet) {
        self.adapters.insert(name.into(), fields);
    }

    /// Field table of the named adapter's config record
    pub fn config_fields(&self, name: &str) -> ConfigResult<FieldSet> {
        self.adapters
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownAdapter {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Registered adapter names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.adapters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::MergeBehavior;
    use serde_json::json;

    #[test]
    fn test_builtin_adapters() {
        let registry = AdapterRegistry::with_builtin();
        assert_eq!(registry.names(), vec!["duckdb", "snowflake"]);
        assert!(registry.config_fields(DEFAULT_ADAPTER).unwrap().is_empty());

        let snowflake = registry.config_fields("snowflake").unwrap();
        assert_eq!(snowflake.len(), 7);
        assert!(snowflake
            .iter()
            .all(|field| field.policies.merge == MergeBehavior::Clobber));
    }

    #[test]
    fn test_unknown_adapter_lists_available() {
        let registry = AdapterRegistry::with_builtin();
        let err = registry.config_fields("oracle").unwrap_err();
        match &err {
            ConfigError::UnknownAdapter { name, available } => {
                assert_eq!(name, "oracle");
                assert_eq!(available, "duckdb, snowflake");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("[C006]"));
    }

    #[test]
    fn test_register_replaces_fields() {
        let mut registry = AdapterRegistry::new();
        registry.register::<SnowflakeConfig>("warehouse");
        assert!(registry.config_fields("warehouse").unwrap().contains("query_tag"));
        registry.register::<DuckDbConfig>("warehouse");
        assert!(registry.config_fields("warehouse").unwrap().is_empty());
    }

    #[test]
    fn test_snowflake_cluster_by_accepts_string() {
        let dict = match json!({"cluster_by": "event_date", "transient": false}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let config = SnowflakeConfig::from_dict(dict).unwrap();
        assert_eq!(config.cluster_by, Some(vec!["event_date".to_string()]));
        assert_eq!(config.transient, Some(false));
        assert_eq!(config.secure, None);
    }
}
