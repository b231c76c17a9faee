//! Node config records: source, model, seed and test.
//!
//! Specializations embed their base record with `#[serde(flatten)]` and list
//! the base field group ahead of their own in [`ConfigRecord::FIELDS`]. A
//! specialization that only changes a default (seeds materialize as `seed`,
//! tests as `test`) says so in [`ConfigRecord::DEFAULT_OVERRIDES`] instead of
//! redeclaring the field.

use crate::field::{FieldSet, FieldSpec, FieldType};
use crate::hook::{Hook, HookType};
use crate::record::{ConfigDict, ConfigRecord};
use crate::serde_helpers::{default_true, string_or_list};
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

const SOURCE_FIELDS: &[FieldSpec] = &[FieldSpec::new("enabled", FieldType::Bool)];

/// Fields shared by every buildable node
pub(crate) const NODE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("enabled", FieldType::Bool),
    FieldSpec::new("materialized", FieldType::String),
    FieldSpec::new("persist_docs", FieldType::Map),
    FieldSpec::new("post-hook", FieldType::Hooks)
        .with_ident("post_hook")
        .append(),
    FieldSpec::new("pre-hook", FieldType::Hooks)
        .with_ident("pre_hook")
        .append(),
    // legacy config-level vars; not part of change detection
    FieldSpec::new("vars", FieldType::Map).update().exclude(),
    FieldSpec::new("quoting", FieldType::Map).update(),
    FieldSpec::new("column_types", FieldType::Map).update(),
    // where the node lands, not what it computes
    FieldSpec::new("alias", FieldType::String)
        .nullable()
        .exclude(),
    FieldSpec::new("schema", FieldType::String)
        .nullable()
        .exclude(),
    FieldSpec::new("database", FieldType::String)
        .nullable()
        .exclude(),
    FieldSpec::new("tags", FieldType::StringOrList)
        .hide()
        .append()
        .exclude(),
    FieldSpec::new("full_refresh", FieldType::Bool).nullable(),
];

const SEED_FIELDS: &[FieldSpec] = &[FieldSpec::new("quote_columns", FieldType::Bool).nullable()];

const TEST_FIELDS: &[FieldSpec] = &[FieldSpec::new("severity", FieldType::Severity)];

/// Config of a source definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(flatten)]
    pub extra: ConfigDict,

    /// Declared-field writes that do not fit the field's type yet
    #[serde(skip)]
    pub unchecked: ConfigDict,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extra: ConfigDict::new(),
            unchecked: ConfigDict::new(),
        }
    }
}

impl ConfigRecord for SourceConfig {
    const FIELDS: FieldSet = FieldSet::new(&[SOURCE_FIELDS]);

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

/// Config of a model, and the base of every other node config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Materialization name (`view`, `table`, `incremental`, ...)
    #[serde(default = "default_materialized")]
    pub materialized: String,

    #[serde(default)]
    pub persist_docs: ConfigDict,

    #[serde(rename = "post-hook", default)]
    pub post_hook: Vec<Hook>,

    #[serde(rename = "pre-hook", default)]
    pub pre_hook: Vec<Hook>,

    #[serde(default)]
    pub vars: ConfigDict,

    #[serde(default)]
    pub quoting: ConfigDict,

    /// Column name to SQL type overrides
    #[serde(default)]
    pub column_types: ConfigDict,

    #[serde(default)]
    pub alias: Option<String>,

    #[serde(default)]
    pub schema: Option<String>,

    #[serde(default)]
    pub database: Option<String>,

    #[serde(default, deserialize_with = "string_or_list")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub full_refresh: Option<bool>,

    #[serde(flatten)]
    pub extra: ConfigDict,

    /// Declared-field writes that do not fit the field's type yet
    #[serde(skip)]
    pub unchecked: ConfigDict,
}

fn default_materialized() -> String {
    "view".to_string()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            materialized: default_materialized(),
            persist_docs: ConfigDict::new(),
            post_hook: Vec::new(),
            pre_hook: Vec::new(),
            vars: ConfigDict::new(),
            quoting: ConfigDict::new(),
            column_types: ConfigDict::new(),
            alias: None,
            schema: None,
            database: None,
            tags: Vec::new(),
            full_refresh: None,
            extra: ConfigDict::new(),
            unchecked: ConfigDict::new(),
        }
    }
}

impl NodeConfig {
    /// A default node config with a different materialization
    pub(crate) fn materialized_as(materialized: &str) -> Self {
        Self {
            materialized: materialized.to_string(),
            ..Self::default()
        }
    }

    /// Hooks of the given kind
    pub fn hooks(&self, hook_type: HookType) -> &[Hook] {
        match hook_type {
            HookType::PreHook => &self.pre_hook,
            HookType::PostHook => &self.post_hook,
        }
    }
}

impl ConfigRecord for NodeConfig {
    const FIELDS: FieldSet = FieldSet::new(&[NODE_FIELDS]);

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

/// Config of a CSV seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(flatten)]
    pub node: NodeConfig,

    /// Force column quoting
    #[serde(default)]
    pub quote_columns: Option<bool>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::materialized_as("seed"),
            quote_columns: None,
        }
    }
}

impl ConfigRecord for SeedConfig {
    const FIELDS: FieldSet = FieldSet::new(&[NODE_FIELDS, SEED_FIELDS]);
    const DEFAULT_OVERRIDES: &'static [(&'static str, &'static str)] = &[("materialized", "seed")];

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

/// Config of a data test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    #[serde(flatten)]
    pub node: NodeConfig,

    #[serde(default)]
    pub severity: Severity,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::materialized_as("test"),
            severity: Severity::default(),
        }
    }
}

impl ConfigRecord for TestConfig {
    const FIELDS: FieldSet = FieldSet::new(&[NODE_FIELDS, TEST_FIELDS]);
    const DEFAULT_OVERRIDES: &'static [(&'static str, &'static str)] = &[("materialized", "test")];

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

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
