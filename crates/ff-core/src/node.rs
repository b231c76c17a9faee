//! Resource kinds and the config record each one is built with.
//!
//! Every node in a project has a [`NodeKind`]. [`get_config_for`] picks the
//! [`ConfigKind`] its config is resolved as; while project-level layers are
//! still being applied (`base = true`) snapshots use a shape with no
//! mandatory keys.

use crate::config::{NodeConfig, SeedConfig, SourceConfig, TestConfig};
use crate::field::FieldSet;
use crate::record::ConfigRecord;
use crate::snapshot::{EmptySnapshotConfig, SnapshotConfig};
use serde::{Deserialize, Serialize};

/// Resource kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// SQL transformation model
    #[serde(alias = "sql")]
    Model,
    Analysis,
    /// Data test
    Test,
    Snapshot,
    /// Hook or run-operation
    Operation,
    /// CSV seed data
    Seed,
    /// External data source definition
    Source,
}

impl NodeKind {
    pub const ALL: [NodeKind; 7] = [
        NodeKind::Model,
        NodeKind::Analysis,
        NodeKind::Test,
        NodeKind::Snapshot,
        NodeKind::Operation,
        NodeKind::Seed,
        NodeKind::Source,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Model => "model",
            NodeKind::Analysis => "analysis",
            NodeKind::Test => "test",
            NodeKind::Snapshot => "snapshot",
            NodeKind::Operation => "operation",
            NodeKind::Seed => "seed",
            NodeKind::Source => "source",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Config record shape a node is resolved as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    Source,
    Node,
    Seed,
    Test,
    Snapshot,
    EmptySnapshot,
}

impl ConfigKind {
    /// Name of the record type
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigKind::Source => "SourceConfig",
            ConfigKind::Node => "NodeConfig",
            ConfigKind::Seed => "SeedConfig",
            ConfigKind::Test => "TestConfig",
            ConfigKind::Snapshot => "SnapshotConfig",
            ConfigKind::EmptySnapshot => "EmptySnapshotConfig",
        }
    }

    /// Declared fields of the record type
    pub fn fields(&self) -> FieldSet {
        match self {
            ConfigKind::Source => SourceConfig::FIELDS,
            ConfigKind::Node => NodeConfig::FIELDS,
            ConfigKind::Seed => SeedConfig::FIELDS,
            ConfigKind::Test => TestConfig::FIELDS,
            ConfigKind::Snapshot => SnapshotConfig::FIELDS,
            ConfigKind::EmptySnapshot => EmptySnapshotConfig::FIELDS,
        }
    }
}

impl std::fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Config record shape for a resource kind.
///
/// ```
/// # use ff_core::node::{get_config_for, ConfigKind, NodeKind};
/// assert_eq!(get_config_for(NodeKind::Snapshot, false), ConfigKind::Snapshot);
/// assert_eq!(get_config_for(NodeKind::Snapshot, true), ConfigKind::EmptySnapshot);
/// assert_eq!(get_config_for(NodeKind::Analysis, false), ConfigKind::Node);
/// ```
pub fn get_config_for(kind: NodeKind, base: bool) -> ConfigKind {
    match kind {
        NodeKind::Source => ConfigKind::Source,
        NodeKind::Seed => ConfigKind::Seed,
        NodeKind::Test => ConfigKind::Test,
        NodeKind::Snapshot if base => ConfigKind::EmptySnapshot,
        NodeKind::Snapshot => ConfigKind::Snapshot,
        NodeKind::Model | NodeKind::Analysis | NodeKind::Operation => ConfigKind::Node,
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod tests;
