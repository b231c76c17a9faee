//! ff-core - Config composition for Featherflow nodes
//!
//! This crate provides the config records every node is built with, the
//! per-field policies that decide how layered values merge, serialize and
//! compare, and the resolver that applies project, node and adapter layers
//! and validates the result.

pub mod adapter;
pub mod compare;
pub mod config;
pub mod error;
pub mod field;
pub mod hook;
pub mod merge;
pub mod node;
pub mod policy;
pub mod record;
pub mod resolver;
pub(crate) mod serde_helpers;
pub mod severity;
pub mod snapshot;
pub mod validation;

pub use adapter::{AdapterRegistry, DuckDbConfig, SnowflakeConfig, DEFAULT_ADAPTER};
pub use compare::{compare_key, same_contents};
pub use config::{NodeConfig, SeedConfig, SourceConfig, TestConfig};
pub use error::{ConfigError, ConfigResult};
pub use field::{FieldSet, FieldSpec, FieldType};
pub use hook::{Hook, HookType};
pub use merge::{extract_dict, merge_field_value, Extraction};
pub use node::{get_config_for, ConfigKind, NodeKind};
pub use policy::{CompareBehavior, FieldPolicies, MergeBehavior, ShowBehavior};
pub use record::{ConfigDict, ConfigRecord};
pub use resolver::ConfigResolver;
pub use severity::Severity;
pub use snapshot::{
    CheckCols, CheckSnapshotConfig, EmptySnapshotConfig, GenericSnapshotConfig, SnapshotConfig,
    SnapshotStrategy, SnapshotVariant, TimestampSnapshotConfig,
};
pub use validation::{best_match, JsonSchemaValidator, StructuralValidator, Violation};
