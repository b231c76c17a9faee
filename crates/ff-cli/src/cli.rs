//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use ff_core::{CompareBehavior, MergeBehavior, NodeKind, ShowBehavior};
use std::path::PathBuf;

/// Featherflow config - resolve, compare, and validate node configs
#[derive(Parser, Debug)]
#[command(name = "ffc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Adapter whose extension fields take part in layering
    #[arg(short, long, global = true, env = "FF_ADAPTER", default_value = "duckdb")]
    pub adapter: String,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply config layer files in order and print the resolved config
    Resolve(ResolveArgs),

    /// Check whether two config documents are content-equivalent
    Compare(CompareArgs),

    /// Resolve a `{config: ...}` snapshot document to its strategy variant
    Snapshot(SnapshotArgs),

    /// Print the field policy table of a config kind
    Fields(FieldsArgs),
}

/// Resource kind a config belongs to
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Model,
    Analysis,
    Test,
    Snapshot,
    Operation,
    Seed,
    Source,
}

impl From<KindArg> for NodeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Model => NodeKind::Model,
            KindArg::Analysis => NodeKind::Analysis,
            KindArg::Test => NodeKind::Test,
            KindArg::Snapshot => NodeKind::Snapshot,
            KindArg::Operation => NodeKind::Operation,
            KindArg::Seed => NodeKind::Seed,
            KindArg::Source => NodeKind::Source,
        }
    }
}

/// Document output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Resource kind of the node
    #[arg(short, long, value_enum, default_value = "model")]
    pub kind: KindArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Omit unset values from the output
    #[arg(long)]
    pub sparse: bool,

    /// YAML or JSON layer files, lowest precedence first
    #[arg(required = true)]
    pub layers: Vec<PathBuf>,
}

/// Arguments for the compare command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Resource kind whose compare policies apply
    #[arg(short, long, value_enum, default_value = "model")]
    pub kind: KindArg,

    /// Config recorded at the last successful build
    pub old: PathBuf,

    /// Newly resolved config
    pub new: PathBuf,

    /// Exit with status 1 when the configs differ
    #[arg(long)]
    pub fail_on_change: bool,
}

/// Arguments for the snapshot command
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// YAML or JSON file holding a `config` mapping
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: OutputFormat,
}

/// Arguments for the fields command
#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Resource kind whose record is listed
    #[arg(short, long, value_enum, default_value = "model")]
    pub kind: KindArg,

    /// Only fields with this merge policy (append, update, clobber)
    #[arg(long)]
    pub merge: Option<MergeBehavior>,

    /// Only fields with this show policy (show, hide)
    #[arg(long)]
    pub show: Option<ShowBehavior>,

    /// Only fields with this compare policy (include, exclude)
    #[arg(long)]
    pub compare: Option<CompareBehavior>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
