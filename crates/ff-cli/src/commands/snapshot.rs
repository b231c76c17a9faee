//! Snapshot command implementation

use anyhow::{Context, Result};
use ff_core::ConfigResolver;
use serde_json::Value;

use crate::cli::{GlobalArgs, SnapshotArgs};
use crate::commands::common::{format_document, load_document};

/// Execute the snapshot command
pub fn execute(args: &SnapshotArgs, global: &GlobalArgs) -> Result<()> {
    let resolver = ConfigResolver::default();
    let document = Value::Object(load_document(&args.file)?);

    if global.verbose {
        eprintln!("[verbose] Validating snapshot document {}", args.file.display());
    }

    let variant = resolver
        .validate_snapshot_document(&document)
        .with_context(|| format!("Invalid snapshot document {}", args.file.display()))?;

    println!("strategy: {}", variant.strategy());
    println!(
        "{}",
        format_document(&variant.to_dict(true, true)?, args.output)?
    );
    Ok(())
}
