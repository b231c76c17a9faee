//! Resolve command implementation

use anyhow::{Context, Result};
use ff_core::{
    get_config_for, ConfigDict, ConfigKind, ConfigRecord, ConfigResolver, EmptySnapshotConfig,
    NodeConfig, NodeKind, SeedConfig, SourceConfig, TestConfig,
};
use std::path::PathBuf;

use crate::cli::{GlobalArgs, ResolveArgs};
use crate::commands::common::{format_document, load_document};

/// Execute the resolve command
pub fn execute(args: &ResolveArgs, global: &GlobalArgs) -> Result<()> {
    let resolver = ConfigResolver::default();
    let kind = NodeKind::from(args.kind);

    if global.verbose {
        eprintln!(
            "[verbose] Resolving {} layer(s) for a {} with adapter '{}'",
            args.layers.len(),
            kind,
            global.adapter
        );
    }

    let document = match get_config_for(kind, true) {
        ConfigKind::Source => {
            finalize(&resolver, SourceConfig::default(), args, global)?
        }
        ConfigKind::Node => finalize(&resolver, NodeConfig::default(), args, global)?,
        ConfigKind::Seed => finalize(&resolver, SeedConfig::default(), args, global)?,
        ConfigKind::Test => finalize(&resolver, TestConfig::default(), args, global)?,
        ConfigKind::Snapshot | ConfigKind::EmptySnapshot => {
            let config = apply_layers(
                &resolver,
                EmptySnapshotConfig::default(),
                &args.layers,
                global,
            )?;
            let variant = resolver
                .finalize_snapshot(&config)
                .context("Snapshot config does not resolve to a strategy")?;
            if global.verbose {
                eprintln!("[verbose] Snapshot strategy: {}", variant.strategy());
            }
            variant.to_dict(args.sparse, true)?
        }
    };

    println!("{}", format_document(&document, args.output)?);
    Ok(())
}

fn finalize<C: ConfigRecord>(
    resolver: &ConfigResolver,
    base: C,
    args: &ResolveArgs,
    global: &GlobalArgs,
) -> Result<ConfigDict> {
    let config = apply_layers(resolver, base, &args.layers, global)?;
    let config = resolver
        .finalize_and_validate(&config)
        .context("Resolved config is invalid")?;
    Ok(config.to_dict(args.sparse, true)?)
}

/// Apply each layer file in order, naming the file that fails
fn apply_layers<C: ConfigRecord>(
    resolver: &ConfigResolver,
    base: C,
    layers: &[PathBuf],
    global: &GlobalArgs,
) -> Result<C> {
    let mut config = base;
    for path in layers {
        let layer = load_document(path)?;
        log::debug!("Loaded config layer {}", path.display());
        if global.verbose {
            eprintln!(
                "[verbose] Applying {} ({} key(s))",
                path.display(),
                layer.len()
            );
        }
        config = resolver
            .update_from(&config, layer, &global.adapter)
            .with_context(|| format!("Invalid config layer {}", path.display()))?;
    }
    Ok(config)
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
