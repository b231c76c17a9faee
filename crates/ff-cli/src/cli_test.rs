use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn parse_resolve_args() {
    let cli = Cli::try_parse_from([
        "ffc", "resolve", "--kind", "seed", "--sparse", "-o", "yaml", "a.yml", "b.yml",
    ])
    .unwrap();
    match cli.command {
        Commands::Resolve(args) => {
            assert_eq!(args.kind, KindArg::Seed);
            assert_eq!(args.output, OutputFormat::Yaml);
            assert!(args.sparse);
            assert_eq!(args.layers.len(), 2);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn resolve_requires_a_layer() {
    assert!(Cli::try_parse_from(["ffc", "resolve"]).is_err());
}

#[test]
fn parse_policy_filters() {
    let cli = Cli::try_parse_from(["ffc", "fields", "--merge", "APPEND", "--compare", "exclude"])
        .unwrap();
    match cli.command {
        Commands::Fields(args) => {
            assert_eq!(args.merge, Some(MergeBehavior::Append));
            assert_eq!(args.compare, Some(CompareBehavior::Exclude));
            assert_eq!(args.show, None);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    assert!(Cli::try_parse_from(["ffc", "fields", "--show", "sometimes"]).is_err());
}

#[test]
fn adapter_flag_is_global() {
    let cli = Cli::try_parse_from(["ffc", "fields", "--adapter", "snowflake"]).unwrap();
    assert_eq!(cli.global.adapter, "snowflake");
}

#[test]
fn kind_maps_to_node_kind() {
    assert_eq!(NodeKind::from(KindArg::Snapshot), NodeKind::Snapshot);
    assert_eq!(NodeKind::from(KindArg::Operation), NodeKind::Operation);
}
