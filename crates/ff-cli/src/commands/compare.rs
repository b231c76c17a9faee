//! Compare command implementation

use anyhow::Result;
use ff_core::{compare_key, get_config_for, same_contents, ConfigDict, FieldSet, NodeKind};
use std::collections::BTreeSet;

use crate::cli::{CompareArgs, GlobalArgs};
use crate::commands::common::{load_document, ExitCode};

/// Execute the compare command
pub fn execute(args: &CompareArgs, global: &GlobalArgs) -> Result<()> {
    let kind = NodeKind::from(args.kind);
    let fields = get_config_for(kind, false).fields();

    let old = load_document(&args.old)?;
    let new = load_document(&args.new)?;

    if global.verbose {
        eprintln!(
            "[verbose] Comparing {} against {} using {} field policies",
            args.new.display(),
            args.old.display(),
            get_config_for(kind, false)
        );
    }

    if same_contents(&fields, &old, &new) {
        println!("unchanged");
        return Ok(());
    }

    println!("changed");
    for key in changed_keys(&fields, &old, &new) {
        println!("  {key}");
    }

    if args.fail_on_change {
        return Err(ExitCode(1).into());
    }
    Ok(())
}

/// Keys whose values differ and that take part in comparison, sorted
fn changed_keys(fields: &FieldSet, old: &ConfigDict, new: &ConfigDict) -> Vec<String> {
    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
    keys.into_iter()
        .filter(|key| {
            fields
                .find(key)
                .map_or(true, |field| field.policies.compare.should_include())
        })
        .filter(|key| !compare_key(old, new, key))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::KindArg;
    use serde_json::{json, Value};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn dict(value: Value) -> ConfigDict {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn write_pair(old: &str, new: &str) -> (TempDir, PathBuf, PathBuf) {
        let dir = tempdir().unwrap();
        let old_path = dir.path().join("old.yml");
        let new_path = dir.path().join("new.yml");
        fs::write(&old_path, old).unwrap();
        fs::write(&new_path, new).unwrap();
        (dir, old_path, new_path)
    }

    fn global() -> GlobalArgs {
        GlobalArgs {
            verbose: false,
            adapter: "duckdb".to_string(),
        }
    }

    #[test]
    fn test_changed_keys_skip_excluded_fields() {
        let fields = get_config_for(NodeKind::Model, false).fields();
        let old = dict(json!({"materialized": "table", "tags": ["a"], "unique_key": "id"}));
        let new = dict(json!({"materialized": "view", "tags": ["b"], "post_hook": []}));

        assert_eq!(
            changed_keys(&fields, &old, &new),
            vec![
                "materialized".to_string(),
                "post_hook".to_string(),
                "unique_key".to_string()
            ]
        );
    }

    #[test]
    fn test_excluded_difference_is_unchanged() {
        let (_dir, old, new) = write_pair(
            "materialized: table\ntags: [nightly]\n",
            "materialized: table\ntags: [hourly]\n",
        );
        let args = CompareArgs {
            kind: KindArg::Model,
            old,
            new,
            fail_on_change: true,
        };
        execute(&args, &global()).unwrap();
    }

    #[test]
    fn test_fail_on_change_returns_exit_code() {
        let (_dir, old, new) = write_pair("materialized: table\n", "materialized: view\n");
        let args = CompareArgs {
            kind: KindArg::Model,
            old,
            new,
            fail_on_change: true,
        };
        let err = execute(&args, &global()).unwrap_err();
        let code = err.downcast_ref::<ExitCode>().unwrap();
        assert_eq!(code.0, 1);
    }

    #[test]
    fn test_change_without_flag_succeeds() {
        let (_dir, old, new) = write_pair("materialized: table\n", "materialized: view\n");
        let args = CompareArgs {
            kind: KindArg::Model,
            old,
            new,
            fail_on_change: false,
        };
        execute(&args, &global()).unwrap();
    }
}
