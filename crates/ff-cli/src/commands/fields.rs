//! Fields command implementation

use anyhow::Result;
use ff_core::{get_config_for, ConfigResolver, FieldSet, FieldSpec, FieldType, NodeKind};

use crate::cli::{FieldsArgs, GlobalArgs};
use crate::commands::common::print_table;

const HEADERS: [&str; 6] = ["NAME", "TYPE", "NULLABLE", "MERGE", "SHOW_HIDE", "COMPARE"];

/// Execute the fields command
pub fn execute(args: &FieldsArgs, global: &GlobalArgs) -> Result<()> {
    let resolver = ConfigResolver::default();
    let kind = get_config_for(NodeKind::from(args.kind), false);
    let adapter_fields = resolver.adapters().config_fields(&global.adapter)?;

    if global.verbose {
        eprintln!(
            "[verbose] {} declares {} field(s); adapter '{}' adds {}",
            kind,
            kind.fields().len(),
            global.adapter,
            adapter_fields.len()
        );
    }

    let rows = field_rows(&kind.fields(), args);
    println!("{kind}");
    if rows.is_empty() {
        println!("No matching fields.");
    } else {
        print_table(&HEADERS, &rows);
    }

    let adapter_rows = field_rows(&adapter_fields, args);
    if !adapter_rows.is_empty() {
        println!();
        println!("{} adapter", global.adapter);
        print_table(&HEADERS, &adapter_rows);
    }
    Ok(())
}

/// Table rows for the fields that pass every policy filter given
fn field_rows(fields: &FieldSet, args: &FieldsArgs) -> Vec<Vec<String>> {
    fields
        .iter()
        .filter(|field| args.merge.map_or(true, |m| field.policies.merge == m))
        .filter(|field| args.show.map_or(true, |s| field.policies.show == s))
        .filter(|field| args.compare.map_or(true, |c| field.policies.compare == c))
        .map(field_row)
        .collect()
}

fn field_row(field: &FieldSpec) -> Vec<String> {
    let name = if field.required {
        format!("{}*", field.name)
    } else {
        field.name.to_string()
    };
    vec![
        name,
        type_label(field.ty),
        if field.nullable { "yes" } else { "no" }.to_string(),
        field.policies.merge.to_string(),
        field.policies.show.to_string(),
        field.policies.compare.to_string(),
    ]
}

fn type_label(ty: FieldType) -> String {
    match ty {
        FieldType::Bool => "bool".to_string(),
        FieldType::String => "string".to_string(),
        FieldType::Map => "map".to_string(),
        FieldType::StringOrList => "string|list".to_string(),
        FieldType::Hooks => "hooks".to_string(),
        FieldType::Severity => "severity".to_string(),
        FieldType::CheckCols => "all|list".to_string(),
        FieldType::Strategy(value) => format!("'{value}'"),
    }
}
