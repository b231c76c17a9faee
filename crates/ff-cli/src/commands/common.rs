//! Shared utilities for CLI commands

use anyhow::{bail, Context, Result};
use ff_core::ConfigDict;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::cli::OutputFormat;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main exits without printing it.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Read a YAML or JSON config document. An empty file is an empty mapping.
pub(crate) fn load_document(path: &Path) -> Result<ConfigDict> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(ConfigDict::new());
    }
    let value: serde_json::Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Null => Ok(ConfigDict::new()),
        other => bail!(
            "{} must contain a mapping, found {}",
            path.display(),
            json_type_name(&other)
        ),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "a mapping",
    }
}

/// Render a document in the requested format
pub(crate) fn format_document<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize JSON")?
        }
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to serialize YAML")?,
    };
    Ok(rendered.trim_end().to_string())
}

/// Calculate the display width of each column.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Print a formatted table to stdout.
///
/// Columns are left-aligned and separated by two spaces, with a dashed
/// separator line under the header row.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  ").trim_end());

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  ").trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_yaml_and_json_documents() {
        let dir = tempdir().unwrap();
        let yaml = dir.path().join("layer.yml");
        fs::write(&yaml, "materialized: table\ntags: [a]\n").unwrap();
        let json = dir.path().join("layer.json");
        fs::write(&json, r#"{"materialized": "table", "tags": ["a"]}"#).unwrap();

        assert_eq!(load_document(&yaml).unwrap(), load_document(&json).unwrap());
    }

    #[test]
    fn test_load_empty_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.yml");
        fs::write(&path, "").unwrap();
        assert!(load_document(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_rejects_non_mapping() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("list.yml");
        fs::write(&path, "- a\n- b\n").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(err.to_string().contains("found a list"), "{err}");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_document(&dir.path().join("missing.yml")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_column_widths() {
        let widths = calculate_column_widths(
            &["NAME", "MERGE"],
            &[vec!["materialized".to_string(), "clobber".to_string()]],
        );
        assert_eq!(widths, vec![12, 7]);
    }

    #[test]
    fn test_format_document() {
        let doc = serde_json::json!({"enabled": true});
        assert_eq!(
            format_document(&doc, OutputFormat::Yaml).unwrap(),
            "enabled: true"
        );
        assert_eq!(
            format_document(&doc, OutputFormat::Json).unwrap(),
            "{\n  \"enabled\": true\n}"
        );
    }
}
