use super::*;
use ff_core::{NodeConfig, SeedConfig};
use serde_json::json;

fn render(template: &str, config: NodeConfig) -> JinjaResult<(String, NodeConfig)> {
    JinjaEnvironment::default().render_node(template, config)
}

#[test]
fn test_render_simple() {
    let env = JinjaEnvironment::default();
    let result = env.render("SELECT * FROM users").unwrap();
    assert_eq!(result, "SELECT * FROM users");
}

#[test]
fn test_config_call_layers_kwargs() {
    let mut base = NodeConfig::default();
    base.tags = vec!["base".to_string()];

    let (rendered, config) = render(
        "{{ config(materialized='table', tags='nightly', sort='id') }}SELECT 1",
        base,
    )
    .unwrap();

    assert_eq!(rendered, "SELECT 1");
    assert_eq!(config.materialized, "table");
    assert_eq!(config.tags, vec!["base".to_string(), "nightly".to_string()]);
    assert_eq!(config.extra.get("sort"), Some(&json!("id")));
}

#[test]
fn test_config_call_rejects_invalid_values() {
    let result = render("{{ config(enabled='yes') }}", NodeConfig::default());
    match result {
        Err(JinjaError::RenderError(message)) => assert!(message.contains("C005"), "{message}"),
        other => panic!("expected render error, got {other:?}"),
    }
}

#[test]
fn test_config_get() {
    let (rendered, _) = render(
        "{{ config.get('materialized') }}|{{ config.get('missing', 'fallback') }}|{{ config.get('alias') is none }}",
        NodeConfig::default(),
    )
    .unwrap();
    assert_eq!(rendered, "view|fallback|true");
}

#[test]
fn test_config_item_and_attribute_access() {
    let (rendered, _) = render(
        "{{ config['materialized'] }} {{ config.enabled }}",
        NodeConfig::default(),
    )
    .unwrap();
    assert_eq!(rendered, "view true");
}

#[test]
fn test_config_require() {
    let (rendered, _) = render("{{ config.require('materialized') }}", NodeConfig::default())
        .unwrap();
    assert_eq!(rendered, "view");

    let result = render("{{ config.require('alias') }}", NodeConfig::default());
    match result {
        Err(JinjaError::RenderError(message)) => assert!(message.contains("alias"), "{message}"),
        other => panic!("expected render error, got {other:?}"),
    }
}

#[test]
fn test_config_set() {
    let (rendered, config) = render(
        "{{ config.set('sort', 'id') }}{{ config.set('enabled', false) }}done",
        NodeConfig::default(),
    )
    .unwrap();
    assert_eq!(rendered, "done");
    assert!(!config.enabled);
    assert_eq!(config.extra.get("sort"), Some(&json!("id")));
}

#[test]
fn test_config_set_accepts_value_fixed_later() {
    let (rendered, config) = render(
        "{{ config.set('materialized', 5) }}{{ config.get('materialized') }};\
         {{ config.set('materialized', 'table') }}ok",
        NodeConfig::default(),
    )
    .unwrap();
    assert_eq!(rendered, "5;ok");
    assert_eq!(config.materialized, "table");
    assert!(config.unchecked.is_empty());
}

#[test]
fn test_config_set_invalid_value_fails_at_finalize() {
    let result = render("{{ config.set('enabled', 'nope') }}done", NodeConfig::default());
    match result {
        Err(JinjaError::Config(ff_core::ConfigError::Validation { path, .. })) => {
            assert_eq!(path, "enabled")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_config_call_resolves_unchecked_value() {
    let (_, config) = render(
        "{{ config.set('enabled', 'nope') }}{{ config(enabled=false) }}",
        NodeConfig::default(),
    )
    .unwrap();
    assert!(!config.enabled);
}

#[test]
fn test_config_length_and_iteration() {
    let mut base = NodeConfig::default();
    base.extra.insert("sort".to_string(), json!("id"));
    let expected_len = NodeConfig::FIELDS.len() + 1;

    let (rendered, _) = render(
        "{{ config | length }};{% for key in config %}{{ key }},{% endfor %}",
        base,
    )
    .unwrap();

    let (len, keys) = rendered.split_once(';').unwrap();
    assert_eq!(len, expected_len.to_string());
    assert!(keys.starts_with("enabled,materialized,"), "{keys}");
    assert!(keys.ends_with("full_refresh,sort,"), "{keys}");
}

#[test]
fn test_unknown_method() {
    let result = render("{{ config.pop('sort') }}", NodeConfig::default());
    assert!(matches!(result, Err(JinjaError::RenderError(_))));
}

#[test]
fn test_adapter_fields_in_config_call() {
    let env = JinjaEnvironment::new(Arc::new(ConfigResolver::default()), "snowflake");
    assert_eq!(env.adapter(), "snowflake");

    let (_, config) = env
        .render_node(
            "{{ config(transient=false, cluster_by='event_date') }}",
            NodeConfig::default(),
        )
        .unwrap();
    assert_eq!(config.extra.get("transient"), Some(&json!(false)));
    assert_eq!(config.extra.get("cluster_by"), Some(&json!("event_date")));

    let result = env.render_node("{{ config(transient='yes') }}", NodeConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_specialized_record() {
    let (rendered, config) = JinjaEnvironment::default()
        .render_node(
            "{{ config.materialized }}{{ config(quote_columns=true) }}",
            SeedConfig::default(),
        )
        .unwrap();
    assert_eq!(rendered, "seed");
    assert_eq!(config.quote_columns, Some(true));
}
