use super::*;

#[test]
fn test_hook_from_mapping_defaults() {
    let hook: Hook = serde_json::from_value(json!({"sql": "vacuum"})).unwrap();
    assert_eq!(hook, Hook::new("vacuum"));
    assert!(hook.transaction);
    assert_eq!(hook.index, None);
}

#[test]
fn test_hook_from_full_mapping() {
    let hook: Hook =
        serde_json::from_value(json!({"sql": "grant select", "transaction": false, "index": 2}))
            .unwrap();
    assert_eq!(hook.sql, "grant select");
    assert!(!hook.transaction);
    assert_eq!(hook.index, Some(2));
}

#[test]
fn test_hook_from_bare_string() {
    let hook: Hook = serde_json::from_value(json!("analyze orders")).unwrap();
    assert_eq!(hook, Hook::new("analyze orders"));
}

#[test]
fn test_hook_from_json_encoded_string() {
    let hook: Hook =
        serde_json::from_value(json!(r#"{"sql": "select 1", "transaction": false}"#)).unwrap();
    assert_eq!(hook.sql, "select 1");
    assert!(!hook.transaction);
}

#[test]
fn test_hook_brace_string_that_is_not_a_hook_stays_sql() {
    let hook = Hook::from_source("{{ log('hi') }}");
    assert_eq!(hook.sql, "{{ log('hi') }}");
    assert!(hook.transaction);
}

#[test]
fn test_hook_serializes_wire_shape() {
    let value = serde_json::to_value(Hook::new("select 1")).unwrap();
    assert_eq!(
        value,
        json!({"sql": "select 1", "transaction": true, "index": null})
    );
}

#[test]
fn test_hook_type_keys() {
    assert_eq!(HookType::PreHook.as_str(), "pre-hook");
    assert_eq!(HookType::PostHook.to_string(), "post-hook");
    assert_eq!(HookType::ALL.len(), 2);
}
