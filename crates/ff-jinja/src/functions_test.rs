use super::*;
use ff_core::NodeConfig;

#[test]
fn test_json_to_minijinja_value() {
    let json = serde_json::json!({
        "string": "hello",
        "number": 42,
        "bool": true,
        "array": [1, 2, 3]
    });

    let value = json_to_minijinja_value(&json);
    assert_eq!(value.get_attr("string").unwrap().as_str(), Some("hello"));
    assert_eq!(value.get_attr("array").unwrap().len(), Some(3));
}

#[test]
fn test_minijinja_value_to_json() {
    let json = serde_json::json!({
        "name": "orders",
        "count": 3,
        "tags": ["a", "b"],
        "alias": null
    });
    let value = json_to_minijinja_value(&json);
    assert_eq!(minijinja_value_to_json(&value), json);
    assert_eq!(
        minijinja_value_to_json(&Value::UNDEFINED),
        serde_json::Value::Null
    );
}

#[test]
fn test_config_object_record_is_a_copy() {
    let object = ConfigObject::new(
        NodeConfig::default(),
        Arc::new(ConfigResolver::default()),
        "duckdb",
    );
    let mut copy = object.record().unwrap();
    copy.materialized = "table".to_string();
    assert_eq!(object.record().unwrap().materialized, "view");
}
