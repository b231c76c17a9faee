//! The live `config` object templates see.
//!
//! Usage in templates:
//! ```jinja
//! {{ config(materialized='table', tags=['nightly']) }}
//! {% if config.get('materialized') == 'incremental' %} ... {% endif %}
//! {{ config.set('sort', 'id') }}
//! ```

use ff_core::{ConfigDict, ConfigError, ConfigRecord, ConfigResolver};
use minijinja::value::{from_args, Enumerator, Kwargs, Object, ObjectRepr, Value};
use minijinja::{Error, ErrorKind, State};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// A config record shared with a template while one node renders
pub struct ConfigObject<C> {
    record: Mutex<C>,
    resolver: Arc<ConfigResolver>,
    adapter: String,
}

impl<C: ConfigRecord> ConfigObject<C> {
    pub fn new(record: C, resolver: Arc<ConfigResolver>, adapter: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(record),
            resolver,
            adapter: adapter.into(),
        }
    }

    /// A copy of the record as the template left it
    pub fn record(&self) -> Result<C, Error> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, C>, Error> {
        self.record.lock().map_err(|e| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("config mutex poisoned: {e}"),
            )
        })
    }

    /// `config(k=v, ...)`: layer the keyword arguments onto the record
    fn layer(&self, args: &[Value]) -> Result<Value, Error> {
        let (kwargs,): (Kwargs,) = from_args(args)?;
        let mut data = ConfigDict::new();
        for key in kwargs.args() {
            let value = kwargs.get::<Value>(key)?;
            data.insert(key.to_string(), minijinja_value_to_json(&value));
        }
        log::debug!("config() layering {} key(s)", data.len());

        let mut record = self.lock()?;
        *record = self
            .resolver
            .update_from(&*record, data, &self.adapter)
            .map_err(config_error)?;
        Ok(Value::from(""))
    }

    /// `config.get(key, default=none)`
    fn get(&self, args: &[Value]) -> Result<Value, Error> {
        let (key, default): (&str, Option<Value>) = from_args(args)?;
        let record = self.lock()?;
        match record.get(key) {
            Ok(serde_json::Value::Null) | Err(ConfigError::KeyNotFound { .. }) => {
                Ok(default.unwrap_or_else(|| Value::from(())))
            }
            Ok(value) => Ok(json_to_minijinja_value(&value)),
            Err(e) => Err(config_error(e)),
        }
    }

    /// `config.require(key)`: like `get`, but a missing or null key fails
    fn require(&self, args: &[Value]) -> Result<Value, Error> {
        let (key,): (&str,) = from_args(args)?;
        let record = self.lock()?;
        match record.get(key) {
            Ok(serde_json::Value::Null) | Err(ConfigError::KeyNotFound { .. }) => Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("required config key '{key}' is not set"),
            )),
            Ok(value) => Ok(json_to_minijinja_value(&value)),
            Err(e) => Err(config_error(e)),
        }
    }

    /// `config.set(key, value)`
    fn set(&self, args: &[Value]) -> Result<Value, Error> {
        let (key, value): (&str, Value) = from_args(args)?;
        let mut record = self.lock()?;
        record
            .set(key, minijinja_value_to_json(&value))
            .map_err(config_error)?;
        Ok(Value::from(""))
    }
}

impl<C: fmt::Debug> fmt::Debug for ConfigObject<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigObject")
            .field("record", &self.record)
            .field("adapter", &self.adapter)
            .finish()
    }
}

impl<C> Object for ConfigObject<C>
where
    C: ConfigRecord + Send + Sync + 'static,
{
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Map
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let record = self.record.lock().ok()?;
        let value = record.get(key.as_str()?).ok()?;
        Some(json_to_minijinja_value(&value))
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        match self.record.lock() {
            Ok(record) => Enumerator::Values(record.keys().map(Value::from).collect()),
            Err(_) => Enumerator::Empty,
        }
    }

    fn enumerator_len(self: &Arc<Self>) -> Option<usize> {
        self.record.lock().ok().map(|record| record.len())
    }

    fn call(self: &Arc<Self>, _state: &State<'_, '_>, args: &[Value]) -> Result<Value, Error> {
        self.layer(args)
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "get" => self.get(args),
            "require" => self.require(args),
            "set" => self.set(args),
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("config has no method named {method}"),
            )),
        }
    }
}

fn config_error(err: ConfigError) -> Error {
    Error::new(ErrorKind::InvalidOperation, err.to_string())
}

/// Convert serde_json::Value to minijinja::Value
pub(crate) fn json_to_minijinja_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::from(()),
        serde_json::Value::Bool(b) => Value::from(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(f) = n.as_f64() {
                Value::from(f)
            } else {
                Value::from(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::from(s.as_str()),
        serde_json::Value::Array(arr) => {
            let values: Vec<Value> = arr.iter().map(json_to_minijinja_value).collect();
            Value::from(values)
        }
        serde_json::Value::Object(obj) => {
            let map: HashMap<String, Value> = obj
                .iter()
                .map(|(k, v)| (k.clone(), json_to_minijinja_value(v)))
                .collect();
            Value::from_iter(map)
        }
    }
}

/// Convert a minijinja Value to a serde_json::Value.
///
/// Inverse of [`json_to_minijinja_value`]; keyword arguments and `set`
/// values pass through here before they reach the record.
pub(crate) fn minijinja_value_to_json(val: &Value) -> serde_json::Value {
    use minijinja::value::ValueKind;
    match val.kind() {
        ValueKind::Undefined | ValueKind::None => serde_json::Value::Null,
        ValueKind::Bool => serde_json::Value::Bool(val.is_true()),
        ValueKind::Number => {
            if let Ok(i) = i64::try_from(val.clone()) {
                serde_json::Value::Number(i.into())
            } else if let Ok(f) = f64::try_from(val.clone()) {
                serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            } else {
                serde_json::Value::Null
            }
        }
        ValueKind::String => {
            serde_json::Value::String(val.as_str().unwrap_or_default().to_string())
        }
        ValueKind::Seq => {
            let items: Vec<serde_json::Value> = val
                .try_iter()
                .map(|iter| iter.map(|v| minijinja_value_to_json(&v)).collect())
                .unwrap_or_default();
            serde_json::Value::Array(items)
        }
        ValueKind::Map => {
            let mut map = serde_json::Map::new();
            if let Ok(keys) = val.try_iter() {
                for key in keys {
                    let key_str = key.as_str().unwrap_or_default().to_string();
                    if let Ok(v) = val.get_item(&key) {
                        map.insert(key_str, minijinja_value_to_json(&v));
                    }
                }
            }
            serde_json::Value::Object(map)
        }
        _ => serde_json::Value::String(val.to_string()),
    }
}

#[cfg(test)]
#[path = "functions_test.rs"]
mod tests;
