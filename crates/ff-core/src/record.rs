//! The extensible config record.
//!
//! A record is a typed struct plus an `extra` bucket for keys it does not
//! declare. [`ConfigRecord`] ties the struct to its static [`FieldSet`] and
//! provides the dict conversions used by layering, along with a map-like
//! interface (`get` / `set` / `remove` / `keys` / `len`) that treats declared
//! fields and extra keys uniformly. A declared field always shadows the extra
//! bucket: a key is never stored in both places.
//!
//! Writes through `set` are not type checked. A value that does not fit its
//! declared field is held in the record's unchecked slot, shadows the typed
//! value in `get` and `to_dict`, and is only rejected when the record is
//! next rebuilt through validation.

use crate::compare::same_contents;
use crate::error::{ConfigError, ConfigResult};
use crate::field::{FieldSet, FieldSpec};
use crate::merge::{extract_dict, Extraction};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// A plain config document: string keys to JSON-compatible values
pub type ConfigDict = Map<String, Value>;

/// Drop declared Hide-policy fields whose value is null. Populated values
/// are always kept.
pub fn hide_empty(fields: &FieldSet, dict: &mut ConfigDict) {
    for field in fields.iter() {
        if field.policies.show.should_show() {
            continue;
        }
        if matches!(dict.get(field.name), Some(Value::Null)) {
            dict.remove(field.name);
        }
    }
}

/// Serialize the typed fields and extra bucket, ignoring unchecked writes
fn typed_dict<C: Serialize>(record: &C) -> ConfigResult<ConfigDict> {
    match serde_json::to_value(record)? {
        Value::Object(dict) => Ok(dict),
        other => Err(ConfigError::Validation {
            path: String::new(),
            message: format!("config did not serialize to a mapping: {other}"),
        }),
    }
}

/// A typed config record with an open-ended extra bucket
pub trait ConfigRecord: Serialize + DeserializeOwned + Clone + Debug + PartialEq {
    /// Declared fields, in declaration order
    const FIELDS: FieldSet;

    /// `(field, default)` pairs this shape overrides relative to its base
    const DEFAULT_OVERRIDES: &'static [(&'static str, &'static str)] = &[];

    /// Keys not covered by [`Self::FIELDS`]
    fn extra(&self) -> &ConfigDict;

    fn extra_mut(&mut self) -> &mut ConfigDict;

    /// Declared-field values written with [`Self::set`] that do not fit the
    /// field's type yet
    fn unchecked(&self) -> &ConfigDict;

    fn unchecked_mut(&mut self) -> &mut ConfigDict;

    /// JSON schema the structural validator checks documents against
    fn json_schema() -> Value {
        Self::FIELDS.json_schema()
    }

    /// Fill in this shape's overridden defaults for keys the dict lacks
    fn apply_default_overrides(dict: &mut ConfigDict) {
        for (key, default) in Self::DEFAULT_OVERRIDES {
            dict.entry(key.to_string())
                .or_insert_with(|| Value::String(default.to_string()));
        }
    }

    /// Serialize to a plain dict.
    ///
    /// With `omit_none`, declared fields that are null are dropped. Without
    /// it every declared field is present, except that `omit_hidden` still
    /// drops null Hide-policy fields.
    fn to_dict(&self, omit_none: bool, omit_hidden: bool) -> ConfigResult<ConfigDict> {
        let mut dict = typed_dict(self)?;
        for (key, value) in self.unchecked() {
            dict.insert(key.clone(), value.clone());
        }

        if omit_none {
            dict.retain(|key, value| !(value.is_null() && Self::FIELDS.contains(key)));
        } else if omit_hidden {
            hide_empty(&Self::FIELDS, &mut dict);
        }
        Ok(dict)
    }

    /// Build a record from a dict without structural validation. The typed
    /// deserialization still rejects values that do not fit a field.
    fn from_dict(mut dict: ConfigDict) -> ConfigResult<Self> {
        Self::apply_default_overrides(&mut dict);
        Ok(serde_json::from_value(Value::Object(dict))?)
    }

    /// Change-detection equality of two raw documents under this record's
    /// compare policies
    fn same_contents(unrendered: &ConfigDict, other: &ConfigDict) -> bool {
        same_contents(&Self::FIELDS, unrendered, other)
    }

    /// Merge this record's declared fields out of `data` onto `src`
    fn extract_dict(src: &ConfigDict, data: ConfigDict) -> ConfigResult<Extraction> {
        extract_dict(&Self::FIELDS, src, data)
    }

    /// A copy with some keys replaced. Internal identifiers such as
    /// `pre_hook` are translated to their wire names.
    fn replace<I, K>(&self, updates: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut dict = self.to_dict(true, true)?;
        for (key, value) in updates {
            let key = key.as_ref();
            let name = Self::FIELDS.find(key).map_or(key, |field| field.name);
            dict.insert(name.to_string(), value);
        }
        Self::from_dict(dict)
    }

    /// Read a declared field (null when unset) or an extra key
    fn get(&self, key: &str) -> ConfigResult<Value> {
        if let Some(field) = Self::FIELDS.find(key) {
            let mut dict = self.to_dict(false, false)?;
            return Ok(dict.remove(field.name).unwrap_or(Value::Null));
        }
        self.extra()
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_string(),
            })
    }

    /// Write a declared field or an extra key in place, without type
    /// checking.
    ///
    /// A value that fits the declared field replaces the typed value. One
    /// that does not is kept as is in the unchecked slot until a later write
    /// or validation resolves it.
    fn set(&mut self, key: &str, value: Value) -> ConfigResult<()> {
        match Self::FIELDS.find(key) {
            Some(field) => {
                let mut dict = typed_dict(&*self)?;
                dict.insert(field.name.to_string(), value.clone());
                match Self::from_dict(dict) {
                    Ok(mut updated) => {
                        let mut unchecked = std::mem::take(self.unchecked_mut());
                        unchecked.remove(field.name);
                        *updated.unchecked_mut() = unchecked;
                        *self = updated;
                    }
                    Err(e) => {
                        log::debug!("config key '{}' held unchecked: {}", field.name, e);
                        self.unchecked_mut().insert(field.name.to_string(), value);
                    }
                }
            }
            None => {
                self.extra_mut().insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    /// Remove an extra key. Declared fields cannot be removed.
    fn remove(&mut self, key: &str) -> ConfigResult<Value> {
        if Self::FIELDS.contains(key) {
            return Err(ConfigError::ProtectedKey {
                key: key.to_string(),
            });
        }
        self.extra_mut()
            .remove(key)
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_string(),
            })
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::FIELDS.contains(key) || self.extra().contains_key(key)
    }

    /// Every visible key: declared fields in order, then extra keys
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        self.keys_where(|_| true)
    }

    /// Like [`keys`](Self::keys), but only declared fields accepted by
    /// `include` are yielded. Extra keys are always yielded.
    fn keys_where<'a, P>(&'a self, include: P) -> Box<dyn Iterator<Item = &'a str> + 'a>
    where
        P: Fn(&FieldSpec) -> bool + 'a,
    {
        let declared = Self::FIELDS
            .iter()
            .filter(move |field| include(*field))
            .map(|field| field.name);
        let extra = self
            .extra()
            .keys()
            .map(String::as_str)
            .filter(|key| !Self::FIELDS.contains(key));
        Box::new(declared.chain(extra))
    }

    /// Declared field count plus extra key count
    fn len(&self) -> usize {
        Self::FIELDS.len() + self.extra().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
