//! Field extraction and merging for config layering.

use crate::error::{ConfigError, ConfigResult};
use crate::field::FieldSet;
use crate::policy::MergeBehavior;
use crate::record::ConfigDict;
use serde_json::Value;

/// Result of [`extract_dict`]: the merged values of the covered fields, and
/// whatever the field set did not cover.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Covered fields, merged against the source document
    pub merged: ConfigDict,
    /// Incoming keys no field in the set claimed
    pub remainder: ConfigDict,
}

fn listify(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Combine an existing value with an incoming one under `behavior`.
///
/// `field` is only used for error messages.
pub fn merge_field_value(
    field: &str,
    behavior: MergeBehavior,
    existing: &Value,
    incoming: Value,
) -> ConfigResult<Value> {
    match behavior {
        MergeBehavior::Clobber => Ok(incoming),
        MergeBehavior::Append => {
            let mut merged = listify(existing.clone());
            merged.extend(listify(incoming));
            Ok(Value::Array(merged))
        }
        MergeBehavior::Update => {
            let Value::Object(existing) = existing else {
                return Err(ConfigError::MergeType {
                    field: field.to_string(),
                    found: existing.to_string(),
                });
            };
            match incoming {
                Value::Object(incoming) => {
                    let mut merged = existing.clone();
                    merged.extend(incoming);
                    Ok(Value::Object(merged))
                }
                other => Err(ConfigError::MergeType {
                    field: field.to_string(),
                    found: other.to_string(),
                }),
            }
        }
    }
}

/// Pull every field of `fields` out of `data` and merge it with the value
/// `src` holds for that field, following the field's merge policy. A field
/// absent from `src` takes the incoming value as is.
///
/// `data` is consumed; keys the field set does not cover come back in
/// [`Extraction::remainder`]. `src` is not modified.
pub fn extract_dict(
    fields: &FieldSet,
    src: &ConfigDict,
    mut data: ConfigDict,
) -> ConfigResult<Extraction> {
    let mut merged = ConfigDict::new();

    for field in fields.iter() {
        let Some(incoming) = data.remove(field.name) else {
            continue;
        };

        let value = match src.get(field.name) {
            None => incoming,
            Some(existing) => {
                merge_field_value(field.name, field.policies.merge, existing, incoming)?
            }
        };
        log::trace!(
            "merged config field '{}' ({})",
            field.name,
            field.policies.merge
        );
        merged.insert(field.name.to_string(), value);
    }

    Ok(Extraction {
        merged,
        remainder: data,
    })
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;
