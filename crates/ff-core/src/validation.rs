//! Structural validation of config documents.
//!
//! The engine that checks a document against a schema is pluggable through
//! [`StructuralValidator`]; [`JsonSchemaValidator`] is the default, backed by
//! the `jsonschema` crate. Validators report every violation they find and
//! [`best_match`] picks the one worth showing to the user.

use crate::error::{ConfigError, ConfigResult};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

/// One schema violation reported by a validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Keys and indices leading to the offending value
    pub path: Vec<String>,
    /// Schema keyword that failed (`required`, `type`, `enum`, `anyOf`, ...)
    pub rule: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: Vec<String>, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Dotted form of [`Self::path`]
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    fn is_union_rule(&self) -> bool {
        matches!(self.rule.as_str(), "anyOf" | "oneOf")
    }
}

impl From<Violation> for ConfigError {
    fn from(violation: Violation) -> Self {
        ConfigError::Validation {
            path: violation.dotted_path(),
            message: violation.message,
        }
    }
}

/// Checks a document against a JSON schema
pub trait StructuralValidator: Send + Sync {
    /// Every violation of `schema` in `document`; empty when valid
    fn validate(&self, schema: &Value, document: &Value) -> ConfigResult<Vec<Violation>>;
}

/// Draft 7 validation through the `jsonschema` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl StructuralValidator for JsonSchemaValidator {
    fn validate(&self, schema: &Value, document: &Value) -> ConfigResult<Vec<Violation>> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| ConfigError::Schema {
                message: e.to_string(),
            })?;

        let violations = match compiled.validate(document) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    let rule = error
                        .schema_path
                        .clone()
                        .into_vec()
                        .pop()
                        .unwrap_or_default();
                    let path = error.instance_path.clone().into_vec();
                    Violation::new(path, rule, error.to_string())
                })
                .collect(),
        };
        Ok(violations)
    }
}

/// Sort key for violations; lower is more relevant.
///
/// Deeper paths are more specific and rank first. A violation of the enum or
/// negation rule on the `strategy` key ranks after everything else: that is
/// the other snapshot variant rejecting the strategy, which says nothing
/// about what is wrong with the variant the user picked. Within the same
/// depth, plain rule failures rank ahead of `anyOf` / `oneOf`.
pub fn relevance(violation: &Violation) -> (i64, bool) {
    let touches_strategy = violation.path.iter().any(|segment| segment == "strategy");
    let weight = if touches_strategy && matches!(violation.rule.as_str(), "enum" | "not") {
        1
    } else {
        -(violation.path.len() as i64)
    };
    (weight, violation.is_union_rule())
}

/// The most relevant violation, if any
pub fn best_match(violations: impl IntoIterator<Item = Violation>) -> Option<Violation> {
    violations.into_iter().min_by_key(relevance)
}

/// Validate `document` and turn the most relevant violation into an error.
pub(crate) fn check(
    validator: &dyn StructuralValidator,
    schema: &Value,
    document: &Value,
) -> ConfigResult<()> {
    match best_match(validator.validate(schema, document)?) {
        Some(violation) => Err(violation.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
