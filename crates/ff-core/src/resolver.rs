//! Layering and validation of config records.
//!
//! [`ConfigResolver`] owns the two external collaborators config resolution
//! needs: the adapter registry that supplies extension fields, and the
//! structural validator every merged document is checked with before it
//! becomes a typed record again.

use crate::adapter::AdapterRegistry;
use crate::error::ConfigResult;
use crate::merge::extract_dict;
use crate::record::{ConfigDict, ConfigRecord};
use crate::snapshot::{validate_snapshot_document, SnapshotVariant};
use crate::validation::{check, JsonSchemaValidator, StructuralValidator};
use serde_json::Value;

/// Applies config layers and validates the result
pub struct ConfigResolver {
    adapters: AdapterRegistry,
    validator: Box<dyn StructuralValidator>,
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("adapters", &self.adapters.names())
            .finish_non_exhaustive()
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new(AdapterRegistry::with_builtin(), JsonSchemaValidator)
    }
}

impl ConfigResolver {
    pub fn new(adapters: AdapterRegistry, validator: impl StructuralValidator + 'static) -> Self {
        Self {
            adapters,
            validator: Box::new(validator),
        }
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    pub fn adapters_mut(&mut self) -> &mut AdapterRegistry {
        &mut self.adapters
    }

    pub fn validator(&self) -> &dyn StructuralValidator {
        self.validator.as_ref()
    }

    /// Structurally validate `dict` as a `C` and build the record
    pub fn validate_dict<C: ConfigRecord>(&self, mut dict: ConfigDict) -> ConfigResult<C> {
        C::apply_default_overrides(&mut dict);
        let document = Value::Object(dict);
        check(self.validator(), &C::json_schema(), &document)?;
        Ok(serde_json::from_value(document)?)
    }

    /// Layer `data` on top of `config`.
    ///
    /// The record's own fields are merged first, each under its merge
    /// policy. The adapter's extension fields are merged next from what is
    /// left, and any remaining keys overwrite whatever `config` held for
    /// them. The merged document is validated before it is returned, so an
    /// error here always comes from `data`; `config` itself is untouched.
    pub fn update_from<C: ConfigRecord>(
        &self,
        config: &C,
        data: ConfigDict,
        adapter_type: &str,
    ) -> ConfigResult<C> {
        let adapter_fields = self.adapters.config_fields(adapter_type)?;
        let mut dict = config.to_dict(false, false)?;

        let own = C::extract_dict(&dict, data)?;
        dict.extend(own.merged);

        let adapter = extract_dict(&adapter_fields, &dict, own.remainder)?;
        dict.extend(adapter.merged);

        log::debug!(
            "Layering config: {} adapter field(s) for '{}', {} raw key(s)",
            adapter_fields.len(),
            adapter_type,
            adapter.remainder.len()
        );
        dict.extend(adapter.remainder);

        C::apply_default_overrides(&mut dict);
        let document = Value::Object(dict);
        check(self.validator(), &adapter_fields.json_schema(), &document)?;
        check(self.validator(), &C::json_schema(), &document)?;
        Ok(serde_json::from_value(document)?)
    }

    /// Apply `layers` in order, lowest precedence first
    pub fn resolve_layers<C, I>(&self, base: C, layers: I, adapter_type: &str) -> ConfigResult<C>
    where
        C: ConfigRecord,
        I: IntoIterator<Item = ConfigDict>,
    {
        layers
            .into_iter()
            .try_fold(base, |config, layer| {
                self.update_from(&config, layer, adapter_type)
            })
    }

    /// Rebuild `config` through validation, e.g. after template code wrote
    /// raw values into it
    pub fn finalize_and_validate<C: ConfigRecord>(&self, config: &C) -> ConfigResult<C> {
        self.validate_dict(config.to_dict(false, false)?)
    }

    /// Resolve a snapshot config to its strategy variant
    pub fn finalize_snapshot<C: ConfigRecord>(&self, config: &C) -> ConfigResult<SnapshotVariant> {
        let mut document = ConfigDict::new();
        document.insert(
            "config".to_string(),
            Value::Object(config.to_dict(true, true)?),
        );
        self.validate_snapshot_document(&Value::Object(document))
    }

    /// Resolve a `{config: ...}` document to its snapshot variant
    pub fn validate_snapshot_document(&self, document: &Value) -> ConfigResult<SnapshotVariant> {
        validate_snapshot_document(self.validator(), document)
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
