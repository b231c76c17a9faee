//! Jinja environment setup for Featherflow

use crate::error::{JinjaError, JinjaResult};
use crate::functions::ConfigObject;
use ff_core::{ConfigRecord, ConfigResolver, DEFAULT_ADAPTER};
use minijinja::{context, Environment, Value};
use std::sync::Arc;

/// Jinja templating environment for Featherflow
pub struct JinjaEnvironment<'a> {
    env: Environment<'a>,
    resolver: Arc<ConfigResolver>,
    adapter: String,
}

impl<'a> JinjaEnvironment<'a> {
    /// Create an environment whose `config()` layers through `resolver`
    /// with the given adapter's extension fields
    pub fn new(resolver: Arc<ConfigResolver>, adapter: impl Into<String>) -> Self {
        Self {
            env: Environment::new(),
            resolver,
            adapter: adapter.into(),
        }
    }

    pub fn adapter(&self) -> &str {
        &self.adapter
    }

    /// Render a template string with no node config in scope
    pub fn render(&self, template: &str) -> JinjaResult<String> {
        let result = self
            .env
            .render_str(template, ())
            .map_err(JinjaError::from)?;
        Ok(result)
    }

    /// Render a node template with `config` bound to a live copy of
    /// `config`, and return the rendered text with the record as the
    /// template left it, validated.
    pub fn render_node<C>(&self, template: &str, config: C) -> JinjaResult<(String, C)>
    where
        C: ConfigRecord + Send + Sync + 'static,
    {
        let object = ConfigObject::new(config, Arc::clone(&self.resolver), self.adapter.as_str());
        let config_value = Value::from_object(object);

        let rendered = self
            .env
            .render_str(template, context! { config => config_value.clone() })
            .map_err(JinjaError::from)?;

        let object = config_value
            .downcast_object_ref::<ConfigObject<C>>()
            .ok_or_else(|| JinjaError::Internal("config object changed type".to_string()))?;
        let record = object.record()?;
        let record = self.resolver.finalize_and_validate(&record)?;
        Ok((rendered, record))
    }
}

impl Default for JinjaEnvironment<'_> {
    fn default() -> Self {
        Self::new(Arc::new(ConfigResolver::default()), DEFAULT_ADAPTER)
    }
}

#[cfg(test)]
#[path = "environment_test.rs"]
mod tests;
