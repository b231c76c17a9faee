//! ff-jinja - Jinja templating layer for Featherflow
//!
//! Node templates see their config as a live `config` object: calling it
//! (`config(materialized='table')`) layers keyword arguments onto the record,
//! and `config.get`, `config.require`, `config.set`, item access and
//! iteration read or write it in place. [`JinjaEnvironment::render_node`]
//! returns the rendered text together with the resulting record.

pub mod environment;
pub mod error;
pub mod functions;

pub use environment::JinjaEnvironment;
pub use error::{JinjaError, JinjaResult};
pub use functions::ConfigObject;
