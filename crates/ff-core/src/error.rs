//! Error types for ff-core

use thiserror::Error;

/// Core error type for node configuration handling
#[derive(Error, Debug)]
pub enum ConfigError {
    /// C001: Attempted to delete a declared field through the map interface
    #[error("[C001] Error, tried to delete config key \"{key}\": Cannot delete built-in keys")]
    ProtectedKey { key: String },

    /// C002: Key is neither a declared field nor present in the extra bucket
    #[error("[C002] Config key not found: {key}")]
    KeyNotFound { key: String },

    /// C003: Update-policy field holds a non-mapping value
    #[error("[C003] Cannot merge config field '{field}': expected dict, got {found}")]
    MergeType { field: String, found: String },

    /// C004: Policy tag outside its enumerated set
    #[error("[C004] Invalid {axis} value: {value}")]
    InvalidPolicy { axis: &'static str, value: String },

    /// C005: Document failed structural validation
    #[error("[C005] Invalid config at '{path}': {message}")]
    Validation { path: String, message: String },

    /// C006: No extension config registered for the adapter
    #[error("[C006] Unknown adapter '{name}'. Available adapters: {available}")]
    UnknownAdapter { name: String, available: String },

    /// C007: The validator could not compile a schema
    #[error("[C007] Invalid config schema: {message}")]
    Schema { message: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
