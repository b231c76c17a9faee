//! Per-field policy tags.
//!
//! Every declared config field carries three independent annotations: how a
//! new layer's value combines with the existing one ([`MergeBehavior`]),
//! whether an empty value is dropped from full serialization
//! ([`ShowBehavior`]), and whether the field takes part in change detection
//! ([`CompareBehavior`]). Fields that declare nothing get the defaults.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a field's incoming value combines with its existing value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MergeBehavior {
    /// Concatenate both values as lists, existing first
    Append,
    /// Shallow dict update, incoming keys win
    Update,
    /// Incoming value replaces the existing one
    #[default]
    Clobber,
}

/// Whether an empty value is dropped when serializing every field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShowBehavior {
    #[default]
    Show,
    Hide,
}

/// Whether a field participates in content comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompareBehavior {
    #[default]
    Include,
    Exclude,
}

impl MergeBehavior {
    /// Metadata key this axis is recorded under
    pub const METADATA_KEY: &'static str = "merge";

    pub fn as_str(&self) -> &'static str {
        match self {
            MergeBehavior::Append => "append",
            MergeBehavior::Update => "update",
            MergeBehavior::Clobber => "clobber",
        }
    }
}

impl ShowBehavior {
    /// Metadata key this axis is recorded under
    pub const METADATA_KEY: &'static str = "show_hide";

    pub fn as_str(&self) -> &'static str {
        match self {
            ShowBehavior::Show => "show",
            ShowBehavior::Hide => "hide",
        }
    }

    pub fn should_show(&self) -> bool {
        matches!(self, ShowBehavior::Show)
    }
}

impl CompareBehavior {
    /// Metadata key this axis is recorded under
    pub const METADATA_KEY: &'static str = "compare";

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareBehavior::Include => "include",
            CompareBehavior::Exclude => "exclude",
        }
    }

    pub fn should_include(&self) -> bool {
        matches!(self, CompareBehavior::Include)
    }
}

impl FromStr for MergeBehavior {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "append" => Ok(MergeBehavior::Append),
            "update" => Ok(MergeBehavior::Update),
            "clobber" => Ok(MergeBehavior::Clobber),
            _ => Err(ConfigError::InvalidPolicy {
                axis: Self::METADATA_KEY,
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for ShowBehavior {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "show" => Ok(ShowBehavior::Show),
            "hide" => Ok(ShowBehavior::Hide),
            _ => Err(ConfigError::InvalidPolicy {
                axis: Self::METADATA_KEY,
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for CompareBehavior {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "include" => Ok(CompareBehavior::Include),
            "exclude" => Ok(CompareBehavior::Exclude),
            _ => Err(ConfigError::InvalidPolicy {
                axis: Self::METADATA_KEY,
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for MergeBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for ShowBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for CompareBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three policy tags attached to one field.
///
/// Built with const methods so field tables can be declared as statics:
///
/// ```
/// # use ff_core::policy::{FieldPolicies, MergeBehavior, CompareBehavior, ShowBehavior};
/// const TAGS: FieldPolicies = FieldPolicies::DEFAULT.append().hide().exclude();
/// assert_eq!(TAGS.merge, MergeBehavior::Append);
/// assert_eq!(TAGS.show, ShowBehavior::Hide);
/// assert_eq!(TAGS.compare, CompareBehavior::Exclude);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub struct FieldPolicies {
    pub merge: MergeBehavior,
    #[serde(rename = "show_hide")]
    pub show: ShowBehavior,
    pub compare: CompareBehavior,
}

impl FieldPolicies {
    /// Clobber, Show, Include
    pub const DEFAULT: FieldPolicies = FieldPolicies {
        merge: MergeBehavior::Clobber,
        show: ShowBehavior::Show,
        compare: CompareBehavior::Include,
    };

    pub const fn append(self) -> Self {
        Self {
            merge: MergeBehavior::Append,
            ..self
        }
    }

    pub const fn update(self) -> Self {
        Self {
            merge: MergeBehavior::Update,
            ..self
        }
    }

    pub const fn hide(self) -> Self {
        Self {
            show: ShowBehavior::Hide,
            ..self
        }
    }

    pub const fn exclude(self) -> Self {
        Self {
            compare: CompareBehavior::Exclude,
            ..self
        }
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod tests;
