//! Test severity: `warn` or `error`, in any letter casing.

use serde::{Deserialize, Serialize};

/// Build an anchored regex matching any of `patterns` case-insensitively,
/// one character class per letter (`warn` → `[Ww][Aa][Rr][Nn]`).
pub fn insensitive_patterns(patterns: &[&str]) -> String {
    let alternatives: Vec<String> = patterns
        .iter()
        .map(|pattern| {
            pattern
                .chars()
                .map(|c| format!("[{}{}]", c.to_uppercase(), c.to_lowercase()))
                .collect()
        })
        .collect();
    format!("^({})$", alternatives.join("|"))
}

pub(crate) fn severity_pattern() -> String {
    insensitive_patterns(&["warn", "error"])
}

/// Severity of a data test, preserving the casing it was written with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Severity(String);

impl Severity {
    /// Accept `warn` or `error` in any casing
    pub fn try_new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.eq_ignore_ascii_case("warn") || value.eq_ignore_ascii_case("error") {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_error(&self) -> bool {
        self.0.eq_ignore_ascii_case("error")
    }

    pub fn is_warn(&self) -> bool {
        self.0.eq_ignore_ascii_case("warn")
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self("ERROR".to_string())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Severity::try_new(s.clone()).ok_or_else(|| {
            serde::de::Error::custom(format!("severity must be 'warn' or 'error', got '{s}'"))
        })
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
