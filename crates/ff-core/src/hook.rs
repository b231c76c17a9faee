//! Pre/post execution hooks attached to node configs.

use crate::serde_helpers::default_true;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Hook kinds a model config can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookType {
    PreHook,
    PostHook,
}

impl HookType {
    /// All model hook kinds
    pub const ALL: [HookType; 2] = [HookType::PreHook, HookType::PostHook];

    /// Config key the hook list lives under
    pub fn as_str(&self) -> &'static str {
        match self {
            HookType::PreHook => "pre-hook",
            HookType::PostHook => "post-hook",
        }
    }
}

impl std::fmt::Display for HookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single SQL statement run before or after a node
///
/// On the wire a hook is either a mapping (`{sql, transaction, index}`), a
/// bare SQL string, or a string holding a JSON-encoded mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawHook")]
pub struct Hook {
    /// Statement to execute
    pub sql: String,

    /// Run inside the node's transaction
    pub transaction: bool,

    /// Position among the node's hooks, if pinned
    pub index: Option<i64>,
}

impl Hook {
    /// A transactional hook with no pinned index
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            transaction: true,
            index: None,
        }
    }

    /// Interpret a hook string: a JSON mapping is decoded, anything else is
    /// taken as the SQL statement itself.
    pub fn from_source(source: &str) -> Self {
        if source.trim_start().starts_with('{') {
            if let Ok(fields) = serde_json::from_str::<HookFields>(source) {
                return fields.into();
            }
        }
        Self::new(source)
    }
}

#[derive(Debug, Deserialize)]
struct HookFields {
    sql: String,
    #[serde(default = "default_true")]
    transaction: bool,
    #[serde(default)]
    index: Option<i64>,
}

impl From<HookFields> for Hook {
    fn from(fields: HookFields) -> Self {
        Self {
            sql: fields.sql,
            transaction: fields.transaction,
            index: fields.index,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawHook {
    Source(String),
    Fields(HookFields),
}

impl From<RawHook> for Hook {
    fn from(raw: RawHook) -> Self {
        match raw {
            RawHook::Source(source) => Hook::from_source(&source),
            RawHook::Fields(fields) => fields.into(),
        }
    }
}

/// Schema for one hook entry on the wire
pub(crate) fn hook_schema() -> Value {
    json!({
        "anyOf": [
            {"type": "string"},
            {
                "type": "object",
                "properties": {
                    "sql": {"type": "string"},
                    "transaction": {"type": "boolean"},
                    "index": {"anyOf": [{"type": "integer"}, {"type": "null"}]}
                },
                "required": ["sql"],
                "additionalProperties": false
            }
        ]
    })
}

#[cfg(test)]
#[path = "hook_test.rs"]
mod tests;
