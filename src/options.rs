//! Engine configuration options.
//!
//! Options are an opaque mapping handed to the engine when it builds its
//! execution scope. They are produced once, from a configuration file or
//! the empty default, and never mutated afterwards.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Read-only mapping of configuration keys to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(Map<String, Value>);

/// Returned when a configuration document is not a mapping at the top level.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("configuration must be a mapping, found {found}")]
pub struct NotAMapping {
    /// Kind of value found instead.
    pub found: &'static str,
}

impl Options {
    /// Return the empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no keys are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Options {
    type Error = NotAMapping;

    /// A `null` document, as produced by an empty YAML file, is the empty
    /// mapping.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            Value::Bool(_) => Err(NotAMapping { found: "a boolean" }),
            Value::Number(_) => Err(NotAMapping { found: "a number" }),
            Value::String(_) => Err(NotAMapping { found: "a string" }),
            Value::Array(_) => Err(NotAMapping { found: "a sequence" }),
        }
    }
}
