//! Raw argument snapshots for service invocations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque key-value snapshot of the input handed to a service.
///
/// An `Args` value is captured once at the start of an invocation and
/// never mutated afterwards; the execution core clones it for the
/// filtered view rather than editing it in place. Values are untyped
/// JSON so callers can pass through whatever the outer layer decoded.
///
/// # Example
///
/// ```rust
/// use groundwork::Args;
/// use serde_json::json;
///
/// let args = Args::new()
///     .with("email", "ada@example.com")
///     .with("age", 36)
///     .with("tags", json!(["admin"]));
///
/// assert_eq!(args.len(), 3);
/// assert!(args.contains("email"));
/// assert_eq!(args.get("age"), Some(&json!(36)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Args(Map<String, Value>);

impl Args {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add a field, consuming and returning the set for chaining.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Look up a field's value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Check whether a field is present.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Iterate over fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Args {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Args> for Value {
    fn from(args: Args) -> Self {
        Value::Object(args.0)
    }
}

impl FromIterator<(String, Value)> for Args {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}
