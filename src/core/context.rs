//! Ambient caller context threaded through every invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Caller and request metadata for one service invocation.
///
/// The context is captured by the entry point, stored verbatim on the
/// instance, and carried on every diagnostic event the core emits. It
/// is an explicit parameter by design: there is no ambient or global
/// request state anywhere in the crate.
///
/// # Example
///
/// ```rust
/// use groundwork::Context;
/// use serde_json::json;
///
/// let context = Context::for_caller("user-42")
///     .with_meta("ip", "203.0.113.7")
///     .with_meta("roles", json!(["admin"]));
///
/// assert_eq!(context.caller(), Some("user-42"));
/// assert_eq!(context.meta("ip"), Some(&json!("203.0.113.7")));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Context {
    request_id: Uuid,
    caller: Option<String>,
    received_at: DateTime<Utc>,
    metadata: Map<String, Value>,
}

impl Context {
    /// Create an anonymous context with a fresh request id.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            caller: None,
            received_at: Utc::now(),
            metadata: Map::new(),
        }
    }

    /// Create a context attributed to a caller identity.
    pub fn for_caller(caller: impl Into<String>) -> Self {
        Self {
            caller: Some(caller.into()),
            ..Self::new()
        }
    }

    /// Attach a metadata entry, consuming and returning the context.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Unique id for this request.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Caller identity, if one was attributed.
    pub fn caller(&self) -> Option<&str> {
        self.caller.as_deref()
    }

    /// When the request entered the system.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Look up a metadata entry.
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_context_is_anonymous() {
        let context = Context::new();
        assert_eq!(context.caller(), None);
        assert_eq!(context.meta("anything"), None);
    }

    #[test]
    fn for_caller_records_identity() {
        let context = Context::for_caller("user-7");
        assert_eq!(context.caller(), Some("user-7"));
    }

    #[test]
    fn each_context_gets_a_distinct_request_id() {
        let a = Context::new();
        let b = Context::new();
        assert_ne!(a.request_id(), b.request_id());
    }

    #[test]
    fn metadata_is_retrievable() {
        let context = Context::new()
            .with_meta("ip", "198.51.100.1")
            .with_meta("attempt", 2);
        assert_eq!(context.meta("ip"), Some(&json!("198.51.100.1")));
        assert_eq!(context.meta("attempt"), Some(&json!(2)));
    }

    #[test]
    fn display_renders_json() {
        let context = Context::for_caller("user-7");
        let rendered = context.to_string();
        assert!(rendered.contains("\"caller\":\"user-7\""));
        assert!(rendered.contains("request_id"));
    }

    #[test]
    fn round_trips_through_serde() {
        let context = Context::for_caller("user-7").with_meta("k", "v");
        let json = serde_json::to_string(&context).unwrap();
        let back: Context = serde_json::from_str(&json).unwrap();
        assert_eq!(context, back);
    }
}
