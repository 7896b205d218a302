//! Structured error maps and the raising entry point's error type.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The message(s) recorded for one field.
///
/// A field starts as a single message and becomes an ordered sequence
/// the moment a second error is recorded; once a sequence, always a
/// sequence. Serializes untagged, so callers see either a string or an
/// array of strings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldErrors {
    One(String),
    Many(Vec<String>),
}

impl FieldErrors {
    /// The authoritative first message.
    pub fn first(&self) -> &str {
        match self {
            Self::One(message) => message,
            Self::Many(messages) => messages.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// All messages in recording order.
    pub fn messages(&self) -> Vec<&str> {
        match self {
            Self::One(message) => vec![message.as_str()],
            Self::Many(messages) => messages.iter().map(String::as_str).collect(),
        }
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(messages) => messages.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, message: String) {
        match self {
            Self::One(existing) => {
                *self = Self::Many(vec![std::mem::take(existing), message]);
            }
            Self::Many(messages) => messages.push(message),
        }
    }
}

/// One operation's field-to-messages bucket.
pub type ErrorBucket = BTreeMap<String, FieldErrors>;

/// The structured error payload of one invocation.
///
/// Shape: `{ [operationIdentity]: { [field]: message | [messages] },
/// status?: code }`. The `status` entry is reserved and written at most
/// once, first write winning. The map serializes (and `Display`s) in
/// exactly that caller-facing JSON shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ErrorMap {
    #[serde(flatten)]
    buckets: BTreeMap<String, ErrorBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no errors (and no status) have been recorded.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty() && self.status.is_none()
    }

    /// The recorded response status code, if any.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Record a status code; later writes are ignored.
    pub fn set_status(&mut self, code: u16) {
        if self.status.is_none() {
            self.status = Some(code);
        }
    }

    /// The bucket recorded for one operation identity.
    pub fn bucket(&self, operation: &str) -> Option<&ErrorBucket> {
        self.buckets.get(operation)
    }

    /// The entry recorded for one field of one operation.
    pub fn field(&self, operation: &str, field: &str) -> Option<&FieldErrors> {
        self.buckets.get(operation).and_then(|bucket| bucket.get(field))
    }

    /// Operation identities with recorded errors.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Record a message for a field only if the field has no entry yet.
    ///
    /// This is the construction-time path: one authoritative message
    /// per violated field.
    pub(crate) fn insert_first(&mut self, operation: &str, field: &str, message: &str) {
        self.buckets
            .entry(operation.to_string())
            .or_default()
            .entry(field.to_string())
            .or_insert_with(|| FieldErrors::One(message.to_string()));
    }

    /// Record a message for a field, appending when one exists already.
    ///
    /// This is the business-logic path: every message is preserved in
    /// call order.
    pub(crate) fn append(&mut self, operation: &str, field: &str, message: String) {
        let bucket = self.buckets.entry(operation.to_string()).or_default();
        match bucket.get_mut(field) {
            Some(existing) => existing.push(message),
            None => {
                bucket.insert(field.to_string(), FieldErrors::One(message));
            }
        }
    }

    /// Merge `other` into this map, keeping existing entries on
    /// conflict.
    ///
    /// Defaults semantics at the top level only: an operation bucket or
    /// status already present here is never overwritten.
    pub fn merge_defaults(&mut self, other: ErrorMap) {
        for (operation, bucket) in other.buckets {
            self.buckets.entry(operation).or_insert(bucket);
        }
        if let Some(code) = other.status {
            self.set_status(code);
        }
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// Failure of the raising entry point, [`run`](crate::service::run).
///
/// `Failed` carries the instance's final structured error map, whether
/// it came from input validation or business-rule errors recorded
/// during logic. `Fault` is an unexpected error raised by the business
/// logic itself, propagated unchanged and never folded into the map.
#[derive(Debug, Error)]
pub enum RunError<E: std::error::Error + 'static> {
    #[error("service failed: {0}")]
    Failed(ErrorMap),

    #[error(transparent)]
    Fault(#[from] E),
}

impl<E: std::error::Error + 'static> RunError<E> {
    /// The structured error map, when this is a `Failed`.
    pub fn errors(&self) -> Option<&ErrorMap> {
        match self {
            Self::Failed(errors) => Some(errors),
            Self::Fault(_) => None,
        }
    }
}
