//! The mutable execution state handed to business logic.

use crate::core::fields::{is_lower_camel_case, start_case};
use crate::core::Context;
use crate::service::errors::ErrorMap;

/// Error sink and ambient context for one running invocation.
///
/// An `Execution` belongs to exactly one instance and is handed to the
/// business logic by mutable reference, so logic can record
/// business-rule errors discovered mid-run. Recording an error never
/// interrupts the logic; the instance reads the map afterwards to
/// decide the outcome.
pub struct Execution {
    operation: &'static str,
    context: Context,
    errors: ErrorMap,
}

impl Execution {
    pub(crate) fn new(operation: &'static str, context: Context) -> Self {
        Self {
            operation,
            context,
            errors: ErrorMap::new(),
        }
    }

    /// The identity of the operation being executed.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// The ambient caller context, passed through unmodified.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The errors recorded so far.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Whether any error has been recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Record a business-rule error for a field.
    ///
    /// The message is stored as the field's Start Case name followed by
    /// `message`; repeated errors on the same field are all preserved,
    /// in call order.
    ///
    /// # Panics
    ///
    /// Panics if `field` is not lowerCamelCase. That is a defect in the
    /// operation's own code, not bad input, so it fails fast instead of
    /// polluting the error map.
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.record(field, message, None);
    }

    /// Record a business-rule error and tag the map with a response
    /// status code. The first status recorded wins; later ones are
    /// ignored.
    ///
    /// # Panics
    ///
    /// Panics if `field` is not lowerCamelCase, like [`add_error`].
    ///
    /// [`add_error`]: Execution::add_error
    pub fn add_error_with_status(&mut self, field: &str, message: &str, status: u16) {
        self.record(field, message, Some(status));
    }

    /// Merge another error map into this one, keeping existing entries
    /// on conflict.
    pub fn merge_errors(&mut self, other: ErrorMap) {
        self.errors.merge_defaults(other);
    }

    fn record(&mut self, field: &str, message: &str, status: Option<u16>) {
        assert!(
            is_lower_camel_case(field),
            "field `{field}` must be lowerCamelCase in add_error()"
        );
        tracing::debug!(
            operation = self.operation,
            field,
            error = message,
            context = %self.context,
            errors = %self.errors,
            "custom validation failed"
        );
        if let Some(code) = status {
            self.errors.set_status(code);
        }
        self.errors
            .append(self.operation, field, format!("{} {}", start_case(field), message));
    }

    pub(crate) fn record_first(&mut self, field: &str, message: &str) {
        self.errors.insert_first(self.operation, field, message);
    }

    pub(crate) fn into_errors(self) -> ErrorMap {
        self.errors
    }
}
