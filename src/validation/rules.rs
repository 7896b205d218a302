//! Per-field validation rules.
//!
//! A `Rule` checks one field's value and reports every way it fails,
//! using Stillwater's `Validation` type to accumulate violations
//! instead of stopping at the first one. Rule messages are suffixes
//! ("can't be blank"); the adapter prefixes the human-readable field
//! name when it renders them.
//!
//! The built-ins cover the common cases; anything beyond them is a
//! custom `Rule` implementation or a `predicate` closure.

use regex::Regex;
use serde_json::Value;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of checking one field against one rule.
pub type RuleResult = Validation<(), NonEmptyVec<String>>;

/// A validation rule over a single field value.
///
/// `value` is `None` when the field is absent from the input. Every
/// rule except `presence` treats an absent or null value as passing,
/// so optional fields only need rules for when they are supplied.
///
/// Implementations must be pure and deterministic for identical inputs.
pub trait Rule: Send + Sync {
    fn check(&self, value: Option<&Value>) -> RuleResult;
}

fn absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Rule: the field must be present and non-blank.
pub struct Presence;

/// The field must be present, non-null, and non-blank.
///
/// Blank means an empty or whitespace-only string, an empty array, or
/// an empty object.
pub fn presence() -> Presence {
    Presence
}

impl Rule for Presence {
    fn check(&self, value: Option<&Value>) -> RuleResult {
        let blank = match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(Value::Object(entries)) => entries.is_empty(),
            Some(_) => false,
        };
        if blank {
            Validation::fail("can't be blank".to_string())
        } else {
            Validation::success(())
        }
    }
}

/// Rule: string or array length bounds.
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
}

/// The field, when present, must be a string or array within the given
/// length bounds (characters for strings, items for arrays).
///
/// Both bounds can fail at once only in degenerate configurations;
/// each failing bound reports its own message.
pub fn length(min: impl Into<Option<usize>>, max: impl Into<Option<usize>>) -> Length {
    Length {
        min: min.into(),
        max: max.into(),
    }
}

impl Rule for Length {
    fn check(&self, value: Option<&Value>) -> RuleResult {
        if absent(value) {
            return Validation::success(());
        }
        let measured = match value {
            Some(Value::String(s)) => Some(s.chars().count()),
            Some(Value::Array(items)) => Some(items.len()),
            _ => None,
        };
        let Some(measured) = measured else {
            return Validation::fail("has an invalid length".to_string());
        };

        let mut checks: Vec<RuleResult> = Vec::new();
        if let Some(min) = self.min {
            checks.push(if measured < min {
                Validation::fail(format!("is too short (minimum is {min} characters)"))
            } else {
                Validation::success(())
            });
        }
        if let Some(max) = self.max {
            checks.push(if measured > max {
                Validation::fail(format!("is too long (maximum is {max} characters)"))
            } else {
                Validation::success(())
            });
        }
        Validation::all_vec(checks).map(|_| ())
    }
}

/// Rule: the field must be numeric.
pub struct Numericality {
    only_integer: bool,
}

/// The field, when present, must be a number.
pub fn numericality() -> Numericality {
    Numericality {
        only_integer: false,
    }
}

/// The field, when present, must be an integer.
pub fn integer() -> Numericality {
    Numericality { only_integer: true }
}

impl Rule for Numericality {
    fn check(&self, value: Option<&Value>) -> RuleResult {
        if absent(value) {
            return Validation::success(());
        }
        match value {
            Some(Value::Number(n)) => {
                if self.only_integer && !(n.is_i64() || n.is_u64()) {
                    Validation::fail("must be an integer".to_string())
                } else {
                    Validation::success(())
                }
            }
            _ => Validation::fail("is not a number".to_string()),
        }
    }
}

/// Rule: the field must match a pattern.
pub struct Format {
    pattern: Regex,
}

/// The field, when present, must be a string matching `pattern`.
pub fn format(pattern: Regex) -> Format {
    Format { pattern }
}

impl Rule for Format {
    fn check(&self, value: Option<&Value>) -> RuleResult {
        if absent(value) {
            return Validation::success(());
        }
        match value {
            Some(Value::String(s)) if self.pattern.is_match(s) => Validation::success(()),
            _ => Validation::fail("is invalid".to_string()),
        }
    }
}

/// Rule: the field must be one of a fixed set of values.
pub struct Inclusion {
    allowed: Vec<Value>,
}

/// The field, when present, must equal one of `allowed`.
pub fn inclusion<I, V>(allowed: I) -> Inclusion
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Inclusion {
        allowed: allowed.into_iter().map(Into::into).collect(),
    }
}

impl Rule for Inclusion {
    fn check(&self, value: Option<&Value>) -> RuleResult {
        if absent(value) {
            return Validation::success(());
        }
        match value {
            Some(v) if self.allowed.contains(v) => Validation::success(()),
            _ => Validation::fail("is not included in the list".to_string()),
        }
    }
}

/// Rule: an arbitrary predicate with a fixed failure message.
pub struct Predicate {
    message: String,
    check: Box<dyn Fn(Option<&Value>) -> bool + Send + Sync>,
}

/// The field must satisfy `check`, otherwise `message` is reported.
///
/// This is the escape hatch for rule grammars the built-ins don't
/// cover; the closure sees the raw value (or `None` when absent).
pub fn predicate<F>(message: impl Into<String>, check: F) -> Predicate
where
    F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
{
    Predicate {
        message: message.into(),
        check: Box::new(check),
    }
}

impl Rule for Predicate {
    fn check(&self, value: Option<&Value>) -> RuleResult {
        if (self.check)(value) {
            Validation::success(())
        } else {
            Validation::fail(self.message.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messages(result: RuleResult) -> Vec<String> {
        match result {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    #[test]
    fn presence_rejects_absent_and_blank() {
        assert!(presence().check(None).is_failure());
        assert!(presence().check(Some(&Value::Null)).is_failure());
        assert!(presence().check(Some(&json!(""))).is_failure());
        assert!(presence().check(Some(&json!("   "))).is_failure());
        assert!(presence().check(Some(&json!([]))).is_failure());
        assert!(presence().check(Some(&json!({}))).is_failure());
    }

    #[test]
    fn presence_accepts_substantive_values() {
        assert!(presence().check(Some(&json!("x"))).is_success());
        assert!(presence().check(Some(&json!(0))).is_success());
        assert!(presence().check(Some(&json!(false))).is_success());
        assert!(presence().check(Some(&json!(["a"]))).is_success());
    }

    #[test]
    fn presence_message_is_cant_be_blank() {
        assert_eq!(messages(presence().check(None)), ["can't be blank"]);
    }

    #[test]
    fn length_skips_absent_values() {
        assert!(length(2, 5).check(None).is_success());
        assert!(length(2, 5).check(Some(&Value::Null)).is_success());
    }

    #[test]
    fn length_bounds_strings() {
        let rule = length(2, 5);
        assert!(rule.check(Some(&json!("ab"))).is_success());
        assert_eq!(
            messages(rule.check(Some(&json!("a")))),
            ["is too short (minimum is 2 characters)"]
        );
        assert_eq!(
            messages(rule.check(Some(&json!("abcdef")))),
            ["is too long (maximum is 5 characters)"]
        );
    }

    #[test]
    fn length_counts_array_items() {
        let rule = length(1, 2);
        assert!(rule.check(Some(&json!(["a", "b"]))).is_success());
        assert!(rule.check(Some(&json!(["a", "b", "c"]))).is_failure());
    }

    #[test]
    fn length_rejects_unmeasurable_values() {
        assert_eq!(
            messages(length(1, 2).check(Some(&json!(42)))),
            ["has an invalid length"]
        );
    }

    #[test]
    fn length_accepts_open_bounds() {
        let rule = length(2, None);
        assert!(rule.check(Some(&json!("very long string"))).is_success());
        assert!(rule.check(Some(&json!("a"))).is_failure());
    }

    #[test]
    fn numericality_accepts_numbers_only() {
        assert!(numericality().check(Some(&json!(1.5))).is_success());
        assert!(numericality().check(Some(&json!(3))).is_success());
        assert_eq!(
            messages(numericality().check(Some(&json!("3")))),
            ["is not a number"]
        );
    }

    #[test]
    fn integer_rejects_fractions() {
        assert!(integer().check(Some(&json!(3))).is_success());
        assert_eq!(
            messages(integer().check(Some(&json!(1.5)))),
            ["must be an integer"]
        );
    }

    #[test]
    fn format_matches_pattern() {
        let rule = format(Regex::new(r"^[a-z]+@[a-z]+\.[a-z]+$").unwrap());
        assert!(rule.check(Some(&json!("ada@example.com"))).is_success());
        assert_eq!(messages(rule.check(Some(&json!("nope")))), ["is invalid"]);
        assert!(rule.check(None).is_success());
    }

    #[test]
    fn inclusion_checks_membership() {
        let rule = inclusion(["small", "medium", "large"]);
        assert!(rule.check(Some(&json!("medium"))).is_success());
        assert_eq!(
            messages(rule.check(Some(&json!("huge")))),
            ["is not included in the list"]
        );
    }

    #[test]
    fn predicate_reports_its_message() {
        let rule = predicate("must be even", |value| {
            value.and_then(Value::as_i64).is_some_and(|n| n % 2 == 0)
        });
        assert!(rule.check(Some(&json!(4))).is_success());
        assert_eq!(messages(rule.check(Some(&json!(3)))), ["must be even"]);
    }
}
