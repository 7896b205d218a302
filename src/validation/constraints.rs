//! Constraint sets: the declared rules for one operation's input.

use crate::validation::rules::Rule;
use std::collections::BTreeMap;
use std::fmt;

/// The declared per-field rules for one operation.
///
/// A constraint set is read-only configuration owned by the operation's
/// definition. It doubles as the field whitelist: filtering keeps only
/// fields the set declares, whether or not they carry rules.
///
/// # Example
///
/// ```rust
/// use groundwork::ConstraintSet;
/// use groundwork::validation::rules::{length, presence};
///
/// let constraints = ConstraintSet::builder()
///     .rule("email", presence())
///     .rule("name", length(1, 64))
///     .declare("nickname")
///     .build();
///
/// assert!(constraints.declares("email"));
/// assert!(constraints.declares("nickname"));
/// assert!(!constraints.declares("password"));
/// ```
#[derive(Default)]
pub struct ConstraintSet {
    fields: BTreeMap<String, Vec<Box<dyn Rule>>>,
}

impl ConstraintSet {
    /// An empty set: no declared fields, so filtering drops everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a set.
    pub fn builder() -> ConstraintSetBuilder {
        ConstraintSetBuilder::new()
    }

    /// Whether the set declares `field` (with or without rules).
    pub fn declares(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate over declared fields and their rules.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Box<dyn Rule>])> {
        self.fields
            .iter()
            .map(|(field, rules)| (field.as_str(), rules.as_slice()))
    }

    /// Declared field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintSet")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`ConstraintSet`].
#[derive(Default)]
pub struct ConstraintSetBuilder {
    fields: BTreeMap<String, Vec<Box<dyn Rule>>>,
}

impl ConstraintSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a rule to a field, declaring the field if needed.
    pub fn rule(mut self, field: impl Into<String>, rule: impl Rule + 'static) -> Self {
        self.fields.entry(field.into()).or_default().push(Box::new(rule));
        self
    }

    /// Declare a field without attaching rules, so filtering keeps it.
    pub fn declare(mut self, field: impl Into<String>) -> Self {
        self.fields.entry(field.into()).or_default();
        self
    }

    /// Finish the set.
    pub fn build(self) -> ConstraintSet {
        ConstraintSet {
            fields: self.fields,
        }
    }
}

/// Declare a [`ConstraintSet`] with less ceremony.
///
/// Fields map to bracketed rule lists; an empty list declares the field
/// for filtering without attaching rules.
///
/// # Example
///
/// ```rust
/// use groundwork::constraints;
/// use groundwork::validation::rules::{length, presence};
///
/// let set = constraints! {
///     email: [presence()],
///     name: [presence(), length(1, 64)],
///     nickname: [],
/// };
///
/// assert_eq!(set.len(), 3);
/// ```
#[macro_export]
macro_rules! constraints {
    ( $( $field:ident : [ $( $rule:expr ),* $(,)? ] ),* $(,)? ) => {{
        let builder = $crate::validation::ConstraintSet::builder();
        $(
            let builder = builder.declare(stringify!($field));
            $( let builder = builder.rule(stringify!($field), $rule); )*
        )*
        builder.build()
    }};
}
