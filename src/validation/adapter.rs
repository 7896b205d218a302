//! The validation and filtering operations consumed by the core.
//!
//! Both operations are pure: same args and constraints in, same result
//! out, no side effects. `validate` reports every failing message per
//! field in rule-declaration order; the execution core keeps only the
//! first per field at construction time, but callers of the adapter
//! get all of them.

use crate::core::fields::start_case;
use crate::core::Args;
use crate::validation::constraints::ConstraintSet;
use crate::validation::rules::RuleResult;
use std::collections::BTreeMap;
use stillwater::validation::Validation;

/// Violations keyed by field, each an ordered non-empty message list.
///
/// Messages are fully rendered: the field's Start Case name followed by
/// the rule message, e.g. `"Email can't be blank"`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Violations(BTreeMap<String, Vec<String>>);

impl Violations {
    /// Whether the input satisfied every declared constraint.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violated fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages for one field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Iterate over violated fields and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

/// Check `args` against every rule in `constraints`.
///
/// Returns an empty mapping when the input satisfies every constraint;
/// otherwise, per violated field, the ordered list of rendered messages
/// with the first one authoritative.
pub fn validate(args: &Args, constraints: &ConstraintSet) -> Violations {
    let mut violations = BTreeMap::new();
    for (field, rules) in constraints.iter() {
        let value = args.get(field);
        let checks: Vec<RuleResult> = rules.iter().map(|rule| rule.check(value)).collect();
        if let Validation::Failure(messages) = Validation::all_vec(checks).map(|_| ()) {
            let rendered: Vec<String> = messages
                .iter()
                .map(|message| format!("{} {}", start_case(field), message))
                .collect();
            violations.insert(field.to_string(), rendered);
        }
    }
    Violations(violations)
}

/// Keep only the fields of `args` that `constraints` declares.
///
/// Values pass through unmodified; there is no coercion.
pub fn filter(args: &Args, constraints: &ConstraintSet) -> Args {
    args.iter()
        .filter(|(field, _)| constraints.declares(field))
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect()
}
