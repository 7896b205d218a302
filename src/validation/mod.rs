//! The validation and filtering adapter.
//!
//! Given raw input and a declared constraint set, this module produces
//! (a) a mapping of field to violation messages and (b) a filtered copy
//! of the input containing only declared fields. It uses Stillwater's
//! `Validation` type to accumulate every violation per field instead of
//! stopping at the first.
//!
//! The execution core consumes this adapter through two pure
//! operations, [`validate`] and [`filter`]; the rule grammar behind
//! them is the pluggable [`rules::Rule`] seam.
//!
//! # Example
//!
//! ```rust
//! use groundwork::validation::{filter, validate};
//! use groundwork::validation::rules::presence;
//! use groundwork::{Args, ConstraintSet};
//!
//! let constraints = ConstraintSet::builder()
//!     .rule("email", presence())
//!     .build();
//!
//! let args = Args::new().with("password", "hunter2");
//!
//! let violations = validate(&args, &constraints);
//! assert_eq!(
//!     violations.get("email"),
//!     Some(&["Email can't be blank".to_string()][..])
//! );
//!
//! let filtered = filter(&args, &constraints);
//! assert!(filtered.is_empty());
//! ```

mod adapter;
mod constraints;
pub mod rules;

pub use adapter::{filter, validate, Violations};
pub use constraints::{ConstraintSet, ConstraintSetBuilder};
