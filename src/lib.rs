//! Groundwork: a service execution base.
//!
//! Every business operation is built from the same reusable lifecycle:
//! receive untrusted input plus an ambient caller context, validate and
//! filter that input against a declared rule set, execute business
//! logic exactly once, accumulate structured per-field errors, and
//! surface the outcome through one of two contracts — [`run`] raises a
//! structured failure, [`execute`] returns an inspectable outcome
//! instance and never raises on business errors.
//!
//! # Core Concepts
//!
//! - **Service**: one operation, declared as a struct whose fields are
//!   its typed parameters, via the [`Service`] trait
//! - **Constraints**: per-field validation rules owned by the
//!   operation's definition ([`ConstraintSet`])
//! - **Error map**: the nested `operation -> field -> message(s)`
//!   payload with an optional response status code ([`ErrorMap`])
//!
//! # Example
//!
//! ```rust
//! use groundwork::validation::rules::{length, presence};
//! use groundwork::{run, Args, ConstraintSet, Context, Execution, Service};
//! use serde::Deserialize;
//! use std::convert::Infallible;
//!
//! #[derive(Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct GreetUser {
//!     name: String,
//! }
//!
//! #[async_trait::async_trait]
//! impl Service for GreetUser {
//!     const NAME: &'static str = "GreetUser";
//!     type Output = String;
//!     type Error = Infallible;
//!
//!     fn constraints() -> ConstraintSet {
//!         ConstraintSet::builder()
//!             .rule("name", presence())
//!             .rule("name", length(1, 64))
//!             .build()
//!     }
//!
//!     async fn logic(&self, _exec: &mut Execution) -> Result<String, Infallible> {
//!         Ok(format!("Hello, {}!", self.name))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let args = Args::new().with("name", "Ada");
//! let greeting = run::<GreetUser>(args, Context::new()).await.unwrap();
//! assert_eq!(greeting, "Hello, Ada!");
//!
//! // Missing input raises the structured error map instead.
//! let failure = run::<GreetUser>(Args::new(), Context::new())
//!     .await
//!     .unwrap_err();
//! let errors = failure.errors().unwrap();
//! assert_eq!(
//!     errors.field("GreetUser", "name").unwrap().first(),
//!     "Name can't be blank"
//! );
//! # }
//! ```

pub mod core;
pub mod service;
pub mod validation;

// Re-export the working surface
pub use crate::core::{Args, Context};
pub use service::{execute, run, ErrorMap, Execution, FieldErrors, Instance, RunError, Service};
pub use validation::{ConstraintSet, Violations};
