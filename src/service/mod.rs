//! The service execution core.
//!
//! Every business operation in a system built on this crate is one
//! implementation of the [`Service`] trait, driven through the same
//! lifecycle: construct (validate + whitelist the input), execute the
//! business logic at most once, accumulate structured per-field
//! errors, and surface the outcome through one of two contracts:
//!
//! - [`run`] returns the logic's value or raises the final error map
//!   as a structured failure;
//! - [`execute`] never fails on structured errors and returns the
//!   terminal [`Instance`] for inspection.
//!
//! Unexpected errors from the logic itself propagate unchanged through
//! both, never folded into the structured map.

mod errors;
mod execution;
mod instance;

pub use errors::{ErrorBucket, ErrorMap, FieldErrors, RunError};
pub use execution::Execution;
pub use instance::Instance;

use crate::core::{Args, Context};
use crate::validation::ConstraintSet;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// One business operation.
///
/// The implementing struct's own named fields are the operation's typed
/// parameters: they are populated by deserializing the filtered input,
/// so a field declared in [`constraints`](Service::constraints) with a
/// `#[serde(rename_all = "camelCase")]` struct lands on the matching
/// field with no reflection. Optional inputs are `Option` fields.
///
/// # Example
///
/// ```rust
/// use groundwork::validation::rules::{length, presence};
/// use groundwork::{ConstraintSet, Execution, Service};
/// use serde::Deserialize;
/// use std::convert::Infallible;
///
/// #[derive(Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct GreetUser {
///     name: String,
///     nickname: Option<String>,
/// }
///
/// #[async_trait::async_trait]
/// impl Service for GreetUser {
///     const NAME: &'static str = "GreetUser";
///     type Output = String;
///     type Error = Infallible;
///
///     fn constraints() -> ConstraintSet {
///         ConstraintSet::builder()
///             .rule("name", presence())
///             .rule("name", length(1, 64))
///             .declare("nickname")
///             .build()
///     }
///
///     async fn logic(&self, _exec: &mut Execution) -> Result<String, Infallible> {
///         let name = self.nickname.as_deref().unwrap_or(&self.name);
///         Ok(format!("Hello, {name}!"))
///     }
/// }
/// ```
#[async_trait]
pub trait Service: DeserializeOwned + Send + Sync + Sized {
    /// Stable operation identity; keys this operation's error bucket
    /// and tags every diagnostic event.
    const NAME: &'static str;

    /// The value produced by successful business logic.
    type Output: Send;

    /// The unexpected-error channel of the business logic. Use
    /// [`std::convert::Infallible`] for logic that only ever fails
    /// through the structured error map.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The declared constraint set for this operation's input.
    ///
    /// Defaults to an empty set: nothing validated, every input field
    /// filtered away.
    fn constraints() -> ConstraintSet {
        ConstraintSet::new()
    }

    /// The business logic. Runs at most once per invocation, only when
    /// input validation passed. May record structured errors through
    /// `exec` (which fail the invocation without interrupting the
    /// logic) and may return `Err` for unexpected faults (which
    /// propagate to the caller unchanged).
    async fn logic(&self, exec: &mut Execution) -> Result<Self::Output, Self::Error>;
}

/// Invoke `S`, returning the logic's value or raising the error map.
///
/// The transparent "value or fail" contract: `Ok` carries exactly what
/// the logic produced; a non-empty final error map (from validation or
/// from logic-time `add_error` calls) becomes [`RunError::Failed`], and
/// an unexpected logic error becomes [`RunError::Fault`].
///
/// Emits `wrap = "start"` / `wrap = "end"` info events bracketing the
/// invocation; the end event is skipped on failure.
pub async fn run<S: Service>(args: Args, context: Context) -> Result<S::Output, RunError<S::Error>> {
    tracing::info!(service = S::NAME, context = %context, wrap = "start", "service started");
    let mut instance = Instance::<S>::new(args, context);
    instance.try_executing().await.map_err(RunError::Fault)?;
    let value = instance.into_value().map_err(RunError::Failed)?;
    tracing::info!(service = S::NAME, wrap = "end", "service finished");
    Ok(value)
}

/// Invoke `S`, returning the terminal instance regardless of outcome.
///
/// The inspection contract: structured errors never raise here, so the
/// caller reads `successful`/`failed`/`errors` off the returned
/// [`Instance`]. Only an unexpected error from the business logic
/// propagates as `Err`.
///
/// Emits `wrap = "start"` / `wrap = "end"` info events bracketing the
/// invocation.
pub async fn execute<S: Service>(args: Args, context: Context) -> Result<Instance<S>, S::Error> {
    tracing::info!(service = S::NAME, context = %context, wrap = "start", "service started");
    let mut instance = Instance::<S>::new(args, context);
    instance.try_executing().await?;
    tracing::info!(service = S::NAME, wrap = "end", "service finished");
    Ok(instance)
}
