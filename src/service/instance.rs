//! One invocation attempt of a service, from construction to outcome.

use crate::core::{Args, Context};
use crate::service::errors::ErrorMap;
use crate::service::execution::Execution;
use crate::service::Service;
use crate::validation::{filter, validate};

/// A single invocation attempt of service `S`.
///
/// One instance is created per entry-point call and never reused.
/// Construction runs validation and filtering synchronously; execution
/// happens once, via [`try_executing`](Instance::try_executing).
/// `successful` and `failed` stay `None` until execution is attempted
/// and are mutually exclusive afterwards.
pub struct Instance<S: Service> {
    args: Args,
    filtered_args: Args,
    service: Option<S>,
    exec: Execution,
    result: Option<S::Output>,
    successful: Option<bool>,
    failed: Option<bool>,
}

impl<S: Service> Instance<S> {
    /// Construct an instance: validate, whitelist, and prepare the
    /// typed service value.
    ///
    /// Validation failures never raise here; they populate the error
    /// map and defer failure signaling to execution time. Only the
    /// first adapter message per violated field is recorded. The typed
    /// service value is deserialized from the filtered args when the
    /// map is clean; a shape mismatch is recorded as a structured error
    /// under the `args` field.
    pub fn new(args: Args, context: Context) -> Self {
        let constraints = S::constraints();
        let mut exec = Execution::new(S::NAME, context);

        let violations = validate(&args, &constraints);
        if !violations.is_empty() {
            for (field, messages) in violations.iter() {
                if let Some(first) = messages.first() {
                    exec.record_first(field, first);
                }
            }
            tracing::debug!(
                operation = S::NAME,
                context = %exec.context(),
                args = %args,
                errors = %exec.errors(),
                "service input validation failed"
            );
        }

        let filtered_args = filter(&args, &constraints);
        let service = if exec.has_errors() {
            None
        } else {
            match serde_json::from_value::<S>(filtered_args.clone().into()) {
                Ok(service) => Some(service),
                Err(err) => {
                    exec.record_first("args", &format!("Args could not be read: {err}"));
                    tracing::debug!(
                        operation = S::NAME,
                        context = %exec.context(),
                        args = %filtered_args,
                        errors = %exec.errors(),
                        "service input validation failed"
                    );
                    None
                }
            }
        };

        Self {
            args,
            filtered_args,
            service,
            exec,
            result: None,
            successful: None,
            failed: None,
        }
    }

    /// Drive the instance to its terminal outcome.
    ///
    /// If the error map is non-empty, business logic is skipped and the
    /// instance fails. Otherwise the logic runs exactly once; errors it
    /// records still flip the outcome even though a value was produced,
    /// and an `Err` from the logic is logged and propagated unchanged.
    ///
    /// Calling this more than once on the same instance is unsupported.
    pub async fn try_executing(&mut self) -> Result<(), S::Error> {
        let Some(service) = self.service.as_ref().filter(|_| !self.exec.has_errors()) else {
            self.failed = Some(true);
            self.successful = Some(false);
            return Ok(());
        };

        match service.logic(&mut self.exec).await {
            Ok(value) => {
                self.result = Some(value);
            }
            Err(err) => {
                tracing::error!(
                    operation = S::NAME,
                    error = %err,
                    context = %self.exec.context(),
                    args = %self.args,
                    "exception raised in service"
                );
                return Err(err);
            }
        }

        let clean = !self.exec.has_errors();
        self.successful = Some(clean);
        self.failed = Some(!clean);
        Ok(())
    }

    /// The business logic's value, once produced.
    pub fn result(&self) -> Option<&S::Output> {
        self.result.as_ref()
    }

    /// The structured errors accumulated so far.
    pub fn errors(&self) -> &ErrorMap {
        self.exec.errors()
    }

    /// `None` until execution is attempted, then whether it succeeded.
    pub fn successful(&self) -> Option<bool> {
        self.successful
    }

    /// `None` until execution is attempted, then whether it failed.
    pub fn failed(&self) -> Option<bool> {
        self.failed
    }

    /// The ambient caller context.
    pub fn context(&self) -> &Context {
        self.exec.context()
    }

    /// The original input snapshot.
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// The declared-field subset of the input.
    pub fn filtered_args(&self) -> &Args {
        &self.filtered_args
    }

    /// Consume the instance into its value-or-errors outcome.
    ///
    /// `Ok` only when a value was produced and the final map is empty;
    /// a value produced alongside logic-time errors is discarded in
    /// favor of the errors.
    pub fn into_value(self) -> Result<S::Output, ErrorMap> {
        let clean = !self.exec.has_errors();
        match self.result {
            Some(value) if clean => Ok(value),
            _ => Err(self.exec.into_errors()),
        }
    }

    /// Consume the instance into its error map.
    pub fn into_errors(self) -> ErrorMap {
        self.exec.into_errors()
    }
}
