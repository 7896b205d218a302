//! The raising invocation contract
//!
//! This demo walks through `run`: the "value or fail" entry point that
//! returns the business logic's result on success and raises the
//! structured error map otherwise.
//!
//! Key concepts:
//! - Declaring constraints on a service's input
//! - Typed parameters populated from the filtered input
//! - Business-rule errors recorded during logic
//! - The structured error payload surfaced to callers
//!
//! Run with: cargo run --example user_signup

use async_trait::async_trait;
use groundwork::validation::rules::{length, presence};
use groundwork::{run, Args, ConstraintSet, Context, Execution, RunError, Service};
use serde::Deserialize;
use std::convert::Infallible;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupUser {
    email: String,
    name: String,
}

#[async_trait]
impl Service for SignupUser {
    const NAME: &'static str = "SignupUser";
    type Output = String;
    type Error = Infallible;

    fn constraints() -> ConstraintSet {
        ConstraintSet::builder()
            .rule("email", presence())
            .rule("name", presence())
            .rule("name", length(2, 32))
            .build()
    }

    async fn logic(&self, exec: &mut Execution) -> Result<String, Infallible> {
        if self.email.ends_with("@taken.example") {
            exec.add_error_with_status("email", "is already registered", 422);
        }
        Ok(format!("account created for {}", self.name))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== Raising Contract Example ===\n");

    // Example 1: valid input returns the logic's value
    println!("Example 1: Valid Input");
    let args = Args::new().with("email", "ada@example.com").with("name", "Ada");
    match run::<SignupUser>(args, Context::for_caller("demo")).await {
        Ok(value) => println!("  Ok: {value}\n"),
        Err(failure) => println!("  Unexpected failure: {failure}\n"),
    }

    // Example 2: invalid input raises the error map without running logic
    println!("Example 2: Missing Fields");
    let args = Args::new().with("name", "A");
    match run::<SignupUser>(args, Context::for_caller("demo")).await {
        Ok(value) => println!("  Unexpected success: {value}\n"),
        Err(RunError::Failed(errors)) => println!("  Raised: {errors}\n"),
        Err(RunError::Fault(fault)) => match fault {},
    }

    // Example 3: a business-rule error discovered mid-logic
    println!("Example 3: Business-Rule Failure");
    let args = Args::new()
        .with("email", "ada@taken.example")
        .with("name", "Ada");
    match run::<SignupUser>(args, Context::for_caller("demo")).await {
        Ok(value) => println!("  Unexpected success: {value}\n"),
        Err(RunError::Failed(errors)) => {
            println!("  Raised: {errors}");
            println!("  Status: {:?}\n", errors.status());
        }
        Err(RunError::Fault(fault)) => match fault {},
    }

    println!("Key Takeaways:");
    println!("  - run returns exactly what the logic produced on success");
    println!("  - a non-empty error map raises, whether it came from");
    println!("    validation or from add_error calls during logic");
    println!("  - the raised payload is the nested operation -> field map");
}
