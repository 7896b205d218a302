//! Integration tests for the full service lifecycle: validation
//! short-circuit, the dual invocation contracts, error accumulation,
//! fault propagation, and instance isolation.

use async_trait::async_trait;
use groundwork::validation::rules::{length, presence};
use groundwork::{execute, run, Args, ConstraintSet, Context, Execution, RunError, Service};
use serde::Deserialize;
use std::convert::Infallible;
use thiserror::Error;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupUser {
    email: String,
    name: String,
    referrer: Option<String>,
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
            .declare("referrer")
            .build()
    }

    async fn logic(&self, exec: &mut Execution) -> Result<String, Infallible> {
        if self.email.ends_with("@taken.example") {
            exec.add_error_with_status("email", "is already registered", 422);
        }
        let suffix = self.referrer.as_deref().unwrap_or("direct");
        Ok(format!("user:{}:{suffix}", self.name))
    }
}

fn valid_signup() -> Args {
    Args::new().with("email", "ada@example.com").with("name", "Ada")
}

#[tokio::test]
async fn execute_fails_invalid_input_without_running_logic() {
    let instance = execute::<SignupUser>(Args::new().with("name", "Ada"), Context::new())
        .await
        .unwrap();

    assert_eq!(instance.failed(), Some(true));
    assert_eq!(instance.successful(), Some(false));
    assert!(instance.result().is_none());

    // Exactly the first violation message per violated field.
    let bucket = instance.errors().bucket("SignupUser").unwrap();
    assert_eq!(bucket.len(), 1);
    assert_eq!(
        instance.errors().field("SignupUser", "email").unwrap().first(),
        "Email can't be blank"
    );
}

#[tokio::test]
async fn execute_records_one_message_per_field_at_validation_time() {
    // "name" violates both presence and minimum length; only the first
    // adapter message is kept at this stage.
    let args = Args::new().with("email", "a@b.c").with("name", "");
    let instance = execute::<SignupUser>(args, Context::new()).await.unwrap();

    let entry = instance.errors().field("SignupUser", "name").unwrap();
    assert_eq!(entry.messages(), ["Name can't be blank"]);
}

#[tokio::test]
async fn run_raises_the_same_errors_execute_reports() {
    let args = Args::new().with("name", "Ada");

    let instance = execute::<SignupUser>(args.clone(), Context::new())
        .await
        .unwrap();
    let raised = run::<SignupUser>(args, Context::new()).await.unwrap_err();

    match raised {
        RunError::Failed(errors) => assert_eq!(&errors, instance.errors()),
        RunError::Fault(_) => panic!("expected a structured failure"),
    }
}

#[tokio::test]
async fn run_returns_exactly_the_logic_value_on_success() {
    let value = run::<SignupUser>(valid_signup(), Context::new())
        .await
        .unwrap();
    assert_eq!(value, "user:Ada:direct");

    let instance = execute::<SignupUser>(valid_signup(), Context::new())
        .await
        .unwrap();
    assert_eq!(instance.successful(), Some(true));
    assert_eq!(instance.failed(), Some(false));
    assert_eq!(instance.result(), Some(&"user:Ada:direct".to_string()));
}

#[tokio::test]
async fn logic_time_errors_fail_the_invocation_with_status() {
    let args = Args::new().with("email", "ada@taken.example").with("name", "Ada");

    let instance = execute::<SignupUser>(args.clone(), Context::new())
        .await
        .unwrap();
    assert_eq!(instance.failed(), Some(true));
    assert_eq!(instance.errors().status(), Some(422));
    assert_eq!(
        instance.errors().field("SignupUser", "email").unwrap().first(),
        "Email is already registered"
    );

    // The value the logic produced is discarded by the raising contract.
    let raised = run::<SignupUser>(args, Context::new()).await.unwrap_err();
    assert_eq!(raised.errors().unwrap().status(), Some(422));
}

#[tokio::test]
async fn undeclared_fields_never_reach_the_service() {
    let args = valid_signup().with("isAdmin", true);
    let instance = execute::<SignupUser>(args, Context::new()).await.unwrap();

    assert!(instance.args().contains("isAdmin"));
    assert!(!instance.filtered_args().contains("isAdmin"));
    assert_eq!(instance.successful(), Some(true));
}

mod error_accumulation {
    use super::*;

    #[derive(Deserialize)]
    struct AuditEntry {}

    #[async_trait]
    impl Service for AuditEntry {
        const NAME: &'static str = "AuditEntry";
        type Output = ();
        type Error = Infallible;

        async fn logic(&self, exec: &mut Execution) -> Result<(), Infallible> {
            exec.add_error("fieldOne", "is invalid");
            exec.add_error("fieldOne", "is also bad");
            Ok(())
        }
    }

    #[tokio::test]
    async fn repeated_field_errors_form_an_ordered_sequence() {
        let instance = execute::<AuditEntry>(Args::new(), Context::new())
            .await
            .unwrap();

        let entry = instance.errors().field("AuditEntry", "fieldOne").unwrap();
        assert_eq!(
            entry.messages(),
            ["Field One is invalid", "Field One is also bad"]
        );
        assert_eq!(instance.failed(), Some(true));
    }

    #[derive(Deserialize)]
    struct SloppyCaller {}

    #[async_trait]
    impl Service for SloppyCaller {
        const NAME: &'static str = "SloppyCaller";
        type Output = ();
        type Error = Infallible;

        async fn logic(&self, exec: &mut Execution) -> Result<(), Infallible> {
            exec.add_error("not_camel", "msg");
            Ok(())
        }
    }

    #[tokio::test]
    #[should_panic(expected = "must be lowerCamelCase")]
    async fn non_camel_case_field_is_a_programmer_error() {
        let _ = execute::<SloppyCaller>(Args::new(), Context::new()).await;
    }
}

mod fault_propagation {
    use super::*;

    #[derive(Debug, Error)]
    #[error("backend unavailable")]
    struct BackendDown;

    #[derive(Deserialize)]
    struct PingBackend {}

    #[async_trait]
    impl Service for PingBackend {
        const NAME: &'static str = "PingBackend";
        type Output = ();
        type Error = BackendDown;

        async fn logic(&self, _exec: &mut Execution) -> Result<(), BackendDown> {
            Err(BackendDown)
        }
    }

    #[tokio::test]
    async fn execute_propagates_logic_faults() {
        let outcome = execute::<PingBackend>(Args::new(), Context::new()).await;
        assert!(matches!(outcome, Err(BackendDown)));
    }

    #[tokio::test]
    async fn run_wraps_logic_faults_without_structuring_them() {
        let outcome = run::<PingBackend>(Args::new(), Context::new()).await;
        match outcome {
            Err(RunError::Fault(BackendDown)) => {}
            _ => panic!("expected the fault to propagate"),
        }
    }
}

mod nesting {
    use super::*;

    #[derive(Deserialize)]
    struct CreateAccount {}

    #[async_trait]
    impl Service for CreateAccount {
        const NAME: &'static str = "CreateAccount";
        type Output = ();
        type Error = Infallible;

        async fn logic(&self, exec: &mut Execution) -> Result<(), Infallible> {
            let inner = execute::<SignupUser>(Args::new(), exec.context().clone())
                .await
                .unwrap_or_else(|never| match never {});
            if inner.failed() == Some(true) {
                exec.add_error("account", "could not be provisioned");
                exec.merge_errors(inner.into_errors());
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn merged_errors_fill_absent_buckets_only() {
        let instance = execute::<CreateAccount>(Args::new(), Context::new())
            .await
            .unwrap();

        // Own bucket survives; the nested service's bucket is merged in.
        assert_eq!(
            instance.errors().field("CreateAccount", "account").unwrap().first(),
            "Account could not be provisioned"
        );
        assert!(instance.errors().bucket("SignupUser").is_some());
        assert_eq!(instance.failed(), Some(true));
    }
}

mod isolation {
    use super::*;

    #[tokio::test]
    async fn concurrent_invocations_do_not_share_state() {
        let (ok, bad) = tokio::join!(
            execute::<SignupUser>(valid_signup(), Context::for_caller("caller-a")),
            execute::<SignupUser>(Args::new().with("name", "Bo"), Context::for_caller("caller-b")),
        );
        let ok = ok.unwrap();
        let bad = bad.unwrap();

        assert_eq!(ok.successful(), Some(true));
        assert!(ok.errors().is_empty());
        assert_eq!(ok.context().caller(), Some("caller-a"));

        assert_eq!(bad.failed(), Some(true));
        assert!(bad.result().is_none());
        assert_eq!(bad.context().caller(), Some("caller-b"));
        assert!(bad.errors().field("SignupUser", "email").is_some());
        assert!(!bad.filtered_args().contains("email"));
        assert!(ok.filtered_args().contains("email"));
    }
}
