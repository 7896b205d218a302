//! The inspection invocation contract
//!
//! This demo walks through `execute`: the entry point that never raises
//! on business or validation errors and instead returns the terminal
//! instance for inspection.
//!
//! Key concepts:
//! - Reading successful/failed/result/errors off the outcome instance
//! - The raw vs filtered argument views
//! - Accumulating several errors on one field
//!
//! Run with: cargo run --example outcome_inspection

use async_trait::async_trait;
use groundwork::validation::rules::{integer, presence};
use groundwork::{execute, Args, ConstraintSet, Context, Execution, Service};
use serde::Deserialize;
use std::convert::Infallible;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReserveSeats {
    event: String,
    seat_count: Option<i64>,
}

#[async_trait]
impl Service for ReserveSeats {
    const NAME: &'static str = "ReserveSeats";
    type Output = u32;
    type Error = Infallible;

    fn constraints() -> ConstraintSet {
        ConstraintSet::builder()
            .rule("event", presence())
            .rule("seatCount", integer())
            .build()
    }

    async fn logic(&self, exec: &mut Execution) -> Result<u32, Infallible> {
        let requested = self.seat_count.unwrap_or(1);
        if requested < 1 {
            exec.add_error("seatCount", "must be at least 1");
        }
        if requested > 8 {
            exec.add_error("seatCount", "exceeds the per-booking limit");
            exec.add_error("seatCount", "requires a group booking instead");
        }
        Ok(requested.clamp(1, 8) as u32)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== Inspection Contract Example ===\n");

    // Example 1: a successful reservation
    println!("Example 1: Success");
    let args = Args::new().with("event", "rustconf").with("seatCount", 3);
    let instance = execute::<ReserveSeats>(args, Context::for_caller("demo"))
        .await
        .unwrap_or_else(|never| match never {});
    println!("  successful: {:?}", instance.successful());
    println!("  result:     {:?}\n", instance.result());

    // Example 2: validation failure, logic skipped
    println!("Example 2: Validation Failure");
    let args = Args::new().with("seatCount", "three").with("debug", true);
    let instance = execute::<ReserveSeats>(args, Context::for_caller("demo"))
        .await
        .unwrap_or_else(|never| match never {});
    println!("  failed:   {:?}", instance.failed());
    println!("  errors:   {}", instance.errors());
    println!("  raw args kept undeclared field: {}", instance.args().contains("debug"));
    println!(
        "  filtered args dropped it:       {}\n",
        !instance.filtered_args().contains("debug")
    );

    // Example 3: several business-rule errors on one field
    println!("Example 3: Accumulated Errors");
    let args = Args::new().with("event", "rustconf").with("seatCount", 40);
    let instance = execute::<ReserveSeats>(args, Context::for_caller("demo"))
        .await
        .unwrap_or_else(|never| match never {});
    println!("  failed: {:?}", instance.failed());
    if let Some(entry) = instance.errors().field("ReserveSeats", "seatCount") {
        for message in entry.messages() {
            println!("    - {message}");
        }
    }

    println!("\nKey Takeaways:");
    println!("  - execute always hands back the instance; no catch needed");
    println!("  - successful/failed stay unset until execution is attempted");
    println!("  - every error on a field is preserved, in call order");
}
