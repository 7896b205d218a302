//! Core value types shared by the execution core.
//!
//! This module holds the plain data every invocation carries:
//! - `Args`: the immutable raw input snapshot
//! - `Context`: ambient caller/request metadata, threaded explicitly
//! - `fields`: field-name casing helpers used when rendering errors
//!
//! Everything here is pure data and pure functions; no side effects.

mod args;
mod context;
pub mod fields;

pub use args::Args;
pub use context::Context;
