//! Configuration value objects for the domain layer
//!
//! Shared by the infrastructure loader (which produces issues) and the
//! binary (which reports them).

pub mod validation;

pub use validation::{ConfigIssue, Severity, has_errors};
