//! Domain model for performance reviews.
//!
//! # Responsibility
//! - Define the `Review` record and the rules its fields must satisfy.
//! - Define the employee lookup capability the review rules depend on.
//!
//! # Invariants
//! - A `Review` value never holds a field that failed validation.
//! - The persisted id is only assigned or cleared by the repository.

pub mod employee;
pub mod review;
