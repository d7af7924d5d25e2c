//! Repository layer for review persistence.
//!
//! # Responsibility
//! - Define the review data access contract and its SQLite implementation.
//! - Own the identity map that keeps one live instance per persisted id.
//!
//! # Invariants
//! - Every write path works on values that already passed field validation.
//! - Every read path re-validates stored rows instead of trusting them.

pub mod cache;
pub mod employee_repo;
pub mod review_repo;
