//! Review entity manager over SQLite.
//! Validates review fields, maps rows to live instances through an identity
//! map, and runs the fixed CRUD statements against the `reviews` table.

pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use error::{RepoError, RepoResult, ReviewValidationError};
pub use model::employee::{EmployeeId, EmployeeLookup};
pub use model::review::{Review, ReviewId, SharedReview, MIN_REVIEW_YEAR};
pub use repo::cache::ReviewCache;
pub use repo::employee_repo::SqliteEmployeeLookup;
pub use repo::review_repo::{ReviewRepository, SqliteReviewRepository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
