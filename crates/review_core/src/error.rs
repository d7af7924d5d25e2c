//! Error types shared by the review model and repository.
//!
//! # Invariants
//! - `ReviewValidationError` is produced before any field or row is touched.
//! - Datastore failures are only ever reported through `RepoError::Db`.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Rejected field value for a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// A stored column held a non-integer value for an integer field.
    NotAnInteger { field: &'static str },
    /// A stored column held a non-text value for a text field.
    NotText { field: &'static str },
    YearTooEarly { year: i64, min: i64 },
    EmptySummary,
    NonPositiveEmployeeId(i64),
    UnknownEmployee(i64),
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnInteger { field } => write!(f, "{field} must be an integer"),
            Self::NotText { field } => write!(f, "{field} must be text"),
            Self::YearTooEarly { year, min } => {
                write!(f, "year must be {min} or later, got {year}")
            }
            Self::EmptySummary => write!(f, "summary cannot be empty"),
            Self::NonPositiveEmployeeId(id) => {
                write!(f, "employee id must be a positive integer, got {id}")
            }
            Self::UnknownEmployee(id) => write!(f, "employee {id} does not exist"),
        }
    }
}

impl Error for ReviewValidationError {}

/// Error returned by review construction, mutation and persistence.
#[derive(Debug)]
pub enum RepoError {
    /// A field value was rejected. Nothing was written.
    Validation(ReviewValidationError),
    /// The datastore rejected or failed a statement, or the employee lookup
    /// could not be answered.
    Db(DbError),
    /// The instance is mutably borrowed elsewhere and cannot be written to.
    InstanceBorrowed,
    /// The identity map already holds a different live instance for this id.
    /// Nothing was written.
    DetachedInstance(i64),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InstanceBorrowed => write!(f, "review instance is already borrowed"),
            Self::DetachedInstance(id) => write!(
                f,
                "review {id} is tracked by another live instance; reload it before saving"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InstanceBorrowed => None,
            Self::DetachedInstance(_) => None,
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
