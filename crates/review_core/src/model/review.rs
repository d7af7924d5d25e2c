//! Review domain model.
//!
//! # Responsibility
//! - Define the canonical in-memory shape of one performance review.
//! - Own field validation shared by construction, mutation and row loading.
//!
//! # Invariants
//! - `year` is >= `MIN_REVIEW_YEAR`.
//! - `summary` is non-empty after trimming surrounding whitespace.
//! - `employee_id` is positive and resolved through `EmployeeLookup` at the
//!   moment it is set.
//! - `id` is `None` until first save and again after delete.

use crate::error::{RepoResult, ReviewValidationError};
use crate::model::employee::{EmployeeId, EmployeeLookup};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Primary key assigned by the datastore on insert.
pub type ReviewId = i64;

/// Live review instance shared between callers and the identity map.
///
/// Every load of the same persisted id resolves to the same `SharedReview`.
pub type SharedReview = Rc<RefCell<Review>>;

/// Earliest accepted review year.
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// One performance-review record.
// No `Clone`: at most one live object per persisted id.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Review {
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: EmployeeId,
}

impl Review {
    /// Creates an unsaved review after validating every field.
    ///
    /// Fields are checked in declaration order (`year`, `summary`,
    /// `employee_id`); the first failure is returned.
    ///
    /// # Errors
    /// - `RepoError::Validation` when a field violates its invariant.
    /// - `RepoError::Db` when the employee lookup itself fails.
    pub fn new<L>(
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
        employees: &L,
    ) -> RepoResult<Self>
    where
        L: EmployeeLookup + ?Sized,
    {
        let year = validate_year(year)?;
        let summary = validate_summary(summary.into())?;
        let employee_id = validate_employee_id(employee_id, employees)?;
        Ok(Self {
            id: None,
            year,
            summary,
            employee_id,
        })
    }

    /// Wraps this review for sharing through the identity map.
    pub(crate) fn into_shared(self) -> SharedReview {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns whether this review has been written to the datastore.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Replaces the review year.
    ///
    /// The current value is left untouched when validation fails.
    pub fn set_year(&mut self, year: i64) -> Result<(), ReviewValidationError> {
        self.year = validate_year(year)?;
        Ok(())
    }

    /// Replaces the summary. The value is stored as given, not trimmed.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ReviewValidationError> {
        self.summary = validate_summary(summary.into())?;
        Ok(())
    }

    /// Points the review at another employee.
    ///
    /// # Errors
    /// - `RepoError::Validation` for non-positive or unknown ids.
    /// - `RepoError::Db` when the lookup fails.
    pub fn set_employee_id<L>(&mut self, employee_id: EmployeeId, employees: &L) -> RepoResult<()>
    where
        L: EmployeeLookup + ?Sized,
    {
        self.employee_id = validate_employee_id(employee_id, employees)?;
        Ok(())
    }

    /// Builds a review whose fields were already validated by the caller.
    pub(crate) fn from_validated(
        id: ReviewId,
        year: i64,
        summary: String,
        employee_id: EmployeeId,
    ) -> Self {
        Self {
            id: Some(id),
            year,
            summary,
            employee_id,
        }
    }

    /// Overwrites all mutable fields with values that were already validated.
    pub(crate) fn assign_validated(&mut self, year: i64, summary: String, employee_id: EmployeeId) {
        self.year = year;
        self.summary = summary;
        self.employee_id = employee_id;
    }

    pub(crate) fn set_id(&mut self, id: ReviewId) {
        self.id = Some(id);
    }

    pub(crate) fn clear_id(&mut self) {
        self.id = None;
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self.id {
            Some(id) => id.to_string(),
            None => "None".to_string(),
        };
        write!(
            f,
            "<Review {id}: {}, {}, Employee: {}>",
            self.year, self.summary, self.employee_id
        )
    }
}

pub(crate) fn validate_year(year: i64) -> Result<i64, ReviewValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ReviewValidationError::YearTooEarly {
            year,
            min: MIN_REVIEW_YEAR,
        });
    }
    Ok(year)
}

pub(crate) fn validate_summary(summary: String) -> Result<String, ReviewValidationError> {
    if summary.trim().is_empty() {
        return Err(ReviewValidationError::EmptySummary);
    }
    Ok(summary)
}

pub(crate) fn validate_employee_id<L>(employee_id: EmployeeId, employees: &L) -> RepoResult<EmployeeId>
where
    L: EmployeeLookup + ?Sized,
{
    if employee_id <= 0 {
        return Err(ReviewValidationError::NonPositiveEmployeeId(employee_id).into());
    }
    if !employees.employee_exists(employee_id)? {
        return Err(ReviewValidationError::UnknownEmployee(employee_id).into());
    }
    Ok(employee_id)
}
