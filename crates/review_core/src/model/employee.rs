//! Employee lookup capability.
//!
//! Reviews reference employees by id only. The employee entity lives outside
//! this crate, so the review rules consume it through `EmployeeLookup`.

use crate::db::DbResult;
use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

/// Primary key of a row in the sibling `employees` table.
pub type EmployeeId = i64;

/// Resolves an employee id to "exists or not".
pub trait EmployeeLookup {
    /// Returns whether an employee with `id` currently exists.
    ///
    /// # Errors
    /// - Returns `DbError` when the backing store cannot be queried.
    fn employee_exists(&self, id: EmployeeId) -> DbResult<bool>;
}

impl<T: EmployeeLookup + ?Sized> EmployeeLookup for &T {
    fn employee_exists(&self, id: EmployeeId) -> DbResult<bool> {
        (**self).employee_exists(id)
    }
}

impl<T: EmployeeLookup + ?Sized> EmployeeLookup for Rc<T> {
    fn employee_exists(&self, id: EmployeeId) -> DbResult<bool> {
        (**self).employee_exists(id)
    }
}

// Fixed rosters, handy for fixtures and callers that already hold the ids.
impl EmployeeLookup for HashSet<EmployeeId> {
    fn employee_exists(&self, id: EmployeeId) -> DbResult<bool> {
        Ok(self.contains(&id))
    }
}

impl EmployeeLookup for BTreeSet<EmployeeId> {
    fn employee_exists(&self, id: EmployeeId) -> DbResult<bool> {
        Ok(self.contains(&id))
    }
}
