//! Review repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide table lifecycle and CRUD APIs over the `reviews` table.
//! - Translate stored rows into live instances through the identity map.
//!
//! # Invariants
//! - Instances reach write paths only through validating constructors and
//!   setters, so writes never carry an invalid field.
//! - Loading a row whose id is already cached overwrites that instance in
//!   place and returns it, discarding unsaved in-memory edits.
//! - Row values are fully validated before any cached field is touched.

use crate::model::employee::{EmployeeId, EmployeeLookup};
use crate::model::review::{
    validate_employee_id, validate_summary, validate_year, Review, ReviewId, SharedReview,
};
use crate::repo::cache::ReviewCache;
use log::{debug, info, warn};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};
use std::cell::RefMut;
use std::rc::Rc;

pub use crate::error::{RepoError, RepoResult, ReviewValidationError};

const REVIEW_SELECT_SQL: &str = "SELECT
    id,
    year,
    summary,
    employee_id
FROM reviews";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    year INT,
    summary TEXT,
    employee_id INTEGER,
    FOREIGN KEY (employee_id) REFERENCES employees(id)
);";

const DROP_TABLE_SQL: &str = "DROP TABLE IF EXISTS reviews;";

/// Repository interface for review persistence.
pub trait ReviewRepository {
    /// Creates the `reviews` table when missing.
    fn create_table(&self) -> RepoResult<()>;
    /// Drops the `reviews` table when present.
    fn drop_table(&self) -> RepoResult<()>;
    /// Builds a validated, unsaved review.
    fn new_review(&self, year: i64, summary: &str, employee_id: EmployeeId)
        -> RepoResult<SharedReview>;
    /// Builds a validated review and saves it.
    fn create(&self, year: i64, summary: &str, employee_id: EmployeeId)
        -> RepoResult<SharedReview>;
    /// Inserts an unsaved review or updates a persisted one.
    ///
    /// Fails with `RepoError::DetachedInstance` when the identity map tracks
    /// a different live instance for the same id.
    fn save(&self, review: &SharedReview) -> RepoResult<()>;
    /// Re-persists current field values.
    fn update(&self, review: &SharedReview) -> RepoResult<()> {
        self.save(review)
    }
    /// Deletes a persisted review and clears its id. No-op when unsaved.
    fn delete(&self, review: &SharedReview) -> RepoResult<()>;
    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<SharedReview>>;
    /// Returns every stored review in datastore order.
    fn get_all(&self) -> RepoResult<Vec<SharedReview>>;
}

/// SQLite-backed review entity manager.
///
/// Statements run in autocommit mode, so each write is committed when the
/// call returns unless the caller opened a transaction on `conn`.
pub struct SqliteReviewRepository<'conn, L> {
    conn: &'conn Connection,
    employees: L,
    cache: ReviewCache,
}

impl<'conn, L: EmployeeLookup> SqliteReviewRepository<'conn, L> {
    /// Creates a repository with an empty identity map.
    pub fn new(conn: &'conn Connection, employees: L) -> Self {
        Self::with_cache(conn, employees, ReviewCache::new())
    }

    /// Creates a repository around a caller-provided identity map.
    pub fn with_cache(conn: &'conn Connection, employees: L, cache: ReviewCache) -> Self {
        Self {
            conn,
            employees,
            cache,
        }
    }

    /// Identity map backing this repository.
    pub fn cache(&self) -> &ReviewCache {
        &self.cache
    }

    /// Lookup used to validate `employee_id` values.
    ///
    /// Pass it to [`Review::set_employee_id`] when mutating a loaded review.
    pub fn employees(&self) -> &L {
        &self.employees
    }

    /// Resolves one `reviews` row to its live instance.
    ///
    /// A cached instance for the row id is overwritten in place and
    /// returned; otherwise a new instance is created and registered.
    fn instance_from_row(&self, row: &Row<'_>) -> RepoResult<SharedReview> {
        let id: ReviewId = row.get("id")?;
        let year = validate_year(integer_column(row, "year")?)?;
        let summary = validate_summary(text_column(row, "summary")?)?;
        let employee_id =
            validate_employee_id(integer_column(row, "employee_id")?, &self.employees)?;

        if let Some(existing) = self.cache.get(id) {
            borrow_review_mut(&existing)?.assign_validated(year, summary, employee_id);
            return Ok(existing);
        }

        let review = Review::from_validated(id, year, summary, employee_id).into_shared();
        self.cache.insert(id, Rc::clone(&review));
        Ok(review)
    }
}

impl<L: EmployeeLookup> ReviewRepository for SqliteReviewRepository<'_, L> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_TABLE_SQL)?;
        info!("event=table_create module=repo status=ok table=reviews");
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(DROP_TABLE_SQL)?;
        let evicted = self.cache.len();
        self.cache.clear();
        info!("event=table_drop module=repo status=ok table=reviews evicted={evicted}");
        Ok(())
    }

    fn new_review(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<SharedReview> {
        Review::new(year, summary, employee_id, &self.employees).map(Review::into_shared)
    }

    fn create(&self, year: i64, summary: &str, employee_id: EmployeeId) -> RepoResult<SharedReview> {
        let review = self.new_review(year, summary, employee_id)?;
        self.save(&review)?;
        Ok(review)
    }

    fn save(&self, review: &SharedReview) -> RepoResult<()> {
        let mut current = borrow_review_mut(review)?;

        let id = match current.id() {
            Some(id) => {
                if let Some(tracked) = self.cache.get(id) {
                    if !Rc::ptr_eq(&tracked, review) {
                        return Err(RepoError::DetachedInstance(id));
                    }
                }

                let changed = self.conn.execute(
                    "UPDATE reviews
                     SET
                        year = ?1,
                        summary = ?2,
                        employee_id = ?3
                     WHERE id = ?4;",
                    params![current.year(), current.summary(), current.employee_id(), id],
                )?;
                if changed == 0 {
                    warn!("event=review_save module=repo status=noop op=update id={id} note=row_absent");
                } else {
                    debug!("event=review_save module=repo status=ok op=update id={id}");
                }
                id
            }
            None => {
                self.conn.execute(
                    "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3);",
                    params![current.year(), current.summary(), current.employee_id()],
                )?;
                let id = self.conn.last_insert_rowid();
                current.set_id(id);
                debug!("event=review_save module=repo status=ok op=insert id={id}");
                id
            }
        };
        drop(current);

        self.cache.insert(id, Rc::clone(review));
        Ok(())
    }

    fn delete(&self, review: &SharedReview) -> RepoResult<()> {
        let mut current = borrow_review_mut(review)?;
        let Some(id) = current.id() else {
            return Ok(());
        };

        let changed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1;", [id])?;
        if changed == 0 {
            warn!("event=review_delete module=repo status=noop id={id} note=row_absent");
        } else {
            debug!("event=review_delete module=repo status=ok id={id}");
        }

        self.cache.remove(id);
        current.clear_id();
        Ok(())
    }

    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<SharedReview>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return self.instance_from_row(row).map(Some);
        }

        Ok(None)
    }

    fn get_all(&self) -> RepoResult<Vec<SharedReview>> {
        let mut stmt = self.conn.prepare(REVIEW_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut reviews = Vec::new();

        while let Some(row) = rows.next()? {
            reviews.push(self.instance_from_row(row)?);
        }

        Ok(reviews)
    }
}

fn borrow_review_mut(review: &SharedReview) -> RepoResult<RefMut<'_, Review>> {
    review
        .try_borrow_mut()
        .map_err(|_| RepoError::InstanceBorrowed)
}

// SQLite columns are dynamically typed, so stored values are checked for
// their storage class before the field rules run.
fn integer_column(row: &Row<'_>, column: &'static str) -> RepoResult<i64> {
    match row.get_ref(column)? {
        ValueRef::Integer(value) => Ok(value),
        _ => Err(ReviewValidationError::NotAnInteger { field: column }.into()),
    }
}

fn text_column(row: &Row<'_>, column: &'static str) -> RepoResult<String> {
    match row.get_ref(column)? {
        ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec())
            .map_err(|_| ReviewValidationError::NotText { field: column }.into()),
        ValueRef::Null => Ok(String::new()),
        _ => Err(ReviewValidationError::NotText { field: column }.into()),
    }
}
