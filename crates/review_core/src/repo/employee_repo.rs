//! SQLite-backed employee existence checks.
//!
//! Only reads the sibling `employees` table; creating and maintaining that
//! table is the employee entity's job.

use crate::db::DbResult;
use crate::model::employee::{EmployeeId, EmployeeLookup};
use rusqlite::Connection;

/// Resolves employee ids against the `employees` table.
pub struct SqliteEmployeeLookup<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeLookup<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeLookup for SqliteEmployeeLookup<'_> {
    fn employee_exists(&self, id: EmployeeId) -> DbResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteEmployeeLookup;
    use crate::db::{open_db_in_memory, DbError};
    use crate::model::employee::EmployeeLookup;

    #[test]
    fn reports_existing_and_missing_employees() {
        let conn = open_db_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE employees (id INTEGER PRIMARY KEY, name TEXT);
             INSERT INTO employees (id, name) VALUES (4, 'Ada');",
        )
        .unwrap();

        let lookup = SqliteEmployeeLookup::new(&conn);
        assert!(lookup.employee_exists(4).unwrap());
        assert!(!lookup.employee_exists(5).unwrap());
    }

    #[test]
    fn missing_employees_table_is_a_db_error() {
        let conn = open_db_in_memory().unwrap();

        let err = SqliteEmployeeLookup::new(&conn)
            .employee_exists(1)
            .unwrap_err();
        assert!(matches!(err, DbError::Sqlite(_)));
    }
}
