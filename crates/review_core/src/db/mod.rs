//! SQLite connection bootstrap for the review store.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by the review repository.
//! - Define the datastore-level error type surfaced by persistence calls.
//!
//! # Invariants
//! - Connections handed out by this module enforce foreign keys.
//! - `DbError` is never constructed for rejected field values; those are
//!   reported as `ReviewValidationError` instead.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure reported by the datastore layer (DDL, insert, update, delete,
/// select or lookup).
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
