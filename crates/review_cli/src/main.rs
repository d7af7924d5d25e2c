//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise `review_core` end to end against a real SQLite connection.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `review_cli [DB_PATH]`. Without a path an in-memory database is
//! used. Set `REVIEW_LOG_DIR` to an absolute directory to enable file logs.

use log::info;
use review_core::{
    core_version, default_log_level, init_logging, open_db, open_db_in_memory, ReviewRepository,
    SqliteEmployeeLookup, SqliteReviewRepository,
};
use std::error::Error;
use std::process::ExitCode;

const SMOKE_EMPLOYEE_ID: i64 = 1;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("review_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("REVIEW_LOG_DIR") {
        init_logging(default_log_level(), &log_dir)?;
    }

    println!("review_core version={}", core_version());

    let conn = match std::env::args().nth(1) {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    // The employee entity is owned elsewhere; make sure one row exists so the
    // foreign key and lookup both resolve.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS employees (id INTEGER PRIMARY KEY, name TEXT NOT NULL);",
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO employees (id, name) VALUES (?1, 'Smoke Test');",
        [SMOKE_EMPLOYEE_ID],
    )?;

    let repo = SqliteReviewRepository::new(&conn, SqliteEmployeeLookup::new(&conn));
    repo.create_table()?;

    let review = repo.create(2021, "Solid performer", SMOKE_EMPLOYEE_ID)?;
    info!(
        "event=smoke_review module=cli status=ok id={:?}",
        review.borrow().id()
    );

    for review in repo.get_all()? {
        println!("{}", review.borrow());
    }

    Ok(())
}
