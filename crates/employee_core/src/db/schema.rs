//! `Employee` table bootstrap.
//!
//! # Invariants
//! - DDL only uses `IF NOT EXISTS`, so repeated runs are no-ops.
//! - `bootstrap_schema` logs failures and lets start-up continue.

use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

const EMPLOYEE_TABLE_SQL: &str = include_str!("schema.sql");

/// Creates the `Employee` table when it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(EMPLOYEE_TABLE_SQL)?;
    Ok(())
}

/// Runs [`ensure_schema`] and reports the outcome without failing.
///
/// Returns `false` when the table could not be created. Later statements
/// against a missing table surface as connectivity errors from the store.
pub fn bootstrap_schema(conn: &Connection) -> bool {
    let started_at = Instant::now();
    info!("event=schema_bootstrap module=db status=start table=Employee");

    match ensure_schema(conn) {
        Ok(()) => {
            info!(
                "event=schema_bootstrap module=db status=ok table=Employee duration_ms={}",
                started_at.elapsed().as_millis()
            );
            true
        }
        Err(err) => {
            error!(
                "event=schema_bootstrap module=db status=error table=Employee duration_ms={} error_code=schema_create_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            false
        }
    }
}
