//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Create the database directory when it is missing.
//! - Run the schema bootstrap before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have a busy timeout configured.
//! - Schema bootstrap failure is logged, not returned.

use super::schema::bootstrap_schema;
use super::{DbError, DbResult};
use crate::config::DatabaseConfig;
use log::{error, info};
use rusqlite::Connection;
use std::time::{Duration, Instant};

const IN_MEMORY_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the configured SQLite database file and bootstraps the schema.
///
/// # Side effects
/// - Creates the parent directory of `config.path` if needed.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(config: &DatabaseConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(source) = std::fs::create_dir_all(parent) {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_dir_failed error={}",
                started_at.elapsed().as_millis(),
                source
            );
            return Err(DbError::Io {
                path: parent.to_path_buf(),
                source,
            });
        }
    }

    let conn = Connection::open(&config.path).map_err(|err| {
        log_open_failure("file", started_at, &err);
        DbError::from(err)
    })?;

    configure_connection(conn, "file", config.busy_timeout(), started_at)
}

/// Opens a private in-memory SQLite database and bootstraps the schema.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = Connection::open_in_memory().map_err(|err| {
        log_open_failure("memory", started_at, &err);
        DbError::from(err)
    })?;

    configure_connection(conn, "memory", IN_MEMORY_BUSY_TIMEOUT, started_at)
}

fn configure_connection(
    conn: Connection,
    mode: &str,
    busy_timeout: Duration,
    started_at: Instant,
) -> DbResult<Connection> {
    if let Err(err) = conn.busy_timeout(busy_timeout) {
        error!(
            "event=db_open module=db status=error mode={} duration_ms={} error_code=db_configure_failed error={}",
            mode,
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err.into());
    }

    // Non-fatal: the store reports a missing table on first use.
    bootstrap_schema(&conn);

    info!(
        "event=db_open module=db status=ok mode={} duration_ms={}",
        mode,
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn log_open_failure(mode: &str, started_at: Instant, err: &rusqlite::Error) {
    error!(
        "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
        mode,
        started_at.elapsed().as_millis(),
        err
    );
}
