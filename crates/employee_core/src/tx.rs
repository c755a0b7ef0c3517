//! Transactional envelope around store operations.
//!
//! # Responsibility
//! - Run one closure inside one SQLite transaction.
//! - Commit on `Ok`, roll back on `Err`, and wrap the failure.
//!
//! # Invariants
//! - At most one transaction per call, finished before returning.
//! - The transaction handle is released on commit, rollback and panic paths.
//! - A wrapped failure always means nothing from the call was persisted.

use crate::db::DbError;
use log::{error, info, warn};
use rusqlite::{Connection, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type TxResult<T, E> = Result<T, TxError<E>>;

/// Failure of a transactional call.
#[derive(Debug)]
pub enum TxError<E> {
    /// The transaction could not be opened; the operation never ran.
    Begin(DbError),
    /// The operation failed and its transaction was rolled back.
    Failed { operation: String, source: E },
    /// The operation succeeded but the commit did not.
    Commit(DbError),
}

impl<E> TxError<E> {
    /// Returns the operation error wrapped by a rolled-back transaction.
    pub fn cause(&self) -> Option<&E> {
        match self {
            Self::Failed { source, .. } => Some(source),
            Self::Begin(_) | Self::Commit(_) => None,
        }
    }

    /// Consumes the error and returns the wrapped operation error, if any.
    pub fn into_cause(self) -> Option<E> {
        match self {
            Self::Failed { source, .. } => Some(source),
            Self::Begin(_) | Self::Commit(_) => None,
        }
    }

    /// Whether the wrapped operation failed and was rolled back.
    pub fn is_rolled_back(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl<E: Display> Display for TxError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Begin(err) => write!(f, "failed to begin transaction: {err}"),
            Self::Failed { operation, source } => {
                write!(f, "transaction failed, rolled back ({operation}): {source}")
            }
            Self::Commit(err) => write!(f, "failed to commit transaction: {err}"),
        }
    }
}

impl<E: Error + 'static> Error for TxError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Begin(err) | Self::Commit(err) => Some(err),
            Self::Failed { source, .. } => Some(source),
        }
    }
}

/// Runs `f` inside a transaction on `conn`.
///
/// `operation` is a short label used in log events and in [`TxError::Failed`].
///
/// # Errors
/// - [`TxError::Begin`] when the transaction cannot be opened.
/// - [`TxError::Failed`] wrapping any error returned by `f`.
/// - [`TxError::Commit`] when committing a successful call fails.
pub fn run_in_transaction<T, E, F>(
    conn: &mut Connection,
    operation: &str,
    f: F,
) -> TxResult<T, E>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    E: Display,
{
    let started_at = Instant::now();
    let tx = conn.transaction().map_err(|err| {
        error!(
            "event=tx_begin module=tx status=error op={} error={}",
            operation, err
        );
        TxError::<E>::Begin(err.into())
    })?;

    match f(&tx) {
        Ok(value) => match tx.commit() {
            Ok(()) => {
                info!(
                    "event=tx_commit module=tx status=ok op={} duration_ms={}",
                    operation,
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                error!(
                    "event=tx_commit module=tx status=error op={} duration_ms={} error={}",
                    operation,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(TxError::Commit(err.into()))
            }
        },
        Err(source) => {
            warn!(
                "event=tx_rollback module=tx status=start op={} error={}",
                operation, source
            );
            if let Err(err) = tx.rollback() {
                // Drop of the consumed handle retries the rollback.
                error!(
                    "event=tx_rollback module=tx status=error op={} error={}",
                    operation, err
                );
            } else {
                info!(
                    "event=tx_rollback module=tx status=ok op={} duration_ms={}",
                    operation,
                    started_at.elapsed().as_millis()
                );
            }
            Err(TxError::Failed {
                operation: operation.to_string(),
                source,
            })
        }
    }
}
