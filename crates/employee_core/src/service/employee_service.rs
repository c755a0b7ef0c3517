//! Employee use-case service.
//!
//! # Responsibility
//! - Own the connection and wire the store to the transactional envelope.
//! - Expose the three store operations as transactional calls.
//!
//! # Invariants
//! - Every call, reads included, runs in exactly one transaction.
//! - Service APIs never bypass repository validation.

use crate::config::AppConfig;
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, RepoError, SqliteEmployeeRepository};
use crate::tx::{run_in_transaction, TxResult};
use rusqlite::Connection;

pub type ServiceResult<T> = TxResult<T, RepoError>;

/// Transactional facade over [`SqliteEmployeeRepository`].
pub struct EmployeeService {
    conn: Connection,
}

impl EmployeeService {
    /// Wraps an already bootstrapped connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens the configured database and returns a ready service.
    pub fn open(config: &AppConfig) -> DbResult<Self> {
        Ok(Self::new(open_db(&config.database)?))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Inserts `employee` and returns its generated id.
    ///
    /// A negative salary fails with `RepoError::InvalidArgument` wrapped in a
    /// rolled-back transaction; no row is written.
    pub fn insert_employee(&mut self, employee: &Employee) -> ServiceResult<EmployeeId> {
        run_in_transaction(&mut self.conn, "insert_employee", |tx| {
            SqliteEmployeeRepository::new(tx).insert_employee(employee)
        })
    }

    pub fn list_employees(&mut self) -> ServiceResult<Vec<Employee>> {
        run_in_transaction(&mut self.conn, "list_employees", |tx| {
            SqliteEmployeeRepository::new(tx).list_employees()
        })
    }

    pub fn get_employee(&mut self, id: EmployeeId) -> ServiceResult<Employee> {
        run_in_transaction(&mut self.conn, "get_employee", |tx| {
            SqliteEmployeeRepository::new(tx).get_employee(id)
        })
    }
}
