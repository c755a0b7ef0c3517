//! Employee store contract and SQLite implementation.
//!
//! # Responsibility
//! - Issue the three parameterized statements against the `Employee` table.
//! - Map rows into [`Employee`] records.
//!
//! # Invariants
//! - `insert_employee` validates before any statement is prepared.
//! - Statement text is fixed; values are always bound, never interpolated.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId, EmployeeValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const INSERT_EMPLOYEE_SQL: &str =
    "INSERT INTO Employee (name, department, salary) VALUES (?, ?, ?)";
pub const SELECT_ALL_EMPLOYEES_SQL: &str = "SELECT * FROM Employee";
pub const SELECT_EMPLOYEE_BY_ID_SQL: &str = "SELECT * FROM Employee WHERE id = ?";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error kinds.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before any SQL ran.
    InvalidArgument(EmployeeValidationError),
    /// No row matched the requested id.
    NotFound(EmployeeId),
    /// More than one row matched an id that should be unique.
    MultipleResults { id: EmployeeId, count: usize },
    /// The statement could not run against the database.
    Connectivity(DbError),
    /// A stored row violates the model invariants.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(err) => write!(f, "invalid employee: {err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::MultipleResults { id, count } => {
                write!(f, "expected one employee with id {id}, found {count}")
            }
            Self::Connectivity(err) => write!(f, "database error: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted employee data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(err) => Some(err),
            Self::Connectivity(err) => Some(err),
            Self::NotFound(_) | Self::MultipleResults { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::InvalidArgument(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Connectivity(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Connectivity(DbError::Sqlite(value))
    }
}

/// Data-access contract for the `Employee` table.
pub trait EmployeeRepository {
    /// Inserts a transient employee and returns the generated id.
    fn insert_employee(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    /// Returns every row in storage order.
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    /// Returns the single row with `id`.
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Employee>;
}

/// SQLite-backed employee store.
///
/// Borrows any connection, including an open `rusqlite::Transaction`.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn insert_employee(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        employee.validate()?;

        let mut stmt = self.conn.prepare_cached(INSERT_EMPLOYEE_SQL)?;
        stmt.execute(params![
            employee.name.as_str(),
            employee.department.as_str(),
            employee.salary,
        ])?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare_cached(SELECT_ALL_EMPLOYEES_SQL)?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Employee> {
        let mut stmt = self.conn.prepare_cached(SELECT_EMPLOYEE_BY_ID_SQL)?;
        let mut rows = stmt.query([id])?;
        let mut matches = Vec::with_capacity(1);

        while let Some(row) = rows.next()? {
            matches.push(parse_employee_row(row)?);
        }

        match matches.len() {
            0 => Err(RepoError::NotFound(id)),
            1 => Ok(matches.remove(0)),
            count => Err(RepoError::MultipleResults { id, count }),
        }
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let employee = Employee {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        department: row.get("department")?,
        salary: row.get("salary")?,
    };

    employee.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "row {} in Employee: {err}",
            employee.id.unwrap_or_default()
        ))
    })?;
    Ok(employee)
}
