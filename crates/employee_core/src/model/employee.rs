//! Employee domain model.
//!
//! # Responsibility
//! - Define the single record stored in the `Employee` table.
//! - Own the salary validation rule enforced before any write.
//!
//! # Invariants
//! - `id` is `None` for transient values and `Some(id)` once read from storage.
//! - `salary` is never negative for a persisted row.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-generated primary key of an employee row.
pub type EmployeeId = i64;

/// Validation errors raised before an employee reaches storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmployeeValidationError {
    /// Salary is below zero.
    NegativeSalary(f64),
    /// Salary is NaN and cannot be compared.
    NanSalary,
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeSalary(salary) => {
                write!(f, "salary cannot be negative (got {salary})")
            }
            Self::NanSalary => write!(f, "salary must be a number"),
        }
    }
}

impl Error for EmployeeValidationError {}

/// One row of the `Employee` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Generated by the store on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub name: String,
    pub department: String,
    pub salary: f64,
}

impl Employee {
    /// Creates a transient employee without identity.
    pub fn new(name: impl Into<String>, department: impl Into<String>, salary: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            department: department.into(),
            salary,
        }
    }

    /// Checks the salary rule.
    ///
    /// # Errors
    /// - `NanSalary` when `salary` is NaN.
    /// - `NegativeSalary` when `salary < 0`.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if self.salary.is_nan() {
            return Err(EmployeeValidationError::NanSalary);
        }
        if self.salary < 0.0 {
            return Err(EmployeeValidationError::NegativeSalary(self.salary));
        }
        Ok(())
    }

    /// Returns whether this value carries a store-generated id.
    pub fn is_persistent(&self) -> bool {
        self.id.is_some()
    }

    /// Compares the user-supplied fields, ignoring `id`.
    pub fn same_fields(&self, other: &Employee) -> bool {
        self.name == other.name
            && self.department == other.department
            && self.salary == other.salary
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{id} ")?,
            None => write!(f, "#- ")?,
        }
        write!(
            f,
            "{} [{}] salary={:.2}",
            self.name, self.department, self.salary
        )
    }
}
