//! Repository layer for the `Employee` table.
//!
//! # Responsibility
//! - Define the data-access contract used by the service layer.
//! - Isolate SQLite statement details from transaction orchestration.
//!
//! # Invariants
//! - Repository writes call `Employee::validate()` before any SQL.
//! - Repository APIs return semantic errors (`NotFound`, `MultipleResults`)
//!   in addition to database transport errors.

pub mod employee_repo;
