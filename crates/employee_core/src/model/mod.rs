//! Domain model for the employee store.
//!
//! # Responsibility
//! - Define the record shape shared by the store, service and CLI.
//!
//! # Invariants
//! - Validation lives on the model so every write path applies the same rule.

pub mod employee;
