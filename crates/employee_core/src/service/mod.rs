//! Core use-case services.
//!
//! # Responsibility
//! - Apply the transactional envelope to repository calls.
//! - Keep CLI callers decoupled from connection and transaction handling.

pub mod employee_service;
