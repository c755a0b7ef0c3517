//! Employee data access over SQLite.
//! Store operations, the transactional envelope around them, and the
//! connection/config/logging bootstrap they rely on.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod tx;

pub use config::{AppConfig, ConfigError, DatabaseConfig, LoggingConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::employee::{Employee, EmployeeId, EmployeeValidationError};
pub use repo::employee_repo::{EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository};
pub use service::employee_service::{EmployeeService, ServiceResult};
pub use tx::{run_in_transaction, TxError, TxResult};
