//! Demonstration entry point for `employee_core`.
//!
//! # Responsibility
//! - Wire config, logging, connection and service explicitly.
//! - Run one insert and two reads, printing results to stdout.

use clap::Parser;
use employee_core::config::{KEY_DB_PATH, KEY_LOG_DIR, KEY_LOG_LEVEL};
use employee_core::{init_logging, AppConfig, Employee, EmployeeService};
use log::error;
use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "employee", version, about = "Insert and list employees in a SQLite store")]
struct Cli {
    /// JSON config file; `EMPLOYEE_<SECTION>__<KEY>` env vars and flags override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// SQLite database file.
    #[arg(long, value_name = "PATH", conflicts_with = "in_memory")]
    db: Option<PathBuf>,

    /// Use a throwaway in-memory database.
    #[arg(long)]
    in_memory: bool,

    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for log files (stderr when omitted).
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={}", err);
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut overrides = HashMap::new();
    if let Some(db) = &cli.db {
        overrides.insert(KEY_DB_PATH.to_string(), db.to_string_lossy().into_owned());
    }
    if let Some(level) = cli.log_level {
        overrides.insert(KEY_LOG_LEVEL.to_string(), level);
    }
    if let Some(dir) = &cli.log_dir {
        overrides.insert(KEY_LOG_DIR.to_string(), dir.to_string_lossy().into_owned());
    }
    let config = AppConfig::load(cli.config.as_deref(), Some(overrides))?;

    init_logging(&config.logging)?;

    let mut service = if cli.in_memory {
        EmployeeService::open_in_memory()?
    } else {
        EmployeeService::open(&config)?
    };

    let id = service.insert_employee(&Employee::new("John Doe", "IT", 50_000.0))?;

    print_all(&mut service)?;

    let employee = service.get_employee(id)?;
    println!("Employee with ID {id}: {employee}");

    print_all(&mut service)?;
    Ok(())
}

fn print_all(service: &mut EmployeeService) -> Result<(), Box<dyn Error>> {
    println!("Employees in database:");
    for employee in service.list_employees()? {
        println!("  {employee}");
    }
    Ok(())
}
