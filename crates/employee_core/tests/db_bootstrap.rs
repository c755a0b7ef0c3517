use employee_core::db::{open_db, open_db_in_memory, DbError};
use employee_core::{AppConfig, DatabaseConfig, Employee, EmployeeService, RepoError};
use rusqlite::Connection;

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

#[test]
fn open_db_in_memory_creates_employee_table() {
    let conn = open_db_in_memory().unwrap();
    assert_table_exists(&conn, "Employee");
}

#[test]
fn open_db_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("employeedb.sqlite3");
    let config = DatabaseConfig {
        path: path.clone(),
        ..DatabaseConfig::default()
    };

    let conn = open_db(&config).unwrap();
    assert!(path.exists());
    assert_table_exists(&conn, "Employee");
}

#[test]
fn reopening_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.database.path = dir.path().join("employeedb.sqlite3");

    let mut first = EmployeeService::open(&config).unwrap();
    let id = first
        .insert_employee(&Employee::new("John Doe", "IT", 50_000.0))
        .unwrap();
    drop(first);

    let mut second = EmployeeService::open(&config).unwrap();
    let loaded = second.get_employee(id).unwrap();
    assert_eq!(loaded.name, "John Doe");
    assert_eq!(second.list_employees().unwrap().len(), 1);
}

#[test]
fn unusable_parent_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();

    let config = DatabaseConfig {
        path: blocker.join("employeedb.sqlite3"),
        ..DatabaseConfig::default()
    };

    let err = open_db(&config).unwrap_err();
    assert!(matches!(err, DbError::Io { .. }));
}

#[test]
fn failed_schema_bootstrap_still_opens_and_surfaces_on_first_use() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employeedb.sqlite3");

    // An index already owns the `Employee` name, so CREATE TABLE fails.
    let seed = Connection::open(&path).unwrap();
    seed.execute_batch(
        "CREATE TABLE other (x INTEGER);
         CREATE INDEX Employee ON other (x);",
    )
    .unwrap();
    drop(seed);

    let config = DatabaseConfig {
        path,
        ..DatabaseConfig::default()
    };
    let conn = open_db(&config).unwrap();

    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'Employee'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);

    let mut service = EmployeeService::new(conn);
    let err = service.list_employees().unwrap_err();
    assert!(matches!(err.cause(), Some(RepoError::Connectivity(_))));
}
