//! Lifecycle tests against a real driver manager and data source.
//!
//! The non-ignored tests only need the crate itself. Tests marked
//! `#[ignore]` need an installed ODBC driver manager, and some need a
//! reachable data source; set `DATABASE_URL` to an ODBC connection string
//! or rely on the default below.

use odbc_direct_core::{OdbcConnectOptions, OdbcConnection, OdbcError};

/// Get the connection string from environment or use default for local dev
fn get_connection_string() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        "Driver={ODBC Driver 18 for SQL Server};Server=localhost,1433;Database=master;UID=sa;PWD=YourStrong@Passw0rd;TrustServerCertificate=yes".to_string()
    })
}

#[test]
fn missing_driver_manager_is_a_load_error() {
    let options = OdbcConnectOptions::new("DSN=ignored")
        .library("libdefinitely-not-a-driver-manager.so.0");
    match OdbcConnection::new(options) {
        Err(OdbcError::Load { library, .. }) => {
            assert_eq!(library, "libdefinitely-not-a-driver-manager.so.0");
        }
        other => panic!("expected OdbcError::Load, got {other:?}"),
    }
}

#[test]
#[ignore = "requires an installed ODBC driver manager"]
fn disconnect_before_connect_is_vacuously_true() {
    let mut conn = OdbcConnection::new(OdbcConnectOptions::new("DSN=unused"))
        .expect("driver manager should load");
    assert!(!conn.is_connected());
    assert!(conn.disconnect());
    assert!(conn.disconnect());
}

#[test]
#[ignore = "requires an installed ODBC driver manager"]
fn query_before_connect_is_rejected() {
    let mut conn = OdbcConnection::new(OdbcConnectOptions::new("DSN=unused"))
        .expect("driver manager should load");
    match conn.execute_query("SELECT 1") {
        Err(OdbcError::NotConnected) => {}
        other => panic!("expected OdbcError::NotConnected, got {other:?}"),
    }
}

#[test]
#[ignore = "requires an installed ODBC driver manager"]
fn failed_connect_leaves_no_live_handles() {
    let options = OdbcConnectOptions::new(
        "Driver={No Such Driver};Server=nonexistent;Database=none;UID=u;PWD=p",
    );
    let mut conn = OdbcConnection::new(options).expect("driver manager should load");
    let error = conn.connect().expect_err("connect should fail");
    assert!(matches!(error, OdbcError::Connect(_)));
    assert!(!conn.is_connected());
    // Nothing left to free, so teardown succeeds vacuously.
    assert!(conn.disconnect());
}

#[test]
#[ignore = "requires a running ODBC data source"]
fn connect_then_disconnect_round_trip() {
    let mut conn = OdbcConnection::new(OdbcConnectOptions::new(get_connection_string()))
        .expect("driver manager should load");
    let message = conn.connect().expect("connect should succeed");
    assert!(!message.is_empty());
    assert!(conn.is_connected());
    assert!(conn.disconnect());
    assert!(!conn.is_connected());
    // Second disconnect succeeds vacuously.
    assert!(conn.disconnect());
}

#[test]
#[ignore = "requires a running ODBC data source"]
fn reconnect_after_disconnect() {
    let mut conn = OdbcConnection::new(OdbcConnectOptions::new(get_connection_string()))
        .expect("driver manager should load");
    conn.connect().expect("first connect should succeed");
    assert!(conn.disconnect());
    conn.connect().expect("reconnect should succeed");
    let rows = conn.execute_query("SELECT 1 AS one").expect("query should succeed");
    assert_eq!(rows.len(), 1);
    assert!(conn.disconnect());
}

#[test]
#[ignore = "requires a running ODBC data source"]
fn statement_stays_usable_after_a_failed_query() {
    let mut conn = OdbcConnection::new(OdbcConnectOptions::new(get_connection_string()))
        .expect("driver manager should load");
    conn.connect().expect("connect should succeed");

    let error = conn
        .execute_query("SELECT * FROM nonexistent_table_xyz")
        .expect_err("query on a missing table should fail");
    assert!(matches!(error, OdbcError::Query(_)));

    // The cursor was closed on the error path; the handle is reusable.
    let rows = conn.execute_query("SELECT 1 AS one").expect("follow-up should succeed");
    assert_eq!(rows.len(), 1);
    assert!(conn.disconnect());
}
