//! Thin ODBC Connector
//!
//! This crate binds the native ODBC C API directly, allowing connections to
//! any database with an ODBC driver without an ORM or async layer in
//! between.
//!
//! ## Features
//!
//! - **Generic ODBC connectivity** - Connect to any database with an ODBC driver
//! - **Runtime driver-manager loading** - The platform driver manager (or a
//!   custom library path) is resolved at connector construction
//! - **Direct execution** - SQL text goes straight to `SQLExecDirect`; result
//!   sets come back as dynamically-typed rows
//!
//! ## Example
//!
//! ```rust,no_run
//! use odbc_direct::{OdbcConnectOptions, OdbcConnection};
//!
//! # fn example() -> Result<(), odbc_direct::OdbcError> {
//! let options = OdbcConnectOptions::new(
//!     "Driver={ODBC Driver 18 for SQL Server};Server=localhost;Database=test;UID=sa;PWD=password"
//! );
//! let mut conn = OdbcConnection::new(options)?;
//! conn.connect()?;
//! for row in conn.select("Items", &["ID", "Name"])? {
//!     for (column, value) in row.iter() {
//!         println!("{column} = {value}");
//!     }
//! }
//! conn.disconnect();
//! # Ok(())
//! # }
//! ```

// Re-export everything from odbc-direct-core
pub use odbc_direct_core::*;
