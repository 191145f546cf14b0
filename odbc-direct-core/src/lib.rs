//! Thin ODBC connector core.
//!
//! Binds the native ODBC C API — handle allocation, connection, direct
//! statement execution, result fetching — and exposes dynamically-typed
//! rows to the caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use odbc_direct_core::{OdbcConnectOptions, OdbcConnection};
//!
//! # fn example() -> Result<(), odbc_direct_core::OdbcError> {
//! let options = OdbcConnectOptions::new("DSN=MyDSN;UID=user;PWD=pass");
//! let mut conn = OdbcConnection::new(options)?;
//! conn.connect()?;
//! let rows = conn.select("Items", &["ID", "Name"])?;
//! conn.disconnect();
//! # Ok(())
//! # }
//! ```

pub mod odbc;

// Re-export main types at crate root for convenience
pub use odbc::{
    OdbcCallFailure, OdbcColumn, OdbcConnectOptions, OdbcConnection, OdbcDataType, OdbcError,
    OdbcRow, OdbcValue, build_select,
};
