//! Thin ODBC connector.
//!
//! This module binds the native ODBC C API directly: it loads the platform
//! driver manager at runtime, walks the environment → connection → statement
//! handle chain, executes SQL text directly, and materializes result sets
//! into dynamically-typed rows.
//!
//! ## Connection Strings
//!
//! Connections use standard ODBC connection strings, forwarded verbatim to
//! the driver:
//!
//! ```text
//! // DSN-based connection
//! DSN=MyDataSource;UID=myuser;PWD=mypassword
//!
//! // Driver-based connection
//! Driver={ODBC Driver 18 for SQL Server};Server=localhost;Database=test
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use odbc_direct_core::odbc::{OdbcConnectOptions, OdbcConnection};
//!
//! # fn example() -> Result<(), odbc_direct_core::odbc::OdbcError> {
//! let options = OdbcConnectOptions::new("DSN=MyDSN;UID=user;PWD=pass");
//! let mut conn = OdbcConnection::new(options)?;
//! conn.connect()?;
//! for row in conn.execute_query("SELECT ID, Name FROM Items")? {
//!     println!("{:?}", row.get_by_name("Name"));
//! }
//! conn.disconnect();
//! # Ok(())
//! # }
//! ```

mod column;
mod connection;
mod error;
mod library;
mod options;
mod query;
mod row;
mod type_info;
mod value;

// Re-export main types
pub use column::OdbcColumn;
pub use connection::OdbcConnection;
pub use error::{OdbcCallFailure, OdbcError, return_code_name};
pub use options::{DEFAULT_TEXT_BUFFER_CHARS, OdbcConnectOptions, default_library};
pub use query::build_select;
pub use row::OdbcRow;
pub use type_info::OdbcDataType;
pub use value::OdbcValue;
