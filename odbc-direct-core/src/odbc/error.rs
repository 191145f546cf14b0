//! ODBC error types and the return-code policy.

use odbc_sys::SqlReturn;
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// An error surfaced by the connector.
#[derive(Debug, Error)]
pub enum OdbcError {
    /// The driver-manager library could not be opened.
    #[error("failed to load ODBC driver manager `{library}`: {source}")]
    Load {
        library: String,
        source: libloading::Error,
    },

    /// The driver-manager library is missing a required entry point.
    #[error("ODBC driver manager `{library}` is missing entry point `{symbol}`: {source}")]
    MissingEntryPoint {
        library: String,
        symbol: &'static str,
        source: libloading::Error,
    },

    /// An operation was attempted before `connect` (or after `disconnect`).
    #[error("not connected to a data source")]
    NotConnected,

    /// A step of the connect sequence failed. Handles allocated by earlier
    /// steps have already been torn down.
    #[error("connecting to the data source failed: {0}")]
    Connect(OdbcCallFailure),

    /// Statement execution, result introspection, or fetching failed. The
    /// statement cursor has already been closed and the handle is reusable.
    #[error("query execution failed: {0}")]
    Query(OdbcCallFailure),
}

/// A native call that returned an unacceptable return code.
///
/// Carries the name of the failing entry point so every failure is
/// diagnosable at the call site that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OdbcCallFailure {
    pub function: &'static str,
    pub return_code: SqlReturn,
}

impl Display for OdbcCallFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} returned {} (code {})",
            self.function,
            return_code_name(self.return_code),
            self.return_code.0
        )
    }
}

impl std::error::Error for OdbcCallFailure {}

/// The symbolic name of a native return code.
pub fn return_code_name(code: SqlReturn) -> &'static str {
    match code {
        SqlReturn::SUCCESS => "SQL_SUCCESS",
        SqlReturn::SUCCESS_WITH_INFO => "SQL_SUCCESS_WITH_INFO",
        SqlReturn::NO_DATA => "SQL_NO_DATA",
        SqlReturn::ERROR => "SQL_ERROR",
        SqlReturn::INVALID_HANDLE => "SQL_INVALID_HANDLE",
        SqlReturn::NEED_DATA => "SQL_NEED_DATA",
        SqlReturn::STILL_EXECUTING => "SQL_STILL_EXECUTING",
        _ => "unrecognized",
    }
}

/// Return codes accepted by default: success, or success with driver info.
pub(crate) const ACCEPT_SUCCESS: &[SqlReturn] =
    &[SqlReturn::SUCCESS, SqlReturn::SUCCESS_WITH_INFO];

/// Widened accepted set for calls where `SQL_NO_DATA` is a normal outcome
/// (the terminal fetch, and get-data on an exhausted column).
pub(crate) const ACCEPT_SUCCESS_OR_NO_DATA: &[SqlReturn] = &[
    SqlReturn::SUCCESS,
    SqlReturn::SUCCESS_WITH_INFO,
    SqlReturn::NO_DATA,
];

/// The single chokepoint every native return code passes through.
///
/// Returns the code back to the caller when it is in `accepted` so call
/// sites can still distinguish e.g. `SQL_NO_DATA` from plain success.
pub(crate) fn sql_check(
    function: &'static str,
    code: SqlReturn,
    accepted: &[SqlReturn],
) -> Result<SqlReturn, OdbcCallFailure> {
    if accepted.contains(&code) {
        if code == SqlReturn::SUCCESS_WITH_INFO {
            log::debug!("{function} returned SQL_SUCCESS_WITH_INFO");
        }
        Ok(code)
    } else {
        Err(OdbcCallFailure {
            function,
            return_code: code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_codes_pass_through() {
        assert_eq!(
            sql_check("SQLFetch", SqlReturn::SUCCESS, ACCEPT_SUCCESS),
            Ok(SqlReturn::SUCCESS)
        );
        assert_eq!(
            sql_check("SQLFetch", SqlReturn::SUCCESS_WITH_INFO, ACCEPT_SUCCESS),
            Ok(SqlReturn::SUCCESS_WITH_INFO)
        );
    }

    #[test]
    fn error_codes_are_rejected_with_call_name() {
        let failure = sql_check("SQLExecDirectW", SqlReturn::ERROR, ACCEPT_SUCCESS).unwrap_err();
        assert_eq!(failure.function, "SQLExecDirectW");
        assert_eq!(failure.return_code, SqlReturn::ERROR);
        let message = failure.to_string();
        assert!(message.contains("SQLExecDirectW"));
        assert!(message.contains("SQL_ERROR"));
    }

    #[test]
    fn no_data_is_rejected_unless_widened() {
        assert!(sql_check("SQLFetch", SqlReturn::NO_DATA, ACCEPT_SUCCESS).is_err());
        assert_eq!(
            sql_check("SQLFetch", SqlReturn::NO_DATA, ACCEPT_SUCCESS_OR_NO_DATA),
            Ok(SqlReturn::NO_DATA)
        );
    }

    #[test]
    fn invalid_handle_is_never_accepted() {
        let failure =
            sql_check("SQLDisconnect", SqlReturn::INVALID_HANDLE, ACCEPT_SUCCESS_OR_NO_DATA)
                .unwrap_err();
        assert!(failure.to_string().contains("SQL_INVALID_HANDLE"));
    }

    #[test]
    fn unrecognized_codes_still_report_the_raw_value() {
        let failure = sql_check("SQLGetData", SqlReturn(42), ACCEPT_SUCCESS).unwrap_err();
        assert_eq!(return_code_name(failure.return_code), "unrecognized");
        assert!(failure.to_string().contains("code 42"));
    }
}
