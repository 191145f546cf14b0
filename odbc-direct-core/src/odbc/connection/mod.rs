//! ODBC connection lifecycle.
//!
//! A connection owns the whole handle chain: environment, connection, and
//! statement. Handles are allocated by `connect`, torn down by `disconnect`
//! (and by `Drop` as a last resort), and are never handed out to callers.

use crate::odbc::OdbcConnectOptions;
use crate::odbc::error::{ACCEPT_SUCCESS, OdbcCallFailure, OdbcError, sql_check};
use crate::odbc::library::OdbcLibrary;
use odbc_sys::{
    AttrOdbcVersion, DriverConnectOption, EnvironmentAttribute, FreeStmtOption, HDbc, HEnv, HStmt,
    Handle, HandleType, SqlReturn,
};
use std::ptr::null_mut;
use widestring::U16String;

mod executor;

/// Capacity, in wide characters, of the buffer handed to the driver for the
/// completed connection string.
const COMPLETED_STRING_CHARS: usize = 1024;

/// A connection to an ODBC data source.
///
/// All operations are sequential and blocking; the contract is at most one
/// in-flight operation per connection, which `&mut self` enforces within a
/// single thread. Wrap the connection in external synchronization before
/// sharing it across threads.
pub struct OdbcConnection {
    pub(crate) library: OdbcLibrary,
    pub(crate) options: OdbcConnectOptions,
    env: Option<HEnv>,
    dbc: Option<HDbc>,
    pub(crate) stmt: Option<HStmt>,
}

// The underlying handles may move between threads; they are just not
// reentrant, and `&mut self` serializes all access to them.
unsafe impl Send for OdbcConnection {}

impl std::fmt::Debug for OdbcConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdbcConnection")
            .field("library", &self.library.name())
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl OdbcConnection {
    /// Create a connection, resolving the driver-manager function table.
    ///
    /// Each connection resolves its own table; there is no process-wide
    /// shared state. Fails with [`OdbcError::Load`] or
    /// [`OdbcError::MissingEntryPoint`] when the driver manager named by the
    /// options cannot be bound.
    pub fn new(options: OdbcConnectOptions) -> Result<Self, OdbcError> {
        let library = OdbcLibrary::load(options.library_name())?;
        Ok(Self {
            library,
            options,
            env: None,
            dbc: None,
            stmt: None,
        })
    }

    /// The options this connection was created with.
    pub fn options(&self) -> &OdbcConnectOptions {
        &self.options
    }

    /// Whether the full handle chain is allocated and ready for execution.
    pub fn is_connected(&self) -> bool {
        self.stmt.is_some()
    }

    /// Connect to the data source named by the connection string.
    ///
    /// Allocates the environment, declares the ODBC behavior version,
    /// allocates the connection, drives `SQLDriverConnectW`, and allocates
    /// the statement, in that order. If any step fails, everything
    /// allocated so far is torn down before the error is returned.
    ///
    /// Calling `connect` on an already-connected instance is a contract
    /// violation; call [`disconnect`](Self::disconnect) first. Re-connecting
    /// after a disconnect allocates a fresh handle chain.
    pub fn connect(&mut self) -> Result<String, OdbcError> {
        debug_assert!(
            !self.is_connected(),
            "connect called on a connected instance; disconnect first"
        );
        match self.connect_sequence() {
            Ok(message) => Ok(message),
            Err(failure) => {
                self.disconnect();
                Err(OdbcError::Connect(failure))
            }
        }
    }

    fn connect_sequence(&mut self) -> Result<String, OdbcCallFailure> {
        let env = self.alloc_handle(HandleType::Env, null_mut())? as HEnv;
        self.env = Some(env);
        self.declare_odbc_version(env)?;

        let dbc = self.alloc_handle(HandleType::Dbc, env as Handle)? as HDbc;
        self.dbc = Some(dbc);
        self.driver_connect(dbc)?;

        let stmt = self.alloc_handle(HandleType::Stmt, dbc as Handle)? as HStmt;
        self.stmt = Some(stmt);
        Ok("Connection established".to_string())
    }

    fn alloc_handle(
        &self,
        handle_type: HandleType,
        parent: Handle,
    ) -> Result<Handle, OdbcCallFailure> {
        let mut output: Handle = null_mut();
        let code = unsafe { (self.library.alloc_handle)(handle_type, parent, &mut output) };
        sql_check("SQLAllocHandle", code, ACCEPT_SUCCESS)?;
        log::debug!("allocated {handle_type:?} handle");
        Ok(output)
    }

    /// Declare ODBC 3.80 behavior, falling back to 3.0 for driver managers
    /// that reject the newer version.
    fn declare_odbc_version(&self, env: HEnv) -> Result<(), OdbcCallFailure> {
        let code = unsafe {
            (self.library.set_env_attr)(
                env,
                EnvironmentAttribute::OdbcVersion,
                AttrOdbcVersion::Odbc3_80.into(),
                0,
            )
        };
        let code = if code == SqlReturn::ERROR {
            unsafe {
                (self.library.set_env_attr)(
                    env,
                    EnvironmentAttribute::OdbcVersion,
                    AttrOdbcVersion::Odbc3.into(),
                    0,
                )
            }
        } else {
            code
        };
        sql_check("SQLSetEnvAttr", code, ACCEPT_SUCCESS)?;
        Ok(())
    }

    fn driver_connect(&self, dbc: HDbc) -> Result<(), OdbcCallFailure> {
        let connection_string = U16String::from_str(self.options.get_connection_string());
        // Out-buffer for the driver's completed connection string; passed
        // and dropped whether or not the call succeeds.
        let mut completed = vec![0u16; COMPLETED_STRING_CHARS];
        let mut completed_len: i16 = 0;
        let code = unsafe {
            (self.library.driver_connect)(
                dbc,
                null_mut(),
                connection_string.as_ptr(),
                clamp_i16(connection_string.len()),
                completed.as_mut_ptr(),
                clamp_i16(completed.len()),
                &mut completed_len,
                DriverConnectOption::NoPrompt,
            )
        };
        sql_check("SQLDriverConnectW", code, ACCEPT_SUCCESS)?;
        // The completed string may carry credentials; report only its size.
        log::debug!("driver completed the connection string ({completed_len} characters)");
        Ok(())
    }

    /// Tear down the handle chain in child-to-parent order.
    ///
    /// Every step is attempted even if an earlier one fails; failures are
    /// logged as warnings and folded into the returned flag. Idempotent:
    /// calling this on a disconnected instance succeeds vacuously.
    pub fn disconnect(&mut self) -> bool {
        let mut clean = true;
        if let Some(stmt) = self.stmt.take() {
            let code = unsafe { (self.library.free_stmt)(stmt, FreeStmtOption::Close) };
            clean &= self.teardown_call("SQLFreeStmt", code);
            let code = unsafe { (self.library.free_handle)(HandleType::Stmt, stmt as Handle) };
            clean &= self.teardown_call("SQLFreeHandle", code);
        }
        if let Some(dbc) = self.dbc.take() {
            let code = unsafe { (self.library.disconnect)(dbc) };
            clean &= self.teardown_call("SQLDisconnect", code);
            let code = unsafe { (self.library.free_handle)(HandleType::Dbc, dbc as Handle) };
            clean &= self.teardown_call("SQLFreeHandle", code);
        }
        if let Some(env) = self.env.take() {
            let code = unsafe { (self.library.free_handle)(HandleType::Env, env as Handle) };
            clean &= self.teardown_call("SQLFreeHandle", code);
        }
        clean
    }

    fn teardown_call(&self, function: &'static str, code: SqlReturn) -> bool {
        match sql_check(function, code, ACCEPT_SUCCESS) {
            Ok(_) => true,
            Err(failure) => {
                log::warn!("teardown step failed: {failure}");
                false
            }
        }
    }
}

impl Drop for OdbcConnection {
    fn drop(&mut self) {
        if self.env.is_some() || self.dbc.is_some() || self.stmt.is_some() {
            self.disconnect();
        }
    }
}

/// Clamp a buffer or string length to the `i16` the narrow ODBC length
/// parameters expect.
pub(crate) fn clamp_i16(length: usize) -> i16 {
    length.try_into().unwrap_or(i16::MAX)
}
