//! Runtime binding to the platform ODBC driver manager.
//!
//! Entry points are resolved once, eagerly, when the table is constructed.
//! A missing library or missing symbol is fatal; there is no degraded mode.
//! The wide (`W`) variants of the string-taking entry points are used
//! throughout.

use crate::odbc::error::OdbcError;
use libloading::Library;
use odbc_sys::{
    CDataType, DriverConnectOption, EnvironmentAttribute, FreeStmtOption, HDbc, HEnv, HStmt,
    Handle, HandleType, Len, Pointer, SqlReturn, ULen,
};

pub(crate) type SqlAllocHandleFn =
    unsafe extern "system" fn(HandleType, Handle, *mut Handle) -> SqlReturn;
pub(crate) type SqlFreeHandleFn = unsafe extern "system" fn(HandleType, Handle) -> SqlReturn;
pub(crate) type SqlSetEnvAttrFn =
    unsafe extern "system" fn(HEnv, EnvironmentAttribute, Pointer, i32) -> SqlReturn;
pub(crate) type SqlDriverConnectWFn = unsafe extern "system" fn(
    HDbc,
    Pointer,
    *const u16,
    i16,
    *mut u16,
    i16,
    *mut i16,
    DriverConnectOption,
) -> SqlReturn;
pub(crate) type SqlDisconnectFn = unsafe extern "system" fn(HDbc) -> SqlReturn;
pub(crate) type SqlExecDirectWFn = unsafe extern "system" fn(HStmt, *const u16, i32) -> SqlReturn;
pub(crate) type SqlNumResultColsFn = unsafe extern "system" fn(HStmt, *mut i16) -> SqlReturn;
pub(crate) type SqlDescribeColWFn = unsafe extern "system" fn(
    HStmt,
    u16,
    *mut u16,
    i16,
    *mut i16,
    *mut i16,
    *mut ULen,
    *mut i16,
    *mut i16,
) -> SqlReturn;
pub(crate) type SqlFetchFn = unsafe extern "system" fn(HStmt) -> SqlReturn;
pub(crate) type SqlGetDataFn =
    unsafe extern "system" fn(HStmt, u16, CDataType, Pointer, Len, *mut Len) -> SqlReturn;
pub(crate) type SqlFreeStmtFn = unsafe extern "system" fn(HStmt, FreeStmtOption) -> SqlReturn;

/// The resolved function table for one driver-manager library.
///
/// Stateless after construction: plain function pointers plus the `Library`
/// that keeps them valid for as long as the table lives.
pub(crate) struct OdbcLibrary {
    name: String,
    pub(crate) alloc_handle: SqlAllocHandleFn,
    pub(crate) free_handle: SqlFreeHandleFn,
    pub(crate) set_env_attr: SqlSetEnvAttrFn,
    pub(crate) driver_connect: SqlDriverConnectWFn,
    pub(crate) disconnect: SqlDisconnectFn,
    pub(crate) exec_direct: SqlExecDirectWFn,
    pub(crate) num_result_cols: SqlNumResultColsFn,
    pub(crate) describe_col: SqlDescribeColWFn,
    pub(crate) fetch: SqlFetchFn,
    pub(crate) get_data: SqlGetDataFn,
    pub(crate) free_stmt: SqlFreeStmtFn,
    _library: Library,
}

impl OdbcLibrary {
    /// Open `name` and resolve every required entry point.
    pub(crate) fn load(name: &str) -> Result<Self, OdbcError> {
        let library = unsafe { Library::new(name) }.map_err(|source| OdbcError::Load {
            library: name.to_string(),
            source,
        })?;
        let table = Self {
            alloc_handle: resolve(&library, name, "SQLAllocHandle")?,
            free_handle: resolve(&library, name, "SQLFreeHandle")?,
            set_env_attr: resolve(&library, name, "SQLSetEnvAttr")?,
            driver_connect: resolve(&library, name, "SQLDriverConnectW")?,
            disconnect: resolve(&library, name, "SQLDisconnect")?,
            exec_direct: resolve(&library, name, "SQLExecDirectW")?,
            num_result_cols: resolve(&library, name, "SQLNumResultCols")?,
            describe_col: resolve(&library, name, "SQLDescribeColW")?,
            fetch: resolve(&library, name, "SQLFetch")?,
            get_data: resolve(&library, name, "SQLGetData")?,
            free_stmt: resolve(&library, name, "SQLFreeStmt")?,
            name: name.to_string(),
            _library: library,
        };
        log::debug!("loaded ODBC driver manager `{name}`");
        Ok(table)
    }

    /// The library name or path this table was resolved from.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for OdbcLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdbcLibrary").field("name", &self.name).finish()
    }
}

fn resolve<T: Copy>(
    library: &Library,
    library_name: &str,
    symbol: &'static str,
) -> Result<T, OdbcError> {
    unsafe { library.get::<T>(symbol.as_bytes()) }
        .map(|entry| *entry)
        .map_err(|source| OdbcError::MissingEntryPoint {
            library: library_name.to_string(),
            symbol,
            source,
        })
}
