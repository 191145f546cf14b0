//! Statement execution and result materialization.

use crate::odbc::error::{
    ACCEPT_SUCCESS, ACCEPT_SUCCESS_OR_NO_DATA, OdbcCallFailure, OdbcError, sql_check,
};
use crate::odbc::query::build_select;
use crate::odbc::{OdbcColumn, OdbcConnection, OdbcDataType, OdbcRow, OdbcValue};
use odbc_sys::{CDataType, FreeStmtOption, HStmt, Len, NULL_DATA, SqlReturn, ULen};
use std::sync::Arc;
use widestring::{U16Str, U16String};

/// Capacity, in wide characters, of the column-name buffer used during
/// result-set introspection.
const COLUMN_NAME_CHARS: usize = 256;

impl OdbcConnection {
    /// Execute a SQL statement directly and materialize its result set.
    ///
    /// Statements with no tabular result (DML, DDL) return an empty vector.
    /// The statement cursor is closed on every exit path, success or
    /// failure, so the handle stays reusable for the next execution.
    pub fn execute_query(&mut self, sql: &str) -> Result<Vec<OdbcRow>, OdbcError> {
        let stmt = self.stmt.ok_or(OdbcError::NotConnected)?;
        let result = self.materialize(stmt, sql);
        let code = unsafe { (self.library.free_stmt)(stmt, FreeStmtOption::Close) };
        if let Err(failure) = sql_check("SQLFreeStmt", code, ACCEPT_SUCCESS) {
            log::warn!("closing the statement cursor failed: {failure}");
        }
        result.map_err(OdbcError::Query)
    }

    /// Build a bracket-quoted `SELECT` over `table` and execute it.
    ///
    /// An empty column list selects all columns.
    pub fn select(&mut self, table: &str, columns: &[&str]) -> Result<Vec<OdbcRow>, OdbcError> {
        self.execute_query(&build_select(table, columns))
    }

    fn materialize(&self, stmt: HStmt, sql: &str) -> Result<Vec<OdbcRow>, OdbcCallFailure> {
        let statement_text = U16String::from_str(sql);
        let code = unsafe {
            (self.library.exec_direct)(stmt, statement_text.as_ptr(), statement_text.len() as i32)
        };
        // SQL_NO_DATA here is a searched update/delete that matched nothing.
        if sql_check("SQLExecDirectW", code, ACCEPT_SUCCESS_OR_NO_DATA)? == SqlReturn::NO_DATA {
            return Ok(Vec::new());
        }

        let mut column_count: i16 = 0;
        let code = unsafe { (self.library.num_result_cols)(stmt, &mut column_count) };
        sql_check("SQLNumResultCols", code, ACCEPT_SUCCESS)?;
        if column_count <= 0 {
            return Ok(Vec::new());
        }

        // Introspection happens unconditionally, even when no rows follow.
        let columns = self.describe_columns(stmt, column_count as u16)?;

        let mut rows = Vec::new();
        loop {
            let code = unsafe { (self.library.fetch)(stmt) };
            if sql_check("SQLFetch", code, ACCEPT_SUCCESS_OR_NO_DATA)? == SqlReturn::NO_DATA {
                break;
            }
            let mut values = Vec::with_capacity(columns.len());
            for column in columns.iter() {
                values.push(self.fetch_value(stmt, column)?);
            }
            rows.push(OdbcRow::new(Arc::clone(&columns), values));
        }
        Ok(rows)
    }

    fn describe_columns(
        &self,
        stmt: HStmt,
        count: u16,
    ) -> Result<Arc<[OdbcColumn]>, OdbcCallFailure> {
        let mut columns = Vec::with_capacity(count as usize);
        for ordinal in 1..=count {
            let mut name = [0u16; COLUMN_NAME_CHARS];
            let mut name_len: i16 = 0;
            let mut type_code: i16 = 0;
            let mut column_size: ULen = 0;
            let mut decimal_digits: i16 = 0;
            let mut nullable: i16 = 0;
            let code = unsafe {
                (self.library.describe_col)(
                    stmt,
                    ordinal,
                    name.as_mut_ptr(),
                    COLUMN_NAME_CHARS as i16,
                    &mut name_len,
                    &mut type_code,
                    &mut column_size,
                    &mut decimal_digits,
                    &mut nullable,
                )
            };
            sql_check("SQLDescribeColW", code, ACCEPT_SUCCESS)?;
            let reported = (name_len.max(0) as usize).min(COLUMN_NAME_CHARS);
            let column_name = U16Str::from_slice(&name[..reported]).to_string_lossy();
            columns.push(OdbcColumn::new(
                ordinal,
                column_name,
                OdbcDataType::from_code(type_code),
            ));
        }
        Ok(columns.into())
    }

    fn fetch_value(
        &self,
        stmt: HStmt,
        column: &OdbcColumn,
    ) -> Result<OdbcValue, OdbcCallFailure> {
        match column.data_type() {
            OdbcDataType::Bit => Ok(self
                .fetch_scalar::<u8>(stmt, column.ordinal(), CDataType::Bit)?
                .map_or(OdbcValue::Null, |byte| OdbcValue::Bool(byte != 0))),
            OdbcDataType::TinyInt | OdbcDataType::SmallInt | OdbcDataType::Integer => Ok(self
                .fetch_scalar::<i32>(stmt, column.ordinal(), CDataType::SLong)?
                .map_or(OdbcValue::Null, |value| OdbcValue::Int(value.into()))),
            OdbcDataType::BigInt => Ok(self
                .fetch_scalar::<i64>(stmt, column.ordinal(), CDataType::SBigInt)?
                .map_or(OdbcValue::Null, OdbcValue::Int)),
            OdbcDataType::Real
            | OdbcDataType::Float
            | OdbcDataType::Double
            | OdbcDataType::Decimal
            | OdbcDataType::Numeric => Ok(self
                .fetch_scalar::<f64>(stmt, column.ordinal(), CDataType::Double)?
                .map_or(OdbcValue::Null, OdbcValue::Double)),
            OdbcDataType::Char
            | OdbcDataType::Varchar
            | OdbcDataType::LongVarchar
            | OdbcDataType::WChar
            | OdbcDataType::WVarchar
            | OdbcDataType::WLongVarchar
            | OdbcDataType::Date
            | OdbcDataType::Time
            | OdbcDataType::Timestamp => self.fetch_wide_text(stmt, column.ordinal()),
            OdbcDataType::Other(type_code) => {
                log::warn!(
                    "column `{}` has unrecognized SQL type code {type_code}; fetching as text",
                    column.name()
                );
                self.fetch_wide_text(stmt, column.ordinal())
            }
        }
    }

    /// Retrieve one column into a fixed-size C buffer.
    ///
    /// `None` means SQL NULL. A `SQL_NO_DATA` return is folded into NULL as
    /// well: the row is already positioned, so a column with nothing to
    /// report is indistinguishable from NULL at this layer.
    fn fetch_scalar<T: Copy + Default>(
        &self,
        stmt: HStmt,
        ordinal: u16,
        c_type: CDataType,
    ) -> Result<Option<T>, OdbcCallFailure> {
        let mut value = T::default();
        let mut indicator: Len = 0;
        let code = unsafe {
            (self.library.get_data)(
                stmt,
                ordinal,
                c_type,
                (&raw mut value).cast(),
                size_of::<T>() as Len,
                &mut indicator,
            )
        };
        let code = sql_check("SQLGetData", code, ACCEPT_SUCCESS_OR_NO_DATA)?;
        if code == SqlReturn::NO_DATA || indicator == NULL_DATA {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    /// Retrieve one column as wide text into the bounded fetch buffer,
    /// decode it, and trim surrounding whitespace.
    ///
    /// Data longer than the buffer truncates silently.
    fn fetch_wide_text(&self, stmt: HStmt, ordinal: u16) -> Result<OdbcValue, OdbcCallFailure> {
        let capacity = self.options.text_buffer_chars.max(2);
        let mut buffer = vec![0u16; capacity];
        let mut indicator: Len = 0;
        let code = unsafe {
            (self.library.get_data)(
                stmt,
                ordinal,
                CDataType::WChar,
                buffer.as_mut_ptr().cast(),
                (buffer.len() * size_of::<u16>()) as Len,
                &mut indicator,
            )
        };
        let code = sql_check("SQLGetData", code, ACCEPT_SUCCESS_OR_NO_DATA)?;
        if code == SqlReturn::NO_DATA || indicator == NULL_DATA {
            return Ok(OdbcValue::Null);
        }
        // The indicator reports the full byte length of the column data, or
        // SQL_NO_TOTAL when the driver cannot tell; either way no more than
        // the buffer's worth (minus the terminator) actually arrived.
        let chars = if indicator < 0 {
            capacity - 1
        } else {
            ((indicator as usize) / size_of::<u16>()).min(capacity - 1)
        };
        let text = U16Str::from_slice(&buffer[..chars]).to_string_lossy();
        Ok(OdbcValue::Text(text.trim().to_string()))
    }
}
