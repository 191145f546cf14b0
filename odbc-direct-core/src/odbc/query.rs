//! Query construction helpers.

/// Build a `SELECT` statement over bracket-quoted identifiers.
///
/// An empty column list selects all columns via `*`. Bracket-quoting is the
/// only sanitization applied: identifiers containing a closing bracket are
/// forwarded as-is.
///
/// # Example
///
/// ```rust
/// use odbc_direct_core::odbc::build_select;
///
/// assert_eq!(build_select("Items", &["ID", "Name"]), "SELECT [ID], [Name] FROM [Items]");
/// assert_eq!(build_select("Items", &[]), "SELECT * FROM [Items]");
/// ```
pub fn build_select(table: &str, columns: &[&str]) -> String {
    let column_list = if columns.is_empty() {
        "*".to_string()
    } else {
        columns
            .iter()
            .map(|column| format!("[{column}]"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("SELECT {column_list} FROM [{table}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_named_columns() {
        assert_eq!(
            build_select("Items", &["ID", "Name"]),
            "SELECT [ID], [Name] FROM [Items]"
        );
    }

    #[test]
    fn selects_all_columns_when_none_are_given() {
        assert_eq!(build_select("Items", &[]), "SELECT * FROM [Items]");
    }

    #[test]
    fn quotes_each_identifier_independently() {
        assert_eq!(
            build_select("Order Details", &["Unit Price"]),
            "SELECT [Unit Price] FROM [Order Details]"
        );
    }
}
