//! ODBC connection options.

/// Default capacity, in wide characters, of the bounded column fetch buffer.
pub const DEFAULT_TEXT_BUFFER_CHARS: usize = 1024;

/// Options for connecting to an ODBC data source.
///
/// The connection string is opaque to the connector: it is assembled here
/// (or supplied whole) and forwarded verbatim to the driver, never parsed.
#[derive(Debug, Clone)]
pub struct OdbcConnectOptions {
    pub(crate) connection_string: String,
    pub(crate) library: Option<String>,
    pub(crate) text_buffer_chars: usize,
}

impl Default for OdbcConnectOptions {
    fn default() -> Self {
        Self {
            connection_string: String::new(),
            library: None,
            text_buffer_chars: DEFAULT_TEXT_BUFFER_CHARS,
        }
    }
}

impl OdbcConnectOptions {
    /// Create new options with the given connection string.
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            ..Default::default()
        }
    }

    /// Create options from a DSN.
    pub fn from_dsn(dsn: impl Into<String>) -> Self {
        let dsn = dsn.into();
        Self::new(format!("DSN={}", dsn))
    }

    /// Set the connection string.
    pub fn connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.connection_string = connection_string.into();
        self
    }

    /// Get the connection string.
    pub fn get_connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Set the driver-manager library name or path to load.
    ///
    /// Defaults to the platform-standard driver manager.
    pub fn library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }

    /// The driver-manager library that will be loaded.
    pub fn library_name(&self) -> &str {
        self.library.as_deref().unwrap_or_else(|| default_library())
    }

    /// Set the capacity, in wide characters, of the per-column fetch buffer.
    ///
    /// Column data longer than the buffer is truncated silently.
    pub fn text_buffer_chars(mut self, chars: usize) -> Self {
        self.text_buffer_chars = chars;
        self
    }

    /// Add a driver to the connection string.
    pub fn driver(mut self, driver: &str) -> Self {
        if !self.connection_string.is_empty() {
            self.connection_string.push(';');
        }
        self.connection_string.push_str("Driver={");
        self.connection_string.push_str(driver);
        self.connection_string.push('}');
        self
    }

    /// Add a server to the connection string.
    pub fn server(mut self, server: &str) -> Self {
        if !self.connection_string.is_empty() {
            self.connection_string.push(';');
        }
        self.connection_string.push_str("Server=");
        self.connection_string.push_str(server);
        self
    }

    /// Add a database to the connection string.
    pub fn database(mut self, database: &str) -> Self {
        if !self.connection_string.is_empty() {
            self.connection_string.push(';');
        }
        self.connection_string.push_str("Database=");
        self.connection_string.push_str(database);
        self
    }

    /// Add a username to the connection string.
    pub fn username(mut self, username: &str) -> Self {
        if !self.connection_string.is_empty() {
            self.connection_string.push(';');
        }
        self.connection_string.push_str("UID=");
        self.connection_string.push_str(username);
        self
    }

    /// Add a password to the connection string.
    pub fn password(mut self, password: &str) -> Self {
        if !self.connection_string.is_empty() {
            self.connection_string.push(';');
        }
        self.connection_string.push_str("PWD=");
        self.connection_string.push_str(password);
        self
    }
}

/// The platform-standard driver-manager library.
pub fn default_library() -> &'static str {
    if cfg!(windows) {
        "odbc32.dll"
    } else if cfg!(target_os = "macos") {
        "libodbc.2.dylib"
    } else {
        "libodbc.so.2"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_assembles_a_connection_string() {
        let options = OdbcConnectOptions::default()
            .driver("ODBC Driver 18 for SQL Server")
            .server("localhost,1433")
            .database("master")
            .username("sa")
            .password("secret");
        assert_eq!(
            options.get_connection_string(),
            "Driver={ODBC Driver 18 for SQL Server};Server=localhost,1433;Database=master;UID=sa;PWD=secret"
        );
    }

    #[test]
    fn from_dsn() {
        let options = OdbcConnectOptions::from_dsn("MyDataSource").username("user");
        assert_eq!(options.get_connection_string(), "DSN=MyDataSource;UID=user");
    }

    #[test]
    fn library_defaults_to_the_platform_driver_manager() {
        let options = OdbcConnectOptions::new("DSN=x");
        assert_eq!(options.library_name(), default_library());
        let options = options.library("/opt/odbc/libcustom.so");
        assert_eq!(options.library_name(), "/opt/odbc/libcustom.so");
    }

    #[test]
    fn text_buffer_default_and_override() {
        assert_eq!(
            OdbcConnectOptions::default().text_buffer_chars,
            DEFAULT_TEXT_BUFFER_CHARS
        );
        let options = OdbcConnectOptions::default().text_buffer_chars(64);
        assert_eq!(options.text_buffer_chars, 64);
    }
}
