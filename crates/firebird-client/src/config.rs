//! Client configuration.

use std::sync::Arc;
use std::time::Duration;

use firebird_protocol::MessageCatalog;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::messages::MESSAGES;

/// Default Firebird server port.
pub const DEFAULT_PORT: u16 = 3050;

/// Default host when the DSN names none.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// `[user[:password]@](address)/path` or `[user[:password]@]host[:port]/path`.
#[allow(clippy::unwrap_used)]
static DSN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<user>[^:@]*)(?::(?P<password>.*))?@)?(?:\((?P<addr>[^)]*)\)|(?P<host>[^/]*))/(?P<db>.+)$",
    )
    .unwrap()
});

/// Timeout configuration.
///
/// Only the TCP connect is bounded by the client itself; wrap individual
/// operations in `tokio::time::timeout` to bound them.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Time to establish the TCP connection (default: 15s).
    pub connect_timeout: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
        }
    }
}

impl TimeoutConfig {
    /// Create a new timeout configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TCP connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Configuration for connecting to a Firebird server.
///
/// This struct is marked `#[non_exhaustive]`. Use [`Config::default()`] or
/// [`Config::from_dsn()`] and the builder methods to construct instances.
#[derive(Clone)]
#[non_exhaustive]
pub struct Config {
    /// Server hostname or IP address.
    pub host: String,

    /// Server port (default: 3050).
    pub port: u16,

    /// Database path or alias on the server.
    pub database: String,

    /// User name.
    pub user: String,

    /// Password.
    pub password: String,

    /// SQL role to attach with.
    pub role: Option<String>,

    /// Client character set (default: `UTF8`).
    pub charset: String,

    /// Rows requested per fetch round trip (default: 400).
    pub fetch_size: i32,

    /// Size of info response buffers the server may fill (default: 1024).
    pub info_buffer_length: i32,

    /// Page size used when creating a database (default: 4096).
    pub page_size: i32,

    /// Whether BLOB columns in result rows are read eagerly (default: true).
    pub auto_load_blobs: bool,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Error message templates used to compose server errors.
    pub catalog: Arc<dyn MessageCatalog>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: String::new(),
            user: String::new(),
            password: String::new(),
            role: None,
            charset: "UTF8".to_string(),
            fetch_size: 400,
            info_buffer_length: 1024,
            page_size: 4096,
            auto_load_blobs: true,
            timeouts: TimeoutConfig::default(),
            catalog: Arc::new(MESSAGES),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("charset", &self.charset)
            .field("fetch_size", &self.fetch_size)
            .field("info_buffer_length", &self.info_buffer_length)
            .field("page_size", &self.page_size)
            .field("auto_load_blobs", &self.auto_load_blobs)
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a DSN into configuration.
    ///
    /// ```text
    /// [user[:password]@](address)/database-path
    /// [user[:password]@]host[:port]/database-path
    /// ```
    ///
    /// The host defaults to `127.0.0.1` and the port to 3050.
    pub fn from_dsn(dsn: &str) -> Result<Self> {
        let caps = DSN_RE
            .captures(dsn)
            .ok_or_else(|| Error::Config(format!("invalid DSN: {dsn}")))?;

        let mut config = Self::default();
        if let Some(user) = caps.name("user") {
            config.user = user.as_str().to_string();
        }
        if let Some(password) = caps.name("password") {
            config.password = password.as_str().to_string();
        }

        let address = caps
            .name("addr")
            .or_else(|| caps.name("host"))
            .map_or("", |m| m.as_str());
        let (host, port) = split_address(address)?;
        if !host.is_empty() {
            config.host = host.to_string();
        }
        config.port = port;

        if let Some(db) = caps.name("db") {
            config.database = db.as_str().to_string();
        }

        tracing::debug!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "parsed DSN"
        );
        Ok(config)
    }

    /// The `host:port` address to connect to.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Set the server host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the server port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the database path.
    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the user name and password.
    #[must_use]
    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Set the SQL role.
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the client character set.
    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Set the number of rows requested per fetch.
    #[must_use]
    pub fn fetch_size(mut self, rows: i32) -> Self {
        self.fetch_size = rows.max(1);
        self
    }

    /// Set the info response buffer size.
    #[must_use]
    pub fn info_buffer_length(mut self, length: i32) -> Self {
        self.info_buffer_length = length;
        self
    }

    /// Set the page size for newly created databases.
    #[must_use]
    pub fn page_size(mut self, page_size: i32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Enable or disable eager BLOB loading.
    #[must_use]
    pub fn auto_load_blobs(mut self, enabled: bool) -> Self {
        self.auto_load_blobs = enabled;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connect_timeout = timeout;
        self
    }

    /// Set the timeout configuration.
    #[must_use]
    pub fn timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Replace the error message catalog.
    #[must_use]
    pub fn catalog(mut self, catalog: Arc<dyn MessageCatalog>) -> Self {
        self.catalog = catalog;
        self
    }
}

fn split_address(address: &str) -> Result<(&str, u16)> {
    match address.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid port: {port}")))?;
            Ok((host, port))
        }
        None => Ok((address, DEFAULT_PORT)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dsn_full() {
        let config = Config::from_dsn("sysdba:masterkey@db.example:3051/var/lib/employee.fdb")
            .unwrap();
        assert_eq!(config.user, "sysdba");
        assert_eq!(config.password, "masterkey");
        assert_eq!(config.host, "db.example");
        assert_eq!(config.port, 3051);
        assert_eq!(config.database, "var/lib/employee.fdb");
    }

    #[test]
    fn test_dsn_parenthesised_address() {
        let config = Config::from_dsn("user:pw@(10.0.0.5)//data/test.fdb").unwrap();
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database, "/data/test.fdb");
        assert_eq!(config.address(), "10.0.0.5:3050");
    }

    #[test]
    fn test_dsn_defaults() {
        let config = Config::from_dsn("/employee").unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database, "employee");
        assert!(config.user.is_empty());
    }

    #[test]
    fn test_dsn_user_without_password() {
        let config = Config::from_dsn("alice@localhost/db").unwrap();
        assert_eq!(config.user, "alice");
        assert!(config.password.is_empty());
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn test_dsn_invalid() {
        assert!(matches!(Config::from_dsn("no-path"), Err(Error::Config(_))));
        assert!(matches!(
            Config::from_dsn("host:notaport/db"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = Config::new()
            .host("fb")
            .port(3055)
            .database("/db/x.fdb")
            .credentials("u", "p")
            .role("RDB$ADMIN")
            .fetch_size(0)
            .auto_load_blobs(false)
            .connect_timeout(Duration::from_secs(2));
        assert_eq!(config.address(), "fb:3055");
        assert_eq!(config.role.as_deref(), Some("RDB$ADMIN"));
        assert_eq!(config.fetch_size, 1);
        assert!(!config.auto_load_blobs);
        assert_eq!(config.timeouts.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = Config::new().credentials("u", "secret");
        assert!(!format!("{config:?}").contains("secret"));
    }
}
