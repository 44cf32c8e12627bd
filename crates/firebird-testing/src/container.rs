//! Firebird container support via testcontainers.

use testcontainers::Image;
use testcontainers::core::{ContainerPort, WaitFor};

/// Port the server listens on inside the container.
pub const FIREBIRD_PORT: u16 = 3050;

/// Firebird container image.
///
/// Uses the community `firebirdsql/firebird` image, which creates the
/// configured database on first start.
#[derive(Debug, Clone)]
pub struct FirebirdContainer {
    /// SYSDBA password.
    pub password: String,
    /// Database created at startup, relative to the image's data directory.
    pub database: String,
    /// Container tag (version).
    pub tag: String,
}

impl Default for FirebirdContainer {
    fn default() -> Self {
        Self {
            password: "masterkey".to_string(),
            database: "test.fdb".to_string(),
            tag: "5".to_string(),
        }
    }
}

impl FirebirdContainer {
    /// Create a new Firebird container configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SYSDBA password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Set the database created at startup.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the container tag (Firebird version).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Path of the created database as a client should request it.
    #[must_use]
    pub fn database_path(&self) -> String {
        format!("/var/lib/firebird/data/{}", self.database)
    }
}

impl Image for FirebirdContainer {
    fn name(&self) -> &str {
        "firebirdsql/firebird"
    }

    fn tag(&self) -> &str {
        &self.tag
    }

    fn ready_conditions(&self) -> Vec<WaitFor> {
        vec![
            WaitFor::message_on_stdout("Starting Firebird"),
            WaitFor::seconds(3),
        ]
    }

    fn env_vars(
        &self,
    ) -> impl IntoIterator<
        Item = (
            impl Into<std::borrow::Cow<'_, str>>,
            impl Into<std::borrow::Cow<'_, str>>,
        ),
    > {
        vec![
            ("FIREBIRD_ROOT_PASSWORD", self.password.as_str()),
            ("FIREBIRD_DATABASE", self.database.as_str()),
            ("FIREBIRD_DATABASE_DEFAULT_CHARSET", "UTF8"),
        ]
    }

    fn expose_ports(&self) -> &[ContainerPort] {
        &[ContainerPort::Tcp(FIREBIRD_PORT)]
    }
}
