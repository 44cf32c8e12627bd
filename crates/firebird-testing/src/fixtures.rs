//! Test fixture utilities.

use firebird_client::Config;
use firebird_protocol::types::{BLOB_SUBTYPE_TEXT, SUBTYPE_OCTETS};
use firebird_protocol::{BlobId, SqlType, XSqlVar};

/// Configuration for a live server from `FIREBIRD_*` environment
/// variables, or `None` when `FIREBIRD_HOST` is unset.
///
/// `FIREBIRD_PORT` defaults to 3050, `FIREBIRD_DATABASE` to `employee`,
/// and the credentials to `SYSDBA`/`masterkey`.
#[must_use]
pub fn config_from_env() -> Option<Config> {
    let host = std::env::var("FIREBIRD_HOST").ok()?;
    let port = std::env::var("FIREBIRD_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3050);
    let database = std::env::var("FIREBIRD_DATABASE").unwrap_or_else(|_| "employee".into());
    let user = std::env::var("FIREBIRD_USER").unwrap_or_else(|_| "SYSDBA".into());
    let password = std::env::var("FIREBIRD_PASSWORD").unwrap_or_else(|_| "masterkey".into());

    Some(
        Config::new()
            .host(host)
            .port(port)
            .database(database)
            .credentials(user, password),
    )
}

/// An `INTEGER` column.
#[must_use]
pub fn int_column(name: &str) -> XSqlVar {
    XSqlVar::new(SqlType::Long, 4).with_alias(name)
}

/// A `BIGINT` column.
#[must_use]
pub fn bigint_column(name: &str) -> XSqlVar {
    XSqlVar::new(SqlType::Int64, 8).with_alias(name)
}

/// A `NUMERIC(18, scale)` column.
#[must_use]
pub fn numeric_column(name: &str, scale: i32) -> XSqlVar {
    XSqlVar::new(SqlType::Int64, 8)
        .with_scale(-scale)
        .with_alias(name)
}

/// A `VARCHAR(len)` column in a single-byte character set.
#[must_use]
pub fn varchar_column(name: &str, len: i32) -> XSqlVar {
    XSqlVar::new(SqlType::Varying, len).with_alias(name)
}

/// A `BLOB SUB_TYPE TEXT` column.
#[must_use]
pub fn text_blob_column(name: &str) -> XSqlVar {
    XSqlVar::new(SqlType::Blob, 8)
        .with_sub_type(BLOB_SUBTYPE_TEXT)
        .with_alias(name)
}

/// A `BLOB SUB_TYPE BINARY` column.
#[must_use]
pub fn binary_blob_column(name: &str) -> XSqlVar {
    XSqlVar::new(SqlType::Blob, 8).with_alias(name)
}

/// A `VARCHAR(len) CHARACTER SET OCTETS` column.
#[must_use]
pub fn octets_column(name: &str, len: i32) -> XSqlVar {
    XSqlVar::new(SqlType::Varying, len)
        .with_sub_type(SUBTYPE_OCTETS)
        .with_alias(name)
}

/// A recognizable blob id for seeding a mock server.
#[must_use]
pub fn blob_id(n: u32) -> BlobId {
    let mut id = [0u8; 8];
    id[4..].copy_from_slice(&n.to_be_bytes());
    BlobId(id)
}

/// Test tables created before a test and dropped after it.
pub struct TestFixture {
    /// Table names with their column definitions.
    pub tables: Vec<(String, String)>,
}

impl TestFixture {
    /// Create an empty fixture.
    #[must_use]
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Add a table, given its column list.
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, columns: impl Into<String>) -> Self {
        self.tables.push((name.into(), columns.into()));
        self
    }

    /// DDL creating every table, replacing any existing one.
    #[must_use]
    pub fn create_sql(&self) -> Vec<String> {
        self.tables
            .iter()
            .map(|(name, columns)| format!("RECREATE TABLE {name} ({columns})"))
            .collect()
    }

    /// DDL dropping every table, in reverse creation order.
    #[must_use]
    pub fn drop_sql(&self) -> Vec<String> {
        self.tables
            .iter()
            .rev()
            .map(|(name, _)| format!("DROP TABLE {name}"))
            .collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_sql() {
        let fixture = TestFixture::new()
            .with_table("T_PARENT", "ID INTEGER NOT NULL PRIMARY KEY")
            .with_table("T_CHILD", "ID INTEGER, PARENT_ID INTEGER REFERENCES T_PARENT");
        assert_eq!(
            fixture.create_sql()[0],
            "RECREATE TABLE T_PARENT (ID INTEGER NOT NULL PRIMARY KEY)"
        );
        assert_eq!(fixture.drop_sql(), vec!["DROP TABLE T_CHILD", "DROP TABLE T_PARENT"]);
    }

    #[test]
    fn test_column_helpers() {
        let price = numeric_column("PRICE", 2);
        assert_eq!(price.scale, -2);
        assert_eq!(price.name(), "PRICE");
        assert_eq!(text_blob_column("NOTES").sub_type, BLOB_SUBTYPE_TEXT);
        assert!(octets_column("RAW", 16).is_octets());
        assert_ne!(blob_id(1), blob_id(2));
    }
}
