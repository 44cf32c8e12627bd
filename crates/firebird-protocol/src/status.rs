//! Status vector decoding.
//!
//! The server reports errors and warnings as a sequence of tagged,
//! 4-byte-aligned arguments terminated by an explicit end tag. Decoding
//! happens in two steps: [`StatusVector::decode`] reads the raw arguments off
//! the wire, and [`StatusVector::resolve`] composes a human-readable message
//! against a [`MessageCatalog`].

use std::collections::HashMap;

use bytes::Buf;

use crate::codec::{get_bytes, get_i32};
use crate::error::ProtocolError;

/// The gds code whose numeric argument carries the SQL error code.
pub const GDS_SQL_ERROR: i32 = 335_544_436;

/// Status vector argument tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatusTag {
    /// End of the vector.
    End = 0,
    /// A gds (message) code.
    Gds = 1,
    /// A string argument.
    String = 2,
    /// A counted string argument.
    CString = 3,
    /// A numeric argument.
    Number = 4,
    /// Pre-formatted text.
    Interpreted = 5,
    /// A warning code.
    Warning = 18,
    /// A five-character SQLSTATE.
    SqlState = 19,
}

impl StatusTag {
    /// Create a tag from its wire value.
    pub fn from_i32(value: i32) -> Result<Self, ProtocolError> {
        Ok(match value {
            0 => Self::End,
            1 => Self::Gds,
            2 => Self::String,
            3 => Self::CString,
            4 => Self::Number,
            5 => Self::Interpreted,
            18 => Self::Warning,
            19 => Self::SqlState,
            other => return Err(ProtocolError::InvalidStatusTag(other)),
        })
    }
}

/// One decoded status vector argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusArg {
    /// Message code; selects a template.
    Gds(i32),
    /// Numeric argument.
    Number(i32),
    /// Text argument (string, counted string or interpreted text).
    Text(String),
    /// Warning code.
    Warning(i32),
    /// SQLSTATE.
    SqlState(String),
}

/// A raw status vector as read from the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusVector {
    args: Vec<StatusArg>,
}

impl StatusVector {
    /// Build a vector from already-decoded arguments.
    #[must_use]
    pub fn from_args(args: Vec<StatusArg>) -> Self {
        Self { args }
    }

    /// Decode arguments up to and including the end tag.
    pub fn decode(src: &mut impl Buf) -> Result<Self, ProtocolError> {
        let mut args = Vec::new();
        loop {
            match StatusTag::from_i32(get_i32(src)?)? {
                StatusTag::End => break,
                StatusTag::Gds => args.push(StatusArg::Gds(get_i32(src)?)),
                StatusTag::Number => args.push(StatusArg::Number(get_i32(src)?)),
                StatusTag::Warning => args.push(StatusArg::Warning(get_i32(src)?)),
                StatusTag::String | StatusTag::CString | StatusTag::Interpreted => {
                    let text = get_bytes(src)?;
                    args.push(StatusArg::Text(String::from_utf8_lossy(&text).into_owned()));
                }
                StatusTag::SqlState => {
                    let text = get_bytes(src)?;
                    args.push(StatusArg::SqlState(
                        String::from_utf8_lossy(&text).into_owned(),
                    ));
                }
            }
        }
        Ok(Self { args })
    }

    /// The decoded arguments, in wire order.
    #[must_use]
    pub fn args(&self) -> &[StatusArg] {
        &self.args
    }

    /// Whether the vector carries no arguments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Compose the diagnostic described by this vector.
    ///
    /// Each nonzero gds code appends its template and restarts placeholder
    /// numbering; each numeric or text argument then fills the next `@n`.
    /// A number following [`GDS_SQL_ERROR`] becomes the SQL code.
    #[must_use]
    pub fn resolve(&self, catalog: &dyn MessageCatalog) -> Diagnostic {
        let mut diag = Diagnostic::default();
        let mut gds_code = 0;
        let mut arg_no = 0;

        for arg in &self.args {
            match arg {
                StatusArg::Gds(code) => {
                    gds_code = *code;
                    if *code != 0 {
                        if !diag.gds_codes.contains(code) {
                            diag.gds_codes.push(*code);
                        }
                        let template = catalog
                            .template(*code)
                            .map_or_else(|| "@1".to_owned(), normalize_template);
                        if !diag.message.is_empty() {
                            diag.message.push('\n');
                        }
                        diag.message.push_str(&template);
                        arg_no = 0;
                    }
                }
                StatusArg::Number(n) => {
                    if gds_code == GDS_SQL_ERROR {
                        diag.sql_code = *n;
                    }
                    arg_no += 1;
                    diag.message = diag.message.replace(&format!("@{arg_no}"), &n.to_string());
                }
                StatusArg::Text(text) => {
                    arg_no += 1;
                    diag.message = diag.message.replace(&format!("@{arg_no}"), text);
                }
                StatusArg::Warning(code) => diag.warnings.push(*code),
                StatusArg::SqlState(state) => diag.sql_state = Some(state.clone()),
            }
        }
        diag
    }
}

/// Rewrite `%g` placeholders as positional `@1`, `@2`, ...
fn normalize_template(template: &str) -> String {
    if !template.contains("%g") {
        return template.to_owned();
    }
    let mut out = String::with_capacity(template.len() + 4);
    let mut n = 0;
    let mut parts = template.split("%g").peekable();
    while let Some(part) = parts.next() {
        out.push_str(part);
        if parts.peek().is_some() {
            n += 1;
            out.push('@');
            out.push_str(&n.to_string());
        }
    }
    out
}

/// A resolved diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostic {
    /// Every distinct nonzero gds code, in order of appearance.
    pub gds_codes: Vec<i32>,
    /// SQL error code, 0 if none was reported.
    pub sql_code: i32,
    /// SQLSTATE, when the server sent one.
    pub sql_state: Option<String>,
    /// Warning codes.
    pub warnings: Vec<i32>,
    /// Composed message with placeholders substituted.
    pub message: String,
}

impl Diagnostic {
    /// Whether this diagnostic reports an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.sql_code != 0 || !self.message.is_empty()
    }
}

/// Lookup of message templates by gds code.
///
/// Templates use `@1`, `@2`, ... or `%g` placeholders.
pub trait MessageCatalog: Send + Sync {
    /// The template for `code`, if known.
    fn template(&self, code: i32) -> Option<&str>;
}

impl MessageCatalog for HashMap<i32, String> {
    fn template(&self, code: i32) -> Option<&str> {
        self.get(&code).map(String::as_str)
    }
}

impl MessageCatalog for HashMap<i32, &'static str> {
    fn template(&self, code: i32) -> Option<&str> {
        self.get(&code).copied()
    }
}

/// A catalog backed by a static table sorted by code.
#[derive(Debug, Clone, Copy)]
pub struct StaticCatalog {
    entries: &'static [(i32, &'static str)],
}

impl StaticCatalog {
    /// Wrap a table. The entries must be sorted by code.
    #[must_use]
    pub const fn new(entries: &'static [(i32, &'static str)]) -> Self {
        Self { entries }
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MessageCatalog for StaticCatalog {
    fn template(&self, code: i32) -> Option<&str> {
        self.entries
            .binary_search_by_key(&code, |(c, _)| *c)
            .ok()
            .map(|idx| self.entries[idx].1)
    }
}

/// A catalog that knows nothing; every code resolves to its first argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl MessageCatalog for EmptyCatalog {
    fn template(&self, _code: i32) -> Option<&str> {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codec::{put_i32, put_str};
    use bytes::BytesMut;

    fn fake_catalog() -> HashMap<i32, &'static str> {
        let mut catalog = HashMap::new();
        catalog.insert(335_544_569, "Dynamic SQL Error");
        catalog.insert(GDS_SQL_ERROR, "SQL error code = @1");
        catalog.insert(335_544_580, "Table unknown\n@1");
        catalog.insert(335_544_347, "validation error for column %g, value \"%g\"");
        catalog
    }

    #[test]
    fn test_sql_code_captured_and_substituted() {
        let mut buf = BytesMut::new();
        put_i32(&mut buf, 1);
        put_i32(&mut buf, GDS_SQL_ERROR);
        put_i32(&mut buf, 4);
        put_i32(&mut buf, 30);
        put_i32(&mut buf, 0);

        let mut cursor = buf.freeze();
        let status = StatusVector::decode(&mut cursor).unwrap();
        assert!(!cursor.has_remaining());

        let diag = status.resolve(&fake_catalog());
        assert_eq!(diag.sql_code, 30);
        assert_eq!(diag.message, "SQL error code = 30");
        assert_eq!(diag.gds_codes, vec![GDS_SQL_ERROR]);
        assert!(diag.is_error());
    }

    #[test]
    fn test_multiple_templates() {
        let mut buf = BytesMut::new();
        put_i32(&mut buf, 1);
        put_i32(&mut buf, 335_544_569);
        put_i32(&mut buf, 1);
        put_i32(&mut buf, GDS_SQL_ERROR);
        put_i32(&mut buf, 4);
        put_i32(&mut buf, -204);
        put_i32(&mut buf, 1);
        put_i32(&mut buf, 335_544_580);
        put_i32(&mut buf, 2);
        put_str(&mut buf, "FOO");
        put_i32(&mut buf, 19);
        put_str(&mut buf, "42S02");
        put_i32(&mut buf, 0);

        let diag = StatusVector::decode(&mut buf.freeze())
            .unwrap()
            .resolve(&fake_catalog());
        assert_eq!(diag.sql_code, -204);
        assert_eq!(
            diag.message,
            "Dynamic SQL Error\nSQL error code = -204\nTable unknown\nFOO"
        );
        assert_eq!(diag.sql_state.as_deref(), Some("42S02"));
        assert_eq!(diag.gds_codes.len(), 3);
    }

    #[test]
    fn test_percent_g_templates() {
        let status = StatusVector::from_args(vec![
            StatusArg::Gds(335_544_347),
            StatusArg::Text("A".into()),
            StatusArg::Text("42".into()),
        ]);
        let diag = status.resolve(&fake_catalog());
        assert_eq!(diag.message, "validation error for column A, value \"42\"");
        assert_eq!(diag.sql_code, 0);
    }

    #[test]
    fn test_unknown_code_uses_first_argument() {
        let status = StatusVector::from_args(vec![
            StatusArg::Gds(1),
            StatusArg::Text("raw text".into()),
        ]);
        assert_eq!(status.resolve(&EmptyCatalog).message, "raw text");
    }

    #[test]
    fn test_success_vector() {
        let mut cursor: &[u8] = &[0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0];
        let diag = StatusVector::decode(&mut cursor)
            .unwrap()
            .resolve(&fake_catalog());
        assert!(!diag.is_error());
        assert!(diag.gds_codes.is_empty());
    }

    #[test]
    fn test_warning_is_not_error() {
        let status = StatusVector::from_args(vec![StatusArg::Warning(335_544_808)]);
        let diag = status.resolve(&fake_catalog());
        assert!(!diag.is_error());
        assert_eq!(diag.warnings, vec![335_544_808]);
    }

    #[test]
    fn test_bad_tag_is_desync() {
        let mut cursor: &[u8] = &[0, 0, 0, 42];
        let err = StatusVector::decode(&mut cursor).unwrap_err();
        assert_eq!(err, ProtocolError::InvalidStatusTag(42));
        assert!(err.is_desync());
    }

    #[test]
    fn test_missing_end_is_incomplete() {
        let mut cursor: &[u8] = &[0, 0, 0, 1, 0, 0, 0, 5];
        assert!(StatusVector::decode(&mut cursor).unwrap_err().is_incomplete());
    }

    #[test]
    fn test_static_catalog_lookup() {
        static TABLE: &[(i32, &str)] = &[(1, "one"), (5, "five"), (9, "nine")];
        let catalog = StaticCatalog::new(TABLE);
        assert_eq!(catalog.template(5), Some("five"));
        assert_eq!(catalog.template(6), None);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_normalize_template() {
        assert_eq!(normalize_template("a %g b %g"), "a @1 b @2");
        assert_eq!(normalize_template("%g"), "@1");
        assert_eq!(normalize_template("plain"), "plain");
    }
}
