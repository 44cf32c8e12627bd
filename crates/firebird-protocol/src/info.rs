//! Information request items and response parsing.
//!
//! Info responses are clusters of `item, length (u16 LE), data`, ended by
//! `isc_info_end`. Values inside are little-endian. Statement descriptions
//! nest per-variable clusters inside a `select` or `bind` section and may be
//! cut short with `isc_info_truncated`, in which case the caller asks for
//! the rest starting at the reported variable.

use bytes::Bytes;

use crate::codec::vax_integer;
use crate::error::ProtocolError;
use crate::types::{SqlType, StatementType, XSqlVar};

/// End of an info buffer.
pub const INFO_END: u8 = 1;
/// The buffer was too small; the response stops here.
pub const INFO_TRUNCATED: u8 = 2;

/// Statement information items (`isc_info_sql_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SqlInfoItem {
    /// Output (select list) section.
    Select = 4,
    /// Input (parameter) section.
    Bind = 5,
    /// Variable count, followed by per-variable items.
    DescribeVars = 7,
    /// End of one variable.
    DescribeEnd = 8,
    /// 1-based variable index.
    SqldaSeq = 9,
    /// SQL type code.
    Type = 11,
    /// Subtype.
    SubType = 12,
    /// Scale.
    Scale = 13,
    /// Declared length.
    Length = 14,
    /// Nullable indicator.
    NullInd = 15,
    /// Field name.
    Field = 16,
    /// Relation name.
    Relation = 17,
    /// Owner name.
    Owner = 18,
    /// Alias.
    Alias = 19,
    /// Resume describing at the given index.
    SqldaStart = 20,
    /// Statement type.
    StmtType = 21,
    /// Affected record counts.
    Records = 23,
}

impl SqlInfoItem {
    /// Create an item from its byte value.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            4 => Self::Select,
            5 => Self::Bind,
            7 => Self::DescribeVars,
            8 => Self::DescribeEnd,
            9 => Self::SqldaSeq,
            11 => Self::Type,
            12 => Self::SubType,
            13 => Self::Scale,
            14 => Self::Length,
            15 => Self::NullInd,
            16 => Self::Field,
            17 => Self::Relation,
            18 => Self::Owner,
            19 => Self::Alias,
            20 => Self::SqldaStart,
            21 => Self::StmtType,
            23 => Self::Records,
            _ => return None,
        })
    }
}

/// Most variables a statement can describe (Firebird's column limit).
pub const MAX_DESCRIBED_VARS: usize = 32767;

/// Per-variable describe items, in request order.
const VAR_ITEMS: [u8; 11] = [
    SqlInfoItem::SqldaSeq as u8,
    SqlInfoItem::Type as u8,
    SqlInfoItem::SubType as u8,
    SqlInfoItem::Scale as u8,
    SqlInfoItem::Length as u8,
    SqlInfoItem::NullInd as u8,
    SqlInfoItem::Field as u8,
    SqlInfoItem::Relation as u8,
    SqlInfoItem::Owner as u8,
    SqlInfoItem::Alias as u8,
    SqlInfoItem::DescribeEnd as u8,
];

/// Which half of a statement description a section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Output columns.
    Select,
    /// Input parameters.
    Bind,
}

impl Section {
    fn item(self) -> u8 {
        match self {
            Self::Select => SqlInfoItem::Select as u8,
            Self::Bind => SqlInfoItem::Bind as u8,
        }
    }
}

fn push_section(items: &mut Vec<u8>, section: Section) {
    items.push(section.item());
    items.push(SqlInfoItem::DescribeVars as u8);
    items.extend_from_slice(&VAR_ITEMS);
}

/// Items sent with a prepare request: statement type, then a full
/// description of the output and input messages.
#[must_use]
pub fn prepare_items() -> Vec<u8> {
    let mut items = vec![SqlInfoItem::StmtType as u8];
    push_section(&mut items, Section::Select);
    push_section(&mut items, Section::Bind);
    items
}

/// Items that resume describing `section` at the 1-based `index`.
#[must_use]
pub fn continuation_items(section: Section, index: u16) -> Vec<u8> {
    let mut items = vec![SqlInfoItem::SqldaStart as u8, 2];
    items.extend_from_slice(&index.to_le_bytes());
    push_section(&mut items, section);
    items
}

/// Items asking for affected record counts.
#[must_use]
pub fn records_items() -> Vec<u8> {
    vec![SqlInfoItem::Records as u8, INFO_END]
}

/// The described variables of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribedVars {
    /// Descriptors, one per variable. Entries past a truncation point keep
    /// their defaults until a continuation fills them in.
    pub vars: Vec<XSqlVar>,
    /// When the server ran out of buffer, the 1-based index to resume at.
    pub resume_at: Option<u16>,
}

impl DescribedVars {
    /// Whether every variable has been described.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.resume_at.is_none()
    }
}

/// The result of parsing a prepare response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementInfo {
    /// Statement type.
    pub stmt_type: Option<StatementType>,
    /// Output columns, when the section was present.
    pub select: Option<DescribedVars>,
    /// Input parameters, when the section was present.
    pub bind: Option<DescribedVars>,
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn byte(&mut self) -> Result<u8, ProtocolError> {
        let b = self
            .peek()
            .ok_or_else(|| ProtocolError::InvalidInfo("unexpected end of buffer".into()))?;
        self.pos += 1;
        Ok(b)
    }

    fn cluster(&mut self) -> Result<&'a [u8], ProtocolError> {
        if self.pos + 2 > self.buf.len() {
            return Err(ProtocolError::InvalidInfo("missing cluster length".into()));
        }
        let len = usize::from(u16::from_le_bytes([self.buf[self.pos], self.buf[self.pos + 1]]));
        self.pos += 2;
        let end = self.pos + len;
        if end > self.buf.len() {
            return Err(ProtocolError::InvalidInfo(format!(
                "cluster of {len} bytes overruns buffer"
            )));
        }
        let buf = self.buf;
        let data = &buf[self.pos..end];
        self.pos = end;
        Ok(data)
    }

    fn int(&mut self) -> Result<i64, ProtocolError> {
        self.cluster().map(vax_integer)
    }

    fn int_i32(&mut self, what: &str) -> Result<i32, ProtocolError> {
        let value = self.int()?;
        i32::try_from(value).map_err(|_| ProtocolError::InvalidInfo(format!("{what} {value}")))
    }

    fn text(&mut self) -> Result<String, ProtocolError> {
        self.cluster()
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }
}

/// Parse the describe buffer returned by a prepare request.
pub fn parse_statement_info(buf: &[u8]) -> Result<StatementInfo, ProtocolError> {
    let mut info = StatementInfo::default();
    let mut reader = Reader::new(buf);

    while let Some(item) = reader.peek() {
        match item {
            INFO_END => break,
            INFO_TRUNCATED => {
                return Err(ProtocolError::InvalidInfo(
                    "truncated before any variable was described".into(),
                ));
            }
            _ => {}
        }
        reader.byte()?;
        match SqlInfoItem::from_u8(item) {
            Some(SqlInfoItem::StmtType) => {
                let raw = reader.int()?;
                let raw = i32::try_from(raw)
                    .map_err(|_| ProtocolError::InvalidInfo(format!("statement type {raw}")))?;
                info.stmt_type = Some(StatementType::from_i32(raw)?);
            }
            Some(SqlInfoItem::Select) => {
                let section = parse_section(&mut reader, None)?;
                let truncated = !section.is_complete();
                info.select = Some(section);
                if truncated {
                    break;
                }
            }
            Some(SqlInfoItem::Bind) => {
                let section = parse_section(&mut reader, None)?;
                let truncated = !section.is_complete();
                info.bind = Some(section);
                if truncated {
                    break;
                }
            }
            _ => {
                return Err(ProtocolError::InvalidInfo(format!(
                    "unexpected statement info item {item}"
                )));
            }
        }
    }
    Ok(info)
}

/// Parse a continuation buffer (from [`continuation_items`]) into an
/// existing section.
pub fn parse_continuation(
    buf: &[u8],
    section: Section,
    described: &mut DescribedVars,
) -> Result<(), ProtocolError> {
    let mut reader = Reader::new(buf);
    let item = reader.byte()?;
    if item != section.item() {
        return Err(ProtocolError::InvalidInfo(format!(
            "continuation starts with item {item}"
        )));
    }
    let fresh = parse_section(&mut reader, Some(std::mem::take(&mut described.vars)))?;
    *described = fresh;
    Ok(())
}

/// Parse `describe_vars` and the per-variable clusters that follow it.
///
/// Stops at the first item that is not a per-variable item, leaving it
/// unread, or at `isc_info_truncated`.
fn parse_section(
    reader: &mut Reader<'_>,
    existing: Option<Vec<XSqlVar>>,
) -> Result<DescribedVars, ProtocolError> {
    if reader.byte()? != SqlInfoItem::DescribeVars as u8 {
        return Err(ProtocolError::InvalidInfo("expected describe_vars".into()));
    }
    let count = reader.int()?;
    let count = usize::try_from(count)
        .ok()
        .filter(|c| *c <= MAX_DESCRIBED_VARS)
        .ok_or_else(|| ProtocolError::InvalidInfo(format!("describe_vars count {count}")))?;

    let mut vars = existing.unwrap_or_default();
    vars.resize_with(count, XSqlVar::default);

    let mut index = 0usize;
    let mut resume_at = None;

    while let Some(item) = reader.peek() {
        if item == INFO_TRUNCATED {
            reader.byte()?;
            // Re-describe the variable that was cut off.
            resume_at = Some(u16::try_from(index.max(1)).unwrap_or(u16::MAX));
            break;
        }
        let Some(kind) = SqlInfoItem::from_u8(item) else {
            break;
        };
        if !VAR_ITEMS.contains(&item) {
            break;
        }
        reader.byte()?;

        if kind == SqlInfoItem::DescribeEnd {
            continue;
        }
        if kind == SqlInfoItem::SqldaSeq {
            let seq = reader.int()?;
            index = usize::try_from(seq)
                .ok()
                .filter(|i| (1..=count).contains(i))
                .ok_or_else(|| {
                    ProtocolError::InvalidInfo(format!("variable index {seq} of {count}"))
                })?;
            continue;
        }

        let var = index
            .checked_sub(1)
            .and_then(|i| vars.get_mut(i))
            .ok_or_else(|| ProtocolError::InvalidInfo("item before sqlda_seq".into()))?;
        match kind {
            SqlInfoItem::Type => {
                let code = i32::try_from(reader.int()?)
                    .map_err(|_| ProtocolError::InvalidInfo("type code".into()))?;
                var.sql_type = SqlType::from_code(code)?;
                var.nullable = code & 1 == 1;
            }
            SqlInfoItem::SubType => var.sub_type = reader.int_i32("subtype")?,
            SqlInfoItem::Scale => var.scale = reader.int_i32("scale")?,
            SqlInfoItem::Length => var.length = reader.int_i32("length")?,
            SqlInfoItem::NullInd => var.nullable = reader.int()? != 0,
            SqlInfoItem::Field => var.field = reader.text()?,
            SqlInfoItem::Relation => var.relation = reader.text()?,
            SqlInfoItem::Owner => var.owner = reader.text()?,
            SqlInfoItem::Alias => var.alias = reader.text()?,
            _ => {}
        }
    }

    Ok(DescribedVars { vars, resume_at })
}

/// Affected record counts reported by `isc_info_sql_records`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordCounts {
    /// Rows selected.
    pub selected: u64,
    /// Rows inserted.
    pub inserted: u64,
    /// Rows updated.
    pub updated: u64,
    /// Rows deleted.
    pub deleted: u64,
}

impl RecordCounts {
    /// The count relevant to a statement type.
    #[must_use]
    pub fn for_statement(&self, stmt_type: StatementType) -> u64 {
        match stmt_type {
            StatementType::Insert => self.inserted,
            StatementType::Update => self.updated,
            StatementType::Delete => self.deleted,
            StatementType::Select | StatementType::SelectForUpdate => self.selected,
            _ => 0,
        }
    }
}

/// Parse the response to [`records_items`].
pub fn parse_record_counts(buf: &[u8]) -> Result<RecordCounts, ProtocolError> {
    let mut counts = RecordCounts::default();
    for (item, data) in parse_info_items(buf)? {
        if item != SqlInfoItem::Records as u8 {
            continue;
        }
        let mut reader = Reader::new(&data);
        while let Some(kind) = reader.peek() {
            if kind == INFO_END {
                break;
            }
            reader.byte()?;
            let value = u64::try_from(reader.int()?).unwrap_or(0);
            match kind {
                13 => counts.selected = value,
                14 => counts.inserted = value,
                15 => counts.updated = value,
                16 => counts.deleted = value,
                _ => {}
            }
        }
    }
    Ok(counts)
}

/// Database information items (`isc_info_*`).
pub mod database {
    /// Implementation version string(s).
    pub const ISC_VERSION: u8 = 12;
    /// Page size.
    pub const PAGE_SIZE: u8 = 14;
    /// On-disk structure major version.
    pub const ODS_VERSION: u8 = 32;
    /// On-disk structure minor version.
    pub const ODS_MINOR_VERSION: u8 = 33;
    /// SQL dialect of the database.
    pub const SQL_DIALECT: u8 = 62;
    /// Whether the database is read-only.
    pub const READ_ONLY: u8 = 63;
    /// Firebird version string(s).
    pub const FIREBIRD_VERSION: u8 = 103;
}

/// Transaction information items (`isc_info_tra_*`).
pub mod transaction {
    /// Transaction id.
    pub const ID: u8 = 4;
}

/// Split a generic info buffer into `(item, data)` clusters.
pub fn parse_info_items(buf: &[u8]) -> Result<Vec<(u8, Bytes)>, ProtocolError> {
    let mut reader = Reader::new(buf);
    let mut items = Vec::new();
    while let Some(item) = reader.peek() {
        match item {
            INFO_END => break,
            INFO_TRUNCATED => {
                return Err(ProtocolError::InvalidInfo("info buffer truncated".into()));
            }
            _ => {}
        }
        reader.byte()?;
        let data = reader.cluster()?;
        items.push((item, Bytes::copy_from_slice(data)));
    }
    Ok(items)
}

/// Read a little-endian integer cluster value.
#[must_use]
pub fn info_integer(data: &[u8]) -> i64 {
    vax_integer(data)
}

/// Decode the counted string list used by version items:
/// `count, (len, bytes)*`.
pub fn info_strings(data: &[u8]) -> Result<Vec<String>, ProtocolError> {
    let mut reader = Reader::new(data);
    let count = reader.byte()?;
    let mut out = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let len = usize::from(reader.byte()?);
        let end = reader.pos + len;
        let bytes = data
            .get(reader.pos..end)
            .ok_or_else(|| ProtocolError::InvalidInfo("version string overruns cluster".into()))?;
        out.push(String::from_utf8_lossy(bytes).into_owned());
        reader.pos = end;
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn int_cluster(out: &mut Vec<u8>, item: u8, value: i32) {
        out.push(item);
        out.extend_from_slice(&4u16.to_le_bytes());
        out.extend_from_slice(&value.to_le_bytes());
    }

    fn text_cluster(out: &mut Vec<u8>, item: u8, value: &str) {
        out.push(item);
        out.extend_from_slice(&(value.len() as u16).to_le_bytes());
        out.extend_from_slice(value.as_bytes());
    }

    fn describe_var(out: &mut Vec<u8>, seq: i32, sql_type: i32, len: i32, name: &str) {
        int_cluster(out, 9, seq);
        int_cluster(out, 11, sql_type);
        int_cluster(out, 12, 0);
        int_cluster(out, 13, 0);
        int_cluster(out, 14, len);
        int_cluster(out, 15, sql_type & 1);
        text_cluster(out, 16, name);
        text_cluster(out, 17, "FOO");
        text_cluster(out, 18, "SYSDBA");
        text_cluster(out, 19, name);
        out.push(8);
    }

    #[test]
    fn test_huge_describe_count_rejected() {
        let buf = [21, 4, 0, 1, 0, 0, 0, 4, 7, 4, 0, 0xFF, 0xFF, 0xFF, 0x7F, 1];
        let err = parse_statement_info(&buf).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidInfo(_)), "got {err:?}");
    }

    #[test]
    fn test_describe_count_at_limit() {
        let mut buf = vec![21, 4, 0, 1, 0, 0, 0, 4];
        int_cluster(&mut buf, 7, 32767);
        buf.push(1);
        let info = parse_statement_info(&buf).unwrap();
        assert_eq!(info.select.unwrap().vars.len(), MAX_DESCRIBED_VARS);

        let mut buf = vec![21, 4, 0, 1, 0, 0, 0, 4];
        int_cluster(&mut buf, 7, 32768);
        buf.push(1);
        assert!(parse_statement_info(&buf).is_err());
    }

    #[test]
    fn test_wide_describe_values_rejected() {
        let mut buf = vec![21, 4, 0, 1, 0, 0, 0, 4];
        int_cluster(&mut buf, 7, 1);
        int_cluster(&mut buf, 9, 1);
        // An 8-byte length that does not fit an i32.
        buf.push(14);
        buf.extend_from_slice(&8u16.to_le_bytes());
        buf.extend_from_slice(&(1i64 << 32).to_le_bytes());
        buf.push(8);
        buf.push(1);

        let err = parse_statement_info(&buf).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::InvalidInfo(format!("length {}", 1i64 << 32))
        );
    }

    #[test]
    fn test_prepare_items_layout() {
        let items = prepare_items();
        assert_eq!(items[0], 21);
        assert_eq!(&items[1..3], &[4, 7]);
        assert_eq!(items[13], 8);
        assert_eq!(&items[14..16], &[5, 7]);
        assert_eq!(items.len(), 1 + 13 + 13);
    }

    #[test]
    fn test_continuation_items() {
        let items = continuation_items(Section::Select, 258);
        assert_eq!(&items[..6], &[20, 2, 2, 1, 4, 7]);
    }

    #[test]
    fn test_parse_select() {
        let mut buf = Vec::new();
        int_cluster(&mut buf, 21, 1);
        buf.extend_from_slice(&[4, 7]);
        buf.extend_from_slice(&4u16.to_le_bytes());
        buf.extend_from_slice(&2i32.to_le_bytes());
        describe_var(&mut buf, 1, 497, 4, "A");
        describe_var(&mut buf, 2, 448, 30, "B");
        buf.extend_from_slice(&[5, 7]);
        buf.extend_from_slice(&4u16.to_le_bytes());
        buf.extend_from_slice(&0i32.to_le_bytes());
        buf.push(1);

        let info = parse_statement_info(&buf).unwrap();
        assert_eq!(info.stmt_type, Some(StatementType::Select));
        let select = info.select.unwrap();
        assert!(select.is_complete());
        assert_eq!(select.vars.len(), 2);
        assert_eq!(select.vars[0].sql_type, SqlType::Long);
        assert!(select.vars[0].nullable);
        assert_eq!(select.vars[1].sql_type, SqlType::Varying);
        assert_eq!(select.vars[1].length, 30);
        assert_eq!(select.vars[1].relation, "FOO");
        assert!(!select.vars[1].nullable);
        assert!(info.bind.unwrap().vars.is_empty());
    }

    #[test]
    fn test_truncation_and_continuation() {
        let mut buf = Vec::new();
        int_cluster(&mut buf, 21, 1);
        buf.extend_from_slice(&[4, 7]);
        buf.extend_from_slice(&4u16.to_le_bytes());
        buf.extend_from_slice(&3i32.to_le_bytes());
        describe_var(&mut buf, 1, 496, 4, "A");
        int_cluster(&mut buf, 9, 2);
        int_cluster(&mut buf, 11, 452);
        buf.push(2);

        let info = parse_statement_info(&buf).unwrap();
        let mut select = info.select.unwrap();
        assert_eq!(select.resume_at, Some(2));
        assert!(info.bind.is_none());

        let mut more = vec![4, 7];
        more.extend_from_slice(&4u16.to_le_bytes());
        more.extend_from_slice(&3i32.to_le_bytes());
        describe_var(&mut more, 2, 452, 10, "B");
        describe_var(&mut more, 3, 580, 8, "C");
        more.push(1);

        parse_continuation(&more, Section::Select, &mut select).unwrap();
        assert!(select.is_complete());
        assert_eq!(select.vars[0].field, "A");
        assert_eq!(select.vars[1].sql_type, SqlType::Text);
        assert_eq!(select.vars[1].length, 10);
        assert_eq!(select.vars[2].sql_type, SqlType::Int64);
    }

    #[test]
    fn test_bad_index_rejected() {
        let mut buf = vec![4, 7];
        buf.extend_from_slice(&4u16.to_le_bytes());
        buf.extend_from_slice(&1i32.to_le_bytes());
        int_cluster(&mut buf, 9, 5);
        assert!(matches!(
            parse_statement_info(&buf),
            Err(ProtocolError::InvalidInfo(_))
        ));
    }

    #[test]
    fn test_record_counts() {
        let mut inner = Vec::new();
        int_cluster(&mut inner, 13, 0);
        int_cluster(&mut inner, 14, 3);
        int_cluster(&mut inner, 15, 0);
        int_cluster(&mut inner, 16, 0);
        inner.push(1);

        let mut buf = vec![23];
        buf.extend_from_slice(&(inner.len() as u16).to_le_bytes());
        buf.extend_from_slice(&inner);
        buf.push(1);

        let counts = parse_record_counts(&buf).unwrap();
        assert_eq!(counts.inserted, 3);
        assert_eq!(counts.for_statement(StatementType::Insert), 3);
        assert_eq!(counts.for_statement(StatementType::Ddl), 0);
    }

    #[test]
    fn test_info_items_and_strings() {
        let version = b"\x01\x0bWI-V3.0.7 X";
        let mut buf = vec![database::ISC_VERSION];
        buf.extend_from_slice(&(version.len() as u16).to_le_bytes());
        buf.extend_from_slice(version);
        int_cluster(&mut buf, database::PAGE_SIZE, 8192);
        buf.push(INFO_END);

        let items = parse_info_items(&buf).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(info_strings(&items[0].1).unwrap(), vec!["WI-V3.0.7 X"]);
        assert_eq!(items[1].0, database::PAGE_SIZE);
        assert_eq!(info_integer(&items[1].1), 8192);
    }

    #[test]
    fn test_info_items_truncated() {
        assert!(parse_info_items(&[INFO_TRUNCATED]).is_err());
    }
}
