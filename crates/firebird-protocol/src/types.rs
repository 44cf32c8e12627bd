//! Column and parameter type descriptors.
//!
//! [`SqlType::info`] is the single table that ties each type code to its
//! BLR opcode and its on-wire length. Both the BLR generator and the value
//! marshaler read it, so the shape announced to the server and the bytes
//! read back always agree.

use core::fmt;

use crate::error::ProtocolError;

/// Firebird SQL type codes (with the nullable bit cleared).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SqlType {
    /// Fixed-length text (`CHAR`).
    Text = 452,
    /// Variable-length text (`VARCHAR`).
    Varying = 448,
    /// 16-bit integer.
    Short = 500,
    /// 32-bit integer.
    Long = 496,
    /// Single-precision float.
    Float = 482,
    /// Double-precision float.
    Double = 480,
    /// VAX double (legacy).
    DFloat = 530,
    /// Date and time.
    Timestamp = 510,
    /// Blob id.
    Blob = 520,
    /// Array id.
    Array = 540,
    /// Quad (64-bit legacy).
    Quad = 550,
    /// Time of day.
    Time = 560,
    /// Date.
    Date = 570,
    /// 64-bit integer.
    Int64 = 580,
    /// Boolean.
    Boolean = 32764,
    /// Untyped NULL.
    Null = 32766,
}

/// How a value of a given type is laid out in a row message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireLength {
    /// Always this many bytes (before padding).
    Fixed(usize),
    /// The descriptor's declared length.
    Declared,
    /// A 4-byte length prefix precedes each value.
    Prefixed,
}

/// What follows the BLR opcode for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlrOperand {
    /// Nothing.
    None,
    /// One scale byte.
    Scale,
    /// Two-byte little-endian length.
    Length,
    /// One subtype placeholder byte, always zero.
    Subtype,
}

/// Static facts about one SQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// BLR data type opcode.
    pub blr_code: u8,
    /// Operand written after the opcode.
    pub operand: BlrOperand,
    /// Row message layout.
    pub wire: WireLength,
    /// Characters needed to display a value, `None` for length-bound types.
    pub display_length: Option<i32>,
}

impl SqlType {
    /// Parse a described type code; the low (nullable) bit is ignored.
    pub fn from_code(code: i32) -> Result<Self, ProtocolError> {
        Ok(match code & !1 {
            452 => Self::Text,
            448 => Self::Varying,
            500 => Self::Short,
            496 => Self::Long,
            482 => Self::Float,
            480 => Self::Double,
            530 => Self::DFloat,
            510 => Self::Timestamp,
            520 => Self::Blob,
            540 => Self::Array,
            550 => Self::Quad,
            560 => Self::Time,
            570 => Self::Date,
            580 => Self::Int64,
            32764 => Self::Boolean,
            32766 => Self::Null,
            _ => return Err(ProtocolError::UnsupportedSqlType(code)),
        })
    }

    /// The wire type code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// The type table.
    #[must_use]
    pub const fn info(self) -> TypeInfo {
        use BlrOperand as Op;
        use WireLength as W;

        let (blr_code, operand, wire, display_length) = match self {
            Self::Varying => (37, Op::Length, W::Prefixed, None),
            Self::Text => (14, Op::Length, W::Declared, None),
            Self::Short => (7, Op::Scale, W::Fixed(4), Some(6)),
            Self::Long => (8, Op::Scale, W::Fixed(4), Some(11)),
            Self::Int64 => (16, Op::Scale, W::Fixed(8), Some(20)),
            Self::Quad => (9, Op::Scale, W::Fixed(8), Some(20)),
            Self::Blob => (9, Op::Subtype, W::Fixed(8), Some(0)),
            Self::Array => (9, Op::Subtype, W::Fixed(8), None),
            Self::Double => (27, Op::None, W::Fixed(8), Some(17)),
            Self::DFloat => (11, Op::None, W::Fixed(8), Some(17)),
            Self::Float => (10, Op::None, W::Fixed(4), Some(17)),
            Self::Date => (12, Op::None, W::Fixed(4), Some(10)),
            Self::Time => (13, Op::None, W::Fixed(4), Some(11)),
            Self::Timestamp => (35, Op::None, W::Fixed(8), Some(22)),
            Self::Boolean => (23, Op::None, W::Fixed(1), Some(5)),
            Self::Null => (14, Op::Length, W::Declared, Some(4)),
        };
        TypeInfo {
            blr_code,
            operand,
            wire,
            display_length,
        }
    }

    /// SQL name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "CHAR",
            Self::Varying => "VARCHAR",
            Self::Short => "SMALLINT",
            Self::Long => "INTEGER",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE PRECISION",
            Self::DFloat => "D_FLOAT",
            Self::Timestamp => "TIMESTAMP",
            Self::Blob => "BLOB",
            Self::Array => "ARRAY",
            Self::Quad => "QUAD",
            Self::Time => "TIME",
            Self::Date => "DATE",
            Self::Int64 => "BIGINT",
            Self::Boolean => "BOOLEAN",
            Self::Null => "NULL",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Subtype marking binary octets for text types and binary blobs.
pub const SUBTYPE_OCTETS: i32 = 1;

/// Blob subtype for text blobs.
pub const BLOB_SUBTYPE_TEXT: i32 = 1;

/// A column or parameter descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XSqlVar {
    /// SQL type.
    pub sql_type: SqlType,
    /// Power-of-ten exponent for fixed-point values (usually <= 0).
    pub scale: i32,
    /// Subtype (character set / blob subtype).
    pub sub_type: i32,
    /// Declared byte length.
    pub length: i32,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// Field name.
    pub field: String,
    /// Relation (table) name.
    pub relation: String,
    /// Owner name.
    pub owner: String,
    /// Alias (output column label).
    pub alias: String,
}

impl Default for XSqlVar {
    fn default() -> Self {
        Self::new(SqlType::Null, 0)
    }
}

impl XSqlVar {
    /// Create an unnamed descriptor of the given type and length.
    #[must_use]
    pub fn new(sql_type: SqlType, length: i32) -> Self {
        Self {
            sql_type,
            scale: 0,
            sub_type: 0,
            length,
            nullable: true,
            field: String::new(),
            relation: String::new(),
            owner: String::new(),
            alias: String::new(),
        }
    }

    /// Set the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the subtype.
    #[must_use]
    pub fn with_sub_type(mut self, sub_type: i32) -> Self {
        self.sub_type = sub_type;
        self
    }

    /// Set the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Row message layout of this descriptor.
    #[must_use]
    pub fn wire_length(&self) -> WireLength {
        self.sql_type.info().wire
    }

    /// Bytes occupied by a value, or `None` when each value carries its own
    /// length prefix.
    #[must_use]
    pub fn io_length(&self) -> Option<usize> {
        match self.wire_length() {
            WireLength::Fixed(n) => Some(n),
            WireLength::Declared => Some(usize::try_from(self.length).unwrap_or(0)),
            WireLength::Prefixed => None,
        }
    }

    /// Characters needed to display a value.
    #[must_use]
    pub fn display_length(&self) -> i32 {
        self.sql_type.info().display_length.unwrap_or(self.length)
    }

    /// Whether text of this column is raw octets rather than characters.
    #[must_use]
    pub fn is_octets(&self) -> bool {
        matches!(self.sql_type, SqlType::Text | SqlType::Varying) && self.sub_type == SUBTYPE_OCTETS
    }

    /// The label a caller sees: the alias, falling back to the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        if self.alias.is_empty() {
            &self.field
        } else {
            &self.alias
        }
    }
}

/// Statement type reported at prepare time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatementType {
    /// `SELECT`.
    Select = 1,
    /// `INSERT`.
    Insert = 2,
    /// `UPDATE`.
    Update = 3,
    /// `DELETE`.
    Delete = 4,
    /// Data definition.
    Ddl = 5,
    /// Blob segment read.
    GetSegment = 6,
    /// Blob segment write.
    PutSegment = 7,
    /// `EXECUTE PROCEDURE`.
    ExecProcedure = 8,
    /// `SET TRANSACTION`.
    StartTransaction = 9,
    /// `COMMIT`.
    Commit = 10,
    /// `ROLLBACK`.
    Rollback = 11,
    /// `SELECT ... FOR UPDATE`.
    SelectForUpdate = 12,
    /// `SET GENERATOR`.
    SetGenerator = 13,
    /// `SAVEPOINT`.
    Savepoint = 14,
}

impl StatementType {
    /// Create a statement type from its wire value.
    pub fn from_i32(value: i32) -> Result<Self, ProtocolError> {
        Ok(match value {
            1 => Self::Select,
            2 => Self::Insert,
            3 => Self::Update,
            4 => Self::Delete,
            5 => Self::Ddl,
            6 => Self::GetSegment,
            7 => Self::PutSegment,
            8 => Self::ExecProcedure,
            9 => Self::StartTransaction,
            10 => Self::Commit,
            11 => Self::Rollback,
            12 => Self::SelectForUpdate,
            13 => Self::SetGenerator,
            14 => Self::Savepoint,
            other => return Err(ProtocolError::UnknownStatementType(other)),
        })
    }

    /// Whether executing the statement opens a cursor.
    #[must_use]
    pub fn opens_cursor(self) -> bool {
        matches!(self, Self::Select | Self::SelectForUpdate)
    }

    /// Whether the statement changes rows.
    #[must_use]
    pub fn is_dml(self) -> bool {
        matches!(self, Self::Insert | Self::Update | Self::Delete)
    }
}

/// An 8-byte blob identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlobId(pub [u8; 8]);

impl BlobId {
    /// The raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Whether this is the all-zero id.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == [0; 8]
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
