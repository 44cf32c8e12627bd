//! Protocol-level error types.

use thiserror::Error;

/// Errors raised while encoding or decoding protocol structures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// Not enough bytes are buffered to finish decoding.
    ///
    /// The async layer treats this as "read more from the socket" rather
    /// than as a failure.
    #[error("incomplete data: need {needed} bytes, have {available}")]
    Incomplete {
        /// Bytes required by the field being decoded.
        needed: usize,
        /// Bytes currently available.
        available: usize,
    },

    /// A response arrived with an op code the current request cannot accept.
    #[error("unexpected op code {actual} (expected {expected})")]
    UnexpectedOp {
        /// Description of what was expected.
        expected: &'static str,
        /// Raw op code received.
        actual: i32,
    },

    /// An op code outside the known set.
    #[error("unknown op code {0}")]
    UnknownOpCode(i32),

    /// A status vector contained an unknown argument tag.
    #[error("invalid status vector tag {0}")]
    InvalidStatusTag(i32),

    /// A length field was negative or otherwise impossible.
    #[error("invalid length {0}")]
    InvalidLength(i32),

    /// An information buffer could not be parsed.
    #[error("invalid info buffer: {0}")]
    InvalidInfo(String),

    /// The server described a column with a type this driver does not know.
    #[error("unsupported SQL type code {0}")]
    UnsupportedSqlType(i32),

    /// The server reported an unknown statement type.
    #[error("unknown statement type {0}")]
    UnknownStatementType(i32),

    /// A value does not fit in the field that has to carry it.
    #[error("value too long for {field}: {len} bytes (max {max})")]
    ValueTooLong {
        /// Field name.
        field: &'static str,
        /// Actual length.
        len: usize,
        /// Maximum permitted length.
        max: usize,
    },
}

impl ProtocolError {
    /// Whether this error means the byte stream can no longer be trusted.
    ///
    /// Framing failures desynchronize the connection. Errors about the
    /// *content* of an already fully-read payload (an unknown column type in
    /// a describe buffer, for example) leave the stream intact.
    #[must_use]
    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedOp { .. }
                | Self::UnknownOpCode(_)
                | Self::InvalidStatusTag(_)
                | Self::InvalidLength(_)
        )
    }

    /// Whether decoding simply ran out of bytes.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete { .. })
    }
}
