//! Database and transaction parameter blocks.
//!
//! Parameter blocks are a version byte followed by `tag`, `len`, `value`
//! entries (or bare tags for flags). Integers inside are little-endian.

use bytes::Bytes;

use crate::error::ProtocolError;

/// Longest value a single-byte length can describe.
pub const MAX_VALUE_LEN: usize = u8::MAX as usize;

/// Database parameter block tags (`isc_dpb_*`).
pub mod dpb {
    /// DPB version 1.
    pub const VERSION1: u8 = 1;
    /// Page size for a new database.
    pub const PAGE_SIZE: u8 = 4;
    /// Synchronous writes.
    pub const FORCE_WRITE: u8 = 24;
    /// User name.
    pub const USER_NAME: u8 = 28;
    /// Password.
    pub const PASSWORD: u8 = 29;
    /// Client character set.
    pub const LC_CTYPE: u8 = 48;
    /// Replace an existing file on create.
    pub const OVERWRITE: u8 = 54;
    /// SQL role.
    pub const SQL_ROLE_NAME: u8 = 60;
    /// SQL dialect.
    pub const SQL_DIALECT: u8 = 63;
    /// Default character set of a new database.
    pub const SET_DB_CHARSET: u8 = 68;
}

/// Transaction parameter block tags (`isc_tpb_*`).
pub mod tpb {
    /// TPB version 3.
    pub const VERSION3: u8 = 3;
    /// Table-level consistency.
    pub const CONSISTENCY: u8 = 1;
    /// Snapshot.
    pub const CONCURRENCY: u8 = 2;
    /// Shared table reservation.
    pub const SHARED: u8 = 3;
    /// Protected table reservation.
    pub const PROTECTED: u8 = 4;
    /// Exclusive table reservation.
    pub const EXCLUSIVE: u8 = 5;
    /// Wait on lock conflicts.
    pub const WAIT: u8 = 6;
    /// Fail immediately on lock conflicts.
    pub const NOWAIT: u8 = 7;
    /// Read-only access.
    pub const READ: u8 = 8;
    /// Read-write access.
    pub const WRITE: u8 = 9;
    /// Reserve a table for reading.
    pub const LOCK_READ: u8 = 10;
    /// Reserve a table for writing.
    pub const LOCK_WRITE: u8 = 11;
    /// Read committed.
    pub const READ_COMMITTED: u8 = 15;
    /// Commit automatically after each statement.
    pub const AUTOCOMMIT: u8 = 16;
    /// Read the latest committed version.
    pub const REC_VERSION: u8 = 17;
    /// Wait for uncommitted versions.
    pub const NO_REC_VERSION: u8 = 18;
}

/// Builder for a parameter block.
#[derive(Debug, Clone)]
pub struct ParamBlock {
    buf: Vec<u8>,
}

impl ParamBlock {
    /// Start a block with the given version byte.
    #[must_use]
    pub fn new(version: u8) -> Self {
        Self { buf: vec![version] }
    }

    /// Start a block with no version byte.
    #[must_use]
    pub fn unversioned() -> Self {
        Self { buf: Vec::new() }
    }

    /// Append a bare flag tag.
    #[must_use]
    pub fn flag(mut self, tag: u8) -> Self {
        self.buf.push(tag);
        self
    }

    /// Append a byte-string value.
    ///
    /// Fails with [`ProtocolError::ValueTooLong`] when the value needs more
    /// than the one length byte can express.
    pub fn bytes(mut self, tag: u8, value: &[u8]) -> Result<Self, ProtocolError> {
        let len = u8::try_from(value.len()).map_err(|_| ProtocolError::ValueTooLong {
            field: "parameter block value",
            len: value.len(),
            max: MAX_VALUE_LEN,
        })?;
        self.buf.push(tag);
        self.buf.push(len);
        self.buf.extend_from_slice(value);
        Ok(self)
    }

    /// Append a string value.
    pub fn string(self, tag: u8, value: &str) -> Result<Self, ProtocolError> {
        self.bytes(tag, value.as_bytes())
    }

    /// Append a 4-byte little-endian integer value.
    #[must_use]
    pub fn int(mut self, tag: u8, value: i32) -> Self {
        self.buf.extend_from_slice(&[tag, 4]);
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// The encoded block.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finish the block.
    #[must_use]
    pub fn build(self) -> Bytes {
        Bytes::from(self.buf)
    }
}

/// Connection credentials and character set for attach/create.
#[derive(Debug, Clone)]
pub struct AttachParams<'a> {
    /// User name.
    pub user: &'a str,
    /// Password.
    pub password: &'a str,
    /// Client character set.
    pub charset: &'a str,
    /// SQL role.
    pub role: Option<&'a str>,
}

impl AttachParams<'_> {
    /// DPB for attaching to an existing database.
    pub fn attach_dpb(&self) -> Result<Bytes, ProtocolError> {
        Ok(self.common(ParamBlock::new(dpb::VERSION1))?.build())
    }

    /// DPB for creating a database with the given page size.
    pub fn create_dpb(&self, page_size: i32) -> Result<Bytes, ProtocolError> {
        let block = ParamBlock::new(dpb::VERSION1).string(dpb::SET_DB_CHARSET, self.charset)?;
        Ok(self
            .common(block)?
            .int(dpb::SQL_DIALECT, 3)
            .int(dpb::FORCE_WRITE, 1)
            .int(dpb::OVERWRITE, 1)
            .int(dpb::PAGE_SIZE, page_size)
            .build())
    }

    fn common(&self, block: ParamBlock) -> Result<ParamBlock, ProtocolError> {
        let block = block
            .string(dpb::LC_CTYPE, self.charset)?
            .string(dpb::USER_NAME, self.user)?
            .string(dpb::PASSWORD, self.password)?;
        match self.role {
            Some(role) => block.string(dpb::SQL_ROLE_NAME, role),
            None => Ok(block),
        }
    }
}
