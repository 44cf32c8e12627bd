//! Operation codes.
//!
//! Every request and response starts with a 4-byte op code. Only the codes
//! this driver sends or accepts are modelled; anything else read from the
//! wire is rejected as [`ProtocolError::UnknownOpCode`].

use core::fmt;

use crate::error::ProtocolError;

/// A remote protocol operation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum OpCode {
    /// Initial connection request.
    Connect = 1,
    /// Server accepted the connection.
    Accept = 3,
    /// Server rejected the connection.
    Reject = 4,
    /// Server is closing the connection.
    Disconnect = 6,
    /// Generic response.
    Response = 9,
    /// Attach to an existing database.
    Attach = 19,
    /// Create a database.
    Create = 20,
    /// Detach from the database.
    Detach = 21,
    /// Start a transaction.
    Transaction = 29,
    /// Commit a transaction.
    Commit = 30,
    /// Roll back a transaction.
    Rollback = 31,
    /// Open a blob for reading.
    OpenBlob = 35,
    /// Read blob segments.
    GetSegment = 36,
    /// Write a single blob segment.
    PutSegment = 37,
    /// Close a blob.
    CloseBlob = 39,
    /// Database information request.
    InfoDatabase = 40,
    /// Transaction information request.
    InfoTransaction = 42,
    /// Write several blob segments at once.
    BatchSegments = 44,
    /// Commit, keeping the transaction context.
    CommitRetaining = 50,
    /// Request an auxiliary (event) connection.
    ConnectRequest = 53,
    /// Open a blob, with a blob parameter block.
    OpenBlob2 = 56,
    /// Create a blob, with a blob parameter block.
    CreateBlob2 = 57,
    /// Allocate a statement handle.
    AllocateStatement = 62,
    /// Execute a prepared statement.
    Execute = 63,
    /// Execute SQL text without preparing.
    ExecImmediate = 64,
    /// Fetch rows from an open cursor.
    Fetch = 65,
    /// A fetched row frame.
    FetchResponse = 66,
    /// Close or drop a statement.
    FreeStatement = 67,
    /// Prepare SQL text on an allocated handle.
    PrepareStatement = 68,
    /// Statement information request.
    InfoSql = 70,
    /// Keep-alive marker, skipped by readers.
    Dummy = 71,
    /// Execute with an output message.
    Execute2 = 76,
    /// Singleton row returned by [`OpCode::Execute2`].
    SqlResponse = 78,
    /// Drop the attached database.
    DropDatabase = 81,
    /// Roll back, keeping the transaction context.
    RollbackRetaining = 86,
}

impl OpCode {
    /// Create an op code from its wire value.
    pub fn from_i32(value: i32) -> Result<Self, ProtocolError> {
        Ok(match value {
            1 => Self::Connect,
            3 => Self::Accept,
            4 => Self::Reject,
            6 => Self::Disconnect,
            9 => Self::Response,
            19 => Self::Attach,
            20 => Self::Create,
            21 => Self::Detach,
            29 => Self::Transaction,
            30 => Self::Commit,
            31 => Self::Rollback,
            35 => Self::OpenBlob,
            36 => Self::GetSegment,
            37 => Self::PutSegment,
            39 => Self::CloseBlob,
            40 => Self::InfoDatabase,
            42 => Self::InfoTransaction,
            44 => Self::BatchSegments,
            50 => Self::CommitRetaining,
            53 => Self::ConnectRequest,
            56 => Self::OpenBlob2,
            57 => Self::CreateBlob2,
            62 => Self::AllocateStatement,
            63 => Self::Execute,
            64 => Self::ExecImmediate,
            65 => Self::Fetch,
            66 => Self::FetchResponse,
            67 => Self::FreeStatement,
            68 => Self::PrepareStatement,
            70 => Self::InfoSql,
            71 => Self::Dummy,
            76 => Self::Execute2,
            78 => Self::SqlResponse,
            81 => Self::DropDatabase,
            86 => Self::RollbackRetaining,
            other => return Err(ProtocolError::UnknownOpCode(other)),
        })
    }

    /// The wire value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}({})", self.as_i32())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(OpCode::Connect.as_i32(), 1);
        assert_eq!(OpCode::Response.as_i32(), 9);
        assert_eq!(OpCode::Dummy.as_i32(), 71);
        assert_eq!(OpCode::RollbackRetaining.as_i32(), 86);
    }

    #[test]
    fn test_from_i32() {
        assert_eq!(OpCode::from_i32(66).unwrap(), OpCode::FetchResponse);
        assert_eq!(OpCode::from_i32(78).unwrap(), OpCode::SqlResponse);
        assert_eq!(
            OpCode::from_i32(2).unwrap_err(),
            ProtocolError::UnknownOpCode(2)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(OpCode::Fetch.to_string(), "Fetch(65)");
    }
}
