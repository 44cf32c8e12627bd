//! Request encoding.
//!
//! Each [`Request`] encodes into its own freshly allocated buffer; nothing is
//! shared between requests, so a half-written request can never leak into
//! the next one.

use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::{put_bytes, put_i32, put_padding, put_raw, put_str};
use crate::error::ProtocolError;
use crate::op::OpCode;
use crate::param_block::ParamBlock;
use crate::types::BlobId;
use crate::version::{Architecture, CONNECT_VERSION2, SUPPORTED_PROTOCOLS};

/// SQL dialect used for every statement.
pub const SQL_DIALECT: i32 = 3;

/// Largest segment a single `op_batch_segments` request carries.
pub const MAX_SEGMENT_SIZE: usize = 32000;

/// User identification tags in the connect request.
mod cnct {
    pub const USER: u8 = 1;
    pub const HOST: u8 = 4;
    pub const USER_VERIFICATION: u8 = 6;
}

/// How `op_free_statement` releases a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum FreeMode {
    /// Close the open cursor; the statement stays prepared (`DSQL_close`).
    Close = 1,
    /// Release the statement handle (`DSQL_drop`).
    Drop = 2,
}

/// A row message: its BLR description and the packed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef<'a> {
    /// BLR describing the message.
    pub blr: &'a [u8],
    /// Values laid out per the BLR, already 4-byte aligned.
    pub data: &'a [u8],
}

/// A client request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Request<'a> {
    /// Open the protocol conversation.
    Connect {
        /// Database path, as given by the caller.
        path: &'a str,
        /// Operating-system user name.
        user: &'a str,
        /// Client host name.
        host: &'a str,
    },
    /// Attach to an existing database.
    Attach {
        /// Database path.
        path: &'a str,
        /// Database parameter block.
        dpb: &'a [u8],
    },
    /// Create a database.
    Create {
        /// Database path.
        path: &'a str,
        /// Database parameter block.
        dpb: &'a [u8],
    },
    /// Detach from the database.
    Detach {
        /// Database handle.
        db: i32,
    },
    /// Drop the attached database.
    DropDatabase {
        /// Database handle.
        db: i32,
    },
    /// Start a transaction.
    Transaction {
        /// Database handle.
        db: i32,
        /// Transaction parameter block.
        tpb: &'a [u8],
    },
    /// Commit a transaction.
    Commit {
        /// Transaction handle.
        tr: i32,
    },
    /// Commit and keep the transaction context.
    CommitRetaining {
        /// Transaction handle.
        tr: i32,
    },
    /// Roll a transaction back.
    Rollback {
        /// Transaction handle.
        tr: i32,
    },
    /// Roll back and keep the transaction context.
    RollbackRetaining {
        /// Transaction handle.
        tr: i32,
    },
    /// Allocate a statement handle.
    AllocateStatement {
        /// Database handle.
        db: i32,
    },
    /// Prepare SQL text on an allocated statement.
    Prepare {
        /// Transaction handle.
        tr: i32,
        /// Statement handle.
        stmt: i32,
        /// SQL text.
        sql: &'a str,
        /// Describe items requested in the response buffer.
        items: &'a [u8],
        /// Size of the response buffer.
        buffer_length: i32,
    },
    /// Execute SQL text without preparing it.
    ExecImmediate {
        /// Transaction handle.
        tr: i32,
        /// Database handle.
        db: i32,
        /// SQL text.
        sql: &'a str,
        /// Size of the response buffer.
        buffer_length: i32,
    },
    /// Query statement information.
    InfoSql {
        /// Statement handle.
        stmt: i32,
        /// Requested items.
        items: &'a [u8],
        /// Size of the response buffer.
        buffer_length: i32,
    },
    /// Query database information.
    InfoDatabase {
        /// Database handle.
        db: i32,
        /// Requested items.
        items: &'a [u8],
        /// Size of the response buffer.
        buffer_length: i32,
    },
    /// Query transaction information.
    InfoTransaction {
        /// Transaction handle.
        tr: i32,
        /// Requested items.
        items: &'a [u8],
        /// Size of the response buffer.
        buffer_length: i32,
    },
    /// Execute a prepared statement.
    Execute {
        /// Statement handle.
        stmt: i32,
        /// Transaction handle.
        tr: i32,
        /// Input message, `None` for a statement without parameters.
        params: Option<MessageRef<'a>>,
    },
    /// Execute a prepared statement that returns a single output row.
    Execute2 {
        /// Statement handle.
        stmt: i32,
        /// Transaction handle.
        tr: i32,
        /// Input message, `None` for a statement without parameters.
        params: Option<MessageRef<'a>>,
        /// BLR of the output message.
        output_blr: &'a [u8],
    },
    /// Fetch rows from an open cursor.
    Fetch {
        /// Statement handle.
        stmt: i32,
        /// BLR of the output message.
        blr: &'a [u8],
        /// Rows requested per batch.
        count: i32,
    },
    /// Close or drop a statement.
    FreeStatement {
        /// Statement handle.
        stmt: i32,
        /// Release mode.
        mode: FreeMode,
    },
    /// Open an existing blob for reading.
    OpenBlob {
        /// Transaction handle.
        tr: i32,
        /// Blob id.
        id: BlobId,
    },
    /// Create a new blob for writing.
    CreateBlob {
        /// Transaction handle.
        tr: i32,
    },
    /// Read segments from an open blob.
    GetSegment {
        /// Blob handle.
        blob: i32,
        /// Size of the response buffer.
        buffer_length: i32,
    },
    /// Write one segment to a blob.
    BatchSegments {
        /// Blob handle.
        blob: i32,
        /// Segment data, at most [`MAX_SEGMENT_SIZE`] bytes.
        data: &'a [u8],
    },
    /// Close a blob.
    CloseBlob {
        /// Blob handle.
        blob: i32,
    },
}

impl Request<'_> {
    /// The op code this request is sent with.
    #[must_use]
    pub fn op(&self) -> OpCode {
        match self {
            Self::Connect { .. } => OpCode::Connect,
            Self::Attach { .. } => OpCode::Attach,
            Self::Create { .. } => OpCode::Create,
            Self::Detach { .. } => OpCode::Detach,
            Self::DropDatabase { .. } => OpCode::DropDatabase,
            Self::Transaction { .. } => OpCode::Transaction,
            Self::Commit { .. } => OpCode::Commit,
            Self::CommitRetaining { .. } => OpCode::CommitRetaining,
            Self::Rollback { .. } => OpCode::Rollback,
            Self::RollbackRetaining { .. } => OpCode::RollbackRetaining,
            Self::AllocateStatement { .. } => OpCode::AllocateStatement,
            Self::Prepare { .. } => OpCode::PrepareStatement,
            Self::ExecImmediate { .. } => OpCode::ExecImmediate,
            Self::InfoSql { .. } => OpCode::InfoSql,
            Self::InfoDatabase { .. } => OpCode::InfoDatabase,
            Self::InfoTransaction { .. } => OpCode::InfoTransaction,
            Self::Execute { .. } => OpCode::Execute,
            Self::Execute2 { .. } => OpCode::Execute2,
            Self::Fetch { .. } => OpCode::Fetch,
            Self::FreeStatement { .. } => OpCode::FreeStatement,
            Self::OpenBlob { .. } => OpCode::OpenBlob,
            Self::CreateBlob { .. } => OpCode::CreateBlob2,
            Self::GetSegment { .. } => OpCode::GetSegment,
            Self::BatchSegments { .. } => OpCode::BatchSegments,
            Self::CloseBlob { .. } => OpCode::CloseBlob,
        }
    }

    /// Encode the request into a new buffer.
    pub fn encode(&self) -> Result<BytesMut, ProtocolError> {
        let mut dst = BytesMut::with_capacity(64);
        put_i32(&mut dst, self.op().as_i32());

        match *self {
            Self::Connect { path, user, host } => {
                put_i32(&mut dst, OpCode::Attach.as_i32());
                put_i32(&mut dst, CONNECT_VERSION2);
                put_i32(&mut dst, Architecture::Generic as i32);
                put_str(&mut dst, path);
                put_i32(&mut dst, SUPPORTED_PROTOCOLS.len() as i32);
                put_bytes(&mut dst, &user_identification(user, host)?);
                for offer in SUPPORTED_PROTOCOLS {
                    put_i32(&mut dst, offer.version.raw());
                    put_i32(&mut dst, offer.architecture as i32);
                    put_i32(&mut dst, offer.min_type as i32);
                    put_i32(&mut dst, offer.max_type as i32);
                    put_i32(&mut dst, offer.weight);
                }
            }
            Self::Attach { path, dpb } | Self::Create { path, dpb } => {
                put_i32(&mut dst, 0);
                put_str(&mut dst, path);
                put_bytes(&mut dst, dpb);
            }
            Self::Detach { db } | Self::DropDatabase { db } | Self::AllocateStatement { db } => {
                put_i32(&mut dst, db);
            }
            Self::Transaction { db, tpb } => {
                put_i32(&mut dst, db);
                put_bytes(&mut dst, tpb);
            }
            Self::Commit { tr }
            | Self::CommitRetaining { tr }
            | Self::Rollback { tr }
            | Self::RollbackRetaining { tr } => {
                put_i32(&mut dst, tr);
            }
            Self::Prepare {
                tr,
                stmt,
                sql,
                items,
                buffer_length,
            } => {
                put_i32(&mut dst, tr);
                put_i32(&mut dst, stmt);
                put_i32(&mut dst, SQL_DIALECT);
                put_str(&mut dst, sql);
                put_bytes(&mut dst, items);
                put_i32(&mut dst, buffer_length);
            }
            Self::ExecImmediate {
                tr,
                db,
                sql,
                buffer_length,
            } => {
                put_i32(&mut dst, tr);
                put_i32(&mut dst, db);
                put_i32(&mut dst, SQL_DIALECT);
                put_str(&mut dst, sql);
                put_bytes(&mut dst, &[]);
                put_i32(&mut dst, buffer_length);
            }
            Self::InfoSql {
                stmt: handle,
                items,
                buffer_length,
            }
            | Self::InfoDatabase {
                db: handle,
                items,
                buffer_length,
            }
            | Self::InfoTransaction {
                tr: handle,
                items,
                buffer_length,
            } => {
                put_i32(&mut dst, handle);
                put_i32(&mut dst, 0);
                put_bytes(&mut dst, items);
                put_i32(&mut dst, buffer_length);
            }
            Self::Execute { stmt, tr, params } => {
                put_i32(&mut dst, stmt);
                put_i32(&mut dst, tr);
                put_message(&mut dst, params);
            }
            Self::Execute2 {
                stmt,
                tr,
                params,
                output_blr,
            } => {
                put_i32(&mut dst, stmt);
                put_i32(&mut dst, tr);
                put_message(&mut dst, params);
                put_bytes(&mut dst, output_blr);
                put_i32(&mut dst, 0);
            }
            Self::Fetch { stmt, blr, count } => {
                put_i32(&mut dst, stmt);
                put_bytes(&mut dst, blr);
                put_i32(&mut dst, 0);
                put_i32(&mut dst, count);
            }
            Self::FreeStatement { stmt, mode } => {
                put_i32(&mut dst, stmt);
                put_i32(&mut dst, mode as i32);
            }
            Self::OpenBlob { tr, id } => {
                put_i32(&mut dst, tr);
                put_raw(&mut dst, id.as_bytes());
            }
            Self::CreateBlob { tr } => {
                // Empty blob parameter buffer, then a zero blob id.
                put_i32(&mut dst, 0);
                put_i32(&mut dst, tr);
                put_i32(&mut dst, 0);
                put_i32(&mut dst, 0);
            }
            Self::GetSegment {
                blob,
                buffer_length,
            } => {
                put_i32(&mut dst, blob);
                put_i32(&mut dst, buffer_length);
                put_i32(&mut dst, 0);
            }
            Self::BatchSegments { blob, data } => {
                if data.len() > MAX_SEGMENT_SIZE {
                    return Err(ProtocolError::ValueTooLong {
                        field: "blob segment",
                        len: data.len(),
                        max: MAX_SEGMENT_SIZE,
                    });
                }
                let framed = data.len() + 2;
                put_i32(&mut dst, blob);
                put_i32(&mut dst, framed as i32);
                put_i32(&mut dst, framed as i32);
                dst.put_u16_le(data.len() as u16);
                put_raw(&mut dst, data);
                put_padding(&mut dst, framed);
            }
            Self::CloseBlob { blob } => {
                put_i32(&mut dst, blob);
            }
        }

        Ok(dst)
    }
}

fn put_message(dst: &mut BytesMut, message: Option<MessageRef<'_>>) {
    match message {
        Some(message) => {
            put_bytes(dst, message.blr);
            put_i32(dst, 0);
            put_i32(dst, 1);
            put_raw(dst, message.data);
        }
        None => {
            put_bytes(dst, &[]);
            put_i32(dst, 0);
            put_i32(dst, 0);
        }
    }
}

fn user_identification(user: &str, host: &str) -> Result<Bytes, ProtocolError> {
    Ok(ParamBlock::unversioned()
        .string(cnct::USER, user)?
        .string(cnct::HOST, host)?
        .bytes(cnct::USER_VERIFICATION, &[])?
        .build())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ints(buf: &[u8]) -> Vec<i32> {
        buf.chunks(4)
            .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn test_connect_rejects_long_user() {
        let user = "u".repeat(256);
        let err = Request::Connect {
            path: "/db/a.fdb",
            user: &user,
            host: "h",
        }
        .encode()
        .unwrap_err();
        assert!(matches!(err, ProtocolError::ValueTooLong { len: 256, .. }));
    }

    #[test]
    fn test_connect_layout() {
        let buf = Request::Connect {
            path: "/db/a.fdb",
            user: "bob",
            host: "h",
        }
        .encode()
        .unwrap();

        assert_eq!(ints(&buf[..16]), vec![1, 19, 2, 1]);
        assert_eq!(ints(&buf[16..20]), vec![9]);
        assert_eq!(&buf[20..29], b"/db/a.fdb");
        // 9 bytes of path, 3 of padding, then the protocol count.
        assert_eq!(ints(&buf[32..40]), vec![1, 10]);
        let uid = [1, 3, b'b', b'o', b'b', 4, 1, b'h', 6, 0];
        assert_eq!(&buf[40..50], &uid);
        assert_eq!(ints(&buf[52..]), vec![10, 1, 2, 3, 2]);
        assert_eq!(buf.len() % 4, 0);
    }

    #[test]
    fn test_prepare_layout() {
        let buf = Request::Prepare {
            tr: 7,
            stmt: 9,
            sql: "select 1",
            items: &[21],
            buffer_length: 1024,
        }
        .encode()
        .unwrap();
        assert_eq!(ints(&buf[..16]), vec![68, 7, 9, 3]);
        assert_eq!(ints(&buf[16..20]), vec![8]);
        assert_eq!(&buf[20..28], b"select 1");
        assert_eq!(ints(&buf[28..32]), vec![1]);
        assert_eq!(&buf[32..36], &[21, 0, 0, 0]);
        assert_eq!(ints(&buf[36..]), vec![1024]);
    }

    #[test]
    fn test_execute_without_params() {
        let buf = Request::Execute {
            stmt: 3,
            tr: 4,
            params: None,
        }
        .encode()
        .unwrap();
        assert_eq!(ints(&buf), vec![63, 3, 4, 0, 0, 0]);
    }

    #[test]
    fn test_execute2_with_params() {
        let data = [0, 0, 0, 5, 0, 0, 0, 0];
        let buf = Request::Execute2 {
            stmt: 3,
            tr: 4,
            params: Some(MessageRef {
                blr: &[1, 2, 3, 4],
                data: &data,
            }),
            output_blr: &[9, 9, 9, 9],
        }
        .encode()
        .unwrap();
        assert_eq!(
            ints(&buf),
            vec![76, 3, 4, 4, 0x0102_0304, 0, 1, 5, 0, 4, 0x0909_0909, 0]
        );
    }

    #[test]
    fn test_fetch_and_free() {
        let buf = Request::Fetch {
            stmt: 5,
            blr: &[],
            count: 400,
        }
        .encode()
        .unwrap();
        assert_eq!(ints(&buf), vec![65, 5, 0, 0, 400]);

        let buf = Request::FreeStatement {
            stmt: 5,
            mode: FreeMode::Drop,
        }
        .encode()
        .unwrap();
        assert_eq!(ints(&buf), vec![67, 5, 2]);
    }

    #[test]
    fn test_info_requests_share_layout() {
        let db = Request::InfoDatabase {
            db: 1,
            items: &[12, 1],
            buffer_length: 256,
        }
        .encode()
        .unwrap();
        let tr = Request::InfoTransaction {
            tr: 1,
            items: &[12, 1],
            buffer_length: 256,
        }
        .encode()
        .unwrap();
        assert_eq!(ints(&db[..4]), vec![40]);
        assert_eq!(ints(&tr[..4]), vec![42]);
        assert_eq!(&db[4..], &tr[4..]);
    }

    #[test]
    fn test_blob_requests() {
        let id = BlobId([1, 2, 3, 4, 5, 6, 7, 8]);
        let buf = Request::OpenBlob { tr: 2, id }.encode().unwrap();
        assert_eq!(ints(&buf[..8]), vec![35, 2]);
        assert_eq!(&buf[8..], &[1, 2, 3, 4, 5, 6, 7, 8]);

        let buf = Request::CreateBlob { tr: 2 }.encode().unwrap();
        assert_eq!(ints(&buf), vec![57, 0, 2, 0, 0]);

        let buf = Request::BatchSegments {
            blob: 6,
            data: b"abc",
        }
        .encode()
        .unwrap();
        assert_eq!(ints(&buf[..16]), vec![44, 6, 5, 5]);
        assert_eq!(&buf[16..], &[3, 0, b'a', b'b', b'c', 0, 0, 0]);
    }

    #[test]
    fn test_oversized_segment_rejected() {
        let data = vec![0u8; MAX_SEGMENT_SIZE + 1];
        let err = Request::BatchSegments {
            blob: 1,
            data: &data,
        }
        .encode()
        .unwrap_err();
        assert!(matches!(err, ProtocolError::ValueTooLong { .. }));
    }

    #[test]
    fn test_transaction_and_attach() {
        let buf = Request::Transaction {
            db: 1,
            tpb: &[3, 15, 17],
        }
        .encode()
        .unwrap();
        assert_eq!(&buf[..], &[0, 0, 0, 29, 0, 0, 0, 1, 0, 0, 0, 3, 3, 15, 17, 0]);

        let buf = Request::Attach {
            path: "x",
            dpb: &[1],
        }
        .encode()
        .unwrap();
        assert_eq!(ints(&buf), vec![19, 0, 1, 0x7800_0000, 1, 0x0100_0000]);
    }
}
