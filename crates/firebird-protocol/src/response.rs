//! Response decoding.
//!
//! A response can only be interpreted knowing what the outstanding request
//! expects: a fetch frame, for instance, carries rows whose layout comes from
//! the statement's output descriptors. [`Expect`] carries that context into
//! [`Response::decode`].
//!
//! `op_dummy` keep-alives are skipped wherever an op code is read.

use std::sync::Arc;

use bytes::{Buf, Bytes};

use crate::codec::{get_array, get_bytes, get_i32, get_len, get_padded};
use crate::error::ProtocolError;
use crate::op::OpCode;
use crate::status::StatusVector;
use crate::types::{BlobId, XSqlVar};
use crate::version::ProtocolVersion;

/// Fetch status meaning the cursor has no more rows.
pub const FETCH_NO_MORE_ROWS: i32 = 100;

/// `op_get_segment` response handle marking the end of the blob.
pub const SEGMENT_EOF: i32 = 2;

/// One row as read from the wire: raw value bytes, `None` for NULL.
pub type RawRow = Vec<Option<Bytes>>;

/// What the outstanding request expects back.
#[derive(Debug, Clone)]
pub enum Expect {
    /// `op_accept` or `op_reject` after `op_connect`.
    Accept,
    /// A generic `op_response`.
    Generic,
    /// `op_sql_response` followed by `op_response`, after `op_execute2`.
    SqlResponse(Arc<[XSqlVar]>),
    /// One `op_fetch_response` frame.
    Fetch(Arc<[XSqlVar]>),
}

/// Result of protocol negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptResponse {
    /// Negotiated protocol version.
    pub version: ProtocolVersion,
    /// Negotiated architecture.
    pub architecture: i32,
    /// Negotiated packet type.
    pub packet_type: i32,
}

/// The generic reply to most requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericResponse {
    /// Object handle (database, transaction, statement or blob).
    pub handle: i32,
    /// Object id; a blob id after `op_create_blob2`.
    pub object_id: [u8; 8],
    /// Response data buffer.
    pub data: Bytes,
    /// Status vector.
    pub status: StatusVector,
}

impl GenericResponse {
    /// The object id as a blob id.
    #[must_use]
    pub fn blob_id(&self) -> BlobId {
        BlobId(self.object_id)
    }

    /// Whether an `op_get_segment` reply marks the end of the blob.
    #[must_use]
    pub fn is_segment_eof(&self) -> bool {
        self.handle == SEGMENT_EOF
    }

    /// Split an `op_get_segment` buffer into its segments.
    ///
    /// Each segment is a 2-byte little-endian length followed by the data.
    pub fn segments(&self) -> Result<Vec<Bytes>, ProtocolError> {
        let mut buf = self.data.clone();
        let mut segments = Vec::new();
        while buf.remaining() >= 2 {
            let len = usize::from(buf.get_u16_le());
            if buf.remaining() < len {
                return Err(ProtocolError::InvalidInfo(format!(
                    "blob segment of {len} bytes exceeds buffer"
                )));
            }
            segments.push(buf.split_to(len));
        }
        Ok(segments)
    }
}

/// Reply to `op_execute2`: the output row, then the generic response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResponse {
    /// Number of rows present (0 or 1).
    pub count: i32,
    /// The output row, if any.
    pub row: Option<RawRow>,
    /// Generic response that follows the row.
    pub response: GenericResponse,
}

/// One `op_fetch_response` frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFrame {
    /// Fetch status; [`FETCH_NO_MORE_ROWS`] once the cursor is exhausted.
    pub status: i32,
    /// Rows in this frame; 0 terminates the batch.
    pub count: i32,
    /// The row carried by the frame.
    pub row: Option<RawRow>,
}

impl FetchFrame {
    /// Whether this frame ends the current batch.
    #[must_use]
    pub fn ends_batch(&self) -> bool {
        self.count == 0
    }

    /// Whether the cursor is exhausted.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.status == FETCH_NO_MORE_ROWS
    }
}

/// A decoded server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Connection accepted.
    Accept(AcceptResponse),
    /// Connection rejected.
    Reject,
    /// Generic response.
    Generic(GenericResponse),
    /// Singleton result of `op_execute2`.
    Sql(SqlResponse),
    /// A fetch frame.
    Fetch(FetchFrame),
}

impl Response {
    /// Decode one response from `src`.
    ///
    /// While a fetch or singleton result is expected, a generic response
    /// carries the error that replaced it.
    pub fn decode(src: &mut impl Buf, expect: &Expect) -> Result<Self, ProtocolError> {
        let op = read_op(src)?;
        match (expect, op) {
            (Expect::Accept, OpCode::Accept) => {
                let version = ProtocolVersion::new(get_i32(src)?);
                let architecture = get_i32(src)?;
                let packet_type = get_i32(src)?;
                Ok(Self::Accept(AcceptResponse {
                    version,
                    architecture,
                    packet_type,
                }))
            }
            (Expect::Accept, OpCode::Reject) => Ok(Self::Reject),
            (Expect::Accept, other) => Err(unexpected("op_accept", other)),

            (_, OpCode::Response) => Ok(Self::Generic(GenericResponse::decode(src)?)),
            (Expect::Generic, other) => Err(unexpected("op_response", other)),

            (Expect::SqlResponse(vars), OpCode::SqlResponse) => {
                let count = get_i32(src)?;
                let row = if count > 0 {
                    Some(decode_row(src, vars)?)
                } else {
                    None
                };
                let op = read_op(src)?;
                if op != OpCode::Response {
                    return Err(unexpected("op_response", op));
                }
                let response = GenericResponse::decode(src)?;
                Ok(Self::Sql(SqlResponse {
                    count,
                    row,
                    response,
                }))
            }
            (Expect::SqlResponse(_), other) => Err(unexpected("op_sql_response", other)),

            (Expect::Fetch(vars), OpCode::FetchResponse) => {
                let status = get_i32(src)?;
                let count = get_i32(src)?;
                let row = if count > 0 {
                    Some(decode_row(src, vars)?)
                } else {
                    None
                };
                Ok(Self::Fetch(FetchFrame { status, count, row }))
            }
            (Expect::Fetch(_), other) => Err(unexpected("op_fetch_response", other)),
        }
    }
}

impl GenericResponse {
    /// Decode the body of an `op_response` (after the op code).
    pub fn decode(src: &mut impl Buf) -> Result<Self, ProtocolError> {
        let handle = get_i32(src)?;
        let object_id = get_array::<8>(src)?;
        let data = get_bytes(src)?;
        let status = StatusVector::decode(src)?;
        Ok(Self {
            handle,
            object_id,
            data,
            status,
        })
    }
}

/// Decode one row message laid out per `vars`.
pub fn decode_row(src: &mut impl Buf, vars: &[XSqlVar]) -> Result<RawRow, ProtocolError> {
    let mut row = Vec::with_capacity(vars.len());
    for var in vars {
        let len = match var.io_length() {
            Some(len) => len,
            None => get_len(src)?,
        };
        let value = get_padded(src, len)?;
        let null_indicator = get_i32(src)?;
        row.push((null_indicator == 0).then_some(value));
    }
    Ok(row)
}

fn read_op(src: &mut impl Buf) -> Result<OpCode, ProtocolError> {
    loop {
        let op = OpCode::from_i32(get_i32(src)?)?;
        if op != OpCode::Dummy {
            return Ok(op);
        }
    }
}

fn unexpected(expected: &'static str, actual: OpCode) -> ProtocolError {
    ProtocolError::UnexpectedOp {
        expected,
        actual: actual.as_i32(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::codec::{put_bytes, put_i32};
    use crate::status::StatusArg;
    use crate::types::SqlType;
    use bytes::BytesMut;

    fn generic(buf: &mut BytesMut, handle: i32, data: &[u8]) {
        put_i32(buf, 9);
        put_i32(buf, handle);
        buf.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 7]);
        put_bytes(buf, data);
        put_i32(buf, 0);
    }

    fn vars() -> Arc<[XSqlVar]> {
        Arc::from(vec![
            XSqlVar::new(SqlType::Long, 4),
            XSqlVar::new(SqlType::Varying, 10),
        ])
    }

    fn row(buf: &mut BytesMut, a: i32, b: Option<&str>) {
        put_i32(buf, a);
        put_i32(buf, 0);
        match b {
            Some(b) => {
                put_bytes(buf, b.as_bytes());
                put_i32(buf, 0);
            }
            None => {
                put_i32(buf, 0);
                put_i32(buf, -1);
            }
        }
    }

    #[test]
    fn test_generic_response() {
        let mut buf = BytesMut::new();
        put_i32(&mut buf, 71);
        put_i32(&mut buf, 71);
        generic(&mut buf, 5, b"abc");

        let mut cursor = buf.freeze();
        let response = Response::decode(&mut cursor, &Expect::Generic).unwrap();
        let Response::Generic(generic) = response else {
            panic!("expected generic response");
        };
        assert_eq!(generic.handle, 5);
        assert_eq!(generic.object_id[7], 7);
        assert_eq!(&generic.data[..], b"abc");
        assert!(generic.status.is_empty());
        assert!(!cursor.has_remaining());
    }

    #[test]
    fn test_accept_and_reject() {
        let mut buf = BytesMut::new();
        for v in [3, 0x800a, 1, 2] {
            put_i32(&mut buf, v);
        }
        let mut cursor = buf.freeze();
        let response = Response::decode(&mut cursor, &Expect::Accept).unwrap();
        assert_eq!(
            response,
            Response::Accept(AcceptResponse {
                version: ProtocolVersion::V10,
                architecture: 1,
                packet_type: 2,
            })
        );

        let mut cursor: &[u8] = &[0, 0, 0, 4];
        assert_eq!(
            Response::decode(&mut cursor, &Expect::Accept).unwrap(),
            Response::Reject
        );
    }

    #[test]
    fn test_unexpected_op_is_desync() {
        let mut cursor: &[u8] = &[0, 0, 0, 66, 0, 0, 0, 0];
        let err = Response::decode(&mut cursor, &Expect::Generic).unwrap_err();
        assert!(err.is_desync());

        let mut cursor: &[u8] = &[0, 0, 0x10, 0];
        let err = Response::decode(&mut cursor, &Expect::Generic).unwrap_err();
        assert_eq!(err, ProtocolError::UnknownOpCode(4096));
    }

    #[test]
    fn test_fetch_frames() {
        let mut buf = BytesMut::new();
        put_i32(&mut buf, 66);
        put_i32(&mut buf, 0);
        put_i32(&mut buf, 1);
        row(&mut buf, 42, Some("hello"));
        put_i32(&mut buf, 66);
        put_i32(&mut buf, 0);
        put_i32(&mut buf, 1);
        row(&mut buf, -1, None);
        put_i32(&mut buf, 66);
        put_i32(&mut buf, 100);
        put_i32(&mut buf, 0);

        let expect = Expect::Fetch(vars());
        let mut cursor = buf.freeze();
        let mut frames = Vec::new();
        loop {
            let Response::Fetch(frame) = Response::decode(&mut cursor, &expect).unwrap() else {
                panic!("expected fetch frame");
            };
            let done = frame.ends_batch();
            frames.push(frame);
            if done {
                break;
            }
        }

        assert_eq!(frames.len(), 3);
        let first = frames[0].row.as_ref().unwrap();
        assert_eq!(&first[0].as_ref().unwrap()[..], &42i32.to_be_bytes());
        assert_eq!(&first[1].as_ref().unwrap()[..], b"hello");
        let second = frames[1].row.as_ref().unwrap();
        assert!(second[1].is_none());
        assert!(frames[2].is_exhausted());
        assert!(frames[2].row.is_none());
    }

    #[test]
    fn test_fetch_error_is_generic() {
        let mut buf = BytesMut::new();
        put_i32(&mut buf, 9);
        put_i32(&mut buf, 0);
        buf.extend_from_slice(&[0; 8]);
        put_bytes(&mut buf, &[]);
        put_i32(&mut buf, 1);
        put_i32(&mut buf, 335_544_569);
        put_i32(&mut buf, 0);

        let mut cursor = buf.freeze();
        let Response::Generic(generic) =
            Response::decode(&mut cursor, &Expect::Fetch(vars())).unwrap()
        else {
            panic!("expected generic response");
        };
        assert_eq!(generic.status.args(), &[StatusArg::Gds(335_544_569)]);
    }

    #[test]
    fn test_sql_response_then_generic() {
        let mut buf = BytesMut::new();
        put_i32(&mut buf, 78);
        put_i32(&mut buf, 1);
        row(&mut buf, 7, Some("x"));
        generic(&mut buf, 0, &[]);

        let mut cursor = buf.freeze();
        let Response::Sql(sql) = Response::decode(&mut cursor, &Expect::SqlResponse(vars())).unwrap()
        else {
            panic!("expected sql response");
        };
        assert_eq!(sql.count, 1);
        assert_eq!(&sql.row.unwrap()[1].as_ref().unwrap()[..], b"x");
        assert!(!cursor.has_remaining());
    }

    #[test]
    fn test_truncated_frame_is_incomplete() {
        let mut buf = BytesMut::new();
        put_i32(&mut buf, 66);
        put_i32(&mut buf, 0);
        put_i32(&mut buf, 1);
        put_i32(&mut buf, 42);

        let mut cursor = buf.freeze();
        let err = Response::decode(&mut cursor, &Expect::Fetch(vars())).unwrap_err();
        assert!(err.is_incomplete());
    }

    #[test]
    fn test_segments() {
        let response = GenericResponse {
            handle: SEGMENT_EOF,
            object_id: [0; 8],
            data: Bytes::from_static(&[3, 0, b'a', b'b', b'c', 1, 0, b'd']),
            status: StatusVector::default(),
        };
        assert!(response.is_segment_eof());
        let segments = response.segments().unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(&segments[0][..], b"abc");
        assert_eq!(&segments[1][..], b"d");
    }
}
