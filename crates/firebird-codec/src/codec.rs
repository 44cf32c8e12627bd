//! Response decoder and request encoder for tokio-util framing.
//!
//! Firebird responses carry no length header; a frame ends where the
//! response's own structure ends. The decoder therefore parses the response
//! optimistically and asks for more bytes whenever parsing runs short.

use bytes::{Buf, Bytes, BytesMut};
use firebird_protocol::{Expect, Response};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::CodecError;

/// Firebird wire codec.
///
/// The decoder must be told what the outstanding request expects before the
/// response is read, see [`WireCodec::expect`].
#[derive(Debug, Clone)]
pub struct WireCodec {
    expect: Expect,
}

impl WireCodec {
    /// Create a codec expecting a generic response.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expect: Expect::Generic,
        }
    }

    /// Set the response shape the next decode should produce.
    pub fn expect(&mut self, expect: Expect) {
        self.expect = expect;
    }

    /// The response shape currently expected.
    #[must_use]
    pub fn expecting(&self) -> &Expect {
        &self.expect
    }
}

impl Default for WireCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for WireCodec {
    type Item = Response;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let mut cursor = &src[..];
        match Response::decode(&mut cursor, &self.expect) {
            Ok(response) => {
                let consumed = src.len() - cursor.remaining();
                src.advance(consumed);
                tracing::trace!(consumed, expect = ?self.expect, "decoded response");
                Ok(Some(response))
            }
            Err(e) if e.is_incomplete() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Encoder<Bytes> for WireCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        tracing::trace!(length = item.len(), "encoded request");
        dst.extend_from_slice(&item);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use bytes::BufMut;

    fn generic_response(handle: i32) -> BytesMut {
        let mut buf = BytesMut::new();
        buf.put_i32(9);
        buf.put_i32(handle);
        buf.put_slice(&[0; 8]);
        buf.put_i32(0);
        buf.put_i32(0);
        buf
    }

    #[test]
    fn test_decode_generic() {
        let mut codec = WireCodec::new();
        let mut src = generic_response(5);
        src.put_i32(71);

        let Some(Response::Generic(response)) = codec.decode(&mut src).unwrap() else {
            panic!("expected a generic response");
        };
        assert_eq!(response.handle, 5);
        // Trailing bytes belong to the next response.
        assert_eq!(&src[..], &[0, 0, 0, 71]);
    }

    #[test]
    fn test_incomplete_waits_for_more() {
        let mut codec = WireCodec::new();
        let full = generic_response(1);

        for cut in [0, 3, 4, 11, full.len() - 1] {
            let mut src = BytesMut::from(&full[..cut]);
            assert!(codec.decode(&mut src).unwrap().is_none());
            assert_eq!(src.len(), cut, "nothing is consumed from a partial frame");
        }
    }

    #[test]
    fn test_skips_dummy() {
        let mut codec = WireCodec::new();
        let mut src = BytesMut::new();
        src.put_i32(71);
        src.put_i32(71);
        src.extend_from_slice(&generic_response(3));

        assert!(matches!(
            codec.decode(&mut src).unwrap(),
            Some(Response::Generic(r)) if r.handle == 3
        ));
        assert!(src.is_empty());
    }

    #[test]
    fn test_wrong_op_is_protocol_error() {
        let mut codec = WireCodec::new();
        codec.expect(Expect::Accept);
        let mut src = generic_response(0);

        assert!(matches!(
            codec.decode(&mut src),
            Err(CodecError::Protocol(e)) if e.is_desync()
        ));
    }

    #[test]
    fn test_encode_appends() {
        let mut codec = WireCodec::new();
        let mut dst = BytesMut::new();
        codec.encode(Bytes::from_static(&[0, 0, 0, 21]), &mut dst).unwrap();
        codec.encode(Bytes::from_static(&[0, 0, 0, 1]), &mut dst).unwrap();
        assert_eq!(&dst[..], &[0, 0, 0, 21, 0, 0, 0, 1]);
    }
}
