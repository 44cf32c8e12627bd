//! XDR encoding and decoding primitives.
//!
//! Every field on the wire occupies a multiple of four bytes. Scalars are
//! 32-bit big-endian signed integers; opaque byte strings carry a 4-byte
//! length prefix and are zero-padded up to the next 4-byte boundary.
//!
//! Readers check the remaining length before consuming a field and return
//! [`ProtocolError::Incomplete`] when the buffer does not yet hold it.
//! Multi-field decoders may leave a cursor partially advanced, so callers
//! that need all-or-nothing semantics decode from a copy of the cursor.

use bytes::{Buf, BufMut, Bytes};

use crate::error::ProtocolError;

/// Number of zero bytes needed to pad `len` to a 4-byte boundary.
#[must_use]
pub const fn pad_len(len: usize) -> usize {
    (4 - (len % 4)) % 4
}

/// Write a big-endian 32-bit integer.
pub fn put_i32(dst: &mut impl BufMut, value: i32) {
    dst.put_i32(value);
}

/// Write a length-prefixed, zero-padded byte string.
pub fn put_bytes(dst: &mut impl BufMut, bytes: &[u8]) {
    // Lengths beyond i32::MAX cannot be expressed on the wire; callers
    // bound message sizes well below that.
    dst.put_i32(bytes.len() as i32);
    dst.put_slice(bytes);
    dst.put_bytes(0, pad_len(bytes.len()));
}

/// Write a length-prefixed, zero-padded UTF-8 string.
pub fn put_str(dst: &mut impl BufMut, s: &str) {
    put_bytes(dst, s.as_bytes());
}

/// Append bytes that are already laid out for the wire.
pub fn put_raw(dst: &mut impl BufMut, bytes: &[u8]) {
    dst.put_slice(bytes);
}

/// Append zero padding for a field of `len` bytes.
pub fn put_padding(dst: &mut impl BufMut, len: usize) {
    dst.put_bytes(0, pad_len(len));
}

fn ensure(src: &impl Buf, needed: usize) -> Result<(), ProtocolError> {
    if src.remaining() < needed {
        return Err(ProtocolError::Incomplete {
            needed,
            available: src.remaining(),
        });
    }
    Ok(())
}

/// Read a big-endian 32-bit integer.
pub fn get_i32(src: &mut impl Buf) -> Result<i32, ProtocolError> {
    ensure(src, 4)?;
    Ok(src.get_i32())
}

/// Read a non-negative length field.
pub fn get_len(src: &mut impl Buf) -> Result<usize, ProtocolError> {
    let len = get_i32(src)?;
    usize::try_from(len).map_err(|_| ProtocolError::InvalidLength(len))
}

/// Read exactly `len` bytes followed by their padding.
pub fn get_padded(src: &mut impl Buf, len: usize) -> Result<Bytes, ProtocolError> {
    let padded = len + pad_len(len);
    ensure(src, padded)?;
    let bytes = src.copy_to_bytes(len);
    src.advance(pad_len(len));
    Ok(bytes)
}

/// Read a length-prefixed, padded byte string.
pub fn get_bytes(src: &mut impl Buf) -> Result<Bytes, ProtocolError> {
    let len = get_len(src)?;
    get_padded(src, len)
}

/// Read exactly `N` bytes with no padding.
pub fn get_array<const N: usize>(src: &mut impl Buf) -> Result<[u8; N], ProtocolError> {
    ensure(src, N)?;
    let mut out = [0u8; N];
    src.copy_to_slice(&mut out);
    Ok(out)
}

/// Read a little-endian integer of `bytes.len()` bytes (at most 8).
///
/// Information buffers and parameter blocks use this "VAX" byte order.
#[must_use]
pub fn vax_integer(bytes: &[u8]) -> i64 {
    let mut value: i64 = 0;
    for (shift, byte) in bytes.iter().take(8).enumerate() {
        value |= i64::from(*byte) << (shift * 8);
    }
    // Sign-extend from the actual width.
    let width = bytes.len().min(8);
    if width > 0 && width < 8 {
        let bits = width * 8;
        value = (value << (64 - bits)) >> (64 - bits);
    }
    value
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use proptest::prelude::*;

    #[test]
    fn test_pad_len() {
        assert_eq!(pad_len(0), 0);
        assert_eq!(pad_len(1), 3);
        assert_eq!(pad_len(2), 2);
        assert_eq!(pad_len(3), 1);
        assert_eq!(pad_len(4), 0);
        assert_eq!(pad_len(5), 3);
    }

    #[test]
    fn test_put_str_layout() {
        let mut buf = BytesMut::new();
        put_str(&mut buf, "abcde");
        assert_eq!(&buf[..], &[0, 0, 0, 5, b'a', b'b', b'c', b'd', b'e', 0, 0, 0]);
    }

    #[test]
    fn test_get_bytes_skips_padding() {
        let mut buf = BytesMut::new();
        put_bytes(&mut buf, b"xy");
        put_i32(&mut buf, 7);

        let mut cursor = buf.freeze();
        assert_eq!(&get_bytes(&mut cursor).unwrap()[..], b"xy");
        assert_eq!(get_i32(&mut cursor).unwrap(), 7);
        assert!(!cursor.has_remaining());
    }

    #[test]
    fn test_short_read_is_incomplete() {
        let mut cursor: &[u8] = &[0, 0, 0, 9, 1, 2];
        let err = get_bytes(&mut cursor).unwrap_err();
        assert!(err.is_incomplete());
        assert!(!err.is_desync());

        let mut empty: &[u8] = &[];
        assert_eq!(
            get_i32(&mut empty).unwrap_err(),
            ProtocolError::Incomplete {
                needed: 4,
                available: 0
            }
        );
    }

    #[test]
    fn test_negative_length_rejected() {
        let mut cursor: &[u8] = &[0xff, 0xff, 0xff, 0xfe];
        assert_eq!(
            get_len(&mut cursor).unwrap_err(),
            ProtocolError::InvalidLength(-2)
        );
    }

    #[test]
    fn test_vax_integer() {
        assert_eq!(vax_integer(&[]), 0);
        assert_eq!(vax_integer(&[0x10, 0x00]), 16);
        assert_eq!(vax_integer(&[0x00, 0x10]), 4096);
        assert_eq!(vax_integer(&[0xff, 0xff, 0xff, 0xff]), -1);
        assert_eq!(vax_integer(&[0x01, 0x00, 0x00, 0x00]), 1);
    }

    proptest! {
        #[test]
        fn prop_i32_round_trip(value in any::<i32>()) {
            let mut buf = BytesMut::new();
            put_i32(&mut buf, value);
            prop_assert_eq!(buf.len(), 4);
            let mut cursor = buf.freeze();
            prop_assert_eq!(get_i32(&mut cursor).unwrap(), value);
        }

        #[test]
        fn prop_padding_law(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut buf = BytesMut::new();
            put_bytes(&mut buf, &data);
            let len = data.len();
            let pad = (4 - len % 4) % 4;
            prop_assert_eq!(buf.len(), 4 + len + pad);
            prop_assert_eq!(buf.len() % 4, 0);
            prop_assert!(buf[4 + len..].iter().all(|b| *b == 0));

            let mut cursor = buf.freeze();
            prop_assert_eq!(&get_bytes(&mut cursor).unwrap()[..], &data[..]);
        }
    }
}
