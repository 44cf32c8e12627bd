//! BLR message descriptions.
//!
//! Before the server sends or accepts a row message it needs a BLR
//! description of the message shape: one data-type group per column, each
//! followed by a `SHORT` null indicator.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::ProtocolError;
use crate::types::{BlrOperand, XSqlVar};

/// BLR language version 5.
pub const BLR_VERSION5: u8 = 5;
/// `blr_begin`.
pub const BLR_BEGIN: u8 = 2;
/// `blr_message`.
pub const BLR_MESSAGE: u8 = 4;
/// `blr_short`, used for each null indicator.
pub const BLR_SHORT: u8 = 7;
/// `blr_end`.
pub const BLR_END: u8 = 255;
/// `blr_eoc`.
pub const BLR_EOC: u8 = 76;

/// Size of the message header.
pub const HEADER_LEN: usize = 6;
/// Size of the trailer.
pub const TRAILER_LEN: usize = 2;

/// Bytes the group for `var` occupies, including its null indicator.
#[must_use]
pub fn group_len(var: &XSqlVar) -> usize {
    let operand = match var.sql_type.info().operand {
        BlrOperand::None => 0,
        BlrOperand::Scale | BlrOperand::Subtype => 1,
        BlrOperand::Length => 2,
    };
    1 + operand + 2
}

/// Build the BLR description of a message with the given columns.
pub fn message_blr(vars: &[XSqlVar]) -> Result<Bytes, ProtocolError> {
    // Each column contributes a value and a null indicator.
    let count = vars.len() * 2;
    let count = u16::try_from(count).map_err(|_| ProtocolError::ValueTooLong {
        field: "BLR column count",
        len: count,
        max: usize::from(u16::MAX),
    })?;

    let body: usize = vars.iter().map(group_len).sum();
    let mut blr = BytesMut::with_capacity(HEADER_LEN + body + TRAILER_LEN);
    blr.put_slice(&[BLR_VERSION5, BLR_BEGIN, BLR_MESSAGE, 0]);
    blr.put_u16_le(count);

    for var in vars {
        let info = var.sql_type.info();
        blr.put_u8(info.blr_code);
        match info.operand {
            BlrOperand::None => {}
            // Two's-complement byte: a scale of -2 is written as 254.
            BlrOperand::Scale => blr.put_u8(var.scale as u8),
            BlrOperand::Subtype => blr.put_u8(0),
            BlrOperand::Length => {
                let len = u16::try_from(var.length).map_err(|_| ProtocolError::ValueTooLong {
                    field: "BLR column length",
                    len: usize::try_from(var.length).unwrap_or(0),
                    max: usize::from(u16::MAX),
                })?;
                blr.put_u16_le(len);
            }
        }
        blr.put_slice(&[BLR_SHORT, 0]);
    }

    blr.put_slice(&[BLR_END, BLR_EOC]);
    Ok(blr.freeze())
}
