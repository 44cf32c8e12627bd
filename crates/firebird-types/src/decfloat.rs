//! Densely packed decimal (DPD) digit decoding.
//!
//! IEEE 754 decimal formats store their significand as 10-bit declets, each
//! holding three decimal digits. Only digit extraction is provided here;
//! DECFLOAT column values are not converted.

use crate::error::TypeError;

/// Largest valid declet.
const DECLET_MASK: u16 = 0x3FF;

/// Decode one 10-bit declet to an integer in `0..=999`.
pub fn dpd_to_int(dpd: u16) -> Result<u16, TypeError> {
    if dpd > DECLET_MASK {
        return Err(TypeError::InvalidDpd(dpd));
    }
    let b = |i: u16| (dpd >> i) & 1;
    let hi3 = |a: u16, b2: u16, c: u16| b(a) * 4 + b(b2) * 2 + b(c);

    let (d2, d1, d0) = match (b(3), b(2), b(1), b(6), b(5)) {
        (0, _, _, _, _) => (hi3(9, 8, 7), hi3(6, 5, 4), hi3(2, 1, 0)),
        (1, 0, 0, _, _) => (hi3(9, 8, 7), hi3(6, 5, 4), 8 + b(0)),
        (1, 0, 1, _, _) => (hi3(9, 8, 7), 8 + b(4), b(6) * 4 + b(5) * 2 + b(0)),
        (1, 1, 0, _, _) => (8 + b(7), hi3(6, 5, 4), b(9) * 4 + b(8) * 2 + b(0)),
        (1, 1, 1, 0, 0) => (8 + b(7), 8 + b(4), b(9) * 4 + b(8) * 2 + b(0)),
        (1, 1, 1, 0, 1) => (8 + b(7), b(9) * 4 + b(8) * 2 + b(4), 8 + b(0)),
        (1, 1, 1, 1, 0) => (hi3(9, 8, 7), 8 + b(4), 8 + b(0)),
        _ => (8 + b(7), 8 + b(4), 8 + b(0)),
    };
    Ok(d2 * 100 + d1 * 10 + d0)
}

/// Assemble a significand from its leading digit(s) and the DPD bits below.
///
/// `num_bits` is the width of `dpd_bits`; it is consumed in 10-bit groups,
/// most significant first.
pub fn calc_significand(prefix: u64, dpd_bits: u128, num_bits: u32) -> Result<u128, TypeError> {
    if num_bits > u128::BITS {
        return Err(TypeError::OutOfRange {
            target_type: "decimal significand",
        });
    }
    let groups = num_bits / 10;
    let mut value = u128::from(prefix);
    for i in (0..groups).rev() {
        let declet = ((dpd_bits >> (i * 10)) & u128::from(DECLET_MASK)) as u16;
        let digits = u128::from(dpd_to_int(declet)?);
        value = value
            .checked_mul(1000)
            .and_then(|v| v.checked_add(digits))
            .ok_or(TypeError::OutOfRange {
                target_type: "decimal significand",
            })?;
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_each_bit_pattern() {
        // One declet per case of the decoding table.
        assert_eq!(dpd_to_int(0x2B7).unwrap(), 537);
        assert_eq!(dpd_to_int(0x269).unwrap(), 469);
        assert_eq!(dpd_to_int(0x1DB).unwrap(), 395);
        assert_eq!(dpd_to_int(0x32C).unwrap(), 826);
        assert_eq!(dpd_to_int(0x18F).unwrap(), 983);
        assert_eq!(dpd_to_int(0x23E).unwrap(), 858);
        assert_eq!(dpd_to_int(0x3CF).unwrap(), 789);
        assert_eq!(dpd_to_int(0x0FF).unwrap(), 999);
    }

    #[test]
    fn test_edges() {
        assert_eq!(dpd_to_int(0).unwrap(), 0);
        assert_eq!(dpd_to_int(0x3FF).unwrap(), 999);
    }

    #[test]
    fn test_too_wide_rejected() {
        assert!(matches!(dpd_to_int(0x400), Err(TypeError::InvalidDpd(0x400))));
    }

    #[test]
    fn test_every_declet_is_three_digits() {
        for dpd in 0..=DECLET_MASK {
            assert!(dpd_to_int(dpd).unwrap() <= 999);
        }
    }

    #[test]
    fn test_significand() {
        let bits = (0x2B7u128 << 10) | 0x0FF;
        assert_eq!(calc_significand(1, bits, 20).unwrap(), 1_537_999);
        assert_eq!(calc_significand(0, 0, 0).unwrap(), 0);
        assert_eq!(calc_significand(7, 0, 0).unwrap(), 7);
    }
}
