//! Wire decoding for SQL values.
//!
//! Raw values arrive exactly as read from a row message, already stripped of
//! padding and of the VARYING length prefix. The column descriptor decides
//! how they are interpreted.

use bytes::Bytes;
use firebird_protocol::{BlobId, SqlType, XSqlVar};
use rust_decimal::Decimal;

use crate::datetime::{decode_date, decode_time, decode_timestamp};
use crate::error::TypeError;
use crate::value::SqlValue;

/// Decode a non-NULL raw column value.
pub fn decode_value(raw: &Bytes, var: &XSqlVar) -> Result<SqlValue, TypeError> {
    match var.sql_type {
        SqlType::Text | SqlType::Varying => {
            if var.is_octets() {
                Ok(SqlValue::Binary(raw.clone()))
            } else {
                decode_text(raw).map(SqlValue::String)
            }
        }
        SqlType::Short => {
            let v = i64::from(be_i32(raw)?);
            if var.scale == 0 {
                let v = i16::try_from(v).map_err(|_| TypeError::OutOfRange {
                    target_type: "SMALLINT",
                })?;
                Ok(SqlValue::SmallInt(v))
            } else {
                scaled(v, var.scale)
            }
        }
        SqlType::Long => {
            let v = be_i32(raw)?;
            if var.scale == 0 {
                Ok(SqlValue::Int(v))
            } else {
                scaled(i64::from(v), var.scale)
            }
        }
        SqlType::Int64 => {
            let v = i64::from_be_bytes(fixed::<8>(raw)?);
            if var.scale == 0 {
                Ok(SqlValue::BigInt(v))
            } else {
                scaled(v, var.scale)
            }
        }
        SqlType::Float => Ok(SqlValue::Float(f32::from_be_bytes(fixed::<4>(raw)?))),
        SqlType::Double | SqlType::DFloat => {
            Ok(SqlValue::Double(f64::from_be_bytes(fixed::<8>(raw)?)))
        }
        SqlType::Date => decode_date(be_i32(raw)?).map(SqlValue::Date),
        SqlType::Time => decode_time(be_u32(raw)?).map(SqlValue::Time),
        SqlType::Timestamp => {
            let days = be_i32(raw)?;
            let ticks = be_u32(raw.get(4..).unwrap_or_default())?;
            decode_timestamp(days, ticks).map(SqlValue::DateTime)
        }
        SqlType::Boolean => {
            let first = raw.first().ok_or(TypeError::BufferTooSmall {
                needed: 1,
                available: 0,
            })?;
            Ok(SqlValue::Bool(*first != 0))
        }
        SqlType::Blob | SqlType::Array | SqlType::Quad => {
            Ok(SqlValue::Blob(BlobId(fixed::<8>(raw)?)))
        }
        SqlType::Null => Ok(SqlValue::Null),
    }
}

/// Decode an optional raw value; `None` is SQL NULL.
pub fn decode_nullable(raw: Option<&Bytes>, var: &XSqlVar) -> Result<SqlValue, TypeError> {
    match raw {
        Some(raw) => decode_value(raw, var),
        None => Ok(SqlValue::Null),
    }
}

/// Decode UTF-8 text.
pub fn decode_text(raw: &[u8]) -> Result<String, TypeError> {
    String::from_utf8(raw.to_vec()).map_err(|e| TypeError::InvalidEncoding(e.to_string()))
}

/// Apply a decimal scale to an integer.
pub fn scaled(value: i64, scale: i32) -> Result<SqlValue, TypeError> {
    let invalid = || TypeError::InvalidDecimal(format!("{value} with scale {scale}"));
    let decimal = if scale < 0 {
        Decimal::try_new(value, scale.unsigned_abs()).map_err(|_| invalid())?
    } else {
        let factor = 10i64.checked_pow(scale.unsigned_abs()).ok_or_else(invalid)?;
        Decimal::from(value)
            .checked_mul(Decimal::from(factor))
            .ok_or_else(invalid)?
    };
    Ok(SqlValue::Decimal(decimal))
}

fn fixed<const N: usize>(raw: &[u8]) -> Result<[u8; N], TypeError> {
    raw.get(..N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(TypeError::BufferTooSmall {
            needed: N,
            available: raw.len(),
        })
}

fn be_i32(raw: &[u8]) -> Result<i32, TypeError> {
    Ok(i32::from_be_bytes(fixed::<4>(raw)?))
}

fn be_u32(raw: &[u8]) -> Result<u32, TypeError> {
    Ok(u32::from_be_bytes(fixed::<4>(raw)?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use firebird_protocol::types::SUBTYPE_OCTETS;

    fn raw(bytes: &[u8]) -> Bytes {
        Bytes::copy_from_slice(bytes)
    }

    #[test]
    fn test_integers() {
        let long = XSqlVar::new(SqlType::Long, 4);
        assert_eq!(
            decode_value(&raw(&(-5i32).to_be_bytes()), &long).unwrap(),
            SqlValue::Int(-5)
        );

        let short = XSqlVar::new(SqlType::Short, 2);
        assert_eq!(
            decode_value(&raw(&300i32.to_be_bytes()), &short).unwrap(),
            SqlValue::SmallInt(300)
        );

        let big = XSqlVar::new(SqlType::Int64, 8);
        assert_eq!(
            decode_value(&raw(&i64::MAX.to_be_bytes()), &big).unwrap(),
            SqlValue::BigInt(i64::MAX)
        );
    }

    #[test]
    fn test_scaled_integers_are_exact() {
        let numeric = XSqlVar::new(SqlType::Int64, 8).with_scale(-2);
        let value = decode_value(&raw(&12345i64.to_be_bytes()), &numeric).unwrap();
        assert_eq!(value, SqlValue::Decimal(Decimal::new(12345, 2)));
        let SqlValue::Decimal(d) = value else {
            unreachable!()
        };
        assert_eq!(d.to_string(), "123.45");

        let short = XSqlVar::new(SqlType::Short, 2).with_scale(-1);
        assert_eq!(
            decode_value(&raw(&(-7i32).to_be_bytes()), &short).unwrap(),
            SqlValue::Decimal(Decimal::new(-7, 1))
        );

        let positive = XSqlVar::new(SqlType::Long, 4).with_scale(2);
        assert_eq!(
            decode_value(&raw(&3i32.to_be_bytes()), &positive).unwrap(),
            SqlValue::Decimal(Decimal::from(300))
        );
    }

    #[test]
    fn test_text_and_octets() {
        let text = XSqlVar::new(SqlType::Varying, 20);
        assert_eq!(
            decode_value(&raw("héllo".as_bytes()), &text).unwrap(),
            SqlValue::String("héllo".into())
        );

        let octets = XSqlVar::new(SqlType::Text, 3).with_sub_type(SUBTYPE_OCTETS);
        assert_eq!(
            decode_value(&raw(&[0xff, 0, 1]), &octets).unwrap(),
            SqlValue::Binary(raw(&[0xff, 0, 1]))
        );

        assert!(matches!(
            decode_value(&raw(&[0xff, 0xfe]), &text),
            Err(TypeError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_dates() {
        let date = XSqlVar::new(SqlType::Date, 4);
        assert_eq!(
            decode_value(&raw(&50448i32.to_be_bytes()), &date).unwrap(),
            SqlValue::Date(NaiveDate::from_ymd_opt(1996, 12, 31).unwrap())
        );

        let ts = XSqlVar::new(SqlType::Timestamp, 8);
        let mut bytes = 50448i32.to_be_bytes().to_vec();
        bytes.extend_from_slice(&10_000u32.to_be_bytes());
        let expected = NaiveDate::from_ymd_opt(1996, 12, 31)
            .unwrap()
            .and_hms_opt(0, 0, 1)
            .unwrap();
        assert_eq!(
            decode_value(&raw(&bytes), &ts).unwrap(),
            SqlValue::DateTime(expected)
        );
    }

    #[test]
    fn test_bool_float_blob() {
        let b = XSqlVar::new(SqlType::Boolean, 1);
        assert_eq!(decode_value(&raw(&[1]), &b).unwrap(), SqlValue::Bool(true));
        assert_eq!(decode_value(&raw(&[0]), &b).unwrap(), SqlValue::Bool(false));

        let d = XSqlVar::new(SqlType::Double, 8);
        assert_eq!(
            decode_value(&raw(&1.5f64.to_be_bytes()), &d).unwrap(),
            SqlValue::Double(1.5)
        );

        let blob = XSqlVar::new(SqlType::Blob, 8);
        assert_eq!(
            decode_value(&raw(&[0, 0, 0, 1, 0, 0, 0, 2]), &blob).unwrap(),
            SqlValue::Blob(BlobId([0, 0, 0, 1, 0, 0, 0, 2]))
        );
    }

    #[test]
    fn test_short_buffer() {
        let long = XSqlVar::new(SqlType::Long, 4);
        assert!(matches!(
            decode_value(&raw(&[0, 1]), &long),
            Err(TypeError::BufferTooSmall {
                needed: 4,
                available: 2
            })
        ));
    }

    #[test]
    fn test_null() {
        let long = XSqlVar::new(SqlType::Long, 4);
        assert_eq!(decode_nullable(None, &long).unwrap(), SqlValue::Null);
    }
}
