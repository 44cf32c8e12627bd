//! Wire encoding for SQL values.
//!
//! A row message is the concatenation, per column, of the value bytes
//! (with a 4-byte length prefix for VARYING), zero padding to a 4-byte
//! boundary, and a 4-byte null indicator (0, or -1 for NULL). Its shape is
//! described to the server by the BLR built from the same descriptors.

use bytes::{BufMut, Bytes, BytesMut};
use firebird_protocol::codec::{put_i32, put_padding};
use firebird_protocol::types::{WireLength, SUBTYPE_OCTETS};
use firebird_protocol::{message_blr, SqlType, XSqlVar};
use rust_decimal::Decimal;

use crate::datetime::{encode_date, encode_time, encode_timestamp};
use crate::error::TypeError;
use crate::value::SqlValue;

/// Null indicator value for a present value.
const NOT_NULL: i32 = 0;
/// Null indicator value for NULL.
const NULL: i32 = -1;

/// A row message ready to send: its BLR description and packed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMessage {
    /// BLR describing the message.
    pub blr: Bytes,
    /// Packed values.
    pub data: Bytes,
}

/// Pick the descriptor a parameter value is sent as.
pub fn param_descriptor(value: &SqlValue) -> Result<XSqlVar, TypeError> {
    let var = match value {
        SqlValue::Null => XSqlVar::new(SqlType::Text, 0),
        SqlValue::String(s) => XSqlVar::new(SqlType::Text, text_length(s.len())?),
        SqlValue::Binary(b) => {
            XSqlVar::new(SqlType::Text, text_length(b.len())?).with_sub_type(SUBTYPE_OCTETS)
        }
        SqlValue::Bool(_) => XSqlVar::new(SqlType::Boolean, 1),
        SqlValue::SmallInt(_) | SqlValue::Int(_) => XSqlVar::new(SqlType::Long, 4),
        SqlValue::BigInt(_) => XSqlVar::new(SqlType::Int64, 8),
        SqlValue::Decimal(d) => match i64::try_from(d.mantissa()) {
            Ok(_) => XSqlVar::new(SqlType::Int64, 8).with_scale(-(d.scale() as i32)),
            Err(_) => XSqlVar::new(SqlType::Text, text_length(d.to_string().len())?),
        },
        SqlValue::Float(_) => XSqlVar::new(SqlType::Float, 4),
        SqlValue::Double(_) => XSqlVar::new(SqlType::Double, 8),
        SqlValue::Date(_) => XSqlVar::new(SqlType::Date, 4),
        SqlValue::Time(_) => XSqlVar::new(SqlType::Time, 4),
        SqlValue::DateTime(_) => XSqlVar::new(SqlType::Timestamp, 8),
        SqlValue::Blob(_) => XSqlVar::new(SqlType::Blob, 8),
    };
    Ok(var)
}

/// Encode parameter values into a message, choosing descriptors from the
/// values themselves.
pub fn encode_params(values: &[SqlValue]) -> Result<EncodedMessage, TypeError> {
    let vars = values
        .iter()
        .map(param_descriptor)
        .collect::<Result<Vec<_>, _>>()?;
    encode_message(values, &vars)
}

/// Encode values into a message laid out per `vars`.
pub fn encode_message(values: &[SqlValue], vars: &[XSqlVar]) -> Result<EncodedMessage, TypeError> {
    let blr = message_blr(vars)?;
    let data = encode_row(values, vars)?;
    Ok(EncodedMessage { blr, data })
}

/// Pack one row of values laid out per `vars`.
pub fn encode_row(values: &[SqlValue], vars: &[XSqlVar]) -> Result<Bytes, TypeError> {
    let mut dst = BytesMut::new();
    for (value, var) in values.iter().zip(vars) {
        encode_column(value, var, &mut dst)?;
    }
    Ok(dst.freeze())
}

/// Write one column: value, padding and null indicator.
pub fn encode_column(value: &SqlValue, var: &XSqlVar, dst: &mut BytesMut) -> Result<(), TypeError> {
    if value.is_null() {
        match var.wire_length() {
            WireLength::Prefixed => put_i32(dst, 0),
            _ => {
                let len = var.io_length().unwrap_or(0);
                dst.put_bytes(0, len);
                put_padding(dst, len);
            }
        }
        put_i32(dst, NULL);
        return Ok(());
    }

    let start = dst.len();
    match var.sql_type {
        SqlType::Text => {
            let bytes = text_bytes(value, var)?;
            let declared = var.io_length().unwrap_or(0);
            if bytes.len() > declared {
                return Err(TypeError::OutOfRange {
                    target_type: "CHAR",
                });
            }
            dst.put_slice(&bytes);
            // CHAR values are blank-padded to the declared length.
            let fill = if var.is_octets() { 0 } else { b' ' };
            dst.put_bytes(fill, declared - bytes.len());
        }
        SqlType::Varying => {
            let bytes = text_bytes(value, var)?;
            let len = i32::try_from(bytes.len()).map_err(|_| TypeError::OutOfRange {
                target_type: "VARCHAR",
            })?;
            put_i32(dst, len);
            dst.put_slice(&bytes);
            put_padding(dst, bytes.len());
            put_i32(dst, NOT_NULL);
            return Ok(());
        }
        SqlType::Short | SqlType::Long => {
            let v = scaled_integer(value, var)?;
            let v = i32::try_from(v).map_err(|_| TypeError::OutOfRange {
                target_type: var.sql_type.name(),
            })?;
            dst.put_i32(v);
        }
        SqlType::Int64 => dst.put_i64(scaled_integer(value, var)?),
        SqlType::Float => match value {
            SqlValue::Float(v) => dst.put_f32(*v),
            _ => return Err(mismatch(value, var)),
        },
        SqlType::Double | SqlType::DFloat => match value {
            SqlValue::Double(v) => dst.put_f64(*v),
            SqlValue::Float(v) => dst.put_f64(f64::from(*v)),
            _ => return Err(mismatch(value, var)),
        },
        SqlType::Date => match value {
            SqlValue::Date(d) => dst.put_i32(encode_date(*d)?),
            SqlValue::DateTime(dt) => dst.put_i32(encode_date(dt.date())?),
            _ => return Err(mismatch(value, var)),
        },
        SqlType::Time => match value {
            SqlValue::Time(t) => dst.put_u32(encode_time(*t)),
            SqlValue::DateTime(dt) => dst.put_u32(encode_time(dt.time())),
            _ => return Err(mismatch(value, var)),
        },
        SqlType::Timestamp => {
            let dt = match value {
                SqlValue::DateTime(dt) => *dt,
                SqlValue::Date(d) => d.and_time(chrono::NaiveTime::MIN),
                _ => return Err(mismatch(value, var)),
            };
            let (days, ticks) = encode_timestamp(dt)?;
            dst.put_i32(days);
            dst.put_u32(ticks);
        }
        SqlType::Boolean => match value {
            SqlValue::Bool(v) => dst.put_u8(u8::from(*v)),
            _ => return Err(mismatch(value, var)),
        },
        SqlType::Blob | SqlType::Array | SqlType::Quad => match value {
            SqlValue::Blob(id) => dst.put_slice(id.as_bytes()),
            _ => return Err(mismatch(value, var)),
        },
        SqlType::Null => {}
    }
    let written = dst.len() - start;
    put_padding(dst, written);
    put_i32(dst, NOT_NULL);
    Ok(())
}

/// Convert an integer or decimal value to the integer a column of the given
/// scale stores.
fn scaled_integer(value: &SqlValue, var: &XSqlVar) -> Result<i64, TypeError> {
    let out_of_range = || TypeError::OutOfRange {
        target_type: var.sql_type.name(),
    };
    let decimal = match value {
        SqlValue::SmallInt(v) => Decimal::from(*v),
        SqlValue::Int(v) => Decimal::from(*v),
        SqlValue::BigInt(v) => Decimal::from(*v),
        SqlValue::Decimal(d) => *d,
        _ => return Err(mismatch(value, var)),
    };
    if var.scale == 0 && decimal.scale() == 0 {
        return i64::try_from(decimal.mantissa()).map_err(|_| out_of_range());
    }
    if var.scale > 0 {
        return Err(TypeError::InvalidDecimal(format!(
            "positive scale {} is not supported for parameters",
            var.scale
        )));
    }
    let mut decimal = decimal;
    decimal.rescale(var.scale.unsigned_abs());
    i64::try_from(decimal.mantissa()).map_err(|_| out_of_range())
}

fn text_bytes(value: &SqlValue, var: &XSqlVar) -> Result<Bytes, TypeError> {
    match value {
        SqlValue::String(s) => Ok(Bytes::copy_from_slice(s.as_bytes())),
        SqlValue::Binary(b) => Ok(b.clone()),
        SqlValue::Decimal(d) => Ok(Bytes::from(d.to_string())),
        _ => Err(mismatch(value, var)),
    }
}

fn text_length(len: usize) -> Result<i32, TypeError> {
    i32::try_from(len).map_err(|_| TypeError::OutOfRange {
        target_type: "CHAR",
    })
}

fn mismatch(value: &SqlValue, var: &XSqlVar) -> TypeError {
    TypeError::TypeMismatch {
        expected: var.sql_type.name(),
        actual: value.type_name().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::decode::decode_value;
    use chrono::NaiveDate;
    use firebird_protocol::response::decode_row;

    #[test]
    fn test_int_and_text_params() {
        let msg = encode_params(&[SqlValue::Int(5), SqlValue::String("ab".into())]).unwrap();
        assert_eq!(
            &msg.blr[..],
            &[5, 2, 4, 0, 4, 0, 8, 0, 7, 0, 14, 2, 0, 7, 0, 255, 76]
        );
        assert_eq!(
            &msg.data[..],
            &[0, 0, 0, 5, 0, 0, 0, 0, b'a', b'b', 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_null_param() {
        let msg = encode_params(&[SqlValue::Null]).unwrap();
        assert_eq!(&msg.blr[6..9], &[14, 0, 0]);
        assert_eq!(&msg.data[..], &[0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_decimal_param() {
        let d = Decimal::new(-12345, 2);
        let var = param_descriptor(&SqlValue::Decimal(d)).unwrap();
        assert_eq!(var.sql_type, SqlType::Int64);
        assert_eq!(var.scale, -2);

        let msg = encode_params(&[SqlValue::Decimal(d)]).unwrap();
        assert_eq!(&msg.blr[6..8], &[16, 254]);
        assert_eq!(&msg.data[..8], &(-12345i64).to_be_bytes());
    }

    #[test]
    fn test_decimal_rescaled_into_column() {
        let var = XSqlVar::new(SqlType::Long, 4).with_scale(-3);
        let mut buf = BytesMut::new();
        encode_column(&SqlValue::Decimal(Decimal::new(15, 1)), &var, &mut buf).unwrap();
        assert_eq!(&buf[..4], &1500i32.to_be_bytes());
    }

    #[test]
    fn test_round_trip_through_row_decoder() {
        let vars = vec![
            XSqlVar::new(SqlType::Varying, 20),
            XSqlVar::new(SqlType::Text, 4),
            XSqlVar::new(SqlType::Date, 4),
            XSqlVar::new(SqlType::Boolean, 1),
            XSqlVar::new(SqlType::Short, 2),
            XSqlVar::new(SqlType::Long, 4),
        ];
        let values = vec![
            SqlValue::String("hello".into()),
            SqlValue::String("ab".into()),
            SqlValue::Date(NaiveDate::from_ymd_opt(1996, 12, 31).unwrap()),
            SqlValue::Bool(true),
            SqlValue::SmallInt(-2),
            SqlValue::Null,
        ];
        let data = encode_row(&values, &vars).unwrap();
        assert_eq!(data.len() % 4, 0);

        let mut cursor = data.clone();
        let row = decode_row(&mut cursor, &vars).unwrap();
        let decoded: Vec<SqlValue> = row
            .iter()
            .zip(&vars)
            .map(|(raw, var)| match raw {
                Some(raw) => decode_value(raw, var).unwrap(),
                None => SqlValue::Null,
            })
            .collect();

        assert_eq!(decoded[0], values[0]);
        // CHAR comes back blank-padded.
        assert_eq!(decoded[1], SqlValue::String("ab  ".into()));
        assert_eq!(&decoded[2..], &values[2..]);
    }

    #[test]
    fn test_mismatch_rejected() {
        let var = XSqlVar::new(SqlType::Date, 4);
        let mut buf = BytesMut::new();
        assert!(matches!(
            encode_column(&SqlValue::Bool(true), &var, &mut buf),
            Err(TypeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_char_too_long() {
        let var = XSqlVar::new(SqlType::Text, 2);
        let mut buf = BytesMut::new();
        assert!(encode_column(&SqlValue::String("abc".into()), &var, &mut buf).is_err());
    }
}
