//! Trait for converting from SQL values to Rust types.

use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use firebird_protocol::BlobId;
use rust_decimal::Decimal;

use crate::error::TypeError;
use crate::value::SqlValue;

/// Trait for types that can be converted from SQL values.
///
/// This trait is implemented for common Rust types to enable
/// type-safe extraction of values from query results.
pub trait FromSql: Sized {
    /// Convert from a SQL value to this type.
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError>;

    /// Convert from an optional SQL value.
    ///
    /// Returns `None` if the value is NULL.
    fn from_sql_nullable(value: &SqlValue) -> Result<Option<Self>, TypeError> {
        if value.is_null() {
            Ok(None)
        } else {
            Self::from_sql(value).map(Some)
        }
    }
}

fn mismatch(expected: &'static str, value: &SqlValue) -> TypeError {
    match value {
        SqlValue::Null => TypeError::UnexpectedNull,
        _ => TypeError::TypeMismatch {
            expected,
            actual: value.type_name().to_string(),
        },
    }
}

impl FromSql for bool {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        match value {
            SqlValue::Bool(v) => Ok(*v),
            SqlValue::SmallInt(v) => Ok(*v != 0),
            SqlValue::Int(v) => Ok(*v != 0),
            _ => Err(mismatch("bool", value)),
        }
    }
}

impl FromSql for i16 {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        match value {
            SqlValue::SmallInt(v) => Ok(*v),
            SqlValue::Int(v) => i16::try_from(*v).map_err(|_| TypeError::OutOfRange {
                target_type: "i16",
            }),
            _ => Err(mismatch("i16", value)),
        }
    }
}

impl FromSql for i32 {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        match value {
            SqlValue::Int(v) => Ok(*v),
            SqlValue::SmallInt(v) => Ok(i32::from(*v)),
            SqlValue::BigInt(v) => i32::try_from(*v).map_err(|_| TypeError::OutOfRange {
                target_type: "i32",
            }),
            _ => Err(mismatch("i32", value)),
        }
    }
}

impl FromSql for i64 {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        value.as_i64().ok_or_else(|| mismatch("i64", value))
    }
}

impl FromSql for f32 {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        match value {
            SqlValue::Float(v) => Ok(*v),
            _ => Err(mismatch("f32", value)),
        }
    }
}

impl FromSql for f64 {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        value.as_f64().ok_or_else(|| mismatch("f64", value))
    }
}

impl FromSql for String {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        match value {
            SqlValue::String(v) => Ok(v.clone()),
            SqlValue::Binary(b) => String::from_utf8(b.to_vec())
                .map_err(|e| TypeError::InvalidEncoding(e.to_string())),
            _ => Err(mismatch("String", value)),
        }
    }
}

impl FromSql for Vec<u8> {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        match value {
            SqlValue::Binary(v) => Ok(v.to_vec()),
            SqlValue::String(s) => Ok(s.as_bytes().to_vec()),
            _ => Err(mismatch("Vec<u8>", value)),
        }
    }
}

impl FromSql for Bytes {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        match value {
            SqlValue::Binary(v) => Ok(v.clone()),
            _ => Err(mismatch("Bytes", value)),
        }
    }
}

impl FromSql for Decimal {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        match value {
            SqlValue::Decimal(v) => Ok(*v),
            SqlValue::SmallInt(v) => Ok(Decimal::from(*v)),
            SqlValue::Int(v) => Ok(Decimal::from(*v)),
            SqlValue::BigInt(v) => Ok(Decimal::from(*v)),
            SqlValue::String(s) => s
                .trim()
                .parse()
                .map_err(|e| TypeError::InvalidDecimal(format!("{e}"))),
            _ => Err(mismatch("Decimal", value)),
        }
    }
}

impl FromSql for NaiveDate {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        match value {
            SqlValue::Date(v) => Ok(*v),
            SqlValue::DateTime(v) => Ok(v.date()),
            _ => Err(mismatch("NaiveDate", value)),
        }
    }
}

impl FromSql for NaiveTime {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        match value {
            SqlValue::Time(v) => Ok(*v),
            SqlValue::DateTime(v) => Ok(v.time()),
            _ => Err(mismatch("NaiveTime", value)),
        }
    }
}

impl FromSql for NaiveDateTime {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        match value {
            SqlValue::DateTime(v) => Ok(*v),
            _ => Err(mismatch("NaiveDateTime", value)),
        }
    }
}

impl FromSql for BlobId {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        value.as_blob_id().ok_or_else(|| mismatch("BlobId", value))
    }
}

impl FromSql for SqlValue {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        Ok(value.clone())
    }
}

impl<T: FromSql> FromSql for Option<T> {
    fn from_sql(value: &SqlValue) -> Result<Self, TypeError> {
        T::from_sql_nullable(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sql_i32() {
        let value = SqlValue::Int(42);
        assert_eq!(i32::from_sql(&value).unwrap(), 42);
        assert_eq!(i32::from_sql(&SqlValue::SmallInt(-3)).unwrap(), -3);
    }

    #[test]
    fn test_from_sql_null() {
        assert!(matches!(
            i32::from_sql(&SqlValue::Null),
            Err(TypeError::UnexpectedNull)
        ));
    }

    #[test]
    fn test_from_sql_option() {
        let value = SqlValue::Int(42);
        assert_eq!(Option::<i32>::from_sql(&value).unwrap(), Some(42));
        assert_eq!(Option::<i32>::from_sql(&SqlValue::Null).unwrap(), None);
    }

    #[test]
    fn test_from_sql_decimal() {
        let value = SqlValue::Decimal(Decimal::new(12345, 2));
        assert_eq!(Decimal::from_sql(&value).unwrap().to_string(), "123.45");
        assert_eq!(
            Decimal::from_sql(&SqlValue::BigInt(7)).unwrap(),
            Decimal::from(7)
        );
    }

    #[test]
    fn test_narrowing_out_of_range() {
        assert!(matches!(
            i16::from_sql(&SqlValue::Int(70_000)),
            Err(TypeError::OutOfRange { .. })
        ));
    }
}
