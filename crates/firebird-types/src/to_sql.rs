//! Trait for converting Rust types to SQL values.

use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use firebird_protocol::BlobId;
use rust_decimal::Decimal;

use crate::error::TypeError;
use crate::value::SqlValue;

/// Trait for types that can be converted to SQL values.
///
/// This trait is implemented for common Rust types to enable
/// type-safe parameter binding in queries.
pub trait ToSql {
    /// Convert this value to a SQL value.
    fn to_sql(&self) -> Result<SqlValue, TypeError>;

    /// Get the SQL type name for this value.
    fn sql_type(&self) -> &'static str;
}

macro_rules! impl_to_sql {
    ($($ty:ty => $variant:ident, $name:literal;)*) => {
        $(
            impl ToSql for $ty {
                fn to_sql(&self) -> Result<SqlValue, TypeError> {
                    Ok(SqlValue::$variant(self.clone()))
                }

                fn sql_type(&self) -> &'static str {
                    $name
                }
            }
        )*
    };
}

impl_to_sql! {
    bool => Bool, "BOOLEAN";
    i16 => SmallInt, "SMALLINT";
    i32 => Int, "INTEGER";
    i64 => BigInt, "BIGINT";
    f32 => Float, "FLOAT";
    f64 => Double, "DOUBLE PRECISION";
    Decimal => Decimal, "DECIMAL";
    String => String, "VARCHAR";
    Bytes => Binary, "VARCHAR(OCTETS)";
    NaiveDate => Date, "DATE";
    NaiveTime => Time, "TIME";
    NaiveDateTime => DateTime, "TIMESTAMP";
    BlobId => Blob, "BLOB";
}

impl ToSql for &str {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::String((*self).to_owned()))
    }

    fn sql_type(&self) -> &'static str {
        "VARCHAR"
    }
}

impl ToSql for &[u8] {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::Binary(Bytes::copy_from_slice(self)))
    }

    fn sql_type(&self) -> &'static str {
        "VARCHAR(OCTETS)"
    }
}

impl ToSql for Vec<u8> {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::Binary(Bytes::copy_from_slice(self)))
    }

    fn sql_type(&self) -> &'static str {
        "VARCHAR(OCTETS)"
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(self.clone())
    }

    fn sql_type(&self) -> &'static str {
        self.type_name()
    }
}

impl<T: ToSql> ToSql for Option<T> {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        match self {
            Some(v) => v.to_sql(),
            None => Ok(SqlValue::Null),
        }
    }

    fn sql_type(&self) -> &'static str {
        match self {
            Some(v) => v.sql_type(),
            None => "NULL",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql_scalars() {
        assert_eq!(42i32.to_sql().unwrap(), SqlValue::Int(42));
        assert_eq!("hi".to_sql().unwrap(), SqlValue::String("hi".into()));
        assert_eq!(true.sql_type(), "BOOLEAN");
    }

    #[test]
    fn test_to_sql_option() {
        let none: Option<i64> = None;
        assert!(none.to_sql().unwrap().is_null());
        assert_eq!(Some(5i64).to_sql().unwrap(), SqlValue::BigInt(5));
    }
}
