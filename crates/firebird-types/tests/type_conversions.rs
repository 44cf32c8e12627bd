//! Integration tests for value conversions through the wire format.
//!
//! Values are encoded into a row message, decoded back through the protocol
//! crate's row reader and extracted with `FromSql`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::approx_constant)]

use bytes::Bytes;
use chrono::{NaiveDate, NaiveTime};
use firebird_protocol::response::decode_row;
use firebird_protocol::types::SUBTYPE_OCTETS;
use firebird_protocol::{SqlType, XSqlVar};
use firebird_types::{
    decode_nullable, encode_params, encode_row, FromSql, SqlValue, ToSql, TypeError,
};
use rust_decimal::Decimal;

fn through_wire(values: &[SqlValue], vars: &[XSqlVar]) -> Vec<SqlValue> {
    let row = encode_row(values, vars).unwrap();
    let mut src = row;
    let raw = decode_row(&mut src, vars).unwrap();
    assert!(src.is_empty(), "row not fully consumed");
    raw.iter()
        .zip(vars)
        .map(|(raw, var)| decode_nullable(raw.as_ref(), var).unwrap())
        .collect()
}

mod scalars {
    use super::*;

    #[test]
    fn test_mixed_row() {
        let vars = vec![
            XSqlVar::new(SqlType::Long, 4),
            XSqlVar::new(SqlType::Varying, 10),
            XSqlVar::new(SqlType::Double, 8),
            XSqlVar::new(SqlType::Boolean, 1),
        ];
        let values = vec![
            SqlValue::Int(7),
            SqlValue::String("abc".into()),
            SqlValue::Double(3.14),
            SqlValue::Bool(true),
        ];
        let decoded = through_wire(&values, &vars);
        assert_eq!(decoded, values);

        assert_eq!(i32::from_sql(&decoded[0]).unwrap(), 7);
        assert_eq!(String::from_sql(&decoded[1]).unwrap(), "abc");
        assert!(bool::from_sql(&decoded[3]).unwrap());
    }

    #[test]
    fn test_nulls_survive() {
        let vars = vec![
            XSqlVar::new(SqlType::Long, 4),
            XSqlVar::new(SqlType::Varying, 10),
        ];
        let decoded = through_wire(&[SqlValue::Null, SqlValue::Null], &vars);
        assert!(decoded.iter().all(SqlValue::is_null));
        assert_eq!(Option::<String>::from_sql(&decoded[1]).unwrap(), None);
        assert!(matches!(
            i32::from_sql(&decoded[0]),
            Err(TypeError::UnexpectedNull)
        ));
    }

    #[test]
    fn test_char_is_blank_padded() {
        let vars = vec![XSqlVar::new(SqlType::Text, 5)];
        let decoded = through_wire(&[SqlValue::String("ab".into())], &vars);
        assert_eq!(decoded[0], SqlValue::String("ab   ".into()));
    }

    #[test]
    fn test_octets_stay_binary() {
        let vars = vec![XSqlVar::new(SqlType::Varying, 8).with_sub_type(SUBTYPE_OCTETS)];
        let decoded = through_wire(&[SqlValue::Binary(Bytes::from_static(&[0, 0xff]))], &vars);
        assert_eq!(Vec::<u8>::from_sql(&decoded[0]).unwrap(), vec![0, 0xff]);
    }
}

mod numerics {
    use super::*;

    #[test]
    fn test_numeric_18_4() {
        let vars = vec![XSqlVar::new(SqlType::Int64, 8).with_scale(-4)];
        let value = SqlValue::Decimal("-12345.6789".parse().unwrap());
        let decoded = through_wire(&[value.clone()], &vars);
        assert_eq!(decoded[0], value);
        assert_eq!(
            Decimal::from_sql(&decoded[0]).unwrap().to_string(),
            "-12345.6789"
        );
    }

    #[test]
    fn test_decimal_rescaled_to_column() {
        let vars = vec![XSqlVar::new(SqlType::Long, 4).with_scale(-2)];
        let decoded = through_wire(&[SqlValue::Decimal(Decimal::new(15, 1))], &vars);
        assert_eq!(decoded[0], SqlValue::Decimal(Decimal::new(150, 2)));
    }

    #[test]
    fn test_integer_widening() {
        let vars = vec![XSqlVar::new(SqlType::Short, 2)];
        let decoded = through_wire(&[SqlValue::SmallInt(-2)], &vars);
        assert_eq!(i64::from_sql(&decoded[0]).unwrap(), -2);
        assert_eq!(i32::from_sql(&decoded[0]).unwrap(), -2);
    }
}

mod temporal {
    use super::*;

    #[test]
    fn test_date_time_timestamp() {
        let date = NaiveDate::from_ymd_opt(1996, 12, 31).unwrap();
        let time = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_900).unwrap();
        let vars = vec![
            XSqlVar::new(SqlType::Date, 4),
            XSqlVar::new(SqlType::Time, 4),
            XSqlVar::new(SqlType::Timestamp, 8),
        ];
        let values = vec![
            SqlValue::Date(date),
            SqlValue::Time(time),
            SqlValue::DateTime(date.and_time(time)),
        ];
        assert_eq!(through_wire(&values, &vars), values);
    }

    #[test]
    fn test_date_before_1858() {
        let date = NaiveDate::from_ymd_opt(1700, 2, 28).unwrap();
        let vars = vec![XSqlVar::new(SqlType::Date, 4)];
        let decoded = through_wire(&[SqlValue::Date(date)], &vars);
        assert_eq!(NaiveDate::from_sql(&decoded[0]).unwrap(), date);
    }
}

mod parameters {
    use super::*;

    #[test]
    fn test_params_self_describe() {
        let params: Vec<SqlValue> = vec![
            1i32.to_sql().unwrap(),
            "x".to_sql().unwrap(),
            Option::<i64>::None.to_sql().unwrap(),
        ];
        let message = encode_params(&params).unwrap();
        assert!(!message.blr.is_empty());
        assert_eq!(message.data.len() % 4, 0);
    }

    #[test]
    fn test_empty_params() {
        let message = encode_params(&[]).unwrap();
        assert!(message.data.is_empty());
    }
}
