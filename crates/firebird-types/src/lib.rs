//! # firebird-types
//!
//! Firebird to Rust type mappings and conversions.
//!
//! This crate converts between the raw column bytes carried by Firebird row
//! messages and Rust values, and builds the BLR-described messages used to
//! send statement parameters.
//!
//! ## Type Mappings
//!
//! | Firebird Type | Rust Type |
//! |---------------|-----------|
//! | `BOOLEAN` | `bool` |
//! | `SMALLINT` | `i16` |
//! | `INTEGER` | `i32` |
//! | `BIGINT` | `i64` |
//! | `FLOAT` | `f32` |
//! | `DOUBLE PRECISION` | `f64` |
//! | `NUMERIC`/`DECIMAL` (scale != 0) | `rust_decimal::Decimal` |
//! | `CHAR`/`VARCHAR` | `String` |
//! | `CHAR`/`VARCHAR` (`OCTETS`) | `bytes::Bytes` |
//! | `DATE` | `chrono::NaiveDate` |
//! | `TIME` | `chrono::NaiveTime` |
//! | `TIMESTAMP` | `chrono::NaiveDateTime` |
//! | `BLOB` | `BlobId`, or the loaded contents |
//!
//! Scaled integers are always returned as exact decimals, never as floats.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod datetime;
pub mod decfloat;
pub mod decode;
pub mod encode;
pub mod error;
pub mod from_sql;
pub mod to_sql;
pub mod value;

pub use decode::{decode_nullable, decode_value};
pub use encode::{encode_column, encode_message, encode_params, encode_row, param_descriptor, EncodedMessage};
pub use error::TypeError;
pub use from_sql::FromSql;
pub use to_sql::ToSql;
pub use value::SqlValue;
