//! Benchmarks for Firebird value encoding and decoding.

#![allow(clippy::unwrap_used, missing_docs)]

use bytes::Bytes;
use chrono::NaiveDate;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use firebird_protocol::{SqlType, XSqlVar};
use firebird_types::datetime::{decode_date, encode_date};
use firebird_types::{FromSql, SqlValue, decode_value, encode_params, encode_row};
use rust_decimal::Decimal;
use std::hint::black_box;

fn sample_row() -> (Vec<SqlValue>, Vec<XSqlVar>) {
    let vars = vec![
        XSqlVar::new(SqlType::Long, 4),
        XSqlVar::new(SqlType::Varying, 64),
        XSqlVar::new(SqlType::Int64, 8).with_scale(-2),
        XSqlVar::new(SqlType::Timestamp, 8),
    ];
    let values = vec![
        SqlValue::Int(42),
        SqlValue::String("a typical varchar column value".into()),
        SqlValue::Decimal(Decimal::new(1_234_567, 2)),
        SqlValue::DateTime(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        ),
    ];
    (values, vars)
}

/// Benchmark packing a row message.
fn bench_encode(c: &mut Criterion) {
    let (values, vars) = sample_row();
    let mut group = c.benchmark_group("encode");

    group.bench_function("row", |b| {
        b.iter(|| encode_row(black_box(&values), black_box(&vars)).unwrap())
    });

    group.bench_function("params", |b| {
        b.iter(|| encode_params(black_box(&values)).unwrap())
    });

    group.finish();
}

/// Benchmark decoding individual column values.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let text = XSqlVar::new(SqlType::Varying, 256);
    let raw = Bytes::from("x".repeat(200));
    group.throughput(Throughput::Bytes(raw.len() as u64));
    group.bench_function("varchar", |b| {
        b.iter(|| decode_value(black_box(&raw), &text).unwrap())
    });

    let numeric = XSqlVar::new(SqlType::Int64, 8).with_scale(-4);
    let raw = Bytes::copy_from_slice(&123_456_789i64.to_be_bytes());
    group.bench_function("numeric", |b| {
        b.iter(|| decode_value(black_box(&raw), &numeric).unwrap())
    });

    group.finish();
}

/// Benchmark calendar conversions.
fn bench_dates(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    c.bench_function("date_encode", |b| {
        b.iter(|| encode_date(black_box(date)).unwrap())
    });
    c.bench_function("date_decode", |b| {
        b.iter(|| decode_date(black_box(60_462)).unwrap())
    });
}

/// Benchmark value extraction.
fn bench_from_sql(c: &mut Criterion) {
    let value = SqlValue::Decimal(Decimal::new(12345, 2));
    c.bench_function("from_sql_decimal", |b| {
        b.iter(|| Decimal::from_sql(black_box(&value)).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_dates, bench_from_sql);
criterion_main!(benches);
