//! Benchmarks for firebird-client row access and configuration parsing.

#![allow(missing_docs, clippy::unwrap_used)]

use std::hint::black_box;
use std::sync::Arc;

use bytes::Bytes;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use firebird_client::{Column, Config, Row};
use firebird_protocol::{SqlType, XSqlVar};
use firebird_types::SqlValue;

fn bench_dsn_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsn");

    let simple = "localhost/employee";
    group.throughput(Throughput::Bytes(simple.len() as u64));
    group.bench_function("simple", |b| {
        b.iter(|| black_box(Config::from_dsn(black_box(simple))))
    });

    let full = "SYSDBA:masterkey@db.example.com:3051//var/lib/firebird/data/employee.fdb";
    group.throughput(Throughput::Bytes(full.len() as u64));
    group.bench_function("full", |b| {
        b.iter(|| black_box(Config::from_dsn(black_box(full))))
    });

    group.finish();
}

fn vars() -> Vec<XSqlVar> {
    vec![
        XSqlVar::new(SqlType::Long, 4).with_alias("ID"),
        XSqlVar::new(SqlType::Varying, 64).with_alias("NAME"),
        XSqlVar::new(SqlType::Int64, 8)
            .with_scale(-2)
            .with_alias("BALANCE"),
        XSqlVar::new(SqlType::Timestamp, 8).with_alias("CREATED"),
    ]
}

fn raw_row() -> Vec<Option<Bytes>> {
    let mut ts = 58_849i32.to_be_bytes().to_vec();
    ts.extend_from_slice(&360_000_000u32.to_be_bytes());
    vec![
        Some(Bytes::copy_from_slice(&7i32.to_be_bytes())),
        Some(Bytes::from_static(b"Ada Lovelace")),
        Some(Bytes::copy_from_slice(&123_456i64.to_be_bytes())),
        Some(Bytes::from(ts)),
    ]
}

fn columns(vars: &[XSqlVar]) -> Arc<[Column]> {
    vars.iter()
        .enumerate()
        .map(|(i, v)| Column::from_var(i, v))
        .collect()
}

fn bench_row_decode(c: &mut Criterion) {
    let vars = vars();
    let columns = columns(&vars);
    let raw = raw_row();

    c.bench_function("row/decode", |b| {
        b.iter(|| {
            let row = Row::decode(black_box(&raw), &vars, Arc::clone(&columns)).unwrap();
            black_box(row)
        })
    });
}

fn bench_row_access(c: &mut Criterion) {
    let vars = vars();
    let row = Row::decode(&raw_row(), &vars, columns(&vars)).unwrap();

    let mut group = c.benchmark_group("row_access");
    group.bench_function("get_by_index", |b| {
        b.iter(|| black_box(row.get::<i32>(black_box(0)).unwrap()))
    });
    group.bench_function("get_by_name", |b| {
        b.iter(|| black_box(row.get_by_name::<String>(black_box("name")).unwrap()))
    });
    group.bench_function("get_raw", |b| {
        b.iter(|| black_box(row.get_raw(black_box(2)).map(SqlValue::is_null)))
    });
    group.finish();
}

criterion_group!(benches, bench_dsn_parsing, bench_row_decode, bench_row_access);
criterion_main!(benches);
