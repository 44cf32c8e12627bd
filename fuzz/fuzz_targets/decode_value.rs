#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use firebird_protocol::{SqlType, XSqlVar};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    sql_type: i32,
    scale: i8,
    sub_type: i8,
    length: u16,
    data: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let Ok(sql_type) = SqlType::from_code(input.sql_type) else {
        return;
    };
    let var = XSqlVar::new(sql_type, i32::from(input.length))
        .with_scale(i32::from(input.scale))
        .with_sub_type(i32::from(input.sub_type));

    let raw = Bytes::from(input.data);
    let _ = firebird_types::decode_value(&raw, &var);
});
