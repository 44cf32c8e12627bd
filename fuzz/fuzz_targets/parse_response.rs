#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use firebird_protocol::{Expect, Response, SqlType, XSqlVar};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzExpect {
    Accept,
    Generic,
    SqlResponse,
    Fetch,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    expect: FuzzExpect,
    data: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let vars: Arc<[XSqlVar]> = Arc::from(vec![
        XSqlVar::new(SqlType::Long, 4),
        XSqlVar::new(SqlType::Varying, 16),
        XSqlVar::new(SqlType::Blob, 8),
    ]);
    let expect = match input.expect {
        FuzzExpect::Accept => Expect::Accept,
        FuzzExpect::Generic => Expect::Generic,
        FuzzExpect::SqlResponse => Expect::SqlResponse(vars),
        FuzzExpect::Fetch => Expect::Fetch(vars),
    };

    // Decode frames until the input runs out or stops making sense
    let mut cursor = &input.data[..];
    while !cursor.is_empty() {
        if Response::decode(&mut cursor, &expect).is_err() {
            break;
        }
    }
});
