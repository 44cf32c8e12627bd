#![no_main]

use firebird_client::MESSAGES;
use firebird_protocol::StatusVector;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut cursor = data;
    if let Ok(status) = StatusVector::decode(&mut cursor) {
        let _ = status.resolve(&MESSAGES);
    }
});
