#![no_main]

use firebird_protocol::info::{parse_continuation, parse_record_counts, parse_statement_info};
use firebird_protocol::{DescribedVars, Section};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = parse_statement_info(data);
    let _ = parse_record_counts(data);

    // A continuation picks up after the first described variable
    let mut described = DescribedVars {
        vars: Vec::new(),
        resume_at: Some(1),
    };
    let _ = parse_continuation(data, Section::Select, &mut described);
});
