#![no_main]

use libfuzzer_sys::fuzz_target;
use glucoflow::loader::parse_export;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must produce either an export or a LoadError, never a panic
    if let Ok(export) = parse_export(data) {
        let _ = glucoflow::summary::analyze(&export, &Default::default());
    }
});
