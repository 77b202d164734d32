//! Fuzz target for compiling predicates read from JSON.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_predicate_json
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        // Malformed trees must fail with an error, never panic
        let _ = odata_filter::compile_json(&json);
    }
});
