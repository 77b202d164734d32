//! Fuzz target for the entity definition parser.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_entity_config
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use odata_entity::EntityConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // The parser should never panic, only return errors
        if let Ok(config) = EntityConfig::from_str(input) {
            let _ = config.into_schema();
        }
    }
});
