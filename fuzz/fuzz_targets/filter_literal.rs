//! Fuzz target for the `$filter` literal round trip of value boxes.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_filter_literal
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use odata_value::{BoxFamily, BoxedValue, Value, ValueBox, ValueOptions};

fuzz_target!(|text: String| {
    // Any string survives quoting and unquoting
    let boxed = ValueBox::new(text.as_str());
    let literal = boxed.to_filter();
    let back = ValueBox::from_filter(&literal, ValueOptions::default());
    assert_eq!(back.value_of(), &Value::from(text.as_str()));
    assert_eq!(back.to_filter(), literal);

    // Arbitrary literals never panic
    let _ = ValueBox::from_filter(&text, ValueOptions::default()).to_filter();
});
