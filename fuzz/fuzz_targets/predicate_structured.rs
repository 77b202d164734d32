//! Fuzz target for compiling arbitrary predicate trees.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_predicate_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use odata_filter::{Operator, Predicate, compile};
use odata_value::ValueBox;

/// A fuzzable predicate node.
#[derive(Debug, Arbitrary)]
enum FuzzPredicate {
    Undefined,
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Quoted(String),
    List(Vec<FuzzPredicate>),
    Op(u8, Box<FuzzPredicate>),
}

impl From<FuzzPredicate> for Predicate {
    fn from(node: FuzzPredicate) -> Self {
        match node {
            FuzzPredicate::Undefined => Predicate::Undefined,
            FuzzPredicate::Null => Predicate::Null,
            FuzzPredicate::Text(s) => Predicate::Text(s),
            FuzzPredicate::Int(i) => Predicate::Int(i),
            FuzzPredicate::Float(f) => Predicate::Float(f),
            FuzzPredicate::Bool(b) => Predicate::Bool(b),
            FuzzPredicate::Quoted(s) => ValueBox::new(s).into(),
            FuzzPredicate::List(items) => Predicate::list(items),
            FuzzPredicate::Op(index, operand) => {
                let operator = Operator::ALL[index as usize % Operator::ALL.len()];
                Predicate::op(operator, Predicate::from(*operand))
            }
        }
    }
}

fuzz_target!(|node: FuzzPredicate| {
    let predicate = Predicate::from(node);
    if let Ok(Some(text)) = compile(&predicate) {
        // Compiling twice gives the same text when there are no thunks
        assert_eq!(compile(&predicate).ok().flatten().as_deref(), Some(text.as_str()));
    }
});
