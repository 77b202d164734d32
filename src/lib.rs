//! # odata-kit
//!
//! Client-side building blocks for OData-style REST APIs.
//!
//! - [`filter`]: compiles predicate trees into `$filter` text
//! - [`value`]: typed value boxes and their `$filter` round trip
//! - [`entity`]: entity schemas that box record fields and build `$expand`
//!
//! ## Quick Start
//!
//! ```rust
//! use odata_kit::prelude::*;
//! use serde_json::json;
//!
//! let params = QueryParams::new()
//!     .filter(Predicate::and([
//!         Predicate::eq("Name", ValueBox::new("O'Hara")),
//!         Predicate::ge("Age", 18),
//!     ]))
//!     .apply_filter()
//!     .unwrap();
//! assert_eq!(
//!     params.pairs().unwrap()[0].1,
//!     r#"((Name eq "O'Hara") and (Age ge 18))"#
//! );
//!
//! let mut record = Record::from_json(json!({ "ACTIVE": true }));
//! BoolBox::replace_in_data(&mut record, &PropertySpec::new("ACTIVE"), BoolOptions::default());
//! assert_eq!(record.boxed("ACTIVE").map(|b| b.to_string()).as_deref(), Some("Sí"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Filter predicates and the `$filter` compiler.
pub mod filter {
    pub use odata_filter::*;
}

/// Typed value boxes.
pub mod value {
    pub use odata_value::*;
}

/// Entity schemas.
pub mod entity {
    pub use odata_entity::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::entity::{EntityConfig, EntitySchema, Expand, TypeSpec};
    pub use crate::filter::{Operator, Predicate, QueryParams, compile, compile_json};
    pub use crate::value::{
        AnyBox, BoolBox, BoolOptions, BoxFamily, BoxOptions, BoxedValue, DateBox, DateOptions,
        LookupBox, LookupOptions, NumberBox, NumberOptions, PropertySpec, Record, Value, ValueBox,
        ValueOptions, equals,
    };
}

// Re-export key types at the crate root
pub use entity::{EntityError, EntitySchema};
pub use filter::{FilterError, Predicate, compile};
pub use value::{AnyBox, ParseError, Value};
