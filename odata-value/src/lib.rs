//! # odata-value
//!
//! Typed value boxes for OData records.
//!
//! A box pairs a raw value with conversion behavior:
//! - `Display` renders it for people (`formatify`, then `stringify`)
//! - [`BoxedValue::to_json`] renders it for the API
//! - [`BoxedValue::to_filter`] renders it as a `$filter` literal
//! - [`BoxFamily::from_filter`] reads a `$filter` literal back
//!
//! ## Boxes
//!
//! ```rust
//! use odata_value::{BoxFamily, BoxedValue, NumberBox, NumberOptions};
//!
//! let price = NumberBox::with_options(
//!     1234.5,
//!     NumberOptions::default().use_grouping(true).fraction_digits(2),
//! );
//! assert_eq!(price.to_string(), "1.234,50");
//! assert_eq!(price.to_filter(), "1234.5");
//!
//! let back = NumberBox::from_filter(&price.to_filter(), NumberOptions::default());
//! assert_eq!(back, price);
//! ```
//!
//! ## Records
//!
//! Records returned by the API are replaced field by field:
//!
//! ```rust
//! use odata_value::{BoolBox, BoolOptions, BoxFamily, PropertySpec, Record};
//! use serde_json::json;
//!
//! let mut record = Record::from_json(json!({ "ACTIVE": 1 }));
//! BoolBox::replace_in_data(&mut record, &PropertySpec::new("ACTIVE"), BoolOptions::default());
//!
//! assert_eq!(record.boxed("ACTIVE").map(|b| b.to_string()).as_deref(), Some("Sí"));
//! assert_eq!(record.to_json(), json!({ "ACTIVE": true }));
//! ```

pub mod boolean;
pub mod boxed;
pub mod convert;
pub mod date;
pub mod equals;
pub mod error;
pub mod lookup;
pub mod number;
pub mod record;
pub mod value;
pub mod value_box;

pub use boolean::{BoolBox, BoolOptions, parse_bool};
pub use boxed::{AnyBox, BoxFamily, BoxedValue, parse_filter_literal};
pub use convert::{BoxOptions, ConverterOverrides, Converters, Format, Override, Parse};
pub use date::{DateBox, DateOptions, parse_date};
pub use equals::equals;
pub use error::{ParseError, ParseResult};
pub use lookup::{LookupBox, LookupOptions};
pub use number::{NumberBox, NumberOptions, format_localized, parse_number};
pub use record::{Field, LookupOption, PropertySpec, Record};
pub use value::Value;
pub use value_box::{ValueBox, ValueOptions};
