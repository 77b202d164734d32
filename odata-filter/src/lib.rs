//! # odata-filter
//!
//! Compiles declarative predicate trees into OData `$filter` text.
//!
//! ## Predicates
//!
//! Trees are built from the [`Predicate`] helpers or read from plain JSON,
//! where every object has a single key naming an [`Operator`]:
//!
//! ```rust
//! use odata_filter::{Predicate, compile, compile_json};
//! use serde_json::json;
//!
//! let tree = Predicate::or([
//!     Predicate::eq("Status", 1),
//!     Predicate::in_list("Kind", [2, 3]),
//! ]);
//! assert_eq!(
//!     compile(&tree).unwrap().as_deref(),
//!     Some("((Status eq 1) or (Kind in (2, 3)))")
//! );
//!
//! let text = compile_json(&json!({ "and": [null, { "eq": [1, 1] }] })).unwrap();
//! assert_eq!(text.as_deref(), Some("((1 eq 1))"));
//! ```
//!
//! Text leaves are emitted verbatim. Wrap string constants in a box to get
//! them quoted:
//!
//! ```rust
//! use odata_filter::{Operator, Predicate, compile};
//! use odata_value::ValueBox;
//!
//! let tree = Predicate::call(
//!     Operator::Contains,
//!     [Predicate::field("Name"), ValueBox::new("I'm a \"hero\"").into()],
//! );
//! assert_eq!(
//!     compile(&tree).unwrap().as_deref(),
//!     Some("contains(Name, 'I''m a \"hero\"')")
//! );
//! ```
//!
//! ## Errors
//!
//! Malformed trees fail with a [`FilterError`]:
//!
//! ```rust
//! use odata_filter::compile_json;
//! use serde_json::json;
//!
//! let err = compile_json(&json!({ "eq": [1] })).unwrap_err();
//! assert!(err.is_arity_error());
//! ```

pub mod compiler;
pub mod error;
pub mod logging;
pub mod operator;
pub mod params;
pub mod predicate;

pub use compiler::{compile, compile_json};
pub use error::{ErrorCode, ErrorContext, FilterError, FilterResult, Suggestion};
pub use operator::{Operator, Shape};
pub use params::{FilterParam, QueryParams};
pub use predicate::{Operation, Predicate, Thunk};
