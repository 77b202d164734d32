//! # odata-entity
//!
//! Entity schemas for OData clients.
//!
//! A schema lists the properties of an entity and registers the box types
//! its fields are replaced with. Records fetched from the API go through
//! [`EntitySchema::replace_values`]; GET parameters go through
//! [`EntitySchema::prepare_params`] to build `$expand`.
//!
//! Schemas are built in code or loaded from TOML:
//!
//! ```rust
//! use odata_entity::{EntityConfig, Expand};
//! use odata_value::Record;
//! use serde_json::json;
//!
//! let schema = EntityConfig::from_str(r#"
//!     endpoint = "Visits"
//!
//!     [[properties]]
//!     key = "IDDOCTOR"
//!     type = "lookup"
//!     expand = "Doctor"
//!     expand_text = "Name"
//!
//!     [types.lookup]
//!     box = "lookup"
//! "#)
//! .unwrap()
//! .into_schema()
//! .unwrap();
//!
//! let mut record = Record::from_json(json!({ "IDDOCTOR": 3, "Doctor": { "Name": "Dr. Grey" } }));
//! schema.replace_values(&mut record);
//! assert_eq!(record.boxed("IDDOCTOR").map(|b| b.to_string()).as_deref(), Some("Dr. Grey"));
//! assert_eq!(
//!     schema.expand_expression(&Expand::All).as_deref(),
//!     Some("Doctor($select=Name)")
//! );
//! ```

pub mod config;
pub mod error;
pub mod schema;

pub use config::{EntityConfig, TypeConfig};
pub use error::{EntityError, EntityResult};
pub use schema::{EntitySchema, Expand, TypeSpec};
