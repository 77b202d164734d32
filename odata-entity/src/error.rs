//! Error types for entity schemas and their configuration.

// The fields are read by the derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;

/// Errors that can occur while loading an entity schema.
#[derive(Error, Debug, Diagnostic)]
pub enum EntityError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(odata::entity::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(odata::entity::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// A property refers to a type that is not declared.
    #[error("unknown type `{type_name}` for property `{property}`")]
    #[diagnostic(
        code(odata::entity::unknown_type),
        help("declare it under [types.{type_name}]")
    )]
    UnknownType { property: String, type_name: String },

    /// A property key is declared twice.
    #[error("duplicate property `{key}`")]
    #[diagnostic(code(odata::entity::duplicate_property))]
    DuplicateProperty { key: String },
}

impl EntityError {
    /// Create an unknown type error.
    pub fn unknown_type(property: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnknownType {
            property: property.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a duplicate property error.
    pub fn duplicate_property(key: impl Into<String>) -> Self {
        Self::DuplicateProperty { key: key.into() }
    }
}
