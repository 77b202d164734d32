//! Entity definitions loaded from TOML.
//!
//! ```toml
//! endpoint = "${API_ROOT}/Doctors"
//!
//! [[properties]]
//! key = "ACTIVE"
//! type = "flag"
//!
//! [[properties]]
//! key = "IDSPECIALTY"
//! type = "lookup"
//! expand = "Specialty"
//! expand_text = "Name"
//!
//! [types.flag]
//! box = "bool"
//! to_json_as_int = true
//!
//! [types.lookup]
//! box = "lookup"
//! ```
//!
//! `${VAR}` references are replaced with environment variables before
//! parsing.

use crate::error::{EntityError, EntityResult};
use crate::schema::{EntitySchema, TypeSpec};
use indexmap::IndexMap;
use odata_value::{
    BoolOptions, BoxOptions, DateOptions, LookupOptions, NumberOptions, PropertySpec, ValueOptions,
};
use regex_lite::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

/// Declarative settings of a registered box type, tagged by `box`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "box", rename_all = "lowercase")]
pub enum TypeConfig {
    /// A plain value box.
    Value {
        /// Type tag; defaults to the type's name.
        kind: Option<String>,
    },
    /// A boolean box.
    Bool {
        /// Type tag; defaults to the type's name.
        kind: Option<String>,
        /// Serialize as 0/1 instead of false/true.
        to_json_as_int: Option<bool>,
    },
    /// A date box.
    Date {
        /// Type tag; defaults to the type's name.
        kind: Option<String>,
        /// Show and parse the time of day.
        has_time: Option<bool>,
    },
    /// A number box.
    Number {
        /// Type tag; defaults to the type's name.
        kind: Option<String>,
        /// Group thousands when formatting.
        use_grouping: Option<bool>,
        /// Exact number of fraction digits.
        fraction_digits: Option<u32>,
        /// Minimum number of integer digits.
        minimum_integer_digits: Option<u32>,
    },
    /// A lookup box.
    Lookup {
        /// Type tag; defaults to the type's name.
        kind: Option<String>,
    },
}

impl TypeConfig {
    /// Build the type spec registered under `name`.
    pub fn to_spec(&self, name: &str) -> TypeSpec {
        match self {
            Self::Value { kind } => {
                TypeSpec::Value(ValueOptions::default().kind(kind.as_deref().unwrap_or(name)))
            }
            Self::Bool {
                kind,
                to_json_as_int,
            } => {
                let mut options = BoolOptions::default().kind(kind.as_deref().unwrap_or(name));
                if let Some(as_int) = *to_json_as_int {
                    options = options.to_json_as_int(as_int);
                }
                TypeSpec::Bool(options)
            }
            Self::Date { kind, has_time } => {
                let mut options = DateOptions::default().kind(kind.as_deref().unwrap_or(name));
                if let Some(has_time) = *has_time {
                    options = options.has_time(has_time);
                }
                TypeSpec::Date(options)
            }
            Self::Number {
                kind,
                use_grouping,
                fraction_digits,
                minimum_integer_digits,
            } => {
                let mut options = NumberOptions::default().kind(kind.as_deref().unwrap_or(name));
                if let Some(grouping) = *use_grouping {
                    options = options.use_grouping(grouping);
                }
                if let Some(digits) = *fraction_digits {
                    options = options.fraction_digits(digits);
                }
                if let Some(digits) = *minimum_integer_digits {
                    options = options.minimum_integer_digits(digits);
                }
                TypeSpec::Number(options)
            }
            Self::Lookup { kind } => {
                TypeSpec::Lookup(LookupOptions::default().kind(kind.as_deref().unwrap_or(name)))
            }
        }
    }
}

/// An entity definition file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityConfig {
    /// Path of the entity set.
    pub endpoint: String,

    /// Property definitions.
    #[serde(default)]
    pub properties: Vec<PropertySpec>,

    /// Box types by name.
    #[serde(default)]
    pub types: IndexMap<String, TypeConfig>,
}

impl EntityConfig {
    /// Load a definition from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> EntityResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EntityError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse a definition from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> EntityResult<Self> {
        let expanded = expand_env_vars(content);
        toml::from_str(&expanded).map_err(|e| EntityError::TomlError { source: e })
    }

    /// Check the definition and build the schema.
    ///
    /// Fails on a repeated property key or a property whose type is not
    /// declared.
    pub fn into_schema(self) -> EntityResult<EntitySchema> {
        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.key.as_str()) {
                return Err(EntityError::duplicate_property(&property.key));
            }
            if let Some(kind) = &property.kind {
                if !self.types.contains_key(kind) {
                    return Err(EntityError::unknown_type(&property.key, kind));
                }
            }
        }

        let types = self
            .types
            .iter()
            .map(|(name, config)| (name.clone(), config.to_spec(name)))
            .collect();
        debug!(endpoint = %self.endpoint, properties = self.properties.len(), "EntityConfig::into_schema()");

        Ok(EntitySchema {
            endpoint: self.endpoint,
            properties: self.properties,
            types,
        })
    }
}

/// Replace `${VAR}` with the value of the environment variable, leaving
/// unset variables untouched.
fn expand_env_vars(content: &str) -> String {
    ENV_VAR
        .replace_all(content, |caps: &regex_lite::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
