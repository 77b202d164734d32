//! Boolean boxes rendered as `Sí`/`No`.

use crate::boxed::{AnyBox, BoxFamily, BoxedValue};
use crate::convert::{ConverterOverrides, Converters, Override, impl_box_options};
use crate::error::{ParseError, ParseResult};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Interpret a boolean word.
///
/// Leading and trailing whitespace is ignored and matching is
/// case-insensitive: `true`, `1`, `si` and `sí` are true; `false`, `0` and
/// `no` are false.
pub fn parse_bool(text: &str) -> ParseResult<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "1" | "si" | "sí" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ParseError::InvalidBool {
            input: text.to_string(),
        }),
    }
}

fn default_stringify(_: &BoolBox, value: &Option<bool>) -> String {
    match value {
        Some(true) => "Sí".to_string(),
        Some(false) => "No".to_string(),
        None => String::new(),
    }
}

fn default_parse(_: &BoolBox, text: &str) -> Option<bool> {
    if text.trim().is_empty() {
        return None;
    }
    parse_bool(text)
        .inspect_err(|e| warn!(error = %e, "bool parse failed, using null"))
        .ok()
}

fn defaults() -> Converters<BoolBox, Option<bool>> {
    Converters {
        stringify: Some(Arc::new(default_stringify)),
        parse: Some(Arc::new(default_parse)),
        formatify: None,
        htmlify: None,
    }
}

/// A nullable boolean.
#[derive(Debug, Clone)]
pub struct BoolBox {
    /// The wrapped value; `None` is null.
    pub value: Option<bool>,
    /// Opaque type tag.
    pub kind: Option<String>,
    /// Serialize as `1`/`0` instead of `true`/`false`.
    pub to_json_as_int: bool,
    /// Attached converters.
    pub converters: Converters<BoolBox, Option<bool>>,
}

/// Options for building a [`BoolBox`].
#[derive(Debug, Clone, Default)]
pub struct BoolOptions {
    /// Type tag slot.
    pub kind: Override<String>,
    /// Serialize as `1`/`0`; `None` inherits (false for new boxes).
    pub to_json_as_int: Option<bool>,
    /// Converter overrides.
    pub converters: ConverterOverrides<BoolBox, Option<bool>>,
}

impl_box_options!(BoolOptions => BoolBox, Option<bool>);

impl BoolOptions {
    /// Serialize as `1`/`0` instead of `true`/`false`.
    pub fn to_json_as_int(mut self, as_int: bool) -> Self {
        self.to_json_as_int = Some(as_int);
        self
    }
}

impl BoolBox {
    /// Wrap a boolean with the default converters.
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_options(value, BoolOptions::default())
    }

    /// Wrap a value with the given options. Non-null values are coerced by
    /// truthiness.
    pub fn with_options(value: impl Into<Value>, options: BoolOptions) -> Self {
        Self::from_seed(value.into(), options)
    }

    /// The wrapped value.
    pub fn value_of(&self) -> Option<bool> {
        self.value
    }

    /// Interpret text with the box's parser; `None` when it has none.
    pub fn parse(&self, text: &str) -> Option<bool> {
        self.converters.parse.as_ref().and_then(|parse| parse(self, text))
    }
}

impl BoxedValue for BoolBox {
    fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    fn raw(&self) -> Value {
        self.value.into()
    }

    fn to_json(&self) -> serde_json::Value {
        match self.value {
            None => serde_json::Value::Null,
            Some(b) if self.to_json_as_int => serde_json::Value::from(i32::from(b)),
            Some(b) => serde_json::Value::Bool(b),
        }
    }

    fn to_filter(&self) -> String {
        match self.value {
            None => "null".to_string(),
            Some(b) if self.to_json_as_int => i32::from(b).to_string(),
            Some(b) => b.to_string(),
        }
    }

    fn to_html(&self) -> Option<String> {
        self.converters.html(self, &self.value)
    }
}

impl BoxFamily for BoolBox {
    type Options = BoolOptions;

    fn from_seed(seed: Value, options: BoolOptions) -> Self {
        let value = if seed.is_null() {
            None
        } else {
            Some(seed.is_truthy())
        };
        Self {
            value,
            kind: options.kind.resolve(None),
            to_json_as_int: options.to_json_as_int.unwrap_or(false),
            converters: options.converters.apply(defaults()),
        }
    }

    fn from_box(source: &Self, options: BoolOptions) -> Self {
        Self {
            value: source.value,
            kind: options.kind.resolve(source.kind.clone()),
            to_json_as_int: options.to_json_as_int.unwrap_or(source.to_json_as_int),
            converters: options.converters.apply(source.converters.clone()),
        }
    }

    fn from_any(any: &AnyBox) -> Option<&Self> {
        match any {
            AnyBox::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn into_any(self) -> AnyBox {
        AnyBox::Bool(self)
    }
}

impl fmt::Display for BoolBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.converters.display(self, &self.value) {
            Some(text) => f.write_str(&text),
            None => match self.value {
                Some(b) => write!(f, "{}", b),
                None => Ok(()),
            },
        }
    }
}

impl PartialEq for BoolBox {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::BoxOptions;
    use crate::record::{PropertySpec, Record};
    use serde_json::json;

    #[test]
    fn test_parse_bool_table() {
        for word in ["true", "1", "si", "sí", "Sí", " TRUE ", "SI"] {
            assert_eq!(parse_bool(word), Ok(true), "{word}");
        }
        for word in ["false", "0", "no", "No", " FALSE"] {
            assert_eq!(parse_bool(word), Ok(false), "{word}");
        }
        assert!(matches!(parse_bool("maybe"), Err(ParseError::InvalidBool { .. })));
    }

    #[test]
    fn test_default_parse_degrades_to_null() {
        let b = BoolBox::new(true);
        assert_eq!(b.parse("si"), Some(true));
        assert_eq!(b.parse("0"), Some(false));
        assert_eq!(b.parse("yes"), None);
        assert_eq!(b.parse(""), None);
    }

    #[test]
    fn test_seed_truthiness() {
        assert_eq!(BoolBox::new(Value::Null).value, None);
        assert_eq!(BoolBox::new(0).value, Some(false));
        assert_eq!(BoolBox::new("").value, Some(false));
        assert_eq!(BoolBox::new("0").value, Some(true));
        assert_eq!(BoolBox::new(f64::NAN).value, Some(false));
        assert_eq!(BoolBox::new(2).value, Some(true));
    }

    #[test]
    fn test_default_text() {
        assert_eq!(BoolBox::new(true).to_string(), "Sí");
        assert_eq!(BoolBox::new(false).to_string(), "No");
        assert_eq!(BoolBox::new(Value::Null).to_string(), "");
    }

    #[test]
    fn test_json_and_filter() {
        let b = BoolBox::new(true);
        assert_eq!(b.to_json(), json!(true));
        assert_eq!(b.to_filter(), "true");

        let as_int = BoolBox::with_options(false, BoolOptions::default().to_json_as_int(true));
        assert_eq!(as_int.to_json(), json!(0));
        assert_eq!(as_int.to_filter(), "0");

        let null = BoolBox::new(Value::Null);
        assert_eq!(null.to_json(), json!(null));
        assert_eq!(null.to_filter(), "null");
    }

    #[test]
    fn test_serialize_uses_to_json() {
        let b = BoolBox::with_options(true, BoolOptions::default().to_json_as_int(true));
        assert_eq!(serde_json::to_string(&b).unwrap(), "1");
    }

    #[test]
    fn test_clone_keeps_settings() {
        let source = BoolBox::with_options(
            true,
            BoolOptions::default()
                .to_json_as_int(true)
                .formatify(|_, v| format!("{:?}", v)),
        );
        let clone = BoolBox::from_box(&source, BoolOptions::default());
        assert!(clone.to_json_as_int);
        assert_eq!(clone.to_string(), "Some(true)");

        let overridden = BoolBox::from_box(&source, BoolOptions::default().to_json_as_int(false));
        assert_eq!(overridden.to_filter(), "true");
    }

    #[test]
    fn test_cleared_stringify_uses_native_text() {
        let b = BoolBox::with_options(true, BoolOptions::default().clear_stringify());
        assert_eq!(b.to_string(), "true");
    }

    #[test]
    fn test_from_filter() {
        let b = BoolBox::from_filter("false", BoolOptions::default());
        assert_eq!(b.value, Some(false));
        let b = BoolBox::from_filter("null", BoolOptions::default());
        // `null` is not a recognized literal and stays as (truthy) text.
        assert_eq!(b.value, Some(true));
    }

    #[test]
    fn test_replace_in_data_reuses_bool_box() {
        let mut record = Record::from_json(json!({ "active": 1 }));
        let spec = PropertySpec::new("active");
        BoolBox::replace_in_data(&mut record, &spec, BoolOptions::default().to_json_as_int(true));
        BoolBox::replace_in_data(&mut record, &spec, BoolOptions::default());

        assert_eq!(record.to_json(), json!({ "active": 1 }));
    }
}
