//! The base box: a raw value plus optional converters.

use crate::boxed::{AnyBox, BoxFamily, BoxedValue};
use crate::convert::{ConverterOverrides, Converters, Override, impl_box_options};
use crate::value::Value;
use std::fmt;

/// A raw value with optional conversion behavior.
///
/// ```
/// use odata_value::{BoxOptions, BoxedValue, ValueBox, ValueOptions};
///
/// let name = ValueBox::with_options(
///     "Ada",
///     ValueOptions::default().formatify(|_, v| format!("<{}>", v)),
/// );
/// assert_eq!(name.to_string(), "<Ada>");
/// assert_eq!(name.to_filter(), "'Ada'");
/// ```
#[derive(Debug, Clone)]
pub struct ValueBox {
    /// The wrapped value.
    pub value: Value,
    /// Opaque type tag.
    pub kind: Option<String>,
    /// Attached converters.
    pub converters: Converters<ValueBox, Value>,
}

/// Options for building a [`ValueBox`].
#[derive(Debug, Clone, Default)]
pub struct ValueOptions {
    /// Type tag slot.
    pub kind: Override<String>,
    /// Converter overrides.
    pub converters: ConverterOverrides<ValueBox, Value>,
}

impl_box_options!(ValueOptions => ValueBox, Value);

impl ValueBox {
    /// Wrap a value with no converters.
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_options(value, ValueOptions::default())
    }

    /// Wrap a value with the given options.
    pub fn with_options(value: impl Into<Value>, options: ValueOptions) -> Self {
        Self::from_seed(value.into(), options)
    }

    /// The wrapped value.
    pub fn value_of(&self) -> &Value {
        &self.value
    }

    /// Interpret text with the box's parser, or keep it as text when the
    /// box has none.
    pub fn parse(&self, text: &str) -> Value {
        match &self.converters.parse {
            Some(parse) => parse(self, text),
            None => Value::String(text.to_string()),
        }
    }
}

impl BoxedValue for ValueBox {
    fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    fn raw(&self) -> Value {
        self.value.clone()
    }

    fn to_html(&self) -> Option<String> {
        self.converters.html(self, &self.value)
    }
}

impl BoxFamily for ValueBox {
    type Options = ValueOptions;

    fn from_seed(seed: Value, options: ValueOptions) -> Self {
        Self {
            value: seed,
            kind: options.kind.resolve(None),
            converters: options.converters.apply(Converters::none()),
        }
    }

    fn from_box(source: &Self, options: ValueOptions) -> Self {
        Self {
            value: source.value.clone(),
            kind: options.kind.resolve(source.kind.clone()),
            converters: options.converters.apply(source.converters.clone()),
        }
    }

    fn from_any(any: &AnyBox) -> Option<&Self> {
        match any {
            AnyBox::Value(b) => Some(b),
            _ => None,
        }
    }

    fn into_any(self) -> AnyBox {
        AnyBox::Value(self)
    }
}

impl fmt::Display for ValueBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.converters.display(self, &self.value) {
            Some(text) => f.write_str(&text),
            None => write!(f, "{}", self.value),
        }
    }
}

impl PartialEq for ValueBox {
    fn eq(&self, other: &Self) -> bool {
        self.value.strict_eq(&other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::BoxOptions;
    use crate::record::{PropertySpec, Record};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_value_box_holds_value_and_kind() {
        let b = ValueBox::with_options("hello", ValueOptions::default().kind("text"));
        assert_eq!(b.value, Value::from("hello"));
        assert_eq!(b.kind(), Some("text"));
    }

    #[test]
    fn test_value_box_kind_does_not_affect_equality() {
        let a = ValueBox::with_options(123, ValueOptions::default().kind("number"));
        let b = ValueBox::with_options(123, ValueOptions::default().kind("integer"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_value_box_conversions() {
        let b = ValueBox::new("Hello World!");
        assert_eq!(b.to_string(), "Hello World!");
        assert_eq!(b.to_json(), json!("Hello World!"));
        assert_eq!(b.to_filter(), "'Hello World!'");
        assert_eq!(b.to_html(), None);

        let null = ValueBox::new(Value::Null);
        assert_eq!(null.to_string(), "");
        assert_eq!(null.to_filter(), "null");
    }

    #[test]
    fn test_value_box_date_conversions() {
        let date = Utc.with_ymd_and_hms(2021, 5, 14, 10, 0, 0).unwrap();
        let b = ValueBox::new(date);
        assert_eq!(b.to_json(), json!("2021-05-14T10:00:00.000Z"));
        assert_eq!(b.to_filter(), "date(2021-05-14T10:00:00.000Z)");
    }

    #[test]
    fn test_display_prefers_formatify_then_stringify() {
        let mut b = ValueBox::with_options(
            "x",
            ValueOptions::default()
                .stringify(|_, v| format!("{} (s)", v))
                .formatify(|_, v| format!("{} (f)", v))
                .htmlify(|_, v| format!("<b>{}</b>", v)),
        );
        assert_eq!(b.to_string(), "x (f)");
        assert_eq!(b.to_html().as_deref(), Some("<b>x</b>"));

        b.converters.formatify = None;
        assert_eq!(b.to_string(), "x (s)");

        b.converters.stringify = None;
        assert_eq!(b.to_string(), "x");
    }

    #[test]
    fn test_parse_without_parser_passes_text_through() {
        let b = ValueBox::new(Value::Null);
        assert_eq!(b.parse("abc"), Value::from("abc"));

        let counted = ValueBox::with_options(
            Value::Null,
            ValueOptions::default().parse(|_, t| Value::Int(t.len() as i64)),
        );
        assert_eq!(counted.parse("abc"), Value::Int(3));
    }

    #[test]
    fn test_clone_copies_value_and_converters() {
        let primitive = ValueBox::with_options(
            123456,
            ValueOptions::default().formatify(|_, v| format!("data -> {}", v)),
        );
        let clone = ValueBox::from_box(&primitive, ValueOptions::default());
        assert_eq!(clone.value, Value::Int(123456));
        assert_eq!(clone.to_string(), "data -> 123456");

        let altered = ValueBox::from_box(
            &primitive,
            ValueOptions::default().formatify(|_, v| format!("data ({})", v)),
        );
        assert_eq!(altered.to_string(), "data (123456)");

        let cleared = ValueBox::from_box(&primitive, ValueOptions::default().clear_formatify());
        assert_eq!(cleared.to_string(), "123456");
    }

    #[test]
    fn test_from_filter_strings() {
        let b = ValueBox::from_filter("'I''m a \"hero\"'", ValueOptions::default());
        assert_eq!(b.value, Value::from("I'm a \"hero\""));
        assert_eq!(b.to_filter(), "'I''m a \"hero\"'");

        let b = ValueBox::from_filter("\"I'm a hero!\"", ValueOptions::default());
        assert_eq!(b.to_filter(), "\"I'm a hero!\"");
    }

    #[test]
    fn test_from_filter_round_trip() {
        let date = Utc.with_ymd_and_hms(2021, 4, 30, 22, 0, 0).unwrap();
        let samples = [
            ValueBox::new("Hello World!"),
            ValueBox::new(42),
            ValueBox::new(1.5),
            ValueBox::new(true),
            ValueBox::new(date),
        ];
        for sample in samples {
            let text = sample.to_filter();
            let back = ValueBox::from_filter(&text, ValueOptions::default());
            assert_eq!(back.to_filter(), text);
        }
    }

    #[test]
    fn test_from_filter_null_reads_as_text() {
        assert_eq!(ValueBox::new(Value::Null).to_filter(), "null");
        let back = ValueBox::from_filter("null", ValueOptions::default());
        assert_eq!(back.value, Value::from("null"));
        assert_eq!(back.to_filter(), "'null'");
    }

    #[test]
    fn test_replace_in_data() {
        let mut record = Record::from_json(json!({ "a": 1, "b": 2, "c": 3 }));
        let spec = PropertySpec::new("b");

        ValueBox::replace_in_data(&mut record, &spec, ValueOptions::default());
        let replaced = record.boxed("b").expect("b is boxed");
        assert_eq!(replaced.raw(), Value::Int(2));

        ValueBox::replace_in_data(
            &mut record,
            &PropertySpec::new("a"),
            ValueOptions::default().formatify(|_, v| format!("--> {} <--", v)),
        );
        assert_eq!(record.boxed("a").map(|b| b.to_string()).as_deref(), Some("--> 1 <--"));
    }

    #[test]
    fn test_replace_in_data_missing_key_gives_null() {
        let mut record = Record::new();
        ValueBox::replace_in_data(&mut record, &PropertySpec::new("x"), ValueOptions::default());
        assert_eq!(record.boxed("x").map(|b| b.raw()), Some(Value::Null));
    }
}
