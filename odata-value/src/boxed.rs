//! The box capability traits and the tagged union over all box kinds.

use crate::boolean::BoolBox;
use crate::date::DateBox;
use crate::lookup::LookupBox;
use crate::number::NumberBox;
use crate::record::{Field, PropertySpec, Record};
use crate::value::{Value, coerce_number, number_value};
use crate::value_box::ValueBox;
use chrono::{DateTime, Utc};
use regex_lite::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

static DATE_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^date\((\d+-\d+-\d+T\d+:\d+:\d+\.\d+Z)\)$").expect("valid date literal pattern")
});

/// Conversions every box supports.
///
/// `Display` renders the box for people: `formatify` first, then
/// `stringify`, then the value's own text.
pub trait BoxedValue: fmt::Display {
    /// The opaque type tag, if any.
    fn kind(&self) -> Option<&str>;

    /// The wrapped value as a raw [`Value`].
    fn raw(&self) -> Value;

    /// JSON representation of the wrapped value.
    fn to_json(&self) -> serde_json::Value {
        self.raw().to_json()
    }

    /// Literal of the filter grammar for the wrapped value.
    fn to_filter(&self) -> String {
        self.raw().to_filter()
    }

    /// HTML rendering, when the box has an `htmlify` converter.
    fn to_html(&self) -> Option<String>;
}

/// Construction contract shared by every concrete box type.
pub trait BoxFamily: BoxedValue + Clone + Sized {
    /// Options accepted when building a box of this family.
    type Options: Default;

    /// Build a box from a raw value, merging the family defaults with
    /// `options` (options win).
    fn from_seed(seed: Value, options: Self::Options) -> Self;

    /// Build a box from another box of the same family, copying its value,
    /// settings and converters unless `options` overrides them.
    fn from_box(source: &Self, options: Self::Options) -> Self;

    /// Borrow the box if `any` holds this family.
    fn from_any(any: &AnyBox) -> Option<&Self>;

    /// Wrap the box in the tagged union.
    fn into_any(self) -> AnyBox;

    /// Build a box from a record field: boxes of the same family are cloned
    /// with overrides, anything else seeds a new box with its raw value.
    fn from_field(field: Option<&Field>, options: Self::Options) -> Self {
        match field {
            Some(Field::Boxed(any)) => match Self::from_any(any) {
                Some(source) => Self::from_box(source, options),
                None => Self::from_seed(any.raw(), options),
            },
            Some(Field::Raw(value)) => Self::from_seed(value.clone(), options),
            None => Self::from_seed(Value::Null, options),
        }
    }

    /// Reverse-parse a literal of the filter grammar into a box.
    ///
    /// See [`parse_filter_literal`] for the recognition rules.
    fn from_filter(text: &str, options: Self::Options) -> Self {
        Self::from_seed(parse_filter_literal(text), options)
    }

    /// Replace `record[spec.key]` in place with a box of this family built
    /// from the current field, and return the same record.
    fn replace_in_data<'r>(
        record: &'r mut Record,
        spec: &PropertySpec,
        options: Self::Options,
    ) -> &'r mut Record {
        let boxed = Self::from_field(record.get(&spec.key), options);
        debug!(key = %spec.key, kind = ?boxed.kind(), "replacing record field");
        record.insert(spec.key.clone(), Field::Boxed(boxed.into_any()));
        record
    }
}

/// Parse a literal of the filter grammar back into a raw value.
///
/// The first matching rule wins:
/// 1. `date(<yyyy-mm-ddThh:mm:ss.fffZ>)` (case-insensitive) gives a date;
/// 2. a single-quoted string, with `''` unescaped to `'`;
/// 3. a double-quoted string, with `""` unescaped to `"`;
/// 4. `true` / `false` give a boolean;
/// 5. numeric text gives a number;
/// 6. anything else is kept as text.
pub fn parse_filter_literal(text: &str) -> Value {
    if let Some(date) = parse_date_literal(text) {
        return Value::Date(date);
    }

    if let Some(inner) = unwrap_quoted(text, '\'') {
        return Value::String(inner.replace("''", "'"));
    }

    if let Some(inner) = unwrap_quoted(text, '"') {
        return Value::String(inner.replace("\"\"", "\""));
    }

    match text {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    match coerce_number(text) {
        Some(n) => number_value(n),
        None => Value::String(text.to_string()),
    }
}

fn parse_date_literal(text: &str) -> Option<DateTime<Utc>> {
    let captures = DATE_LITERAL.captures(text)?;
    DateTime::parse_from_rfc3339(captures.get(1)?.as_str())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn unwrap_quoted(text: &str, quote: char) -> Option<&str> {
    if text.len() > 1 && text.starts_with(quote) && text.ends_with(quote) {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

/// Any box, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyBox {
    /// A plain value box.
    Value(ValueBox),
    /// A boolean box.
    Bool(BoolBox),
    /// A date box.
    Date(DateBox),
    /// A number box.
    Number(NumberBox),
    /// A lookup box.
    Lookup(LookupBox),
}

impl AnyBox {
    fn as_dyn(&self) -> &dyn BoxedValue {
        match self {
            Self::Value(b) => b,
            Self::Bool(b) => b,
            Self::Date(b) => b,
            Self::Number(b) => b,
            Self::Lookup(b) => b,
        }
    }
}

impl BoxedValue for AnyBox {
    fn kind(&self) -> Option<&str> {
        self.as_dyn().kind()
    }

    fn raw(&self) -> Value {
        self.as_dyn().raw()
    }

    fn to_json(&self) -> serde_json::Value {
        self.as_dyn().to_json()
    }

    fn to_filter(&self) -> String {
        self.as_dyn().to_filter()
    }

    fn to_html(&self) -> Option<String> {
        self.as_dyn().to_html()
    }
}

impl fmt::Display for AnyBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_dyn(), f)
    }
}

/// Implements `From<Box> for AnyBox`, `From<&Box> for Value` and
/// `Serialize` (through `to_json`) for each box type.
macro_rules! impl_box_conversions {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for AnyBox {
                fn from(b: $ty) -> Self {
                    Self::$variant(b)
                }
            }

            impl From<&$ty> for Value {
                fn from(b: &$ty) -> Self {
                    b.raw()
                }
            }

            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    self.to_json().serialize(serializer)
                }
            }
        )+
    };
}

impl_box_conversions! {
    Value => ValueBox,
    Bool => BoolBox,
    Date => DateBox,
    Number => NumberBox,
    Lookup => LookupBox,
}

impl From<&AnyBox> for Value {
    fn from(b: &AnyBox) -> Self {
        b.raw()
    }
}

impl serde::Serialize for AnyBox {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
