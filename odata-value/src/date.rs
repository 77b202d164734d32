//! Date boxes rendered in the local calendar as `dd/mm/yyyy[ hh:mm]`.

use crate::boxed::{AnyBox, BoxFamily, BoxedValue};
use crate::convert::{ConverterOverrides, Converters, Override, impl_box_options};
use crate::error::{ParseError, ParseResult};
use crate::value::{Value, to_iso_string};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use regex_lite::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::warn;

const DATE_PATTERN: &str = r"^(\d{1,2})/(\d{1,2})/(\d{4})(?:\s+(\d{1,2}):(\d{2}))?$";

static DATE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE_PATTERN).expect("valid date text pattern"));

/// Interpret `d/m/yyyy[ h:mm]` in the local timezone.
///
/// With `has_time` the time part is required. Without it, a time part is
/// accepted and ignored, and the result is local midnight.
///
/// Out-of-range fields such as `31/02/2021` are rejected with
/// [`ParseError::InvalidDate`] instead of rolling over into the next
/// month, so a mistyped day never becomes a different valid date.
pub fn parse_date(text: &str, has_time: bool) -> ParseResult<DateTime<Utc>> {
    let format_error = || ParseError::InvalidDateFormat {
        input: text.to_string(),
        pattern: DATE_PATTERN,
    };
    let invalid = || ParseError::InvalidDate {
        input: text.to_string(),
    };

    let captures = DATE_TEXT.captures(text).ok_or_else(format_error)?;
    let field = |i: usize| captures.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let (day, month) = (field(1).ok_or_else(invalid)?, field(2).ok_or_else(invalid)?);
    let year = captures
        .get(3)
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .ok_or_else(invalid)?;
    let (hours, minutes) = if has_time {
        (field(4).ok_or_else(format_error)?, field(5).ok_or_else(format_error)?)
    } else {
        (0, 0)
    };

    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hours, minutes, 0))
        .ok_or_else(invalid)?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|d| d.with_timezone(&Utc))
        .ok_or_else(invalid)
}

fn default_stringify(owner: &DateBox, value: &Option<DateTime<Utc>>) -> String {
    let Some(date) = value else {
        return String::new();
    };
    let local = date.with_timezone(&Local);
    if owner.has_time {
        local.format("%d/%m/%Y %H:%M").to_string()
    } else {
        local.format("%d/%m/%Y").to_string()
    }
}

fn default_parse(owner: &DateBox, text: &str) -> Option<DateTime<Utc>> {
    if text.trim().is_empty() {
        return None;
    }
    parse_date(text, owner.has_time)
        .inspect_err(|e| warn!(error = %e, "date parse failed, using null"))
        .ok()
}

fn defaults() -> Converters<DateBox, Option<DateTime<Utc>>> {
    Converters {
        stringify: Some(Arc::new(default_stringify)),
        parse: Some(Arc::new(default_parse)),
        formatify: None,
        htmlify: None,
    }
}

/// Interpret a raw seed as an instant.
///
/// Numbers are epoch milliseconds, strings are RFC 3339 or a bare
/// `yyyy-mm-dd` (taken as UTC midnight), booleans are `0`/`1` ms.
fn instant_from_seed(seed: &Value) -> Option<DateTime<Utc>> {
    match seed {
        Value::Date(d) => Some(*d),
        Value::Int(ms) => DateTime::from_timestamp_millis(*ms),
        Value::Float(ms) if ms.is_finite() => DateTime::from_timestamp_millis(ms.trunc() as i64),
        Value::Bool(b) => DateTime::from_timestamp_millis(i64::from(*b)),
        Value::String(text) => instant_from_text(text),
        Value::Json(serde_json::Value::String(text)) => instant_from_text(text),
        _ => None,
    }
}

fn instant_from_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(text) {
        return Some(d.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}

/// A nullable instant.
#[derive(Debug, Clone)]
pub struct DateBox {
    /// The wrapped instant; `None` is null.
    pub value: Option<DateTime<Utc>>,
    /// Opaque type tag.
    pub kind: Option<String>,
    /// The default converters include hours and minutes.
    pub has_time: bool,
    /// Attached converters.
    pub converters: Converters<DateBox, Option<DateTime<Utc>>>,
}

/// Options for building a [`DateBox`].
#[derive(Debug, Clone, Default)]
pub struct DateOptions {
    /// Type tag slot.
    pub kind: Override<String>,
    /// Include time in the default converters; `None` inherits.
    pub has_time: Option<bool>,
    /// Converter overrides.
    pub converters: ConverterOverrides<DateBox, Option<DateTime<Utc>>>,
}

impl_box_options!(DateOptions => DateBox, Option<DateTime<Utc>>);

impl DateOptions {
    /// Include hours and minutes in the default converters.
    pub fn has_time(mut self, has_time: bool) -> Self {
        self.has_time = Some(has_time);
        self
    }
}

impl DateBox {
    /// Wrap an instant (or epoch milliseconds, or ISO text).
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_options(value, DateOptions::default())
    }

    /// Wrap a value with the given options.
    pub fn with_options(value: impl Into<Value>, options: DateOptions) -> Self {
        Self::from_seed(value.into(), options)
    }

    /// Epoch milliseconds of the wrapped instant.
    pub fn value_of(&self) -> Option<i64> {
        self.value.map(|d| d.timestamp_millis())
    }

    /// Interpret text with the box's parser; `None` when it has none.
    pub fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        self.converters.parse.as_ref().and_then(|parse| parse(self, text))
    }
}

impl BoxedValue for DateBox {
    fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    fn raw(&self) -> Value {
        self.value.into()
    }

    fn to_html(&self) -> Option<String> {
        self.converters.html(self, &self.value)
    }
}

impl BoxFamily for DateBox {
    type Options = DateOptions;

    fn from_seed(seed: Value, options: DateOptions) -> Self {
        Self {
            value: instant_from_seed(&seed),
            kind: options.kind.resolve(None),
            has_time: options.has_time.unwrap_or(false),
            converters: options.converters.apply(defaults()),
        }
    }

    fn from_box(source: &Self, options: DateOptions) -> Self {
        Self {
            value: source.value,
            kind: options.kind.resolve(source.kind.clone()),
            has_time: options.has_time.unwrap_or(source.has_time),
            converters: options.converters.apply(source.converters.clone()),
        }
    }

    fn from_any(any: &AnyBox) -> Option<&Self> {
        match any {
            AnyBox::Date(b) => Some(b),
            _ => None,
        }
    }

    fn into_any(self) -> AnyBox {
        AnyBox::Date(self)
    }
}

impl fmt::Display for DateBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.converters.display(self, &self.value) {
            Some(text) => f.write_str(&text),
            None => match &self.value {
                Some(d) => f.write_str(&to_iso_string(d)),
                None => Ok(()),
            },
        }
    }
}

impl PartialEq for DateBox {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
