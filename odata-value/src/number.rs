//! Number boxes using Catalan conventions: `.` groups thousands and `,`
//! separates decimals.

use crate::boxed::{AnyBox, BoxFamily, BoxedValue};
use crate::convert::{ConverterOverrides, Converters, Override, impl_box_options};
use crate::error::{ParseError, ParseResult};
use crate::value::{Value, coerce_number, format_number, number_value};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Fraction digits shown when `fraction_digits` is not set.
const MAX_FRACTION_DIGITS: u32 = 20;

/// Interpret Catalan-formatted numeric text.
///
/// Every `.` is dropped as a thousands separator and the first `,` becomes
/// the decimal point. With `fraction_digits` the result is truncated (not
/// rounded) to that many decimals.
pub fn parse_number(text: &str, fraction_digits: Option<u32>) -> ParseResult<f64> {
    let normalized = text.replace('.', "").replacen(',', ".", 1);
    let n = coerce_number(&normalized).ok_or_else(|| ParseError::InvalidNumber {
        input: text.to_string(),
    })?;
    Ok(match fraction_digits {
        Some(digits) => {
            let scale = 10f64.powi(digits as i32);
            (n * scale).trunc() / scale
        }
        None => n,
    })
}

/// Format a number with Catalan separators.
///
/// Shows at least `minimum_integer_digits` integer digits. With
/// `fraction_digits` exactly that many decimals are shown, otherwise up to
/// 20 with trailing zeros dropped. Rounding is half away from zero on the
/// shortest decimal form of `n`.
pub fn format_localized(
    n: f64,
    use_grouping: bool,
    minimum_integer_digits: u32,
    fraction_digits: Option<u32>,
) -> String {
    if n.is_nan() {
        return String::new();
    }
    let sign = if n < 0.0 { "-" } else { "" };
    if n.is_infinite() {
        return format!("{}∞", sign);
    }

    let (min_frac, max_frac) = match fraction_digits {
        Some(digits) => (digits as usize, digits as usize),
        None => (0, MAX_FRACTION_DIGITS as usize),
    };

    let text = format!("{}", n.abs());
    let (int_text, frac_text) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut int: Vec<u8> = int_text.bytes().collect();
    let mut frac: Vec<u8> = frac_text.bytes().collect();

    if frac.len() > max_frac {
        let round_up = frac[max_frac] >= b'5';
        frac.truncate(max_frac);
        if round_up {
            round_up_digits(&mut int, &mut frac);
        }
    }

    while frac.len() > min_frac && frac.last() == Some(&b'0') {
        frac.pop();
    }
    frac.resize(frac.len().max(min_frac), b'0');

    let min_int = minimum_integer_digits.max(1) as usize;
    if int.len() < min_int {
        let mut padded = vec![b'0'; min_int - int.len()];
        padded.extend_from_slice(&int);
        int = padded;
    }

    let mut out = String::with_capacity(int.len() + frac.len() + int.len() / 3 + 2);
    out.push_str(sign);
    for (i, digit) in int.iter().enumerate() {
        if use_grouping && i > 0 && (int.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(*digit as char);
    }
    if !frac.is_empty() {
        out.push(',');
        out.extend(frac.iter().map(|d| *d as char));
    }
    out
}

/// Add one unit in the last place of `int.frac`, carrying leftwards.
fn round_up_digits(int: &mut Vec<u8>, frac: &mut [u8]) {
    for digit in frac.iter_mut().rev().chain(int.iter_mut().rev()) {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    int.insert(0, b'1');
}

fn default_stringify(_: &NumberBox, value: &Option<f64>) -> String {
    match value {
        Some(n) if !n.is_nan() => format_number(*n).replacen('.', ",", 1),
        _ => String::new(),
    }
}

fn default_parse(owner: &NumberBox, text: &str) -> Option<f64> {
    parse_number(text, owner.fraction_digits)
        .inspect_err(|e| warn!(error = %e, "number parse failed, using null"))
        .ok()
}

fn default_formatify(owner: &NumberBox, value: &Option<f64>) -> String {
    match value {
        Some(n) => format_localized(
            *n,
            owner.use_grouping,
            owner.minimum_integer_digits.unwrap_or(1),
            owner.fraction_digits,
        ),
        None => String::new(),
    }
}

fn defaults() -> Converters<NumberBox, Option<f64>> {
    Converters {
        stringify: Some(Arc::new(default_stringify)),
        parse: Some(Arc::new(default_parse)),
        formatify: Some(Arc::new(default_formatify)),
        htmlify: None,
    }
}

/// A nullable number with display settings.
#[derive(Debug, Clone)]
pub struct NumberBox {
    /// The wrapped number; `None` is null (or not a number).
    pub value: Option<f64>,
    /// Opaque type tag.
    pub kind: Option<String>,
    /// Group thousands when formatting.
    pub use_grouping: bool,
    /// Decimals shown when formatting and kept when parsing.
    pub fraction_digits: Option<u32>,
    /// Minimum integer digits shown when formatting (default 1).
    pub minimum_integer_digits: Option<u32>,
    /// Attached converters.
    pub converters: Converters<NumberBox, Option<f64>>,
}

/// Options for building a [`NumberBox`].
#[derive(Debug, Clone, Default)]
pub struct NumberOptions {
    /// Type tag slot.
    pub kind: Override<String>,
    /// Group thousands; `None` inherits (false for new boxes).
    pub use_grouping: Option<bool>,
    /// Fraction digits slot.
    pub fraction_digits: Override<u32>,
    /// Minimum integer digits slot.
    pub minimum_integer_digits: Override<u32>,
    /// Converter overrides.
    pub converters: ConverterOverrides<NumberBox, Option<f64>>,
}

impl_box_options!(NumberOptions => NumberBox, Option<f64>);

impl NumberOptions {
    /// Group thousands when formatting.
    pub fn use_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = Some(use_grouping);
        self
    }

    /// Fixed number of decimals.
    pub fn fraction_digits(mut self, digits: u32) -> Self {
        self.fraction_digits = Override::Set(digits);
        self
    }

    /// Minimum integer digits.
    pub fn minimum_integer_digits(mut self, digits: u32) -> Self {
        self.minimum_integer_digits = Override::Set(digits);
        self
    }
}

impl NumberBox {
    /// Wrap a number, or parse text with the default parser.
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_options(value, NumberOptions::default())
    }

    /// Wrap a value with the given options.
    pub fn with_options(value: impl Into<Value>, options: NumberOptions) -> Self {
        Self::from_seed(value.into(), options)
    }

    /// The wrapped number.
    pub fn value_of(&self) -> Option<f64> {
        self.value
    }

    /// Interpret text with the box's parser; `None` when it has none.
    pub fn parse(&self, text: &str) -> Option<f64> {
        self.converters
            .parse
            .as_ref()
            .and_then(|parse| parse(self, text))
            .filter(|n| !n.is_nan())
    }
}

impl BoxedValue for NumberBox {
    fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    fn raw(&self) -> Value {
        self.value.map(number_value).unwrap_or(Value::Null)
    }

    fn to_html(&self) -> Option<String> {
        self.converters.html(self, &self.value)
    }
}

impl BoxFamily for NumberBox {
    type Options = NumberOptions;

    fn from_seed(seed: Value, options: NumberOptions) -> Self {
        let mut boxed = Self {
            value: None,
            kind: options.kind.resolve(None),
            use_grouping: options.use_grouping.unwrap_or(false),
            fraction_digits: options.fraction_digits.resolve(None),
            minimum_integer_digits: options.minimum_integer_digits.resolve(None),
            converters: options.converters.apply(defaults()),
        };
        boxed.value = match &seed {
            Value::String(text) => boxed.parse(text),
            Value::Json(serde_json::Value::String(text)) => boxed.parse(text),
            other => other.as_f64().filter(|n| !n.is_nan()),
        };
        boxed
    }

    fn from_box(source: &Self, options: NumberOptions) -> Self {
        Self {
            value: source.value,
            kind: options.kind.resolve(source.kind.clone()),
            use_grouping: options.use_grouping.unwrap_or(source.use_grouping),
            fraction_digits: options.fraction_digits.resolve(source.fraction_digits),
            minimum_integer_digits: options
                .minimum_integer_digits
                .resolve(source.minimum_integer_digits),
            converters: options.converters.apply(source.converters.clone()),
        }
    }

    fn from_any(any: &AnyBox) -> Option<&Self> {
        match any {
            AnyBox::Number(b) => Some(b),
            _ => None,
        }
    }

    fn into_any(self) -> AnyBox {
        AnyBox::Number(self)
    }
}

impl fmt::Display for NumberBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.converters.display(self, &self.value) {
            Some(text) => f.write_str(&text),
            None => match self.value {
                Some(n) => f.write_str(&format_number(n)),
                None => Ok(()),
            },
        }
    }
}

impl PartialEq for NumberBox {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
