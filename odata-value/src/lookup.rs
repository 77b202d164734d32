//! Lookup boxes: a key value paired with a descriptive text.

use crate::boxed::{AnyBox, BoxFamily, BoxedValue};
use crate::convert::{ConverterOverrides, Converters, Override, impl_box_options};
use crate::record::{Field, PropertySpec, Record};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

fn default_formatify(owner: &LookupBox, _: &Value) -> String {
    owner.text.clone().unwrap_or_default()
}

fn defaults() -> Converters<LookupBox, Value> {
    Converters {
        stringify: None,
        parse: None,
        formatify: Some(Arc::new(default_formatify)),
        htmlify: None,
    }
}

/// A value shown through an associated text, such as a foreign key and the
/// name of the row it points to.
///
/// ```
/// use odata_value::{BoxedValue, LookupBox};
///
/// let doctor = LookupBox::new(3, "Dr. Grey");
/// assert_eq!(doctor.to_string(), "Dr. Grey");
/// assert_eq!(doctor.to_filter(), "3");
/// ```
#[derive(Debug, Clone)]
pub struct LookupBox {
    /// The wrapped key.
    pub value: Value,
    /// Opaque type tag.
    pub kind: Option<String>,
    /// Descriptive text, independent of `value`.
    pub text: Option<String>,
    /// Attached converters.
    pub converters: Converters<LookupBox, Value>,
}

/// Options for building a [`LookupBox`].
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Type tag slot.
    pub kind: Override<String>,
    /// Descriptive text slot.
    pub text: Override<String>,
    /// Converter overrides.
    pub converters: ConverterOverrides<LookupBox, Value>,
}

impl_box_options!(LookupOptions => LookupBox, Value);

impl LookupOptions {
    /// Set the descriptive text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Override::Set(text.into());
        self
    }
}

impl LookupBox {
    /// Wrap a value with its descriptive text.
    pub fn new(value: impl Into<Value>, text: impl Into<String>) -> Self {
        Self::with_text_and_options(value, text, LookupOptions::default())
    }

    /// Wrap a value with the given options.
    pub fn with_options(value: impl Into<Value>, options: LookupOptions) -> Self {
        Self::from_seed(value.into(), options)
    }

    /// Wrap a value with its descriptive text and the given options.
    pub fn with_text_and_options(
        value: impl Into<Value>,
        text: impl Into<String>,
        options: LookupOptions,
    ) -> Self {
        Self::from_seed(value.into(), options.text(text))
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

/// Resolve the descriptive text for `spec.key` in `record`.
///
/// An expanded related record wins; without one the lookup table is
/// searched by strict equality; a property with neither gets an empty text.
/// `None` means nothing matched and any existing text is kept.
fn resolve_text(record: &Record, spec: &PropertySpec) -> Option<String> {
    if let Some(expand) = &spec.expand {
        let member = spec.expand_text.as_deref()?;
        return record
            .member(expand, member)
            .filter(|v| !v.is_null())
            .map(|v| v.to_string());
    }

    if let Some(table) = &spec.options {
        let value = record.get(&spec.key).map(Field::raw).unwrap_or_default();
        return table
            .iter()
            .find(|option| option.value.strict_eq(&value))
            .map(|option| option.text.clone());
    }

    Some(String::new())
}

impl BoxedValue for LookupBox {
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

impl BoxFamily for LookupBox {
    type Options = LookupOptions;

    fn from_seed(seed: Value, options: LookupOptions) -> Self {
        Self {
            value: seed,
            kind: options.kind.resolve(None),
            text: options.text.resolve(None),
            converters: options.converters.apply(defaults()),
        }
    }

    fn from_box(source: &Self, options: LookupOptions) -> Self {
        Self {
            value: source.value.clone(),
            kind: options.kind.resolve(source.kind.clone()),
            text: options.text.resolve(source.text.clone()),
            converters: options.converters.apply(source.converters.clone()),
        }
    }

    fn from_any(any: &AnyBox) -> Option<&Self> {
        match any {
            AnyBox::Lookup(b) => Some(b),
            _ => None,
        }
    }

    fn into_any(self) -> AnyBox {
        AnyBox::Lookup(self)
    }

    fn replace_in_data<'r>(
        record: &'r mut Record,
        spec: &PropertySpec,
        mut options: LookupOptions,
    ) -> &'r mut Record {
        if let Some(text) = resolve_text(record, spec) {
            options.text = Override::Set(text);
        }
        let boxed = Self::from_field(record.get(&spec.key), options);
        debug!(key = %spec.key, text = ?boxed.text, "replacing lookup field");
        record.insert(spec.key.clone(), Field::Boxed(boxed.into_any()));
        record
    }
}

impl fmt::Display for LookupBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.converters.display(self, &self.value) {
            Some(text) => f.write_str(&text),
            None => write!(f, "{}", self.value),
        }
    }
}

impl PartialEq for LookupBox {
    fn eq(&self, other: &Self) -> bool {
        self.value.strict_eq(&other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::BoxOptions;
    use crate::record::LookupOption;
    use serde_json::json;

    #[test]
    fn test_lookup_holds_value_and_text() {
        let b = LookupBox::new(1, "Uno");
        assert_eq!(b.value, Value::Int(1));
        assert_eq!(b.text.as_deref(), Some("Uno"));
        assert_eq!(b.to_string(), "Uno");
        assert_eq!(b.to_json(), json!(1));
        assert_eq!(b.to_filter(), "1");
    }

    #[test]
    fn test_lookup_without_text_formats_empty() {
        let b = LookupBox::with_options("A", LookupOptions::default().kind("code"));
        assert_eq!(b.text, None);
        assert_eq!(b.to_string(), "");
        assert_eq!(b.kind(), Some("code"));
        assert_eq!(b.to_filter(), "'A'");
    }

    #[test]
    fn test_text_does_not_affect_equality() {
        assert_eq!(LookupBox::new(1, "Uno"), LookupBox::new(1, "One"));
    }

    #[test]
    fn test_cleared_formatify_uses_value_text() {
        let b = LookupBox::with_text_and_options(7, "Siete", LookupOptions::default().clear_formatify());
        assert_eq!(b.to_string(), "7");
    }

    #[test]
    fn test_clone_keeps_text_unless_overridden() {
        let source = LookupBox::new(1, "Uno");
        assert_eq!(LookupBox::from_box(&source, LookupOptions::default()).to_string(), "Uno");
        assert_eq!(
            LookupBox::from_box(&source, LookupOptions::default().text("One")).to_string(),
            "One"
        );
        let cleared = LookupBox::from_box(
            &source,
            LookupOptions {
                text: Override::Clear,
                ..Default::default()
            },
        );
        assert_eq!(cleared.text, None);
    }

    #[test]
    fn test_replace_in_data_from_expand() {
        let mut record = Record::from_json(json!({
            "IDDOCTOR": 3,
            "DOCTOR": { "NAME": "Dr. Grey" }
        }));
        let spec = PropertySpec::new("IDDOCTOR").expand("DOCTOR", "NAME");
        LookupBox::replace_in_data(&mut record, &spec, LookupOptions::default());

        let b = record.boxed("IDDOCTOR").expect("boxed");
        assert_eq!(b.to_string(), "Dr. Grey");
        assert_eq!(b.raw(), Value::Int(3));
    }

    #[test]
    fn test_replace_in_data_missing_expand_has_no_text() {
        let mut record = Record::from_json(json!({ "IDDOCTOR": 3 }));
        let spec = PropertySpec::new("IDDOCTOR").expand("DOCTOR", "NAME");
        LookupBox::replace_in_data(&mut record, &spec, LookupOptions::default());

        assert_eq!(record.boxed("IDDOCTOR").map(|b| b.to_string()).as_deref(), Some(""));
    }

    #[test]
    fn test_replace_in_data_from_options_table() {
        let mut record = Record::from_json(json!({ "STATE": "B", "OTHER": "Z" }));
        let spec = PropertySpec::new("STATE").options(vec![
            LookupOption::new("A", "Active"),
            LookupOption::new("B", "Blocked"),
        ]);
        LookupBox::replace_in_data(&mut record, &spec, LookupOptions::default());
        assert_eq!(record.boxed("STATE").map(|b| b.to_string()).as_deref(), Some("Blocked"));

        let spec = PropertySpec::new("OTHER").options(vec![LookupOption::new("A", "Active")]);
        LookupBox::replace_in_data(&mut record, &spec, LookupOptions::default());
        assert_eq!(record.boxed("OTHER").map(|b| b.to_string()).as_deref(), Some(""));
    }

    #[test]
    fn test_replace_in_data_without_source_gets_empty_text() {
        let mut record = Record::from_json(json!({ "CODE": 9 }));
        LookupBox::replace_in_data(&mut record, &PropertySpec::new("CODE"), LookupOptions::default());

        let Some(AnyBox::Lookup(b)) = record.boxed("CODE") else {
            panic!("expected a lookup box");
        };
        assert_eq!(b.text.as_deref(), Some(""));
    }

    #[test]
    fn test_replace_in_data_keeps_existing_text() {
        let mut record = Record::new();
        record.insert("CODE", LookupBox::new(9, "Nine").into_any());
        let spec = PropertySpec::new("CODE").options(vec![LookupOption::new(1, "One")]);
        LookupBox::replace_in_data(&mut record, &spec, LookupOptions::default());

        assert_eq!(record.boxed("CODE").map(|b| b.to_string()).as_deref(), Some("Nine"));
    }
}
