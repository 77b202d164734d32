//! Records whose fields are raw values or boxes, and the property
//! descriptions used to replace them.

use crate::boxed::{AnyBox, BoxedValue};
use crate::value::Value;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

/// A record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A value as received.
    Raw(Value),
    /// A value wrapped in a box.
    Boxed(AnyBox),
}

impl Field {
    /// The raw value, unwrapping boxes.
    pub fn raw(&self) -> Value {
        match self {
            Self::Raw(value) => value.clone(),
            Self::Boxed(b) => b.raw(),
        }
    }

    /// The box, if the field holds one.
    pub fn as_box(&self) -> Option<&AnyBox> {
        match self {
            Self::Boxed(b) => Some(b),
            Self::Raw(_) => None,
        }
    }

    /// JSON representation of the field.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Raw(value) => value.to_json(),
            Self::Boxed(b) => b.to_json(),
        }
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl From<AnyBox> for Field {
    fn from(b: AnyBox) -> Self {
        Self::Boxed(b)
    }
}

impl Serialize for Field {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// An ordered map of named fields, as returned by the API for one entity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Map<String, serde_json::Value>")]
pub struct Record {
    fields: IndexMap<String, Field>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object; anything else gives an empty
    /// record.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Object(map) => map.into(),
            _ => Self::default(),
        }
    }

    /// Get a field.
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Get a field mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.fields.get_mut(key)
    }

    /// Get the box stored in a field.
    pub fn boxed(&self, key: &str) -> Option<&AnyBox> {
        self.get(key).and_then(Field::as_box)
    }

    /// Check if the record has a field.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Set a field, keeping its position if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, field: impl Into<Field>) -> Option<Field> {
        self.fields.insert(key.into(), field.into())
    }

    /// Read `record[nav][key]` from a nested object field.
    pub fn member(&self, nav: &str, key: &str) -> Option<Value> {
        match self.get(nav)? {
            Field::Raw(Value::Json(serde_json::Value::Object(map))) => {
                map.get(key).cloned().map(Value::from)
            }
            _ => None,
        }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// JSON representation, with boxes serialized through `to_json`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter()
            .map(|(k, v)| (k, Field::Raw(v.into())))
            .collect()
    }
}

impl FromIterator<(String, Field)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Field)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, field) in &self.fields {
            map.serialize_entry(key, field)?;
        }
        map.end()
    }
}

/// One entry of a lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupOption {
    /// The key value.
    pub value: Value,
    /// The text shown for it.
    pub text: String,
}

impl LookupOption {
    /// Create a table entry.
    pub fn new(value: impl Into<Value>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Description of one entity property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Field name in the record.
    pub key: String,
    /// Name of the registered type the field is boxed as.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Navigation property holding the related record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
    /// Property of the related record holding the descriptive text.
    #[serde(default, alias = "expandText", skip_serializing_if = "Option::is_none")]
    pub expand_text: Option<String>,
    /// Lookup table used when there is no navigation property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<LookupOption>>,
}

impl PropertySpec {
    /// Describe a property by key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Set the registered type name.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Take the descriptive text from `nav.text` of an expanded record.
    pub fn expand(mut self, nav: impl Into<String>, text: impl Into<String>) -> Self {
        self.expand = Some(nav.into());
        self.expand_text = Some(text.into());
        self
    }

    /// Take the descriptive text from a lookup table.
    pub fn options(mut self, options: Vec<LookupOption>) -> Self {
        self.options = Some(options);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxed::BoxFamily;
    use crate::number::{NumberBox, NumberOptions};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_record_from_json_keeps_order() {
        let record = Record::from_json(json!({ "b": 1, "a": "x", "c": null }));
        let keys: Vec<_> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(record.get("a"), Some(&Field::Raw(Value::from("x"))));
        assert!(Record::from_json(json!([1, 2])).is_empty());
    }

    #[test]
    fn test_record_member() {
        let record = Record::from_json(json!({ "DOCTOR": { "NAME": "Dr. Grey" }, "X": 1 }));
        assert_eq!(record.member("DOCTOR", "NAME"), Some(Value::from("Dr. Grey")));
        assert_eq!(record.member("DOCTOR", "AGE"), None);
        assert_eq!(record.member("X", "NAME"), None);
        assert_eq!(record.member("Y", "NAME"), None);
    }

    #[test]
    fn test_record_serializes_boxes_through_to_json() {
        let mut record = Record::from_json(json!({ "n": "1.234,5", "s": "a" }));
        NumberBox::replace_in_data(&mut record, &PropertySpec::new("n"), NumberOptions::default());

        assert_eq!(record.to_json(), json!({ "n": 1234.5, "s": "a" }));
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"n":1234.5,"s":"a"}"#);
    }

    #[test]
    fn test_property_spec_deserialize() {
        let spec: PropertySpec = serde_json::from_value(json!({
            "key": "IDDOCTOR",
            "type": "lookup",
            "expand": "DOCTOR",
            "expandText": "NAME"
        }))
        .unwrap();
        assert_eq!(
            spec,
            PropertySpec::new("IDDOCTOR").kind("lookup").expand("DOCTOR", "NAME")
        );
    }

    #[test]
    fn test_lookup_option_deserialize() {
        let options: Vec<LookupOption> =
            serde_json::from_value(json!([{ "value": 1, "text": "Uno" }])).unwrap();
        assert_eq!(options, vec![LookupOption::new(1, "Uno")]);
    }

    #[test]
    fn test_record_deserialize() {
        let record: Record = serde_json::from_str(r#"{"a":1}"#).unwrap();
        assert_eq!(record.get("a").map(Field::raw), Some(Value::Int(1)));
    }
}
