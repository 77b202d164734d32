//! Entity schemas: property definitions plus a registry of box types.

use indexmap::IndexMap;
use odata_filter::QueryParams;
use odata_value::{
    BoolBox, BoolOptions, BoxFamily, DateBox, DateOptions, LookupBox, LookupOptions, NumberBox,
    NumberOptions, PropertySpec, Record, ValueBox, ValueOptions,
};
use tracing::debug;

/// A registered box type and the options its boxes are built with.
#[derive(Debug, Clone)]
pub enum TypeSpec {
    /// Plain [`ValueBox`].
    Value(ValueOptions),
    /// [`BoolBox`].
    Bool(BoolOptions),
    /// [`DateBox`].
    Date(DateOptions),
    /// [`NumberBox`].
    Number(NumberOptions),
    /// [`LookupBox`].
    Lookup(LookupOptions),
}

impl TypeSpec {
    /// Name of the box family, as used in configuration files.
    pub fn box_name(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Bool(_) => "bool",
            Self::Date(_) => "date",
            Self::Number(_) => "number",
            Self::Lookup(_) => "lookup",
        }
    }

    /// Replace `record[spec.key]` with a box of this type.
    pub fn replace_in_data<'r>(&self, record: &'r mut Record, spec: &PropertySpec) -> &'r mut Record {
        match self {
            Self::Value(o) => ValueBox::replace_in_data(record, spec, o.clone()),
            Self::Bool(o) => BoolBox::replace_in_data(record, spec, o.clone()),
            Self::Date(o) => DateBox::replace_in_data(record, spec, o.clone()),
            Self::Number(o) => NumberBox::replace_in_data(record, spec, o.clone()),
            Self::Lookup(o) => LookupBox::replace_in_data(record, spec, o.clone()),
        }
    }
}

impl From<ValueOptions> for TypeSpec {
    fn from(o: ValueOptions) -> Self {
        Self::Value(o)
    }
}

impl From<BoolOptions> for TypeSpec {
    fn from(o: BoolOptions) -> Self {
        Self::Bool(o)
    }
}

impl From<DateOptions> for TypeSpec {
    fn from(o: DateOptions) -> Self {
        Self::Date(o)
    }
}

impl From<NumberOptions> for TypeSpec {
    fn from(o: NumberOptions) -> Self {
        Self::Number(o)
    }
}

impl From<LookupOptions> for TypeSpec {
    fn from(o: LookupOptions) -> Self {
        Self::Lookup(o)
    }
}

/// Which related records to include through `$expand`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Expand {
    /// No expansion.
    #[default]
    None,
    /// A ready expression, used as is.
    Raw(String),
    /// Every property with a navigation property.
    All,
    /// Only the listed property keys.
    Keys(Vec<String>),
}

impl From<&str> for Expand {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}

impl From<String> for Expand {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<bool> for Expand {
    fn from(all: bool) -> Self {
        if all { Self::All } else { Self::None }
    }
}

impl<S: Into<String>> From<Vec<S>> for Expand {
    fn from(keys: Vec<S>) -> Self {
        Self::Keys(keys.into_iter().map(Into::into).collect())
    }
}

/// An OData entity: where it lives, its properties and the box types its
/// fields are replaced with.
///
/// ```rust
/// use odata_entity::{EntitySchema, Expand};
/// use odata_value::{BoolOptions, PropertySpec, Record};
/// use serde_json::json;
///
/// let schema = EntitySchema::new("Doctors")
///     .property(PropertySpec::new("ACTIVE").kind("flag"))
///     .property(PropertySpec::new("IDSPECIALTY").expand("Specialty", "Name"))
///     .register("flag", BoolOptions::default());
///
/// let mut record = Record::from_json(json!({ "ACTIVE": 0 }));
/// schema.replace_values(&mut record);
/// assert_eq!(record.boxed("ACTIVE").map(|b| b.to_string()).as_deref(), Some("No"));
///
/// assert_eq!(
///     schema.expand_expression(&Expand::All).as_deref(),
///     Some("Specialty($select=Name)")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntitySchema {
    /// Path of the entity set.
    pub endpoint: String,
    /// Property definitions, in declaration order.
    pub properties: Vec<PropertySpec>,
    /// Registered box types by name.
    pub types: IndexMap<String, TypeSpec>,
}

impl EntitySchema {
    /// Create a schema without properties.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Add a property definition.
    pub fn property(mut self, spec: PropertySpec) -> Self {
        self.properties.push(spec);
        self
    }

    /// Register a box type under `name`.
    pub fn register(mut self, name: impl Into<String>, spec: impl Into<TypeSpec>) -> Self {
        self.types.insert(name.into(), spec.into());
        self
    }

    /// Find a property by key.
    pub fn get_property(&self, key: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.key == key)
    }

    /// The registered type of a property, if the property exists and its
    /// type is registered.
    pub fn type_of(&self, key: &str) -> Option<&TypeSpec> {
        let kind = self.get_property(key)?.kind.as_deref()?;
        self.types.get(kind)
    }

    /// Replace every field that has a registered type with its box.
    ///
    /// Fields missing from the record and properties without a registered
    /// type are left alone.
    pub fn replace_values<'r>(&self, record: &'r mut Record) -> &'r mut Record {
        for spec in &self.properties {
            if !record.contains_key(&spec.key) {
                continue;
            }
            if let Some(ty) = spec.kind.as_deref().and_then(|k| self.types.get(k)) {
                ty.replace_in_data(record, spec);
            }
        }
        record
    }

    /// [`replace_values`](Self::replace_values) on every record.
    pub fn replace_all<'r>(&self, records: &'r mut [Record]) -> &'r mut [Record] {
        debug!(endpoint = %self.endpoint, count = records.len(), "EntitySchema::replace_all()");
        for record in records.iter_mut() {
            self.replace_values(record);
        }
        records
    }

    /// Build the `$expand` expression for a directive.
    ///
    /// Each expanded property contributes `nav($select=text)`. Returns
    /// `None` when nothing is expanded.
    pub fn expand_expression(&self, expand: &Expand) -> Option<String> {
        let selected: Vec<String> = match expand {
            Expand::None => return None,
            Expand::Raw(text) => return Some(text.clone()),
            Expand::All => self.expansions(|_| true),
            Expand::Keys(keys) => self.expansions(|p| keys.iter().any(|k| *k == p.key)),
        };
        if selected.is_empty() {
            None
        } else {
            Some(selected.join(","))
        }
    }

    fn expansions<F>(&self, include: F) -> Vec<String>
    where
        F: Fn(&PropertySpec) -> bool,
    {
        self.properties
            .iter()
            .filter(|p| include(*p))
            .filter_map(|p| {
                let nav = p.expand.as_deref()?;
                let text = p.expand_text.as_deref().unwrap_or_default();
                Some(format!("{}($select={})", nav, text))
            })
            .collect()
    }

    /// Set the `$expand` parameter from a directive, replacing any previous
    /// value.
    pub fn prepare_params(&self, params: QueryParams, expand: &Expand) -> QueryParams {
        QueryParams {
            expand: self.expand_expression(expand),
            ..params
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odata_value::{BoxOptions, BoxedValue, LookupOption};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doctors() -> EntitySchema {
        EntitySchema::new("Doctors")
            .property(PropertySpec::new("ID"))
            .property(PropertySpec::new("ACTIVE").kind("flag"))
            .property(PropertySpec::new("FEE").kind("money"))
            .property(PropertySpec::new("IDSPECIALTY").kind("lookup").expand("Specialty", "Name"))
            .property(
                PropertySpec::new("SHIFT")
                    .kind("lookup")
                    .options(vec![LookupOption::new(1, "Morning"), LookupOption::new(2, "Evening")]),
            )
            .property(PropertySpec::new("NOTE").kind("unregistered"))
            .register("flag", BoolOptions::default().to_json_as_int(true))
            .register("money", NumberOptions::default().fraction_digits(2))
            .register("lookup", LookupOptions::default())
    }

    #[test]
    fn test_lookup() {
        let schema = doctors();
        assert_eq!(schema.get_property("FEE").and_then(|p| p.kind.as_deref()), Some("money"));
        assert!(schema.get_property("MISSING").is_none());
        assert!(matches!(schema.type_of("ACTIVE"), Some(TypeSpec::Bool(_))));
        assert!(schema.type_of("ID").is_none());
        assert!(schema.type_of("NOTE").is_none());
    }

    #[test]
    fn test_replace_values() {
        let schema = doctors();
        let mut record = Record::from_json(json!({
            "ID": 7,
            "ACTIVE": true,
            "FEE": 12.5,
            "IDSPECIALTY": 3,
            "Specialty": { "Name": "Cardiology" },
            "SHIFT": 2,
            "NOTE": "x",
        }));
        schema.replace_values(&mut record);

        assert!(record.boxed("ID").is_none());
        assert!(record.boxed("NOTE").is_none());
        assert_eq!(record.boxed("FEE").map(|b| b.to_string()).as_deref(), Some("12,50"));
        assert_eq!(
            record.boxed("IDSPECIALTY").map(|b| b.to_string()).as_deref(),
            Some("Cardiology")
        );
        assert_eq!(record.boxed("SHIFT").map(|b| b.to_string()).as_deref(), Some("Evening"));
        assert_eq!(record.boxed("ACTIVE").map(|b| b.to_json()), Some(json!(1)));
        assert_eq!(record.to_json()["IDSPECIALTY"], json!(3));
    }

    #[test]
    fn test_missing_fields_are_not_added() {
        let schema = doctors();
        let mut record = Record::from_json(json!({ "ID": 1 }));
        schema.replace_values(&mut record);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_replace_all() {
        let schema = doctors();
        let mut records = vec![
            Record::from_json(json!({ "ACTIVE": 1 })),
            Record::from_json(json!({ "ACTIVE": 0 })),
        ];
        schema.replace_all(&mut records);
        let texts: Vec<_> = records
            .iter()
            .filter_map(|r| r.boxed("ACTIVE").map(|b| b.to_string()))
            .collect();
        assert_eq!(texts, vec!["Sí", "No"]);
    }

    #[test]
    fn test_kind_tag_comes_from_options() {
        let schema = EntitySchema::new("X")
            .property(PropertySpec::new("A").kind("flag"))
            .register("flag", BoolOptions::default().kind("flag"));
        let mut record = Record::from_json(json!({ "A": false }));
        schema.replace_values(&mut record);
        assert_eq!(record.boxed("A").and_then(|b| b.kind()), Some("flag"));
    }

    #[test]
    fn test_expand_expression() {
        let schema = EntitySchema::new("Doctors")
            .property(PropertySpec::new("A").expand("NavA", "Name"))
            .property(PropertySpec::new("B"))
            .property(PropertySpec::new("C").expand("NavC", "Title"));

        assert_eq!(schema.expand_expression(&Expand::None), None);
        assert_eq!(schema.expand_expression(&"Raw".into()).as_deref(), Some("Raw"));
        assert_eq!(
            schema.expand_expression(&true.into()).as_deref(),
            Some("NavA($select=Name),NavC($select=Title)")
        );
        assert_eq!(
            schema.expand_expression(&vec!["C", "B"].into()).as_deref(),
            Some("NavC($select=Title)")
        );
        assert_eq!(schema.expand_expression(&vec!["B"].into()), None);
    }

    #[test]
    fn test_prepare_params() {
        let schema = EntitySchema::new("Doctors").property(PropertySpec::new("A").expand("NavA", "Name"));
        let params = schema.prepare_params(QueryParams::new().param("$top", "5"), &Expand::All);
        assert_eq!(params.expand.as_deref(), Some("NavA($select=Name)"));
        assert_eq!(params.extra.get("$top").map(String::as_str), Some("5"));

        let params = schema.prepare_params(params, &Expand::None);
        assert!(params.expand.is_none());
    }
}
