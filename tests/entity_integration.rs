//! Integration tests for entity schemas and their TOML definitions.

use odata_kit::entity::{EntityError, TypeConfig};
use odata_kit::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

const VISITS: &str = r#"
    endpoint = "Visits"

    [[properties]]
    key = "IDDOCTOR"
    type = "doctor"
    expand = "Doctor"
    expandText = "Name"

    [[properties]]
    key = "IDROOM"
    type = "doctor"
    expand = "Room"
    expand_text = "Code"

    [[properties]]
    key = "PAID"
    type = "flag"

    [[properties]]
    key = "AMOUNT"
    type = "money"

    [[properties]]
    key = "WHEN"
    type = "moment"

    [types.doctor]
    box = "lookup"

    [types.flag]
    box = "bool"
    to_json_as_int = true

    [types.money]
    box = "number"
    use_grouping = true
    fraction_digits = 2

    [types.moment]
    box = "date"
    has_time = true
"#;

fn visits() -> EntitySchema {
    EntityConfig::from_str(VISITS)
        .expect("Failed to parse config")
        .into_schema()
        .expect("Failed to build schema")
}

/// Test loading a full definition
#[test]
fn test_definition() {
    let schema = visits();
    assert_eq!(schema.endpoint, "Visits");
    assert_eq!(schema.properties.len(), 5);
    assert_eq!(
        schema.types.values().map(TypeSpec::box_name).collect::<Vec<_>>(),
        vec!["lookup", "bool", "number", "date"]
    );
}

/// Test replacing a page of records
#[test]
fn test_replace_page() {
    let schema = visits();
    let mut page: Vec<Record> = serde_json::from_value(json!([
        {
            "IDDOCTOR": 3,
            "Doctor": { "Name": "Dr. Grey" },
            "PAID": 1,
            "AMOUNT": 2500,
            "WHEN": null,
        },
        {
            "IDDOCTOR": null,
            "Doctor": null,
            "PAID": 0,
            "AMOUNT": null,
        },
    ]))
    .expect("Failed to read records");

    schema.replace_all(&mut page);

    let shown: Vec<Vec<String>> = page
        .iter()
        .map(|r| {
            ["IDDOCTOR", "PAID", "AMOUNT", "WHEN"]
                .iter()
                .map(|k| r.boxed(k).map(|b| b.to_string()).unwrap_or_else(|| "-".to_string()))
                .collect()
        })
        .collect();
    assert_eq!(
        shown,
        vec![
            vec!["Dr. Grey", "Sí", "2.500,00", ""],
            vec!["", "No", "", "-"],
        ]
    );

    insta::assert_snapshot!(
        serde_json::to_string(&page).unwrap(),
        @r#"[{"IDDOCTOR":3,"Doctor":{"Name":"Dr. Grey"},"PAID":1,"AMOUNT":2500,"WHEN":null},{"IDDOCTOR":null,"Doctor":null,"PAID":0,"AMOUNT":null}]"#
    );
}

/// Test `$expand` construction
#[test]
fn test_expand() {
    let schema = visits();
    assert_eq!(
        schema.expand_expression(&Expand::All).as_deref(),
        Some("Doctor($select=Name),Room($select=Code)")
    );
    assert_eq!(
        schema.expand_expression(&Expand::from(vec!["IDROOM"])).as_deref(),
        Some("Room($select=Code)")
    );

    let params = schema
        .prepare_params(
            QueryParams::new().filter(Predicate::eq("PAID", 1)),
            &Expand::All,
        )
        .apply_filter()
        .unwrap();
    assert_eq!(
        params.pairs().unwrap(),
        vec![
            ("$filter".to_string(), "(PAID eq 1)".to_string()),
            ("$expand".to_string(), "Doctor($select=Name),Room($select=Code)".to_string()),
        ]
    );
}

/// Test definitions built in code and from TOML agree
#[test]
fn test_code_and_config_agree() {
    let schema = EntitySchema::new("Visits")
        .property(PropertySpec::new("PAID").kind("flag"))
        .register("flag", BoolOptions::default().to_json_as_int(true).kind("flag"));

    let mut a = Record::from_json(json!({ "PAID": "sí" }));
    let mut b = a.clone();
    schema.replace_values(&mut a);
    visits().replace_values(&mut b);
    assert_eq!(a.to_json(), b.to_json());
    assert_eq!(a.to_json(), json!({ "PAID": 1 }));
}

/// Test rejected definitions
#[test]
fn test_rejected_definitions() {
    let err = EntityConfig::from_str("endpoint = 3").unwrap_err();
    assert!(matches!(err, EntityError::TomlError { .. }));

    let err = EntityConfig::from_str("endpoint = \"X\"\nunknown = 1").unwrap_err();
    assert!(matches!(err, EntityError::TomlError { .. }));

    let config = EntityConfig::from_str(
        r#"
        endpoint = "X"
        [[properties]]
        key = "A"
        type = "nope"
        "#,
    )
    .unwrap();
    assert!(matches!(config.into_schema(), Err(EntityError::UnknownType { .. })));

    let config = EntityConfig::from_str("endpoint = \"X\"\n[types.plain]\nbox = \"value\"").unwrap();
    assert_eq!(config.types.get("plain"), Some(&TypeConfig::Value { kind: None }));
}
