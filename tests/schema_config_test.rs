//! Integration tests for loading schemas from configuration files.

use std::fs;

use analyzed_string::error::{AnalyzedStringError, Result};
use analyzed_string::schema::{IndexSchema, SchemaConfig};
use tempfile::TempDir;

const SCHEMA: &str = r#"{
    "name": "products",
    "field_types": [
        { "name": "string", "class": "string", "args": { "docValues": true } },
        { "name": "folded", "class": "text",
          "index_analyzer": { "tokenizer": { "type": "whitespace" },
                              "filters": [ { "type": "lowercase" } ],
                              "name": "folding" },
          "query_analyzer": { "builtin": "keyword" } },
        { "name": "sku", "class": "analyzed_string",
          "args": { "fieldType": "folded", "stored": false } }
    ],
    "fields": [
        { "name": "id", "type": "string" },
        { "name": "sku", "type": "sku", "multiValued": true }
    ]
}"#;

#[test]
fn test_load_from_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("schema.json");
    fs::write(&path, SCHEMA)?;

    let schema = IndexSchema::from_file(&path)?;

    assert_eq!(schema.name(), "products");
    assert_eq!(schema.field_type_names(), vec!["folded", "sku", "string"]);
    assert_eq!(schema.field_names(), vec!["id", "sku"]);

    let folded = schema.field_type_by_name("folded").unwrap();
    assert_eq!(folded.index_analyzer().unwrap().name(), "folding");
    assert_eq!(folded.query_analyzer().unwrap().name(), "keyword");
    assert!(schema.field_type_by_name("string").unwrap().properties().doc_values);

    let field = schema.create_field("sku", "AB-12")?;
    assert_eq!(field.value, "ab-12");
    assert!(!field.stored);

    Ok(())
}

#[test]
fn test_index_analyzer_drives_normalization() -> Result<()> {
    let schema = IndexSchema::from_json_str(SCHEMA)?;

    // The query analyzer would keep the case; the index analyzer folds it.
    assert_eq!(schema.create_field("sku", "XY")?.value, "xy");

    let err = schema.create_field("sku", "two words").unwrap_err();
    assert!(err.is_bad_request());
    assert!(err.to_string().contains("too many terms"));

    Ok(())
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = IndexSchema::from_file(temp_dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, AnalyzedStringError::Io(_)));
}

#[test]
fn test_malformed_json() {
    let err = IndexSchema::from_json_str("{ \"field_types\": [").unwrap_err();
    assert!(matches!(err, AnalyzedStringError::Json(_)));
}

#[test]
fn test_invalid_regex_tokenizer() {
    let json = r#"{ "field_types": [ { "name": "t", "class": "text",
        "analyzer": { "tokenizer": { "type": "regex", "pattern": "(" } } } ] }"#;
    let err = IndexSchema::from_json_str(json).unwrap_err();
    assert!(matches!(err, AnalyzedStringError::Analysis(_)));
}

#[test]
fn test_config_round_trip_through_serde() -> Result<()> {
    let config = SchemaConfig::from_json_str(SCHEMA)?;
    let json = serde_json::to_string(&config)?;
    let schema = IndexSchema::from_json_str(&json)?;

    assert_eq!(schema.create_field("sku", "Q")?.value, "q");
    Ok(())
}

#[test]
fn test_reload_from_changed_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("schema.json");
    fs::write(&path, SCHEMA)?;

    let schema = IndexSchema::from_file(&path)?;
    let sku = schema.field_type_by_name("sku").unwrap();
    assert_eq!(sku.to_internal("AB")?, "ab");

    fs::write(&path, SCHEMA.replace("\"name\": \"folding\"", "\"name\": \"plain\"").replace(
        "\"filters\": [ { \"type\": \"lowercase\" } ],",
        "\"filters\": [],",
    ))?;
    schema.reload(&SchemaConfig::from_file(&path)?)?;

    assert_eq!(sku.to_internal("AB")?, "AB");
    assert_eq!(
        schema
            .field_type_by_name("folded")
            .unwrap()
            .index_analyzer()
            .unwrap()
            .name(),
        "plain"
    );

    Ok(())
}
