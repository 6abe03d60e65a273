//! Creation of field types from their declarations.

use std::sync::Arc;

use log::debug;

use crate::error::{AnalyzedStringError, Result};
use crate::schema::analyzed_string::AnalyzedStringFieldType;
use crate::schema::config::FieldTypeConfig;
use crate::schema::field_type::FieldType;
use crate::schema::schema::SchemaRef;
use crate::schema::str_field::StrFieldType;
use crate::schema::text_field::TextFieldType;

/// Instantiates and initializes field types by class name.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldTypeFactory;

impl FieldTypeFactory {
    /// Class names and the aliases they are also known by.
    pub const CLASSES: [(&'static str, &'static [&'static str]); 3] = [
        (StrFieldType::CLASS, &["solr.StrField", "StrField"]),
        (TextFieldType::CLASS, &["solr.TextField", "TextField"]),
        (AnalyzedStringFieldType::CLASS, &["AnalyzedString"]),
    ];

    /// Map a class name or alias to its canonical class name.
    pub fn canonical_class(class: &str) -> Option<&'static str> {
        Self::CLASSES
            .iter()
            .find(|(name, aliases)| *name == class || aliases.contains(&class))
            .map(|(name, _)| *name)
    }

    /// Create, name and initialize a field type from its declaration.
    ///
    /// Arguments the type does not consume are rejected.
    pub fn create(config: &FieldTypeConfig, schema: SchemaRef) -> Result<Arc<dyn FieldType>> {
        let class = Self::canonical_class(&config.class).ok_or_else(|| {
            AnalyzedStringError::schema(format!(
                "unknown field type class {:?} for field type {:?}",
                config.class, config.name
            ))
        })?;

        let mut field_type: Box<dyn FieldType> = match class {
            TextFieldType::CLASS => Box::new(Self::text_field_type(config)?),
            _ if config.has_analyzers() => {
                return Err(AnalyzedStringError::schema(format!(
                    "field type {:?} of class {class:?} does not accept analyzers",
                    config.name
                )));
            }
            StrFieldType::CLASS => Box::new(StrFieldType::new()),
            _ => Box::new(AnalyzedStringFieldType::new()),
        };

        field_type.set_type_name(config.name.clone());

        let mut args = config.args.clone();
        field_type.init(schema, &mut args)?;

        if !args.is_empty() {
            let mut invalid: Vec<_> = args.keys().map(String::as_str).collect();
            invalid.sort_unstable();
            return Err(AnalyzedStringError::schema(format!(
                "field type {:?} ({class}) invalid arguments: {}",
                config.name,
                invalid.join(", ")
            )));
        }

        debug!("created field type {:?} of class {class}", config.name);
        Ok(Arc::from(field_type))
    }

    fn text_field_type(config: &FieldTypeConfig) -> Result<TextFieldType> {
        let mut field_type = match &config.analyzer {
            Some(analyzer) => TextFieldType::with_analyzer(analyzer.build()?),
            None => TextFieldType::new()?,
        };
        if let Some(analyzer) = &config.index_analyzer {
            field_type.set_index_analyzer(analyzer.build()?);
        }
        if let Some(analyzer) = &config.query_analyzer {
            field_type.set_query_analyzer(analyzer.build()?);
        }
        Ok(field_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::schema::config::{AnalyzerConfig, BuiltinAnalyzer};

    #[test]
    fn test_canonical_class() {
        assert_eq!(FieldTypeFactory::canonical_class("solr.StrField"), Some("string"));
        assert_eq!(FieldTypeFactory::canonical_class("text"), Some("text"));
        assert_eq!(
            FieldTypeFactory::canonical_class("AnalyzedString"),
            Some("analyzed_string")
        );
        assert_eq!(FieldTypeFactory::canonical_class("solr.IntField"), None);
    }

    #[test]
    fn test_create_string_type() {
        let config = FieldTypeConfig::new("string", "string").with_arg("docValues", "true");
        let field_type = FieldTypeFactory::create(&config, SchemaRef::default()).unwrap();

        assert_eq!(field_type.type_name(), "string");
        assert_eq!(field_type.class_name(), "string");
        assert!(field_type.properties().doc_values);
    }

    #[test]
    fn test_create_text_type_with_split_analyzers() {
        let mut config = FieldTypeConfig::new("body", "solr.TextField");
        config.query_analyzer = Some(AnalyzerConfig::Builtin {
            builtin: BuiltinAnalyzer::Keyword,
        });

        let field_type = FieldTypeFactory::create(&config, SchemaRef::default()).unwrap();
        assert_eq!(field_type.index_analyzer().unwrap().name(), "standard");
        assert_eq!(field_type.query_analyzer().unwrap().name(), "keyword");
    }

    #[test]
    fn test_leftover_args_rejected() {
        let config = FieldTypeConfig::new("s", "string").with_arg("bogus", "1");
        let err = FieldTypeFactory::create(&config, SchemaRef::default()).unwrap_err();

        assert!(matches!(err, AnalyzedStringError::Schema(_)));
        assert!(err.to_string().contains("invalid arguments: bogus"));
    }

    #[test]
    fn test_analyzers_rejected_on_string_types() {
        let config = FieldTypeConfig::new("s", "string").with_analyzer(AnalyzerConfig::Builtin {
            builtin: BuiltinAnalyzer::Standard,
        });
        assert!(FieldTypeFactory::create(&config, SchemaRef::default()).is_err());
    }

    #[test]
    fn test_analyzed_string_missing_field_type() {
        let config = FieldTypeConfig::new("normalized", "analyzed_string");
        let err = FieldTypeFactory::create(&config, SchemaRef::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
    }

    #[test]
    fn test_unknown_class() {
        let config = FieldTypeConfig::new("n", "solr.IntPointField");
        let err = FieldTypeFactory::create(&config, SchemaRef::default()).unwrap_err();
        assert!(err.to_string().contains("unknown field type class"));
    }
}
