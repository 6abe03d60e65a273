//! A string field type normalized by another field type's analyzer.
//!
//! `AnalyzedStringFieldType` behaves like [`StrFieldType`] except that every
//! value is first run through the multi-term analysis of a *referenced* text
//! field type, named by the required `fieldType` attribute. The result is the
//! single normalized term used for indexing and for exact, range and prefix
//! matching.
//!
//! The referenced type is looked up in the schema on every conversion, so a
//! schema reload that redefines it takes effect immediately.
//!
//! # Examples
//!
//! ```
//! use analyzed_string::schema::IndexSchema;
//!
//! let schema = IndexSchema::from_json_str(r#"{
//!     "field_types": [
//!         { "name": "lowercase_text", "class": "text",
//!           "analyzer": { "tokenizer": { "type": "whole" },
//!                         "filters": [ { "type": "lowercase" } ] } },
//!         { "name": "normalized", "class": "analyzed_string",
//!           "args": { "fieldType": "lowercase_text" } }
//!     ],
//!     "fields": [ { "name": "f", "type": "normalized" } ]
//! }"#).unwrap();
//!
//! let field = schema.create_field("f", "Hello World").unwrap();
//! assert_eq!(field.value, "hello world");
//! ```

use std::any;
use std::sync::Arc;

use log::{debug, warn};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::multi_term::analyze_multi_term;
use crate::error::{AnalyzedStringError, Result};
use crate::schema::field_type::{FieldProperties, FieldType, FieldTypeArgs};
use crate::schema::schema::SchemaRef;
use crate::schema::str_field::StrFieldType;

/// Attribute naming the field type whose analyzer normalizes values.
pub const FIELD_TYPE_ATTR: &str = "fieldType";

/// A string field type whose values are normalized by a referenced text type.
#[derive(Clone, Debug, Default)]
pub struct AnalyzedStringFieldType {
    base: StrFieldType,
    field_type: Option<String>,
    schema: SchemaRef,
}

impl AnalyzedStringFieldType {
    /// Class name this type is registered under.
    pub const CLASS: &'static str = "analyzed_string";

    /// Create a new, uninitialized analyzed string field type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the referenced field type, once initialized.
    pub fn referenced_type(&self) -> Option<&str> {
        self.field_type.as_deref()
    }

    /// Resolve the index analyzer of the referenced type from the schema.
    fn resolve_analyzer(&self, referenced: &str) -> Result<Arc<dyn Analyzer>> {
        let Some(resolved) = self.schema.field_type_by_name(referenced)? else {
            warn!(
                "field type {:?} references unknown field type {referenced:?}",
                self.type_name()
            );
            return Err(AnalyzedStringError::bad_request(format!(
                "Can't create fieldType {}; field {referenced} doesn't exist",
                self.type_name()
            )));
        };

        match resolved.as_text() {
            Some(text) => Ok(Arc::clone(text.index_analyzer_ref())),
            None => Err(AnalyzedStringError::bad_request(format!(
                "Can't create fieldType {}; field type {referenced} is not an analyzed text type",
                self.type_name()
            ))),
        }
    }
}

impl FieldType for AnalyzedStringFieldType {
    fn type_name(&self) -> &str {
        self.base.type_name()
    }

    fn set_type_name(&mut self, name: String) {
        self.base.set_type_name(name);
    }

    fn class_name(&self) -> &'static str {
        Self::CLASS
    }

    fn init(&mut self, schema: SchemaRef, args: &mut FieldTypeArgs) -> Result<()> {
        self.schema = schema.clone();

        let field_type = args.remove(FIELD_TYPE_ATTR).ok_or_else(|| {
            AnalyzedStringError::bad_request(format!(
                "{} needs a fieldType attribute",
                any::type_name::<Self>()
            ))
        })?;

        self.base.init(schema, args)?;

        debug!(
            "field type {:?} normalizes values with the analyzer of {field_type:?}",
            self.type_name()
        );
        self.field_type = Some(field_type);
        Ok(())
    }

    fn to_internal(&self, value: &str) -> Result<String> {
        let referenced = self.field_type.as_deref().ok_or_else(|| {
            AnalyzedStringError::schema(format!(
                "field type {:?} is not initialized",
                self.type_name()
            ))
        })?;

        let analyzer = self.resolve_analyzer(referenced)?;
        analyze_multi_term(referenced, value, analyzer.as_ref())?.into_string()
    }

    fn properties(&self) -> &FieldProperties {
        self.base.properties()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn args(pairs: &[(&str, &str)]) -> FieldTypeArgs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_init_requires_field_type() {
        let mut field_type = AnalyzedStringFieldType::new();
        let err = field_type
            .init(SchemaRef::default(), &mut args(&[("stored", "true")]))
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert!(err.to_string().contains("AnalyzedStringFieldType"));
        assert!(err.to_string().contains("needs a fieldType attribute"));
        assert!(field_type.referenced_type().is_none());
    }

    #[test]
    fn test_init_consumes_field_type_and_forwards_rest() {
        let mut field_type = AnalyzedStringFieldType::new();
        let mut args = args(&[("fieldType", "whatever"), ("stored", "false"), ("extra", "1")]);

        field_type.init(SchemaRef::default(), &mut args).unwrap();

        assert_eq!(field_type.referenced_type(), Some("whatever"));
        assert!(!field_type.properties().stored);
        assert!(!args.contains_key(FIELD_TYPE_ATTR));
        assert!(!args.contains_key("stored"));
        assert_eq!(args.get("extra").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_to_internal_before_init() {
        let field_type = AnalyzedStringFieldType::new();
        let err = field_type.to_internal("x").unwrap_err();
        assert!(matches!(err, AnalyzedStringError::Schema(_)));
    }

    #[test]
    fn test_to_internal_without_live_schema() {
        let mut field_type = AnalyzedStringFieldType::new();
        field_type
            .init(SchemaRef::default(), &mut args(&[("fieldType", "lowercase_text")]))
            .unwrap();

        let err = field_type.to_internal("x").unwrap_err();
        assert!(matches!(err, AnalyzedStringError::Schema(_)));
    }
}
