//! The field type extension point.
//!
//! A field type is a named definition in the schema describing how the values
//! of a field are converted, analyzed, stored and indexed. Every field type is
//! created once per declaration, initialized once with its configuration
//! mapping via [`FieldType::init`], and then asked to convert values with
//! [`FieldType::to_internal`] from any number of indexing threads.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::error::{AnalyzedStringError, Result};
use crate::schema::schema::SchemaRef;
use crate::schema::text_field::TextFieldType;

/// The configuration mapping handed to a field type at setup.
///
/// Field types remove the keys they understand; whatever is left after
/// [`FieldType::init`] returns is rejected by the schema.
pub type FieldTypeArgs = HashMap<String, String>;

/// Trait for field types that define how field values are processed.
pub trait FieldType: Send + Sync + fmt::Debug {
    /// The name this type was declared under in the schema.
    fn type_name(&self) -> &str;

    /// Set the declared name. Called by the schema before [`FieldType::init`].
    fn set_type_name(&mut self, name: String);

    /// The class name this type is registered under in the factory.
    fn class_name(&self) -> &'static str;

    /// Initialize this type from its configuration mapping.
    ///
    /// Implementations remove every key they consume from `args`.
    fn init(&mut self, schema: SchemaRef, args: &mut FieldTypeArgs) -> Result<()>;

    /// Convert an external value into the form that is stored and indexed.
    fn to_internal(&self, value: &str) -> Result<String>;

    /// Convert an internal value back into its external form.
    fn to_external(&self, internal: &str) -> String {
        internal.to_string()
    }

    /// Storage and indexing properties of this type.
    fn properties(&self) -> &FieldProperties;

    /// The analyzer used when indexing values of this type, if any.
    fn index_analyzer(&self) -> Option<Arc<dyn Analyzer>> {
        None
    }

    /// The analyzer used when parsing queries against this type, if any.
    fn query_analyzer(&self) -> Option<Arc<dyn Analyzer>> {
        None
    }

    /// View this type as a text-analysis type.
    fn as_text(&self) -> Option<&TextFieldType> {
        None
    }
}

/// Storage and indexing flags shared by all field types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProperties {
    pub indexed: bool,
    pub stored: bool,
    pub doc_values: bool,
    pub multi_valued: bool,
    pub omit_norms: bool,
    pub sort_missing_first: bool,
    pub sort_missing_last: bool,
}

impl Default for FieldProperties {
    fn default() -> Self {
        FieldProperties {
            indexed: true,
            stored: true,
            doc_values: false,
            multi_valued: false,
            omit_norms: false,
            sort_missing_first: false,
            sort_missing_last: false,
        }
    }
}

impl FieldProperties {
    /// Argument keys understood by [`FieldProperties::consume`].
    pub const KEYS: [&'static str; 7] = [
        "indexed",
        "stored",
        "docValues",
        "multiValued",
        "omitNorms",
        "sortMissingFirst",
        "sortMissingLast",
    ];

    /// Remove the property keys from `args` and apply them on top of `self`.
    pub fn consume(mut self, args: &mut FieldTypeArgs) -> Result<Self> {
        for key in Self::KEYS {
            let Some(raw) = args.remove(key) else {
                continue;
            };
            let value = parse_bool(key, &raw)?;
            match key {
                "indexed" => self.indexed = value,
                "stored" => self.stored = value,
                "docValues" => self.doc_values = value,
                "multiValued" => self.multi_valued = value,
                "omitNorms" => self.omit_norms = value,
                "sortMissingFirst" => self.sort_missing_first = value,
                _ => self.sort_missing_last = value,
            }
        }

        if self.sort_missing_first && self.sort_missing_last {
            return Err(AnalyzedStringError::invalid_config(
                "sortMissingFirst and sortMissingLast are mutually exclusive",
            ));
        }

        Ok(self)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        v if v.eq_ignore_ascii_case("true") => Ok(true),
        v if v.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(AnalyzedStringError::schema(format!(
            "invalid boolean value {other:?} for {key}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> FieldTypeArgs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_consume_known_keys() {
        let mut args = args(&[("stored", "false"), ("docValues", "TRUE"), ("other", "x")]);
        let props = FieldProperties::default().consume(&mut args).unwrap();

        assert!(!props.stored);
        assert!(props.doc_values);
        assert!(props.indexed);
        assert_eq!(args.len(), 1);
        assert!(args.contains_key("other"));
    }

    #[test]
    fn test_invalid_boolean() {
        let mut args = args(&[("indexed", "yes")]);
        let err = FieldProperties::default().consume(&mut args).unwrap_err();
        assert!(err.to_string().contains("indexed"));
    }

    #[test]
    fn test_sort_missing_conflict() {
        let mut args = args(&[("sortMissingFirst", "true"), ("sortMissingLast", "true")]);
        assert!(FieldProperties::default().consume(&mut args).is_err());
    }
}
