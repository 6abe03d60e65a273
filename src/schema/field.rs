//! Schema fields and the indexable values produced from them.

use serde::{Deserialize, Serialize};

use crate::schema::field_type::FieldProperties;

/// A field declared in the schema.
///
/// Property overrides left as `None` fall back to the field type's defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub field_type: String,
    pub stored: Option<bool>,
    pub indexed: Option<bool>,
    pub multi_valued: Option<bool>,
}

impl SchemaField {
    /// Declare a field using the type's default properties.
    pub fn new<N: Into<String>, T: Into<String>>(name: N, field_type: T) -> Self {
        SchemaField {
            name: name.into(),
            field_type: field_type.into(),
            stored: None,
            indexed: None,
            multi_valued: None,
        }
    }

    /// Override whether values are stored.
    pub fn stored(mut self, stored: bool) -> Self {
        self.stored = Some(stored);
        self
    }

    /// Override whether values are indexed.
    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = Some(indexed);
        self
    }

    /// Override whether the field accepts several values per document.
    pub fn multi_valued(mut self, multi_valued: bool) -> Self {
        self.multi_valued = Some(multi_valued);
        self
    }

    /// Apply this field's overrides on top of its type's properties.
    pub fn effective_properties(&self, type_properties: &FieldProperties) -> FieldProperties {
        FieldProperties {
            stored: self.stored.unwrap_or(type_properties.stored),
            indexed: self.indexed.unwrap_or(type_properties.indexed),
            multi_valued: self.multi_valued.unwrap_or(type_properties.multi_valued),
            ..*type_properties
        }
    }
}

/// A converted field value ready to be stored and indexed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexableField {
    pub name: String,
    pub value: String,
    pub stored: bool,
    pub indexed: bool,
}
