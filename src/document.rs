//! Documents: named fields with one or more raw string values.

use serde_json::Value;

use crate::error::{AnalyzedStringError, Result};

/// A document as supplied for indexing, before any field conversion.
///
/// Field order is preserved; adding to an existing field appends a value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    fields: Vec<(String, Vec<String>)>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value to a field.
    pub fn add_field<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.fields.push((name, vec![value])),
        }
    }

    /// Builder form of [`Document::add_field`].
    pub fn with_field<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.add_field(name, value);
        self
    }

    /// Values of a field.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterate over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a document from a JSON object.
    ///
    /// Strings, numbers and booleans become single values, arrays of those
    /// become multiple values, and `null` fields are skipped.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(AnalyzedStringError::field(format!(
                "document must be a JSON object, got {value}"
            )));
        };

        let mut doc = Document::new();
        for (name, value) in map {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        doc.add_field(name.clone(), scalar_to_string(name, item)?);
                    }
                }
                other => doc.add_field(name.clone(), scalar_to_string(name, other)?),
            }
        }
        Ok(doc)
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json(&serde_json::from_str(json)?)
    }
}

fn scalar_to_string(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(AnalyzedStringError::field(format!(
            "field {name:?} has an unsupported value: {other}"
        ))),
    }
}
