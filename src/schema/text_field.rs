//! Text field type with index and query analyzers.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::error::Result;
use crate::schema::field_type::{FieldProperties, FieldType, FieldTypeArgs};
use crate::schema::schema::SchemaRef;

/// A text field whose values are run through an analyzer when indexed.
///
/// Index and query analyzers default to [`StandardAnalyzer`] and can be set
/// independently.
#[derive(Clone)]
pub struct TextFieldType {
    type_name: String,
    properties: FieldProperties,
    index_analyzer: Arc<dyn Analyzer>,
    query_analyzer: Arc<dyn Analyzer>,
}

impl TextFieldType {
    /// Class name this type is registered under.
    pub const CLASS: &'static str = "text";

    /// Create a new text field type with standard analyzers.
    pub fn new() -> Result<Self> {
        let analyzer: Arc<dyn Analyzer> = Arc::new(StandardAnalyzer::new()?);
        Ok(Self::with_analyzer(analyzer))
    }

    /// Create a new text field type using one analyzer for indexing and queries.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        TextFieldType {
            type_name: String::new(),
            properties: FieldProperties::default(),
            index_analyzer: Arc::clone(&analyzer),
            query_analyzer: analyzer,
        }
    }

    /// Replace the index analyzer.
    pub fn set_index_analyzer(&mut self, analyzer: Arc<dyn Analyzer>) {
        self.index_analyzer = analyzer;
    }

    /// Replace the query analyzer.
    pub fn set_query_analyzer(&mut self, analyzer: Arc<dyn Analyzer>) {
        self.query_analyzer = analyzer;
    }

    /// Borrow the index analyzer.
    pub fn index_analyzer_ref(&self) -> &Arc<dyn Analyzer> {
        &self.index_analyzer
    }

    /// Borrow the query analyzer.
    pub fn query_analyzer_ref(&self) -> &Arc<dyn Analyzer> {
        &self.query_analyzer
    }
}

impl fmt::Debug for TextFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFieldType")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties)
            .field("index_analyzer", &self.index_analyzer.name())
            .field("query_analyzer", &self.query_analyzer.name())
            .finish()
    }
}

impl FieldType for TextFieldType {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn set_type_name(&mut self, name: String) {
        self.type_name = name;
    }

    fn class_name(&self) -> &'static str {
        Self::CLASS
    }

    fn init(&mut self, _schema: SchemaRef, args: &mut FieldTypeArgs) -> Result<()> {
        self.properties = FieldProperties::default().consume(args)?;
        debug!(
            "initialized text field type {:?} (index analyzer {}, query analyzer {})",
            self.type_name,
            self.index_analyzer.name(),
            self.query_analyzer.name()
        );
        Ok(())
    }

    fn to_internal(&self, value: &str) -> Result<String> {
        Ok(value.to_string())
    }

    fn properties(&self) -> &FieldProperties {
        &self.properties
    }

    fn index_analyzer(&self) -> Option<Arc<dyn Analyzer>> {
        Some(Arc::clone(&self.index_analyzer))
    }

    fn query_analyzer(&self) -> Option<Arc<dyn Analyzer>> {
        Some(Arc::clone(&self.query_analyzer))
    }

    fn as_text(&self) -> Option<&TextFieldType> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::KeywordAnalyzer;

    #[test]
    fn test_default_analyzers() {
        let field_type = TextFieldType::new().unwrap();
        assert_eq!(field_type.index_analyzer_ref().name(), "standard");
        assert_eq!(field_type.query_analyzer_ref().name(), "standard");
        assert!(field_type.as_text().is_some());
    }

    #[test]
    fn test_separate_query_analyzer() {
        let mut field_type = TextFieldType::new().unwrap();
        field_type.set_query_analyzer(Arc::new(KeywordAnalyzer::new()));

        assert_eq!(field_type.index_analyzer().unwrap().name(), "standard");
        assert_eq!(field_type.query_analyzer().unwrap().name(), "keyword");
    }
}
