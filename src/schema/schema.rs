//! The index schema: named field types and the fields that use them.
//!
//! [`IndexSchema`] is a cheap-to-clone handle over shared state guarded by a
//! read-write lock. Field types that need to look other types up at
//! conversion time hold a [`SchemaRef`], a non-owning back reference to the
//! same state, so they always see the current definitions, including those
//! installed by [`IndexSchema::reload`] or [`IndexSchema::redefine_field_type`].
//!
//! Lookups clone the field type's `Arc` out of the lock before calling into
//! it; no conversion ever runs while the lock is held.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, Weak};

use ahash::AHashMap;
use log::{debug, info};
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::document::Document;
use crate::error::{AnalyzedStringError, Result};
use crate::schema::config::{FieldTypeConfig, SchemaConfig};
use crate::schema::factory::FieldTypeFactory;
use crate::schema::field::{IndexableField, SchemaField};
use crate::schema::field_type::FieldType;

#[derive(Default)]
struct SchemaState {
    name: String,
    field_types: AHashMap<String, Arc<dyn FieldType>>,
    fields: AHashMap<String, SchemaField>,
    field_order: Vec<String>,
    version: u64,
}

impl SchemaState {
    fn insert_field(&mut self, field: SchemaField) -> Result<()> {
        if field.name.is_empty() {
            return Err(AnalyzedStringError::schema("Field name cannot be empty"));
        }
        if self.fields.contains_key(&field.name) {
            return Err(AnalyzedStringError::schema(format!(
                "Field '{}' already exists",
                field.name
            )));
        }
        if !self.field_types.contains_key(&field.field_type) {
            return Err(AnalyzedStringError::schema(format!(
                "Field '{}' uses unknown field type '{}'",
                field.name, field.field_type
            )));
        }

        self.field_order.push(field.name.clone());
        self.fields.insert(field.name.clone(), field);
        Ok(())
    }

    fn insert_field_type(&mut self, field_type: Arc<dyn FieldType>) -> Result<()> {
        let name = field_type.type_name().to_string();
        if name.is_empty() {
            return Err(AnalyzedStringError::schema("Field type name cannot be empty"));
        }
        if self.field_types.contains_key(&name) {
            return Err(AnalyzedStringError::schema(format!(
                "Field type '{name}' already exists"
            )));
        }
        self.field_types.insert(name, field_type);
        Ok(())
    }
}

/// A shared, reloadable index schema.
#[derive(Clone)]
pub struct IndexSchema {
    inner: Arc<RwLock<SchemaState>>,
}

impl fmt::Debug for IndexSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.read();
        f.debug_struct("IndexSchema")
            .field("name", &state.name)
            .field("version", &state.version)
            .field("field_types", &state.field_types.len())
            .field("fields", &state.field_order)
            .finish()
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new("default")
    }
}

impl IndexSchema {
    /// Create an empty schema.
    pub fn new<S: Into<String>>(name: S) -> Self {
        IndexSchema {
            inner: Arc::new(RwLock::new(SchemaState {
                name: name.into(),
                ..SchemaState::default()
            })),
        }
    }

    /// Build a schema from its configuration.
    pub fn from_config(config: &SchemaConfig) -> Result<Self> {
        let schema = Self::new(config.name.clone());
        schema.reload(config)?;
        Ok(schema)
    }

    /// Build a schema from JSON configuration text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_config(&SchemaConfig::from_json_str(json)?)
    }

    /// Build a schema from a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("loading schema from {}", path.display());
        Self::from_config(&SchemaConfig::from_file(path)?)
    }

    /// A non-owning reference to this schema for field types to hold.
    pub fn downgrade(&self) -> SchemaRef {
        SchemaRef {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Replace every field type and field with those of `config`.
    ///
    /// The new definitions are built completely before being swapped in, so a
    /// failing reload leaves the current schema untouched. Field types created
    /// by an earlier load keep working and resolve references against the new
    /// definitions.
    pub fn reload(&self, config: &SchemaConfig) -> Result<()> {
        let mut state = SchemaState {
            name: config.name.clone(),
            ..SchemaState::default()
        };

        for field_type_config in &config.field_types {
            let field_type = FieldTypeFactory::create(field_type_config, self.downgrade())?;
            state.insert_field_type(field_type)?;
        }
        for field_config in &config.fields {
            state.insert_field(SchemaField::from(field_config))?;
        }

        let mut current = self.inner.write();
        state.version = current.version + 1;
        *current = state;

        info!(
            "loaded schema {:?} version {} ({} field types, {} fields)",
            current.name,
            current.version,
            current.field_types.len(),
            current.fields.len()
        );
        Ok(())
    }

    /// Schema name.
    pub fn name(&self) -> String {
        self.inner.read().name.clone()
    }

    /// Incremented by every load and every field type change.
    pub fn version(&self) -> u64 {
        self.inner.read().version
    }

    /// Look up a field type by name.
    pub fn field_type_by_name(&self, name: &str) -> Option<Arc<dyn FieldType>> {
        self.inner.read().field_types.get(name).cloned()
    }

    /// Create and add a field type from its declaration.
    pub fn add_field_type(&self, config: &FieldTypeConfig) -> Result<()> {
        let field_type = FieldTypeFactory::create(config, self.downgrade())?;
        self.register_field_type(field_type)
    }

    /// Add an already initialized field type.
    pub fn register_field_type(&self, field_type: Arc<dyn FieldType>) -> Result<()> {
        let mut state = self.inner.write();
        state.insert_field_type(field_type)?;
        state.version += 1;
        Ok(())
    }

    /// Create a field type from its declaration, replacing any existing
    /// type of the same name.
    pub fn redefine_field_type(&self, config: &FieldTypeConfig) -> Result<()> {
        let field_type = FieldTypeFactory::create(config, self.downgrade())?;

        let mut state = self.inner.write();
        let replaced = state
            .field_types
            .insert(config.name.clone(), field_type)
            .is_some();
        state.version += 1;

        debug!(
            "{} field type {:?} (schema version {})",
            if replaced { "redefined" } else { "added" },
            config.name,
            state.version
        );
        Ok(())
    }

    /// Remove a field type that no field uses.
    pub fn remove_field_type(&self, name: &str) -> Result<()> {
        let mut state = self.inner.write();
        if let Some(field) = state.fields.values().find(|f| f.field_type == name) {
            return Err(AnalyzedStringError::schema(format!(
                "Field type '{name}' is used by field '{}'",
                field.name
            )));
        }
        if state.field_types.remove(name).is_none() {
            return Err(AnalyzedStringError::schema(format!(
                "Field type '{name}' does not exist"
            )));
        }
        state.version += 1;
        Ok(())
    }

    /// Add a field using an existing field type.
    pub fn add_field(&self, field: SchemaField) -> Result<()> {
        self.inner.write().insert_field(field)
    }

    /// Get a field declaration by name.
    pub fn field(&self, name: &str) -> Option<SchemaField> {
        self.inner.read().fields.get(name).cloned()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<String> {
        self.inner.read().field_order.clone()
    }

    /// Field type names, sorted.
    pub fn field_type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.read().field_types.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    fn resolve_field(&self, name: &str) -> Result<(SchemaField, Arc<dyn FieldType>)> {
        let state = self.inner.read();
        let field = state
            .fields
            .get(name)
            .ok_or_else(|| AnalyzedStringError::field(format!("undefined field: {name}")))?;
        let field_type = state.field_types.get(&field.field_type).ok_or_else(|| {
            AnalyzedStringError::schema(format!(
                "Field '{name}' uses unknown field type '{}'",
                field.field_type
            ))
        })?;
        Ok((field.clone(), Arc::clone(field_type)))
    }

    /// Convert one raw value of a field into its indexable form.
    pub fn create_field(&self, name: &str, value: &str) -> Result<IndexableField> {
        let (field, field_type) = self.resolve_field(name)?;
        let properties = field.effective_properties(field_type.properties());

        Ok(IndexableField {
            value: field_type.to_internal(value)?,
            name: field.name,
            stored: properties.stored,
            indexed: properties.indexed,
        })
    }

    /// Convert every value of a document.
    ///
    /// Fails on the first undefined field, on several values for a field that
    /// is not multi-valued, or on the first conversion error.
    pub fn convert_document(&self, doc: &Document) -> Result<Vec<IndexableField>> {
        let mut converted = Vec::new();

        for (name, values) in doc.iter() {
            let (field, field_type) = self.resolve_field(name)?;
            let properties = field.effective_properties(field_type.properties());

            if values.len() > 1 && !properties.multi_valued {
                return Err(AnalyzedStringError::bad_request(format!(
                    "multiple values encountered for non multiValued field {name}: {values:?}"
                )));
            }

            for value in values {
                converted.push(IndexableField {
                    name: field.name.clone(),
                    value: field_type.to_internal(value)?,
                    stored: properties.stored,
                    indexed: properties.indexed,
                });
            }
        }

        Ok(converted)
    }

    /// Convert many documents in parallel, keeping their order.
    pub fn convert_documents(&self, docs: &[Document]) -> Vec<Result<Vec<IndexableField>>> {
        docs.par_iter()
            .map(|doc| self.convert_document(doc))
            .collect()
    }
}

/// A non-owning handle to an [`IndexSchema`].
///
/// The default value refers to no schema; resolving through it fails.
#[derive(Clone, Default)]
pub struct SchemaRef {
    inner: Weak<RwLock<SchemaState>>,
}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRef")
            .field("live", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl SchemaRef {
    /// Get an owning handle to the schema, if it is still alive.
    pub fn upgrade(&self) -> Option<IndexSchema> {
        self.inner.upgrade().map(|inner| IndexSchema { inner })
    }

    /// Look up a field type by name in the current schema definitions.
    pub fn field_type_by_name(&self, name: &str) -> Result<Option<Arc<dyn FieldType>>> {
        let schema = self
            .upgrade()
            .ok_or_else(|| AnalyzedStringError::schema("schema is no longer available"))?;
        Ok(schema.field_type_by_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::config::FieldConfig;

    fn string_schema() -> IndexSchema {
        IndexSchema::from_config(
            &SchemaConfig::default()
                .with_field_type(FieldTypeConfig::new("string", "string"))
                .with_field(FieldConfig::new("id", "string")),
        )
        .unwrap()
    }

    #[test]
    fn test_from_config() {
        let schema = string_schema();

        assert_eq!(schema.name(), "default");
        assert_eq!(schema.version(), 1);
        assert_eq!(schema.field_names(), vec!["id"]);
        assert_eq!(schema.field_type_names(), vec!["string"]);
        assert!(schema.field_type_by_name("string").is_some());
        assert!(schema.field_type_by_name("missing").is_none());
    }

    #[test]
    fn test_field_with_unknown_type() {
        let config = SchemaConfig::default().with_field(FieldConfig::new("id", "nope"));
        let err = IndexSchema::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("unknown field type 'nope'"));
    }

    #[test]
    fn test_duplicate_names() {
        let schema = string_schema();
        assert!(schema.add_field(SchemaField::new("id", "string")).is_err());
        assert!(
            schema
                .add_field_type(&FieldTypeConfig::new("string", "string"))
                .is_err()
        );
    }

    #[test]
    fn test_failed_reload_keeps_schema() {
        let schema = string_schema();
        let bad = SchemaConfig::default().with_field_type(FieldTypeConfig::new("x", "bogus"));

        assert!(schema.reload(&bad).is_err());
        assert_eq!(schema.version(), 1);
        assert_eq!(schema.field_names(), vec!["id"]);
    }

    #[test]
    fn test_remove_field_type() {
        let schema = string_schema();
        assert!(schema.remove_field_type("string").is_err());

        schema
            .add_field_type(&FieldTypeConfig::new("unused", "string"))
            .unwrap();
        schema.remove_field_type("unused").unwrap();
        assert!(schema.remove_field_type("unused").is_err());
    }

    #[test]
    fn test_create_field_unknown() {
        let schema = string_schema();
        let err = schema.create_field("missing", "x").unwrap_err();
        assert!(matches!(err, AnalyzedStringError::Field(_)));
    }

    #[test]
    fn test_multi_valued_check() {
        let schema = string_schema();
        let doc = Document::new().with_field("id", "1").with_field("id", "2");

        let err = schema.convert_document(&doc).unwrap_err();
        assert!(err.is_bad_request());

        schema
            .add_field(SchemaField::new("tags", "string").multi_valued(true))
            .unwrap();
        let doc = Document::new().with_field("tags", "a").with_field("tags", "b");
        assert_eq!(schema.convert_document(&doc).unwrap().len(), 2);
    }

    #[test]
    fn test_schema_ref_outlives_schema() {
        let schema = string_schema();
        let schema_ref = schema.downgrade();
        assert!(schema_ref.field_type_by_name("string").unwrap().is_some());

        drop(schema);
        assert!(schema_ref.upgrade().is_none());
        assert!(schema_ref.field_type_by_name("string").is_err());
    }
}
