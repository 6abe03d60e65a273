//! Schema definition: field types, fields and their configuration.
//!
//! An [`IndexSchema`] holds named field types created by the
//! [`FieldTypeFactory`] and the fields declared against them. Values are
//! converted to their indexable form through the field's type.

pub mod analyzed_string;
pub mod config;
pub mod factory;
pub mod field;
pub mod field_type;
#[allow(clippy::module_inception)]
pub mod schema;
pub mod str_field;
pub mod text_field;

pub use analyzed_string::{AnalyzedStringFieldType, FIELD_TYPE_ATTR};
pub use config::{
    AnalyzerConfig, BuiltinAnalyzer, FieldConfig, FieldTypeConfig, FilterConfig, SchemaConfig,
    TokenizerConfig,
};
pub use factory::FieldTypeFactory;
pub use field::{IndexableField, SchemaField};
pub use field_type::{FieldProperties, FieldType, FieldTypeArgs};
pub use schema::{IndexSchema, SchemaRef};
pub use str_field::StrFieldType;
pub use text_field::TextFieldType;
