//! The base string field type.

use log::debug;

use crate::error::Result;
use crate::schema::field_type::{FieldProperties, FieldType, FieldTypeArgs};
use crate::schema::schema::SchemaRef;

/// A string field indexed verbatim as a single term.
///
/// Accepts the common property keys (`indexed`, `stored`, `docValues`,
/// `multiValued`, `omitNorms`, `sortMissingFirst`, `sortMissingLast`) and
/// converts values unchanged.
#[derive(Clone, Debug, Default)]
pub struct StrFieldType {
    type_name: String,
    properties: FieldProperties,
}

impl StrFieldType {
    /// Class name this type is registered under.
    pub const CLASS: &'static str = "string";

    /// Create a new, uninitialized string field type.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FieldType for StrFieldType {
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
            "initialized string field type {:?}: {:?}",
            self.type_name, self.properties
        );
        Ok(())
    }

    fn to_internal(&self, value: &str) -> Result<String> {
        Ok(value.to_string())
    }

    fn properties(&self) -> &FieldProperties {
        &self.properties
    }
}
