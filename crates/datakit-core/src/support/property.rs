//! Property descriptors
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use crate::resolvers::Cast;
use crate::transformation::Transformer;
use crate::value::{Value, ValueKind};
use std::fmt;
use std::sync::Arc;

/// Declared type of a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    /// Accepts anything, including `null`
    Mixed,
    Bool,
    Int,
    Float,
    String,
    Array,
    DateTime,
    /// An enumeration, by name
    Enum(String),
    /// A nested data object of the named class
    Data(String),
    /// A collection of data objects of the named class
    DataCollection(String),
}

impl PropertyType {
    /// Value kind a well-formed value of this type has; `None` for mixed
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            PropertyType::Mixed => None,
            PropertyType::Bool => Some(ValueKind::Bool),
            PropertyType::Int => Some(ValueKind::Int),
            PropertyType::Float => Some(ValueKind::Float),
            PropertyType::String => Some(ValueKind::String),
            PropertyType::Array => Some(ValueKind::List),
            PropertyType::DateTime => Some(ValueKind::DateTime),
            PropertyType::Enum(_) => Some(ValueKind::Enum),
            PropertyType::Data(_) => Some(ValueKind::Data),
            PropertyType::DataCollection(_) => Some(ValueKind::Collection),
        }
    }
}

/// Static metadata about one property of a data class
///
/// Built once with the class and shared by every instance. Internal storage
/// always uses [`name`](Self::name); the mapped names only apply when reading
/// payloads and writing output.
#[derive(Clone)]
pub struct DataProperty {
    name: String,
    ty: PropertyType,
    nullable: bool,
    optional: bool,
    lazy: bool,
    validate: bool,
    default: Option<Value>,
    input_mapped_name: Option<String>,
    output_mapped_name: Option<String>,
    transformer: Option<Arc<dyn Transformer>>,
    cast: Option<Arc<dyn Cast>>,
}

impl DataProperty {
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            optional: false,
            lazy: false,
            validate: true,
            default: None,
            input_mapped_name: None,
            output_mapped_name: None,
            transformer: None,
            cast: None,
        }
    }

    /// Accept `null`
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Missing input becomes the Optional sentinel instead of an error
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// The property may hold a lazy value
    pub fn lazy(mut self) -> Self {
        self.lazy = true;
        self
    }

    /// Skip this property when validation rules are resolved
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Read this property from `name` in input payloads
    pub fn map_input_name(mut self, name: impl Into<String>) -> Self {
        self.input_mapped_name = Some(name.into());
        self
    }

    /// Write this property under `name` in output payloads
    pub fn map_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_mapped_name = Some(name.into());
        self
    }

    /// Assign a transformer, overriding the global lookup
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformer = Some(Arc::new(transformer));
        self
    }

    /// Assign a cast, overriding the global lookup
    pub fn with_cast(mut self, cast: impl Cast + 'static) -> Self {
        self.cast = Some(Arc::new(cast));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &PropertyType {
        &self.ty
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable || self.ty == PropertyType::Mixed
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    pub fn validate(&self) -> bool {
        self.validate
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn input_mapped_name(&self) -> Option<&str> {
        self.input_mapped_name.as_deref()
    }

    pub fn output_mapped_name(&self) -> Option<&str> {
        self.output_mapped_name.as_deref()
    }

    /// Key read from input payloads
    pub fn input_name(&self) -> &str {
        self.input_mapped_name.as_deref().unwrap_or(&self.name)
    }

    /// Key written to output payloads
    pub fn output_name(&self) -> &str {
        self.output_mapped_name.as_deref().unwrap_or(&self.name)
    }

    pub fn transformer(&self) -> Option<&Arc<dyn Transformer>> {
        self.transformer.as_ref()
    }

    pub fn cast(&self) -> Option<&Arc<dyn Cast>> {
        self.cast.as_ref()
    }

    pub fn is_data_object(&self) -> bool {
        matches!(self.ty, PropertyType::Data(_))
    }

    pub fn is_data_collectable(&self) -> bool {
        matches!(self.ty, PropertyType::DataCollection(_))
    }

    /// Class of nested data, for data and data collection properties
    pub fn data_class(&self) -> Option<&str> {
        match &self.ty {
            PropertyType::Data(class) | PropertyType::DataCollection(class) => Some(class),
            _ => None,
        }
    }

    pub(crate) fn set_input_mapped_name(&mut self, name: String) {
        self.input_mapped_name = Some(name);
    }

    pub(crate) fn set_output_mapped_name(&mut self, name: String) {
        self.output_mapped_name = Some(name);
    }
}

impl fmt::Debug for DataProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataProperty")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("nullable", &self.nullable)
            .field("optional", &self.optional)
            .field("lazy", &self.lazy)
            .field("input_mapped_name", &self.input_mapped_name)
            .field("output_mapped_name", &self.output_mapped_name)
            .field("transformer", &self.transformer)
            .field("cast", &self.cast)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_names_fall_back_to_name() {
        let plain = DataProperty::new("first_name", PropertyType::String);
        assert_eq!(plain.input_name(), "first_name");
        assert_eq!(plain.output_name(), "first_name");

        let mapped = DataProperty::new("first_name", PropertyType::String)
            .map_input_name("firstName")
            .map_output_name("given_name");
        assert_eq!(mapped.name(), "first_name");
        assert_eq!(mapped.input_name(), "firstName");
        assert_eq!(mapped.output_name(), "given_name");
    }

    #[test]
    fn test_nested_data_flags() {
        let album = DataProperty::new("album", PropertyType::Data("Album".into()));
        let songs = DataProperty::new("songs", PropertyType::DataCollection("Song".into()));
        let title = DataProperty::new("title", PropertyType::String);

        assert!(album.is_data_object() && !album.is_data_collectable());
        assert!(songs.is_data_collectable() && !songs.is_data_object());
        assert_eq!(songs.data_class(), Some("Song"));
        assert_eq!(title.data_class(), None);
    }

    #[test]
    fn test_mixed_is_always_nullable() {
        assert!(DataProperty::new("meta", PropertyType::Mixed).is_nullable());
        assert!(!DataProperty::new("title", PropertyType::String).is_nullable());
        assert!(DataProperty::new("title", PropertyType::String).nullable().is_nullable());
    }
}
