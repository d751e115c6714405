//! Data classes: the ordered property descriptors shared by all instances
//!
//! A [`DataClass`] is built once through [`DataClassBuilder`], validated, and
//! then shared as `Arc<DataClass>` (usually through the descriptor cache in
//! [`DataConfig`](crate::config::DataConfig)). It is immutable afterwards.
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use super::mappers::NameMapper;
use super::property::DataProperty;
use crate::data::DataObject;
use crate::value::Value;
use crate::{Error, Result};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Value computed from a data object when it is transformed
pub type ComputedValue = Arc<dyn Fn(&DataObject) -> Value + Send + Sync>;

/// Property descriptors and class-level settings of a data class
pub struct DataClass {
    name: String,
    properties: Vec<DataProperty>,
    default_wrap: Option<String>,
    computed: Vec<(String, ComputedValue)>,
    allowed_includes: Option<Vec<String>>,
    allowed_excludes: Option<Vec<String>>,
}

impl DataClass {
    pub fn builder(name: impl Into<String>) -> DataClassBuilder {
        DataClassBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Properties in declaration order
    pub fn properties(&self) -> &[DataProperty] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&DataProperty> {
        self.properties.iter().find(|property| property.name() == name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// Wrap key used when an instance wraps with the global wrap type
    pub fn default_wrap(&self) -> Option<&str> {
        self.default_wrap.as_deref()
    }

    /// Class-level appended values, in declaration order
    pub fn computed(&self) -> &[(String, ComputedValue)] {
        &self.computed
    }

    /// Paths callers may request for inclusion; `None` allows all
    pub fn allowed_includes(&self) -> Option<&[String]> {
        self.allowed_includes.as_deref()
    }

    /// Paths callers may request for exclusion; `None` allows all
    pub fn allowed_excludes(&self) -> Option<&[String]> {
        self.allowed_excludes.as_deref()
    }
}

impl fmt::Debug for DataClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataClass")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .field("default_wrap", &self.default_wrap)
            .field(
                "computed",
                &self.computed.iter().map(|(key, _)| key).collect::<Vec<_>>(),
            )
            .field("allowed_includes", &self.allowed_includes)
            .field("allowed_excludes", &self.allowed_excludes)
            .finish()
    }
}

/// Builder for [`DataClass`]
pub struct DataClassBuilder {
    name: String,
    properties: Vec<DataProperty>,
    input_mapper: Option<Box<dyn NameMapper>>,
    output_mapper: Option<Box<dyn NameMapper>>,
    default_wrap: Option<String>,
    computed: Vec<(String, ComputedValue)>,
    allowed_includes: Option<Vec<String>>,
    allowed_excludes: Option<Vec<String>>,
}

impl DataClassBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            input_mapper: None,
            output_mapper: None,
            default_wrap: None,
            computed: Vec::new(),
            allowed_includes: None,
            allowed_excludes: None,
        }
    }

    /// Declare the next property
    pub fn property(mut self, property: DataProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Map input names of properties without an explicit input name
    pub fn map_input_names(mut self, mapper: impl NameMapper + 'static) -> Self {
        self.input_mapper = Some(Box::new(mapper));
        self
    }

    /// Map output names of properties without an explicit output name
    pub fn map_output_names(mut self, mapper: impl NameMapper + 'static) -> Self {
        self.output_mapper = Some(Box::new(mapper));
        self
    }

    pub fn default_wrap(mut self, key: impl Into<String>) -> Self {
        self.default_wrap = Some(key.into());
        self
    }

    /// Append a computed value to every transformed instance
    pub fn with_computed<F, V>(mut self, key: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&DataObject) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        let compute: ComputedValue = Arc::new(move |data: &DataObject| -> Value { compute(data).into() });
        self.computed.push((key.into(), compute));
        self
    }

    pub fn allowed_includes<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_includes = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    pub fn allowed_excludes<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_excludes = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Apply name mappers and validate the descriptors
    pub fn build(self) -> Result<Arc<DataClass>> {
        let mut properties = self.properties;

        for property in &mut properties {
            if property.input_mapped_name().is_none() {
                if let Some(mapper) = &self.input_mapper {
                    let mapped = mapper.map(property.name());
                    property.set_input_mapped_name(mapped);
                }
            }
            if property.output_mapped_name().is_none() {
                if let Some(mapper) = &self.output_mapper {
                    let mapped = mapper.map(property.name());
                    property.set_output_mapped_name(mapped);
                }
            }
        }

        let mut names = HashSet::new();
        let mut output_names = HashSet::new();
        for property in &properties {
            if !names.insert(property.name()) {
                return Err(Error::configuration(format!(
                    "Data class `{}` declares property `{}` twice",
                    self.name,
                    property.name()
                )));
            }
            if !output_names.insert(property.output_name()) {
                return Err(Error::configuration(format!(
                    "Data class `{}` maps more than one property to output name `{}`",
                    self.name,
                    property.output_name()
                )));
            }
        }

        Ok(Arc::new(DataClass {
            name: self.name,
            properties,
            default_wrap: self.default_wrap,
            computed: self.computed,
            allowed_includes: self.allowed_includes,
            allowed_excludes: self.allowed_excludes,
        }))
    }
}
