//! Building data objects from loosely typed payloads
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use crate::config::DataConfig;
use crate::data::{DataCollection, DataObject};
use crate::support::{DataClass, DataProperty, PropertyType};
use crate::value::{Payload, Value};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Builds a [`DataObject`] of a class from any input a registered
/// normalizer accepts
///
/// Nested data properties are resolved through the descriptor cache of the
/// configuration, so their classes must be registered there.
#[derive(Debug, Clone, Copy)]
pub struct DataFromPayloadResolver<'a> {
    config: &'a DataConfig,
}

impl<'a> DataFromPayloadResolver<'a> {
    pub fn new(config: &'a DataConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, class: &Arc<DataClass>, input: &Value) -> Result<DataObject> {
        if let Value::Data(data) = input {
            if data.class().name() == class.name() {
                return Ok((**data).clone());
            }
        }

        let payload = self.normalize(class, input)?;
        debug!(class = class.name(), keys = payload.len(), "building data object from payload");

        let mut data = DataObject::new(Arc::clone(class));
        for property in class.properties() {
            let value = self.resolve_property(class, property, &payload)?;
            data.set(property.name(), value)?;
        }

        Ok(data)
    }

    fn normalize(&self, class: &DataClass, input: &Value) -> Result<Payload> {
        self.config
            .normalizers()
            .iter()
            .find_map(|normalizer| normalizer.normalize(input))
            .ok_or_else(|| Error::CannotCreateData {
                class: class.name().to_string(),
                message: format!("no normalizer accepts a {} input", input.kind()),
            })
    }

    fn resolve_property(&self, class: &DataClass, property: &DataProperty, payload: &Payload) -> Result<Value> {
        let Some(value) = payload.get(property.input_name()) else {
            if let Some(default) = property.default() {
                return Ok(default.clone());
            }
            if property.is_optional() {
                return Ok(Value::Optional);
            }
            if property.is_nullable() {
                return Ok(Value::Null);
            }
            return Err(Error::CannotCreateData {
                class: class.name().to_string(),
                message: format!("missing required property `{}`", property.input_name()),
            });
        };

        match value {
            Value::Null if property.is_nullable() => Ok(Value::Null),
            Value::Null => Err(Error::CannotCreateData {
                class: class.name().to_string(),
                message: format!("property `{}` cannot be null", property.name()),
            }),
            Value::Lazy(_) | Value::Optional => Ok(value.clone()),
            _ => {
                // The property's own cast runs before nested construction
                let cast = match property.cast() {
                    Some(cast) => cast.cast(property, value, self.config)?,
                    None => None,
                };
                let value = cast.as_ref().unwrap_or(value);

                match property.ty() {
                    PropertyType::Data(nested) => self.resolve_data(nested, value),
                    PropertyType::DataCollection(nested) => self.resolve_collection(class, property, nested, value),
                    _ if property.cast().is_some() => Ok(value.clone()),
                    _ => self.global_cast(property, value),
                }
            }
        }
    }

    fn resolve_data(&self, nested: &str, value: &Value) -> Result<Value> {
        let class = self.config.data_class(nested)?;
        Ok(Value::from(self.execute(&class, value)?))
    }

    fn resolve_collection(
        &self,
        class: &DataClass,
        property: &DataProperty,
        nested: &str,
        value: &Value,
    ) -> Result<Value> {
        match value {
            Value::Collection(collection) if collection.class().name() == nested => Ok(value.clone()),
            Value::List(items) => {
                let nested_class = self.config.data_class(nested)?;
                let items = items
                    .iter()
                    .map(|item| self.execute(&nested_class, item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::from(DataCollection::new(nested_class, items)?))
            }
            other => Err(Error::CannotCreateData {
                class: class.name().to_string(),
                message: format!(
                    "property `{}` expects a list of `{}`, found {}",
                    property.name(),
                    nested,
                    other.kind()
                ),
            }),
        }
    }

    fn global_cast(&self, property: &DataProperty, value: &Value) -> Result<Value> {
        match self.config.find_global_cast(property) {
            Some(cast) => Ok(cast
                .cast(property, value, self.config)?
                .unwrap_or_else(|| value.clone())),
            None => Ok(value.clone()),
        }
    }
}
