//! Empty payloads, e.g. to prefill forms
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use crate::config::DataConfig;
use crate::support::{DataClass, PropertyType};
use crate::value::{Payload, Value};
use crate::Result;

/// Produces the "empty version" of a data class, keyed by property name
#[derive(Debug, Clone, Copy)]
pub struct EmptyDataResolver<'a> {
    config: &'a DataConfig,
}

impl<'a> EmptyDataResolver<'a> {
    pub fn new(config: &'a DataConfig) -> Self {
        Self { config }
    }

    /// Overrides win, then property defaults, then a per-type empty value
    pub fn execute(&self, class: &DataClass, mut overrides: Payload) -> Result<Payload> {
        let mut payload = Payload::new();

        for property in class.properties() {
            let value = if let Some(value) = overrides.shift_remove(property.name()) {
                value
            } else if let Some(default) = property.default() {
                default.clone()
            } else {
                match property.ty() {
                    PropertyType::Array | PropertyType::DataCollection(_) => Value::List(Vec::new()),
                    PropertyType::Data(nested) => {
                        let nested = self.config.data_class(nested)?;
                        Value::Map(self.execute(&nested, Payload::new())?)
                    }
                    _ => Value::Null,
                }
            };

            payload.insert(property.name().to_string(), value);
        }

        Ok(payload)
    }
}
