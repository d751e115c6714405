//! Built-in transformers for dates, enums and nested data
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use super::types::Transformer;
use crate::config::DataConfig;
use crate::support::{DataProperty, WrapExecutionType};
use crate::value::{Value, ValueKind};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Formats date-times with an explicit format or the configured one
#[derive(Debug, Clone, Default)]
pub struct DateTimeTransformer {
    format: Option<String>,
}

impl DateTimeTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
        }
    }
}

impl Transformer for DateTimeTransformer {
    fn transform(&self, property: &DataProperty, value: &Value, config: &DataConfig) -> Result<Value> {
        let Value::DateTime(date) = value else {
            return Err(Error::TypeMismatch {
                expected: ValueKind::DateTime.to_string(),
                found: value.kind().to_string(),
                context: Some(format!("property `{}`", property.name())),
            });
        };

        let format = self
            .format
            .as_deref()
            .unwrap_or(config.settings().date_format.as_str());

        Ok(Value::String(date.format(format).to_string()))
    }
}

/// Outputs an enum's backing value, or its case name for pure enums
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumTransformer;

impl Transformer for EnumTransformer {
    fn transform(&self, property: &DataProperty, value: &Value, _config: &DataConfig) -> Result<Value> {
        match value {
            Value::Enum(case) => Ok(case
                .backing
                .as_deref()
                .cloned()
                .unwrap_or_else(|| Value::String(case.case.clone()))),
            other => Err(Error::TypeMismatch {
                expected: ValueKind::Enum.to_string(),
                found: other.kind().to_string(),
                context: Some(format!("property `{}`", property.name())),
            }),
        }
    }
}

/// Turns nested data into plain payloads, ignoring selectors and wrapping
///
/// Registered globally for data objects and collections; only applies to
/// properties not declared as nested data (e.g. a mixed property holding a
/// data object).
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayableTransformer;

impl Transformer for ArrayableTransformer {
    fn transform(&self, property: &DataProperty, value: &Value, config: &DataConfig) -> Result<Value> {
        match value {
            Value::Data(data) => Ok(Value::Map(data.transform(
                config,
                true,
                WrapExecutionType::Disabled,
            )?)),
            Value::Collection(collection) => {
                collection.transform(config, true, WrapExecutionType::Disabled)
            }
            other => Err(Error::TypeMismatch {
                expected: "data or collection".to_string(),
                found: other.kind().to_string(),
                context: Some(format!("property `{}`", property.name())),
            }),
        }
    }

    fn is_arrayable(&self) -> bool {
        true
    }
}

type TransformFn = Arc<dyn Fn(&DataProperty, &Value) -> Result<Value> + Send + Sync>;

/// Transformer backed by a closure
#[derive(Clone)]
pub struct ClosureTransformer {
    name: String,
    transform: TransformFn,
}

impl ClosureTransformer {
    pub fn new<F>(name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&DataProperty, &Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            transform: Arc::new(transform),
        }
    }
}

impl fmt::Debug for ClosureTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureTransformer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Transformer for ClosureTransformer {
    fn transform(&self, property: &DataProperty, value: &Value, _config: &DataConfig) -> Result<Value> {
        (self.transform)(property, value)
    }
}
