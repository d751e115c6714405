//! Casts: converting raw input values into property values
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use crate::config::DataConfig;
use crate::support::DataProperty;
use crate::value::Value;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Converts a raw input value for a property
///
/// `Ok(None)` means the cast does not apply and the value is kept as is.
pub trait Cast: Send + Sync + Debug {
    fn cast(&self, property: &DataProperty, value: &Value, config: &DataConfig) -> Result<Option<Value>>;
}

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses strings into date-times
///
/// Tries RFC 3339, then the cast's format (or the configured date format).
/// Date-times without an offset and plain dates are taken as UTC.
#[derive(Debug, Clone, Default)]
pub struct DateTimeCast {
    format: Option<String>,
}

impl DateTimeCast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
        }
    }
}

impl Cast for DateTimeCast {
    fn cast(&self, property: &DataProperty, value: &Value, config: &DataConfig) -> Result<Option<Value>> {
        let Value::String(input) = value else {
            return Ok(None);
        };

        let format = self
            .format
            .as_deref()
            .unwrap_or(config.settings().date_format.as_str());

        if let Ok(date) = DateTime::parse_from_rfc3339(input) {
            return Ok(Some(Value::DateTime(date)));
        }
        if let Ok(date) = DateTime::parse_from_str(input, format) {
            return Ok(Some(Value::DateTime(date)));
        }

        let naive = std::iter::once(format)
            .chain(NAIVE_DATE_TIME_FORMATS)
            .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
            .or_else(|| {
                std::iter::once(format)
                    .chain(["%Y-%m-%d"])
                    .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            });

        match naive {
            Some(date) => Ok(Some(Value::DateTime(date.and_utc().fixed_offset()))),
            None => Err(Error::Cast {
                property: property.name().to_string(),
                message: format!("`{input}` does not match date format `{format}`"),
            }),
        }
    }
}

type CastFn = Arc<dyn Fn(&DataProperty, &Value) -> Result<Option<Value>> + Send + Sync>;

/// Cast backed by a closure
#[derive(Clone)]
pub struct ClosureCast {
    name: String,
    cast: CastFn,
}

impl ClosureCast {
    pub fn new<F>(name: impl Into<String>, cast: F) -> Self
    where
        F: Fn(&DataProperty, &Value) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            cast: Arc::new(cast),
        }
    }
}

impl Debug for ClosureCast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureCast")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Cast for ClosureCast {
    fn cast(&self, property: &DataProperty, value: &Value, _config: &DataConfig) -> Result<Option<Value>> {
        (self.cast)(property, value)
    }
}
