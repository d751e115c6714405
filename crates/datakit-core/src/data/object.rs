//! Data objects
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use super::includeable::{IncludeableData, Partials};
use crate::config::DataConfig;
use crate::partials::{filter_allowed, split_request_partials};
use crate::resolvers::{DataFromPayloadResolver, EmptyDataResolver};
use crate::support::{ComputedValue, DataClass, Wrap, WrapExecutionType};
use crate::transformation::DataTransformer;
use crate::value::{Payload, Value};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Value appended to a data object's output
#[derive(Clone)]
pub enum Additional {
    Value(Value),
    /// Computed from the object at transformation time
    Computed(ComputedValue),
}

impl fmt::Debug for Additional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Additional::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Additional::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// An instance of a [`DataClass`]
///
/// Values are stored under the declared property names. A property the
/// object holds no value for is a contract violation reported when the
/// object is transformed; use [`Value::Optional`] for "not supplied".
#[derive(Clone)]
pub struct DataObject {
    class: Arc<DataClass>,
    values: IndexMap<String, Value>,
    partials: Partials,
    wrap: Wrap,
    additional: IndexMap<String, Additional>,
}

impl DataObject {
    /// An object without values
    pub fn new(class: Arc<DataClass>) -> Self {
        Self {
            class,
            values: IndexMap::new(),
            partials: Partials::default(),
            wrap: Wrap::default(),
            additional: IndexMap::new(),
        }
    }

    /// An object holding `values`, keyed by property name
    pub fn from_values<I, K, V>(class: Arc<DataClass>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut data = Self::new(class);
        for (name, value) in values {
            data.set(name, value)?;
        }
        Ok(data)
    }

    /// Build an object from a payload with the global configuration
    pub fn from_payload(class: &Arc<DataClass>, payload: impl Into<Value>) -> Result<Self> {
        DataFromPayloadResolver::new(DataConfig::global()).execute(class, &payload.into())
    }

    /// Like [`DataObject::from_payload`], but a `null` payload gives `None`
    pub fn optional_from_payload(
        class: &Arc<DataClass>,
        payload: impl Into<Value>,
    ) -> Result<Option<Self>> {
        match payload.into() {
            Value::Null => Ok(None),
            payload => Self::from_payload(class, payload).map(Some),
        }
    }

    /// The empty payload of `class`, with `overrides` taking precedence
    pub fn empty(class: &DataClass, overrides: Payload) -> Result<Payload> {
        EmptyDataResolver::new(DataConfig::global()).execute(class, overrides)
    }

    /// Assign a declared property
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let name = name.into();
        if !self.class.has_property(&name) {
            return Err(Error::UnknownProperty {
                class: self.class.name().to_string(),
                property: name,
            });
        }
        self.values.insert(name, value.into());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn class(&self) -> &Arc<DataClass> {
        &self.class
    }

    /// Raw property values in assignment order
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub fn wrap(mut self, key: impl Into<String>) -> Self {
        self.wrap = Wrap::defined(key);
        self
    }

    pub fn without_wrapping(mut self) -> Self {
        self.wrap = Wrap::disabled();
        self
    }

    pub fn wrapping(&self) -> &Wrap {
        &self.wrap
    }

    /// Append fixed values to the output
    pub fn additional<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in values {
            self.additional
                .insert(key.into(), Additional::Value(value.into()));
        }
        self
    }

    /// Append a value computed from this object at transformation time
    pub fn additional_with<F, V>(mut self, key: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&DataObject) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        let compute: ComputedValue = Arc::new(move |data: &DataObject| -> Value { compute(data).into() });
        self.additional.insert(key.into(), Additional::Computed(compute));
        self
    }

    /// Appended values: class computed entries, then this object's entries
    pub fn additional_data(&self) -> Payload {
        let mut data = Payload::new();

        for (key, compute) in self.class.computed() {
            data.insert(key.clone(), compute(self));
        }
        for (key, additional) in &self.additional {
            let value = match additional {
                Additional::Value(value) => value.clone(),
                Additional::Computed(compute) => compute(self),
            };
            data.insert(key.clone(), value);
        }

        data
    }

    /// Add paths requested by an untrusted caller, e.g. from query parameters.
    ///
    /// Both values are comma-separated; paths the class does not allow are
    /// dropped.
    pub fn with_requested_partials(self, include: Option<&str>, exclude: Option<&str>) -> Self {
        let includes = filter_allowed(
            include.map(split_request_partials).unwrap_or_default(),
            self.class.allowed_includes(),
        );
        let excludes = filter_allowed(
            exclude.map(split_request_partials).unwrap_or_default(),
            self.class.allowed_excludes(),
        );

        self.include(includes).exclude(excludes)
    }

    /// Run the transformation engine
    pub fn transform(
        &self,
        config: &DataConfig,
        transform_values: bool,
        wrap: WrapExecutionType,
    ) -> Result<Payload> {
        DataTransformer::create(config, transform_values, wrap).transform(self)
    }

    /// Output payload with values transformed and wrapping disabled
    pub fn to_array(&self) -> Result<Payload> {
        self.transform(DataConfig::global(), true, WrapExecutionType::Disabled)
    }

    /// Visible properties without value transformation
    ///
    /// Nested data stays as data objects carrying their narrowed selectors.
    pub fn all(&self) -> Result<Payload> {
        self.transform(DataConfig::global(), false, WrapExecutionType::Disabled)
    }

    /// JSON output with wrapping enabled
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let payload = self.transform(DataConfig::global(), true, WrapExecutionType::Enabled)?;
        Value::Map(payload).to_json()
    }
}

impl IncludeableData for DataObject {
    fn partials(&self) -> &Partials {
        &self.partials
    }

    fn partials_mut(&mut self) -> &mut Partials {
        &mut self.partials
    }
}

impl PartialEq for DataObject {
    fn eq(&self, other: &Self) -> bool {
        self.class.name() == other.class.name() && self.values == other.values
    }
}

impl fmt::Debug for DataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataObject")
            .field("class", &self.class.name())
            .field("values", &self.values)
            .field("partials", &self.partials)
            .field("wrap", &self.wrap)
            .field("additional", &self.additional)
            .finish()
    }
}

impl Serialize for DataObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let payload = self.to_array().map_err(S::Error::custom)?;
        Value::Map(payload).serialize(serializer)
    }
}
