//! The transformation engine for single data objects
//!
//! For every declared property, in declaration order, the engine decides
//! visibility from the active [`PartialTrees`], resolves lazy values, applies
//! transformers or recurses into nested data with narrowed selectors, and
//! stores the result under the property's output name. Wrapping and
//! appended data are applied to the assembled payload last.
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use super::collection_transformer::DataCollectionTransformer;
use super::types::Transformer;
use crate::config::DataConfig;
use crate::data::{DataObject, IncludeableData};
use crate::partials::{PartialTree, PartialTrees};
use crate::support::{DataProperty, NestedKind, Wrap, WrapExecutionType};
use crate::value::{Payload, Value};
use crate::{Error, Result};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{trace, trace_span};

/// Transforms one data object into an ordered payload
#[derive(Debug, Clone, Copy)]
pub struct DataTransformer<'a> {
    config: &'a DataConfig,
    transform_values: bool,
    wrap_execution_type: WrapExecutionType,
}

impl<'a> DataTransformer<'a> {
    pub fn create(
        config: &'a DataConfig,
        transform_values: bool,
        wrap_execution_type: WrapExecutionType,
    ) -> Self {
        Self {
            config,
            transform_values,
            wrap_execution_type,
        }
    }

    /// Transform `data` with its own selector state
    pub fn transform(&self, data: &DataObject) -> Result<Payload> {
        let trees = data.partial_trees()?;
        self.transform_with_trees(data, &trees)
    }

    /// Transform `data` with selector state handed down by a parent
    pub(crate) fn transform_with_trees(
        &self,
        data: &DataObject,
        trees: &PartialTrees,
    ) -> Result<Payload> {
        let class = data.class();
        let _span = trace_span!("transform_data", class = class.name()).entered();

        let mut transformed = self.resolve_payload(data, trees)?;

        if self.wrap_execution_type.should_execute() {
            if let Some(key) = data.wrapping().resolve_key(class, self.config.settings()) {
                transformed = Wrap::wrap_value(key, Value::Map(transformed));
            }
        }

        for (key, value) in data.additional_data() {
            transformed.insert(key, value);
        }

        Ok(transformed)
    }

    fn resolve_payload(&self, data: &DataObject, trees: &PartialTrees) -> Result<Payload> {
        let mut payload = Payload::new();

        for property in data.class().properties() {
            let name = property.name();
            let value = data.get(name).ok_or_else(|| {
                Error::invariant(format!(
                    "data object `{}` holds no value for property `{}`",
                    data.class().name(),
                    name
                ))
            })?;

            if !Self::should_include_property(name, value, trees) {
                trace!(property = name, "property hidden");
                continue;
            }

            let value = self.resolve_property_value(property, value, trees.nested(name))?;
            if value.is_optional() {
                continue;
            }

            payload.insert(property.output_name().to_string(), value);
        }

        Ok(payload)
    }

    fn should_include_property(name: &str, value: &Value, trees: &PartialTrees) -> bool {
        if value.is_optional() {
            return false;
        }

        if Self::is_property_hidden(name, trees) {
            return false;
        }

        let Value::Lazy(lazy) = value else {
            return true;
        };

        if let Some(included) = lazy.should_be_included() {
            return included;
        }

        if let Some(excluded) = &trees.lazy_excluded {
            if excluded.is_all() || excluded.contains(name) {
                return false;
            }
        }

        match &trees.lazy_included {
            Some(included) if included.is_all() || included.contains(name) => true,
            _ => lazy.is_default_included(),
        }
    }

    fn is_property_hidden(name: &str, trees: &PartialTrees) -> bool {
        if let Some(except) = &trees.except {
            if except.is_all() {
                return true;
            }
            // A non-empty subtree only excludes nested children
            return except.get(name).is_some_and(PartialTree::is_empty);
        }

        match &trees.only {
            Some(only) => !(only.is_all() || only.contains(name)),
            None => false,
        }
    }

    fn resolve_property_value(
        &self,
        property: &DataProperty,
        value: &Value,
        trees: PartialTrees,
    ) -> Result<Value> {
        let mut value = match value {
            Value::Lazy(lazy) => match lazy.resolve()? {
                Value::Lazy(_) => {
                    return Err(Error::invariant(format!(
                        "lazy value of property `{}` resolved to another lazy value",
                        property.name()
                    )))
                }
                resolved => Cow::Owned(resolved),
            },
            other => Cow::Borrowed(other),
        };

        if value.is_null() || value.is_optional() {
            return Ok(value.into_owned());
        }

        if matches!(value.as_ref(), Value::Map(_) | Value::List(_)) && filters_containers(&trees) {
            value = Cow::Owned(filter_container(value.into_owned(), &trees));
        }

        if let Some(transformer) = self.resolve_transformer(property, &value) {
            return transformer.transform(property, &value, self.config);
        }

        match value.as_ref() {
            Value::Data(nested) => {
                let wrap = self.wrap_execution_type.for_nested(NestedKind::Data);
                if !self.transform_values {
                    return Ok(Value::from((**nested).clone().with_partial_trees(trees)));
                }
                let transformer = DataTransformer::create(self.config, true, wrap);
                Ok(Value::Map(transformer.transform_with_trees(nested, &trees)?))
            }
            Value::Collection(collection) => {
                let wrap = self.wrap_execution_type.for_nested(NestedKind::Collection);
                if !self.transform_values {
                    return Ok(Value::from((**collection).clone().with_partial_trees(trees)));
                }
                DataCollectionTransformer::create(self.config, true, wrap)
                    .transform_with_trees(collection, &trees)
            }
            _ => Ok(value.into_owned()),
        }
    }

    fn resolve_transformer<'b>(
        &'b self,
        property: &'b DataProperty,
        value: &Value,
    ) -> Option<&'b Arc<dyn Transformer>> {
        if !self.transform_values {
            return None;
        }

        let transformer = property
            .transformer()
            .or_else(|| self.config.find_global_transformer_for_value(value))?;

        if transformer.is_arrayable() && (property.is_data_object() || property.is_data_collectable()) {
            return None;
        }

        Some(transformer)
    }
}

fn filters_containers(trees: &PartialTrees) -> bool {
    let active = |tree: &Option<PartialTree>| tree.as_ref().is_some_and(|t| !t.is_empty());
    active(&trees.only) || active(&trees.except)
}

/// Shallow only/except filtering of a map's keys or a list's indices
fn filter_container(value: Value, trees: &PartialTrees) -> Value {
    let keep = |key: &str| {
        let kept_by_only = match &trees.only {
            Some(PartialTree::Fields(fields)) if !fields.is_empty() => fields.contains_key(key),
            _ => true,
        };
        let dropped_by_except = match &trees.except {
            Some(PartialTree::Wildcard(None)) => true,
            Some(PartialTree::Fields(fields)) => fields.contains_key(key),
            _ => false,
        };
        kept_by_only && !dropped_by_except
    };

    match value {
        Value::Map(map) => Value::Map(map.into_iter().filter(|(key, _)| keep(key)).collect()),
        Value::List(items) => Value::List(
            items
                .into_iter()
                .enumerate()
                .filter(|(index, _)| keep(&index.to_string()))
                .map(|(_, item)| item)
                .collect(),
        ),
        other => other,
    }
}
