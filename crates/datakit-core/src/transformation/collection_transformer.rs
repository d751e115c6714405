//! Transformation of data collections
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use super::data_transformer::DataTransformer;
use crate::config::DataConfig;
use crate::data::{DataCollection, IncludeableData};
use crate::partials::PartialTrees;
use crate::support::{NestedKind, Wrap, WrapExecutionType};
use crate::value::Value;
use crate::Result;
use tracing::trace_span;

/// Key a page's items are placed under when no wrap key resolves
const PAGINATED_WRAP_KEY: &str = "data";

/// Transforms every item of a collection, in order, with one shared
/// selector state
///
/// Paginated collections are always wrapped, next to their `links` and
/// `meta` entries.
#[derive(Debug, Clone, Copy)]
pub struct DataCollectionTransformer<'a> {
    config: &'a DataConfig,
    transform_values: bool,
    wrap_execution_type: WrapExecutionType,
}

impl<'a> DataCollectionTransformer<'a> {
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

    pub fn transform(&self, collection: &DataCollection) -> Result<Value> {
        let trees = collection.partial_trees()?;
        self.transform_with_trees(collection, &trees)
    }

    pub(crate) fn transform_with_trees(
        &self,
        collection: &DataCollection,
        trees: &PartialTrees,
    ) -> Result<Value> {
        let _span = trace_span!(
            "transform_collection",
            class = collection.class().name(),
            items = collection.len()
        )
        .entered();

        let item_wrap = self.wrap_execution_type.for_nested(NestedKind::Data);

        let items = if self.transform_values {
            let transformer = DataTransformer::create(self.config, true, item_wrap);
            collection
                .iter()
                .map(|item| transformer.transform_with_trees(item, trees).map(Value::Map))
                .collect::<Result<Vec<_>>>()?
        } else {
            collection
                .iter()
                .map(|item| Value::from(item.clone().with_partial_trees(trees.clone())))
                .collect()
        };

        let output = Value::List(items);

        if let Some(pagination) = collection.pagination() {
            let key = collection
                .wrapping()
                .resolve_key(collection.class(), self.config.settings())
                .unwrap_or(PAGINATED_WRAP_KEY);

            let mut page = Wrap::wrap_value(key, output);
            page.insert("links".to_string(), Value::Map(pagination.links()));
            page.insert("meta".to_string(), Value::Map(pagination.meta(collection.len())));
            return Ok(Value::Map(page));
        }

        if self.wrap_execution_type.should_execute() {
            if let Some(key) = collection
                .wrapping()
                .resolve_key(collection.class(), self.config.settings())
            {
                return Ok(Value::Map(Wrap::wrap_value(key, output)));
            }
        }

        Ok(output)
    }
}
