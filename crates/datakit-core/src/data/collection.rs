//! Homogeneous collections of data objects
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use super::includeable::{IncludeableData, Partials};
use super::object::DataObject;
use super::pagination::Pagination;
use crate::config::DataConfig;
use crate::resolvers::DataFromPayloadResolver;
use crate::support::{DataClass, Wrap, WrapExecutionType};
use crate::transformation::DataCollectionTransformer;
use crate::value::Value;
use crate::{Error, Result};
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// An ordered collection of data objects sharing one class
///
/// Selectors set on the collection apply identically to every item.
/// A collection holding [`Pagination`] is one page of a larger result.
#[derive(Clone)]
pub struct DataCollection {
    class: Arc<DataClass>,
    items: Vec<DataObject>,
    partials: Partials,
    wrap: Wrap,
    pagination: Option<Pagination>,
}

impl DataCollection {
    /// Collect `items`, all of which must be instances of `class`
    pub fn new(class: Arc<DataClass>, items: Vec<DataObject>) -> Result<Self> {
        for item in &items {
            Self::check_class(&class, item)?;
        }

        Ok(Self {
            class,
            items,
            partials: Partials::default(),
            wrap: Wrap::default(),
            pagination: None,
        })
    }

    /// Collect one page of items
    pub fn paginated(
        class: Arc<DataClass>,
        items: Vec<DataObject>,
        pagination: Pagination,
    ) -> Result<Self> {
        let mut collection = Self::new(class, items)?;
        collection.pagination = Some(pagination);
        Ok(collection)
    }

    /// Build every item from a payload with the global configuration
    pub fn from_payloads<I, V>(class: &Arc<DataClass>, payloads: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let resolver = DataFromPayloadResolver::new(DataConfig::global());
        let items = payloads
            .into_iter()
            .map(|payload| resolver.execute(class, &payload.into()))
            .collect::<Result<Vec<_>>>()?;

        Self::new(Arc::clone(class), items)
    }

    fn check_class(class: &DataClass, item: &DataObject) -> Result<()> {
        if item.class().name() == class.name() {
            Ok(())
        } else {
            Err(Error::CannotCreateData {
                class: class.name().to_string(),
                message: format!(
                    "collection item is an instance of `{}`",
                    item.class().name()
                ),
            })
        }
    }

    pub fn class(&self) -> &Arc<DataClass> {
        &self.class
    }

    pub fn items(&self) -> &[DataObject] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn is_paginated(&self) -> bool {
        self.pagination.is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataObject> {
        self.items.iter()
    }

    pub fn push(&mut self, item: DataObject) -> Result<()> {
        Self::check_class(&self.class, &item)?;
        self.items.push(item);
        Ok(())
    }

    /// Keep the items matching `predicate`
    ///
    /// A paginated collection is returned unfiltered.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: FnMut(&DataObject) -> bool,
    {
        if self.is_paginated() {
            debug!(class = self.class.name(), "ignoring filter on a paginated collection");
            return self;
        }
        self.items.retain(predicate);
        self
    }

    /// Replace every item with `map(item)`
    pub fn through<F>(mut self, map: F) -> Result<Self>
    where
        F: FnMut(DataObject) -> DataObject,
    {
        let items: Vec<DataObject> = self.items.drain(..).map(map).collect();
        for item in &items {
            Self::check_class(&self.class, item)?;
        }
        self.items = items;
        Ok(self)
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

    /// Run the transformation engine over every item
    pub fn transform(
        &self,
        config: &DataConfig,
        transform_values: bool,
        wrap: WrapExecutionType,
    ) -> Result<Value> {
        DataCollectionTransformer::create(config, transform_values, wrap).transform(self)
    }

    /// Output list with values transformed and wrapping disabled
    pub fn to_array(&self) -> Result<Value> {
        self.transform(DataConfig::global(), true, WrapExecutionType::Disabled)
    }

    /// JSON output with wrapping enabled
    pub fn to_json(&self) -> Result<serde_json::Value> {
        self.transform(DataConfig::global(), true, WrapExecutionType::Enabled)?
            .to_json()
    }
}

impl IncludeableData for DataCollection {
    fn partials(&self) -> &Partials {
        &self.partials
    }

    fn partials_mut(&mut self) -> &mut Partials {
        &mut self.partials
    }
}

impl<'a> IntoIterator for &'a DataCollection {
    type Item = &'a DataObject;
    type IntoIter = std::slice::Iter<'a, DataObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl PartialEq for DataCollection {
    fn eq(&self, other: &Self) -> bool {
        self.class.name() == other.class.name()
            && self.items == other.items
            && self.pagination == other.pagination
    }
}

impl fmt::Debug for DataCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataCollection")
            .field("class", &self.class.name())
            .field("items", &self.items)
            .field("partials", &self.partials)
            .field("wrap", &self.wrap)
            .field("pagination", &self.pagination)
            .finish()
    }
}

impl Serialize for DataCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_array()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::{DataProperty, PropertyType};
    use serde_json::json;

    fn class(name: &str) -> Arc<DataClass> {
        DataClass::builder(name)
            .property(DataProperty::new("name", PropertyType::String))
            .build()
            .unwrap()
    }

    fn song(class: &Arc<DataClass>, name: &str) -> DataObject {
        DataObject::from_values(Arc::clone(class), [("name", name)]).unwrap()
    }

    #[test]
    fn test_rejects_items_of_another_class() {
        let songs = class("Song");
        let albums = class("Album");

        let err = DataCollection::new(Arc::clone(&songs), vec![song(&albums, "Rumours")]).unwrap_err();
        assert!(matches!(err, Error::CannotCreateData { .. }));

        let mut collection = DataCollection::new(Arc::clone(&songs), vec![]).unwrap();
        assert!(collection.push(song(&albums, "Tusk")).is_err());
        collection.push(song(&songs, "Dreams")).unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_filter_and_through_keep_order() {
        let songs = class("Song");
        let collection = DataCollection::new(
            Arc::clone(&songs),
            vec![song(&songs, "Dreams"), song(&songs, "Gypsy"), song(&songs, "Sara")],
        )
        .unwrap()
        .filter(|item| item.get("name") != Some(&Value::from("Gypsy")))
        .through(|mut item| {
            let upper = item.get("name").and_then(Value::as_str).map(str::to_uppercase);
            item.set("name", upper).unwrap();
            item
        })
        .unwrap();

        let names: Vec<_> = collection
            .iter()
            .filter_map(|item| item.get("name").and_then(Value::as_str))
            .collect();
        assert_eq!(names, vec!["DREAMS", "SARA"]);
    }

    fn page() -> DataCollection {
        let songs = class("Song");
        DataCollection::paginated(
            Arc::clone(&songs),
            vec![song(&songs, "A"), song(&songs, "B")],
            Pagination::new(1, 15, 2),
        )
        .unwrap()
    }

    fn names(output: &serde_json::Value) -> serde_json::Value {
        output["data"].clone()
    }

    #[test]
    fn test_paginated_output_carries_links_and_meta() {
        let config = DataConfig::default();
        let output = page()
            .transform(&config, true, WrapExecutionType::Disabled)
            .unwrap()
            .to_json()
            .unwrap();

        assert_eq!(names(&output), json!([{"name": "A"}, {"name": "B"}]));
        assert_eq!(output["links"]["next"], json!(null));
        assert_eq!(output["meta"]["total"], json!(2));
        assert_eq!(output["meta"]["to"], json!(2));

        let keyed = page()
            .wrap("songs")
            .transform(&config, true, WrapExecutionType::Enabled)
            .unwrap()
            .to_json()
            .unwrap();
        assert_eq!(
            keyed.as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["songs", "links", "meta"]
        );
    }

    #[test]
    fn test_paginated_collection_is_not_filtered() {
        let config = DataConfig::default();
        let filtered = page().filter(|item| item.get("name") == Some(&Value::from("A")));

        assert_eq!(filtered.len(), 2);
        let output = filtered
            .transform(&config, true, WrapExecutionType::Disabled)
            .unwrap()
            .to_json()
            .unwrap();
        assert_eq!(names(&output), json!([{"name": "A"}, {"name": "B"}]));
    }

    #[test]
    fn test_through_keeps_pagination() {
        let config = DataConfig::default();
        let mapped = page()
            .through(|mut item| {
                let marked = item.get("name").and_then(Value::as_str).map(|name| format!("{name}x"));
                item.set("name", marked).unwrap();
                item
            })
            .unwrap();

        assert_eq!(mapped.pagination(), Some(&Pagination::new(1, 15, 2)));
        let output = mapped
            .transform(&config, true, WrapExecutionType::Disabled)
            .unwrap()
            .to_json()
            .unwrap();
        assert_eq!(names(&output), json!([{"name": "Ax"}, {"name": "Bx"}]));
    }
}
