//! Transformation of data objects into output payloads
//!
//! # Module Organization
//!
//! - [`types`] - the [`Transformer`] trait
//! - [`data_transformer`] - the engine for single data objects
//! - [`collection_transformer`] - the engine for data collections
//! - [`built_in`] - transformers registered by default
//!
//! # Example
//!
//! ```
//! use datakit_core::{
//!     DataClass, DataConfig, DataObject, DataProperty, IncludeableData, Lazy, PropertyType,
//!     Value, WrapExecutionType,
//! };
//!
//! let class = DataClass::builder("Person")
//!     .property(DataProperty::new("name", PropertyType::String).lazy())
//!     .property(DataProperty::new("age", PropertyType::Int))
//!     .build()
//!     .unwrap();
//!
//! let person = DataObject::from_values(
//!     class,
//!     [("name", Value::from(Lazy::create(|| "X"))), ("age", Value::from(5))],
//! )
//! .unwrap();
//!
//! let config = DataConfig::default();
//! let payload = datakit_core::transform(&person, &config, true, WrapExecutionType::Disabled).unwrap();
//! assert_eq!(payload.keys().collect::<Vec<_>>(), vec!["age"]);
//!
//! let payload = person.include(["name"]).transform(&config, true, WrapExecutionType::Disabled).unwrap();
//! assert_eq!(payload["name"], Value::from("X"));
//! ```
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

pub mod built_in;
pub mod collection_transformer;
pub mod data_transformer;
pub mod types;


pub use built_in::{ArrayableTransformer, ClosureTransformer, DateTimeTransformer, EnumTransformer};
pub use collection_transformer::DataCollectionTransformer;
pub use data_transformer::DataTransformer;
pub use types::Transformer;

use crate::config::DataConfig;
use crate::data::DataObject;
use crate::support::WrapExecutionType;
use crate::value::Payload;
use crate::Result;

/// Transform `data` into its output payload
pub fn transform(
    data: &DataObject,
    config: &DataConfig,
    transform_values: bool,
    wrap: WrapExecutionType,
) -> Result<Payload> {
    DataTransformer::create(config, transform_values, wrap).transform(data)
}
