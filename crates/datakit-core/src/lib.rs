//! Datakit Core - typed data objects with partial, lazy serialization
//!
//! This crate converts between loosely typed payloads and data objects
//! described by [`DataClass`]es, and turns data objects back into ordered
//! output payloads.
//!
//! # Main Components
//!
//! - **Error Handling**: error types using `thiserror` and `anyhow`
//! - **Value Model**: the dynamic [`Value`] flowing in and out of data objects
//! - **Lazy Values**: deferred property values resolved only when output
//! - **Partials**: include / exclude / only / except selectors and their parser
//! - **Transformation Engine**: visibility, lazy resolution, transformers,
//!   recursion into nested data, wrapping and appended data
//! - **Resolvers**: building data objects from payloads, empty payloads
//! - **Configuration**: settings files, environment overrides and registries
//!
//! # Example
//!
//! ```
//! use datakit_core::{
//!     DataClass, DataCollection, DataObject, DataProperty, IncludeableData, PropertyType, Result,
//! };
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let song = DataClass::builder("Song")
//!         .property(DataProperty::new("name", PropertyType::String))
//!         .property(DataProperty::new("artist", PropertyType::String))
//!         .build()?;
//!
//!     let songs = DataCollection::from_payloads(
//!         &song,
//!         [json!({"name": "Dreams", "artist": "Fleetwood Mac"})],
//!     )?;
//!
//!     let output = songs.only(["name"]).to_json()?;
//!     assert_eq!(output, json!([{"name": "Dreams"}]));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod data;
pub mod error;
pub mod lazy;
pub mod partials;
pub mod resolvers;
pub mod support;
pub mod transformation;
pub mod value;

// Re-export main types for convenience
pub use config::{DataConfig, DataSettings};
pub use data::{Additional, DataCollection, DataObject, IncludeableData, Pagination, Partials};
pub use error::{Error, Result};
pub use lazy::{Lazy, LazyKind, RelationSource};
pub use partials::{PartialTree, PartialTrees, PartialsError, PartialsParser};
pub use resolvers::{Cast, DataFromPayloadResolver, EmptyDataResolver, Normalizer};
pub use support::{
    CamelCaseMapper, DataClass, DataClassBuilder, DataProperty, NameMapper, PropertyType,
    SnakeCaseMapper, Wrap, WrapExecutionType, WrapType,
};
pub use transformation::{transform, DataCollectionTransformer, DataTransformer, Transformer};
pub use value::{EnumValue, Payload, Value, ValueKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
