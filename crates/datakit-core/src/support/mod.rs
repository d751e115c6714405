//! Class-level metadata: property descriptors, data classes, name mapping
//! and wrapping
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

pub mod class;
pub mod mappers;
pub mod property;
pub mod wrap;

pub use class::{ComputedValue, DataClass, DataClassBuilder};
pub use mappers::{CamelCaseMapper, NameMapper, SnakeCaseMapper};
pub use property::{DataProperty, PropertyType};
pub use wrap::{NestedKind, Wrap, WrapExecutionType, WrapType};
