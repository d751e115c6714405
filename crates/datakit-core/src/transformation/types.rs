//! Core types for value transformation
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use crate::config::DataConfig;
use crate::support::DataProperty;
use crate::value::Value;
use crate::Result;
use std::fmt::Debug;

/// Converts a property value into its output representation
///
/// Transformers are looked up per property first, then in the global
/// registry by the value's kind. They never receive `null`. Errors are
/// propagated to the caller of the transformation unchanged.
pub trait Transformer: Send + Sync + Debug {
    fn transform(&self, property: &DataProperty, value: &Value, config: &DataConfig) -> Result<Value>;

    /// Whether this transformer only turns nested data into plain payloads.
    ///
    /// Such a transformer yields to the engine's recursive path for
    /// properties declared as data objects or data collections, so that
    /// partial selectors and wrapping still apply.
    fn is_arrayable(&self) -> bool {
        false
    }
}
