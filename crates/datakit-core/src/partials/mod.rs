//! Partial selectors: include / exclude / only / except
//!
//! Callers scope a transformation with flat dotted paths. This module parses
//! those paths into hierarchical [`PartialTree`]s and narrows them one level
//! at a time as the transformation engine descends into nested data.
//!
//! # Path syntax
//!
//! - `name` selects a property, `songs.name` a property of nested data
//! - `songs.{name,artist}` selects several siblings sharing a prefix
//! - `*` selects every property at a level; `*.name` narrows every child
//!
//! ```
//! use datakit_core::partials::PartialTree;
//!
//! let tree = PartialTree::parse(["songs.{name,artist}", "title"]).unwrap().unwrap();
//! assert!(tree.contains("songs"));
//! assert!(tree.get("songs").unwrap().contains("artist"));
//! ```
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

pub mod allowed;
pub mod error;
pub mod parser;
pub mod tree;

#[cfg(test)]
mod prop_tests;

pub use allowed::{filter_allowed, split_request_partials};
pub use error::{PartialsError, PartialsResult};
pub use parser::PartialsParser;
pub use tree::{PartialTree, PartialTrees};
