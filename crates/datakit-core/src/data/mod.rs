//! Data objects, data collections and their partial selector state
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

pub mod collection;
pub mod includeable;
pub mod object;
pub mod pagination;

pub use collection::DataCollection;
pub use includeable::{IncludeableData, Partials};
pub use object::{Additional, DataObject};
pub use pagination::Pagination;
