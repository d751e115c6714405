//! Construction of data objects: normalizers, casts and payload resolvers
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

pub mod casts;
pub mod empty;
pub mod from_payload;
pub mod normalizers;

pub use casts::{Cast, ClosureCast, DateTimeCast};
pub use empty::EmptyDataResolver;
pub use from_payload::DataFromPayloadResolver;
pub use normalizers::{ArrayNormalizer, JsonNormalizer, Normalizer, ObjectNormalizer};
