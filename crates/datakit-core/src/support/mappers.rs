//! Property name mappers
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use heck::{ToLowerCamelCase, ToSnakeCase};
use std::fmt::Debug;

/// Maps a property name to the name used in payloads
pub trait NameMapper: Send + Sync + Debug {
    fn map(&self, name: &str) -> String;
}

/// `first_name` → `firstName`
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCaseMapper;

impl NameMapper for CamelCaseMapper {
    fn map(&self, name: &str) -> String {
        name.to_lower_camel_case()
    }
}

/// `firstName` → `first_name`
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCaseMapper;

impl NameMapper for SnakeCaseMapper {
    fn map(&self, name: &str) -> String {
        name.to_snake_case()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_mappers() {
        assert_eq!(CamelCaseMapper.map("release_year"), "releaseYear");
        assert_eq!(SnakeCaseMapper.map("releaseYear"), "release_year");
        assert_eq!(SnakeCaseMapper.map("title"), "title");
    }
}
