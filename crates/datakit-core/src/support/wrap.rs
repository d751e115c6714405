//! Output wrapping
//!
//! Wrapping nests a transformation's output under one top-level key, e.g.
//! `{"data": {...}}`. [`WrapExecutionType`] tracks whether a wrap may run at
//! the current nesting level so a single top-level wrap is not repeated for
//! every nested object.
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use super::class::DataClass;
use crate::config::DataSettings;
use crate::value::{Payload, Value};

/// Whether wrapping runs for one transformation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapExecutionType {
    Enabled,
    Disabled,
    /// Suppressed at this level, re-enabled for nested collections
    TemporarilyDisabled,
}

/// Kind of nested value a transformation recurses into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedKind {
    Data,
    Collection,
}

impl WrapExecutionType {
    pub fn should_execute(self) -> bool {
        self == WrapExecutionType::Enabled
    }

    /// Mode for the recursive transformation of a nested value
    pub fn for_nested(self, kind: NestedKind) -> WrapExecutionType {
        match (self, kind) {
            (WrapExecutionType::Disabled, _) => WrapExecutionType::Disabled,
            (WrapExecutionType::Enabled, NestedKind::Data)
            | (WrapExecutionType::TemporarilyDisabled, NestedKind::Data) => {
                WrapExecutionType::TemporarilyDisabled
            }
            (WrapExecutionType::Enabled, NestedKind::Collection)
            | (WrapExecutionType::TemporarilyDisabled, NestedKind::Collection) => {
                WrapExecutionType::Enabled
            }
        }
    }
}

/// How a data object or collection chooses its wrap key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WrapType {
    /// Class default wrap, else the globally configured key
    #[default]
    UseGlobal,
    /// Never wrap
    Disabled,
    /// Wrap under this key
    Defined(String),
}

/// Wrap settings attached to a data object or collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wrap {
    ty: WrapType,
}

impl Wrap {
    pub fn new(ty: WrapType) -> Self {
        Self { ty }
    }

    pub fn defined(key: impl Into<String>) -> Self {
        Self::new(WrapType::Defined(key.into()))
    }

    pub fn disabled() -> Self {
        Self::new(WrapType::Disabled)
    }

    pub fn ty(&self) -> &WrapType {
        &self.ty
    }

    /// The key to wrap under, if any
    pub fn resolve_key<'a>(
        &'a self,
        class: &'a DataClass,
        settings: &'a DataSettings,
    ) -> Option<&'a str> {
        match &self.ty {
            WrapType::Disabled => None,
            WrapType::Defined(key) => Some(key),
            WrapType::UseGlobal => class.default_wrap().or(settings.wrap.as_deref()),
        }
    }

    /// Nest `value` under `key`
    pub fn wrap_value(key: &str, value: Value) -> Payload {
        Payload::from([(key.to_string(), value)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use WrapExecutionType::*;

    #[test]
    fn test_nested_transitions() {
        let table = [
            (Enabled, NestedKind::Data, TemporarilyDisabled),
            (Enabled, NestedKind::Collection, Enabled),
            (Disabled, NestedKind::Data, Disabled),
            (Disabled, NestedKind::Collection, Disabled),
            (TemporarilyDisabled, NestedKind::Data, TemporarilyDisabled),
            (TemporarilyDisabled, NestedKind::Collection, Enabled),
        ];

        for (current, kind, expected) in table {
            assert_eq!(current.for_nested(kind), expected, "{current:?} x {kind:?}");
        }
    }

    #[test]
    fn test_only_enabled_executes() {
        assert!(Enabled.should_execute());
        assert!(!Disabled.should_execute());
        assert!(!TemporarilyDisabled.should_execute());
    }

    #[test]
    fn test_resolve_key_precedence() {
        let plain = DataClass::builder("Song").build().unwrap();
        let wrapped = DataClass::builder("Album").default_wrap("album").build().unwrap();
        let settings = DataSettings {
            wrap: Some("data".to_string()),
            ..DataSettings::default()
        };

        assert_eq!(Wrap::default().resolve_key(&plain, &settings), Some("data"));
        assert_eq!(Wrap::default().resolve_key(&wrapped, &settings), Some("album"));
        assert_eq!(Wrap::defined("items").resolve_key(&wrapped, &settings), Some("items"));
        assert_eq!(Wrap::disabled().resolve_key(&wrapped, &settings), None);
        assert_eq!(
            Wrap::default().resolve_key(&plain, &DataSettings::default()),
            None
        );
    }
}
