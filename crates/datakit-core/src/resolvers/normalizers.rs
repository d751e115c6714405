//! Normalizers: turning supported inputs into a keyed payload
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use crate::value::{Payload, Value};
use std::fmt::Debug;

/// Produces a payload from an input value, or `None` when unsupported
pub trait Normalizer: Send + Sync + Debug {
    fn normalize(&self, value: &Value) -> Option<Payload>;
}

/// Maps are payloads already
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayNormalizer;

impl Normalizer for ArrayNormalizer {
    fn normalize(&self, value: &Value) -> Option<Payload> {
        value.as_map().cloned()
    }
}

/// Raw property values of another data object
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectNormalizer;

impl Normalizer for ObjectNormalizer {
    fn normalize(&self, value: &Value) -> Option<Payload> {
        value.as_data().map(|data| data.values().clone())
    }
}

/// A JSON object encoded in a string
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonNormalizer;

impl Normalizer for JsonNormalizer {
    fn normalize(&self, value: &Value) -> Option<Payload> {
        let json = value.as_str()?;
        match serde_json::from_str::<serde_json::Value>(json).ok()? {
            object @ serde_json::Value::Object(_) => match Value::from(object) {
                Value::Map(payload) => Some(payload),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_normalizer() {
        let payload = Value::from(json!({"title": "Rumours"}));
        assert_eq!(ArrayNormalizer.normalize(&payload).unwrap()["title"], Value::from("Rumours"));
        assert!(ArrayNormalizer.normalize(&Value::from("Rumours")).is_none());
    }

    #[test]
    fn test_json_normalizer_only_accepts_objects() {
        let payload = JsonNormalizer
            .normalize(&Value::from(r#"{"title": "Tusk", "year": 1979}"#))
            .unwrap();
        assert_eq!(payload["year"], Value::Int(1979));

        assert!(JsonNormalizer.normalize(&Value::from("[1, 2]")).is_none());
        assert!(JsonNormalizer.normalize(&Value::from("not json")).is_none());
        assert!(JsonNormalizer.normalize(&Value::Int(1)).is_none());
    }
}
