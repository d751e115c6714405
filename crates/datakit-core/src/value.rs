//! Dynamic value model flowing in and out of data objects
//!
//! Property values, transformer inputs and outputs, and the transformation
//! engine's output payloads are all expressed as [`Value`]. Nested data
//! objects, data collections, lazy values and the Optional sentinel are
//! first-class variants so the engine can dispatch on them without any
//! open-ended type inspection.
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use crate::data::{DataCollection, DataObject};
use crate::lazy::Lazy;
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// Ordered key → value mapping; insertion order is output order
pub type Payload = IndexMap<String, Value>;

/// Runtime kind of a [`Value`], used as the transformer and cast registry key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    DateTime,
    Enum,
    List,
    Map,
    Data,
    Collection,
    Lazy,
    Optional,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::DateTime => "datetime",
            ValueKind::Enum => "enum",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::Data => "data",
            ValueKind::Collection => "collection",
            ValueKind::Lazy => "lazy",
            ValueKind::Optional => "optional",
        };
        f.write_str(name)
    }
}

/// A case of an enumeration, optionally backed by a scalar
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    /// Case name, e.g. `Published`
    pub case: String,
    /// Backing value, e.g. `"published"` or `2`
    pub backing: Option<Box<Value>>,
}

impl EnumValue {
    /// A case without a backing value
    pub fn pure(case: impl Into<String>) -> Self {
        Self {
            case: case.into(),
            backing: None,
        }
    }

    /// A case backed by a scalar value
    pub fn backed(case: impl Into<String>, backing: impl Into<Value>) -> Self {
        Self {
            case: case.into(),
            backing: Some(Box::new(backing.into())),
        }
    }
}

/// A dynamically typed value
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<FixedOffset>),
    Enum(EnumValue),
    List(Vec<Value>),
    Map(Payload),
    /// A nested data object
    Data(Box<DataObject>),
    /// A homogeneous collection of data objects
    Collection(Box<DataCollection>),
    /// A deferred computation
    Lazy(Lazy),
    /// Sentinel for "property not supplied"; never appears in output
    Optional,
}

impl Value {
    /// Runtime kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Enum(_) => ValueKind::Enum,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Data(_) => ValueKind::Data,
            Value::Collection(_) => ValueKind::Collection,
            Value::Lazy(_) => ValueKind::Lazy,
            Value::Optional => ValueKind::Optional,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Value::Optional)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Payload> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&DataObject> {
        match self {
            Value::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Encode as JSON; nested data is transformed with the global configuration
    pub fn to_json(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Optional, Value::Optional) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Data(a), Value::Data(b)) => a == b,
            (Value::Collection(a), Value::Collection(b)) => a == b,
            (Value::Lazy(a), Value::Lazy(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::DateTime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Value::Enum(e) => match &e.backing {
                Some(backing) => backing.serialize(serializer),
                None => serializer.serialize_str(&e.case),
            },
            Value::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for item in list {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => serialize_payload(map, serializer),
            Value::Data(data) => {
                let payload = data.to_array().map_err(S::Error::custom)?;
                serialize_payload(&payload, serializer)
            }
            Value::Collection(collection) => collection
                .to_array()
                .map_err(S::Error::custom)?
                .serialize(serializer),
            Value::Lazy(_) => Err(S::Error::custom("cannot serialize an unresolved lazy value")),
            Value::Optional => Err(S::Error::custom("cannot serialize the optional sentinel")),
        }
    }
}

fn serialize_payload<S: Serializer>(payload: &Payload, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(payload.len()))?;
    for (key, value) in payload {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::DateTime(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Value::Enum(value)
    }
}

impl From<Payload> for Value {
    fn from(value: Payload) -> Self {
        Value::Map(value)
    }
}

impl From<DataObject> for Value {
    fn from(value: DataObject) -> Self {
        Value::Data(Box::new(value))
    }
}

impl From<DataCollection> for Value {
    fn from(value: DataCollection) -> Self {
        Value::Collection(Box::new(value))
    }
}

impl From<Lazy> for Value {
    fn from(value: Lazy) -> Self {
        Value::Lazy(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_key_order() {
        let value = Value::from(json!({"b": 1, "a": [true, null], "c": 1.5}));
        let map = value.as_map().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(map["a"], Value::List(vec![Value::Bool(true), Value::Null]));
        assert_eq!(map["c"], Value::Float(1.5));
    }

    #[test]
    fn test_serialize_enum_uses_backing_value() {
        let backed = Value::from(EnumValue::backed("Published", "published"));
        let pure = Value::from(EnumValue::pure("Draft"));
        assert_eq!(backed.to_json().unwrap(), json!("published"));
        assert_eq!(pure.to_json().unwrap(), json!("Draft"));
    }

    #[test]
    fn test_serialize_rejects_sentinels() {
        assert!(Value::Optional.to_json().is_err());
        assert!(Value::from(Lazy::create(|| "x")).to_json().is_err());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Value::from("x").kind().to_string(), "string");
        assert_eq!(Value::Optional.kind(), ValueKind::Optional);
    }
}
