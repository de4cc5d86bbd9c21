//! The format-independent configuration value tree.
//!
//! Every supported surface syntax decodes into `ConfigValue` and encodes back
//! out of it. Objects keep insertion order.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::path::{KeyPath, PathSegment};
use crate::utils::number::{format_number, integral_value};

/// Recursive configuration value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<ConfigValue>),
    Object(IndexMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Create an empty object
    pub fn object() -> Self {
        ConfigValue::Object(IndexMap::new())
    }

    /// Human readable name of the runtime type
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Number(_) => "number",
            ConfigValue::String(_) => "string",
            ConfigValue::Array(_) => "array",
            ConfigValue::Object(_) => "object",
        }
    }

    /// Check if this value has no children
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ConfigValue::Array(_) | ConfigValue::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<ConfigValue>> {
        match self {
            ConfigValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<ConfigValue>> {
        match self {
            ConfigValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, ConfigValue>> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<String, ConfigValue>> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Turn this value into an object, discarding any other content
    pub fn make_object(&mut self) -> &mut IndexMap<String, ConfigValue> {
        if !matches!(self, ConfigValue::Object(_)) {
            *self = ConfigValue::object();
        }
        match self {
            ConfigValue::Object(map) => map,
            _ => unreachable!("value was just replaced with an object"),
        }
    }

    /// Turn this value into an array, discarding any other content
    pub fn make_array(&mut self) -> &mut Vec<ConfigValue> {
        if !matches!(self, ConfigValue::Array(_)) {
            *self = ConfigValue::Array(Vec::new());
        }
        match self {
            ConfigValue::Array(items) => items,
            _ => unreachable!("value was just replaced with an array"),
        }
    }

    /// Look up the direct child addressed by one path segment
    pub fn child(&self, segment: &PathSegment) -> Option<&ConfigValue> {
        match (self, segment) {
            (ConfigValue::Object(map), PathSegment::Key(key)) => map.get(key),
            (ConfigValue::Array(items), PathSegment::Index(index)) => items.get(*index),
            _ => None,
        }
    }

    /// Mutable variant of [`ConfigValue::child`]
    pub fn child_mut(&mut self, segment: &PathSegment) -> Option<&mut ConfigValue> {
        match (self, segment) {
            (ConfigValue::Object(map), PathSegment::Key(key)) => map.get_mut(key),
            (ConfigValue::Array(items), PathSegment::Index(index)) => items.get_mut(*index),
            _ => None,
        }
    }

    /// Resolve a key path against this value. The empty path is `self`.
    pub fn get_path(&self, path: &KeyPath) -> Option<&ConfigValue> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Mutable variant of [`ConfigValue::get_path`]
    pub fn get_path_mut(&mut self, path: &KeyPath) -> Option<&mut ConfigValue> {
        let mut node = self;
        for segment in path.segments() {
            node = node.child_mut(segment)?;
        }
        Some(node)
    }

    /// Render a scalar the way the line-oriented formats print it.
    ///
    /// Containers fall back to compact JSON.
    pub fn display_scalar(&self) -> String {
        match self {
            ConfigValue::Null => "null".to_string(),
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Number(n) => format_number(*n),
            ConfigValue::String(s) => s.clone(),
            other => serde_json::Value::from(other).to_string(),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_scalar())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Number(value as f64)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        ConfigValue::Array(value)
    }
}

impl From<IndexMap<String, ConfigValue>> for ConfigValue {
    fn from(value: IndexMap<String, ConfigValue>) -> Self {
        ConfigValue::Object(value)
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            // Every JSON number is representable as f64, possibly with rounding
            serde_json::Value::Number(n) => ConfigValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::Array(items.into_iter().map(ConfigValue::from).collect())
            },
            serde_json::Value::Object(map) => ConfigValue::Object(
                map.into_iter()
                    .map(|(key, value)| (key, ConfigValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&ConfigValue> for serde_json::Value {
    fn from(value: &ConfigValue) -> Self {
        match value {
            ConfigValue::Null => serde_json::Value::Null,
            ConfigValue::Bool(b) => serde_json::Value::Bool(*b),
            ConfigValue::Number(n) => match integral_value(*n) {
                Some(i) => serde_json::Value::from(i),
                // Non-finite numbers have no JSON spelling and become null
                None => serde_json::Number::from_f64(*n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            ConfigValue::String(s) => serde_json::Value::String(s.clone()),
            ConfigValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            },
            ConfigValue::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(ConfigValue::from)
    }
}
