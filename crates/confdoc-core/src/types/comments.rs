//! Comment maps and the parsed document pair.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::ConfigValue;

/// Mapping from a key-path string to the comment block that preceded it
///
/// A key path maps to at most one comment; inserting again replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentMap {
    entries: IndexMap<String, String>,
}

impl CommentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `comment` for `key`, returning the comment it replaced
    pub fn insert(&mut self, key: impl Into<String>, comment: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), comment.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CommentMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Result of parsing one buffer: the value tree plus its out-of-band comments
///
/// Created fresh on every parse; never reused across edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedConfig {
    pub values: ConfigValue,
    pub comments: CommentMap,
}

impl ParsedConfig {
    pub fn new(values: ConfigValue, comments: CommentMap) -> Self {
        Self { values, comments }
    }

    /// Document without any comments
    pub fn uncommented(values: ConfigValue) -> Self {
        Self {
            values,
            comments: CommentMap::new(),
        }
    }
}
