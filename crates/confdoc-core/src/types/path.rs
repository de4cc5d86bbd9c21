//! Key paths addressing nodes inside a [`ConfigValue`](super::ConfigValue) tree.
//!
//! The textual form is the one used as `CommentMap` keys: object keys joined
//! with `.` and array indices in brackets, e.g. `server.port` or `items[2]`.
//! Keys that contain `.`, `[` or `]` can be written as `["a.b"]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfdocError;

/// One step of a key path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Sequence of segments from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPath {
    segments: Vec<PathSegment>,
}

impl KeyPath {
    /// The empty path, addressing the document root
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Path made of object keys only
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: keys.into_iter().map(|k| PathSegment::Key(k.into())).collect(),
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Builder-style child path with an object key appended
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.segments.push(PathSegment::Key(key.into()));
        child
    }

    /// Builder-style child path with an array index appended
    pub fn index(&self, index: usize) -> Self {
        let mut child = self.clone();
        child.segments.push(PathSegment::Index(index));
        child
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Split into parent path and final segment
    pub fn split_last(&self) -> Option<(KeyPath, &PathSegment)> {
        self.segments
            .split_last()
            .map(|(last, rest)| (KeyPath::from_segments(rest.to_vec()), last))
    }

    /// Plain dotted form used for comment-map keys: `a.b.c`, `items[2]`.
    ///
    /// Unlike `Display` this never brackets keys, so it does not always
    /// parse back into the same path.
    pub fn dotted(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                },
                PathSegment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                },
            }
        }
        out
    }
}

fn needs_bracket(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']'])
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if needs_bracket(key) => write!(f, "[\"{}\"]", key)?,
                PathSegment::Key(key) => {
                    if position > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                },
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = ConfdocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfdocError::InvalidPath {
            path: s.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut rest = s.trim();
        let mut expect_key = true;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('[') {
                let close = after.find(']').ok_or_else(|| invalid("unclosed '['"))?;
                let inner = &after[..close];
                if let Some(quoted) = inner.strip_prefix('"').and_then(|q| q.strip_suffix('"')) {
                    segments.push(PathSegment::Key(quoted.to_string()));
                } else {
                    let index = inner
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| invalid("array index must be a non-negative integer"))?;
                    segments.push(PathSegment::Index(index));
                }
                rest = &after[close + 1..];
                expect_key = false;
            } else if let Some(after) = rest.strip_prefix('.') {
                if expect_key {
                    return Err(invalid("empty key segment"));
                }
                rest = after;
                expect_key = true;
            } else {
                if !expect_key {
                    return Err(invalid("expected '.' or '[' between segments"));
                }
                let end = rest.find(['.', '[']).unwrap_or(rest.len());
                segments.push(PathSegment::Key(rest[..end].to_string()));
                rest = &rest[end..];
                expect_key = false;
            }
        }

        if expect_key && !segments.is_empty() {
            return Err(invalid("trailing '.'"));
        }

        Ok(KeyPath { segments })
    }
}
