//! Core data types for confdoc documents.
//!
//! This module provides the fundamental types used throughout confdoc:
//! - The format-independent value tree
//! - Key paths addressing nodes in that tree
//! - Comment maps and the parsed document pair
//! - Format tags

pub mod comments;
pub mod format;
pub mod path;
pub mod value;

// Re-export all public types
pub use comments::{CommentMap, ParsedConfig};
pub use format::{FormatTag, UnknownFormat};
pub use path::{KeyPath, PathSegment};
pub use value::ConfigValue;
