//! # confdoc-core
//!
//! Core types and utilities shared across all confdoc crates.
//!
//! This crate provides:
//! - `ConfigValue`, the format-independent value tree
//! - `KeyPath` for addressing nodes inside a tree
//! - `CommentMap` and `ParsedConfig`, the output of every format parser
//! - `FormatTag` for identifying the surface syntax of a buffer
//! - `ConfdocError` enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (ConfigValue, KeyPath, CommentMap, etc.)
//! - `error`: Error types and result aliases
//! - `utils`: Numeric and path helpers shared by the format crates

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{ConfdocError, ConfdocResult};
pub use types::{
    CommentMap, ConfigValue, FormatTag, KeyPath, ParsedConfig, PathSegment, UnknownFormat,
};
