//! Error types and result aliases for confdoc operations.
//!
//! Provides a unified error type that covers parsing, path addressing and
//! editing failures, with actionable error messages.

use thiserror::Error;

/// Unified error type for all confdoc operations
#[derive(Error, Debug)]
pub enum ConfdocError {
    // Parse errors
    #[error("Failed to parse JSON document: {message} at line {line}, column {column}")]
    JsonParse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Format '{format}' does not support structured editing")]
    UnsupportedFormat { format: String },

    #[error("Skipped {format} line {line} ({reason}): {content}")]
    SkippedLine {
        format: String,
        line: usize,
        content: String,
        reason: String,
    },

    // Path errors
    #[error("Invalid key path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("No value at key path '{path}'")]
    PathNotFound { path: String },

    // Edit errors
    #[error("Value at '{path}' is {found}, expected {expected}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    #[error("Value at '{path}' is read-only")]
    ReadOnly { path: String },

    #[error("Invalid input '{input}' for '{path}': {reason}")]
    InvalidInput {
        path: String,
        input: String,
        reason: String,
    },

    #[error("Failed to serialize output: {message}")]
    Serialization { message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for confdoc operations
pub type ConfdocResult<T> = Result<T, ConfdocError>;

impl ConfdocError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a JSON parse error from a serde_json error
    pub fn json(source: &serde_json::Error) -> Self {
        Self::JsonParse {
            message: source.to_string(),
            line: source.line(),
            column: source.column(),
        }
    }

    /// Create a serialization error from a serde_json error
    pub fn serialization(source: &serde_json::Error) -> Self {
        Self::Serialization {
            message: source.to_string(),
        }
    }

    /// Check if this error means the caller should fall back to raw-text editing
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            ConfdocError::JsonParse { .. }
                | ConfdocError::UnsupportedFormat { .. }
                | ConfdocError::SkippedLine { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ConfdocError::JsonParse { .. } => {
                Some("Fix the JSON syntax or edit the file as raw text")
            },
            ConfdocError::UnsupportedFormat { .. } => {
                Some("Pass --format json|toml|yaml|properties to force a structured format")
            },
            ConfdocError::SkippedLine { .. } => {
                Some("Drop --strict to accept best-effort parsing of this file")
            },
            ConfdocError::InvalidPath { .. } => {
                Some("Key paths look like 'server.port' or 'items[2]'")
            },
            ConfdocError::PathNotFound { .. } => {
                Some("Run 'confdoc fields <FILE>' to list the available key paths")
            },
            ConfdocError::ReadOnly { .. } => {
                Some("Null values cannot be edited in place; use 'set' with --json instead")
            },
            _ => None,
        }
    }
}
