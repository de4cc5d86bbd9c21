//! Configuration document parsing for confdoc
//!
//! This crate turns raw JSON (with comments), TOML, YAML and Properties text
//! into a [`ParsedConfig`] (value tree plus comment map) and serializes value
//! trees back into text. Every call is a pure function of its input.

pub mod comments;
pub mod diagnostics;
pub mod json;
pub mod options;
pub mod properties;
pub mod scan;
pub mod toml;
pub mod yaml;

use std::path::Path;

use confdoc_core::{ConfdocError, ConfdocResult, ConfigValue, FormatTag, ParsedConfig};
use tracing::debug;

// Re-export main types
pub use comments::CommentTracker;
pub use diagnostics::{Diagnostic, SkipReason};
pub use options::{ParseMode, ParseOptions, ParseOutcome};

/// Detect the format of a file from its extension
pub fn detect_format(path: impl AsRef<Path>) -> FormatTag {
    FormatTag::from_path(path)
}

/// Whether a structured tree editor is available for `format`
pub fn supports_structured_edit(format: FormatTag) -> bool {
    format.supports_structured_edit()
}

/// Parse `text` leniently. An `Err` means the caller should edit raw text.
pub fn parse(text: &str, format: FormatTag) -> ConfdocResult<ParsedConfig> {
    parse_with(text, format, &ParseOptions::default()).map(|outcome| outcome.document)
}

/// Parse `text` with explicit options, keeping the skipped-line diagnostics
pub fn parse_with(text: &str, format: FormatTag, options: &ParseOptions) -> ConfdocResult<ParseOutcome> {
    let outcome = match format {
        FormatTag::Json => json::parse_json(text, options)?,
        FormatTag::Toml => toml::parse_toml(text, options)?,
        FormatTag::Yaml => yaml::parse_yaml(text, options)?,
        FormatTag::Properties => properties::parse_properties(text, options)?,
        FormatTag::Text => {
            return Err(ConfdocError::UnsupportedFormat {
                format: format.to_string(),
            })
        },
    };

    debug!(
        format = %format,
        comments = outcome.document.comments.len(),
        skipped = outcome.diagnostics.len(),
        "parsed configuration document"
    );

    Ok(outcome)
}

/// Serialize a value tree. Comments are never re-emitted.
pub fn stringify(values: &ConfigValue, format: FormatTag) -> String {
    match format {
        FormatTag::Json => json::stringify_json(values),
        FormatTag::Toml => toml::stringify_toml(values),
        FormatTag::Yaml => yaml::stringify_yaml(values),
        FormatTag::Properties => properties::stringify_properties(values),
        FormatTag::Text => match values {
            ConfigValue::String(text) => text.clone(),
            other => json::stringify_json(other),
        },
    }
}
