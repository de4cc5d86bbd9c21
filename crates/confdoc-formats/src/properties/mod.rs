//! Java-style `.properties` parsing and serialization
//!
//! Keys are flat and kept verbatim, dots included. Values are coerced to
//! booleans and numbers where they look like one.

use confdoc_core::utils::parse_finite_number;
use confdoc_core::{CommentMap, ConfdocResult, ConfigValue, FormatTag, ParsedConfig};
use indexmap::IndexMap;

use crate::comments::CommentTracker;
use crate::diagnostics::{DiagnosticSink, SkipReason};
use crate::options::{ParseOptions, ParseOutcome};

/// Parse Properties text into a flat object and comment map
pub fn parse_properties(content: &str, options: &ParseOptions) -> ConfdocResult<ParseOutcome> {
    let mut sink = DiagnosticSink::new(FormatTag::Properties, options);
    let mut tracker = CommentTracker::new();
    let mut comments = CommentMap::new();
    let mut values = IndexMap::new();

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            tracker.reset();
            continue;
        }

        if let Some(comment) = trimmed.strip_prefix('#').or_else(|| trimmed.strip_prefix('!')) {
            tracker.comment(comment);
            continue;
        }

        let Some(separator) = trimmed.find(['=', ':']) else {
            tracker.reset();
            sink.skip(line_no, trimmed, SkipReason::Unrecognized)?;
            continue;
        };

        let key = trimmed[..separator].trim();
        if key.is_empty() {
            tracker.reset();
            sink.skip(line_no, trimmed, SkipReason::EmptyKey)?;
            continue;
        }

        let value = parse_property_value(&trimmed[separator + 1..]);
        tracker.attach(key, &mut comments);
        values.insert(key.to_string(), value);
    }

    Ok(ParseOutcome {
        document: ParsedConfig::new(ConfigValue::Object(values), comments),
        diagnostics: sink.into_entries(),
    })
}

/// Coerce a raw value: `true`/`false`, then numbers, then text
pub fn parse_property_value(raw: &str) -> ConfigValue {
    let raw = raw.trim();
    match raw {
        "true" => ConfigValue::Bool(true),
        "false" => ConfigValue::Bool(false),
        _ => parse_finite_number(raw)
            .map(ConfigValue::Number)
            .unwrap_or_else(|| ConfigValue::String(raw.to_string())),
    }
}

fn format_property_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Null => String::new(),
        other => other.display_scalar(),
    }
}

/// Serialize a flat object as `key=value` lines.
///
/// Nested containers are written as compact JSON; a non-object root yields
/// an empty document.
pub fn stringify_properties(values: &ConfigValue) -> String {
    let Some(map) = values.as_object() else {
        return String::new();
    };

    map.iter()
        .map(|(key, value)| format!("{}={}\n", key, format_property_value(value)))
        .collect()
}
