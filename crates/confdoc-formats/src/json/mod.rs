//! JSON-with-comments parsing and serialization
//!
//! Full-line `//` comments and trailing commas are tolerated. Comments attach
//! to the bare name of the next key, whatever its nesting depth, so two keys
//! with the same name at different levels share one comment slot.

use confdoc_core::{CommentMap, ConfdocError, ConfdocResult, ConfigValue, FormatTag, ParsedConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::comments::CommentTracker;
use crate::diagnostics::{DiagnosticSink, SkipReason};
use crate::options::{ParseOptions, ParseOutcome};

static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*//\s*(.*)$").expect("valid regex"));
static KEY_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\s*"([^"]+)"\s*:"#).expect("valid regex"));
static DELIMITER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[{}\[\],]+\s*$").expect("valid regex"));
static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",(\s*[}\]])").expect("valid regex"));

/// Parse JSON text that may contain `//` comment lines and trailing commas
pub fn parse_json(content: &str, options: &ParseOptions) -> ConfdocResult<ParseOutcome> {
    let mut sink = DiagnosticSink::new(FormatTag::Json, options);
    let comments = extract_comments(content);
    let cleaned = strip_comments(content);

    let document = match serde_json::from_str::<serde_json::Value>(&cleaned) {
        Ok(value) => ParsedConfig::new(ConfigValue::from(value), comments),
        Err(cleaned_error) => {
            debug!(error = %cleaned_error, "cleaned JSON rejected, parsing original text");
            // Cleaning keeps line numbers, so the cleaned error points at the real culprit
            let value = serde_json::from_str::<serde_json::Value>(content)
                .map_err(|_| ConfdocError::json(&cleaned_error))?;
            sink.note(0, "", SkipReason::CommentStripFallback);
            ParsedConfig::uncommented(ConfigValue::from(value))
        },
    };

    Ok(ParseOutcome {
        document,
        diagnostics: sink.into_entries(),
    })
}

/// Collect comments that immediately precede a `"key":` line
pub fn extract_comments(content: &str) -> CommentMap {
    let mut tracker = CommentTracker::new();
    let mut comments = CommentMap::new();

    for line in content.lines() {
        if let Some(captures) = COMMENT_LINE.captures(line) {
            tracker.comment(captures.get(1).map_or("", |m| m.as_str()));
        } else if let Some(captures) = KEY_LINE.captures(line) {
            if let Some(key) = captures.get(1) {
                tracker.attach(key.as_str(), &mut comments);
            }
        } else if !DELIMITER_LINE.is_match(line) {
            tracker.reset();
        }
    }

    comments
}

/// Blank out `//` comment lines and drop trailing commas before `}` or `]`
pub fn strip_comments(content: &str) -> String {
    let without_comments = content
        .lines()
        .map(|line| if COMMENT_LINE.is_match(line) { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n");

    TRAILING_COMMA.replace_all(&without_comments, "$1").into_owned()
}

/// Serialize to pretty-printed JSON with 2-space indent
pub fn stringify_json(values: &ConfigValue) -> String {
    format!("{:#}", serde_json::Value::from(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ParsedConfig {
        parse_json(content, &ParseOptions::default()).unwrap().document
    }

    #[test]
    fn test_parse_plain_json() {
        let parsed = parse(r#"{"name": "server", "port": 25565, "enabled": true, "extra": null}"#);
        let object = parsed.values.as_object().unwrap();
        assert_eq!(object["name"], ConfigValue::from("server"));
        assert_eq!(object["port"], ConfigValue::Number(25565.0));
        assert_eq!(object["enabled"], ConfigValue::Bool(true));
        assert_eq!(object["extra"], ConfigValue::Null);
        assert!(parsed.comments.is_empty());
    }

    #[test]
    fn test_comments_attach_to_next_key() {
        let content = r#"{
  // Render distance in chunks
  // (client only)
  "renderDistance": 12,
  "fov": 70
}"#;
        let parsed = parse(content);
        assert_eq!(
            parsed.comments.get("renderDistance"),
            Some("Render distance in chunks (client only)")
        );
        assert!(!parsed.comments.contains_key("fov"));
    }

    #[test]
    fn test_comments_use_bare_key_names() {
        let content = r#"{
  "video": {
    // Inner toggle
    "enabled": true
  },
  "audio": {
    "enabled": false
  }
}"#;
        let parsed = parse(content);
        assert_eq!(parsed.comments.get("enabled"), Some("Inner toggle"));
        assert!(!parsed.comments.contains_key("video.enabled"));
    }

    #[test]
    fn test_same_named_keys_collide() {
        let content = r#"{
  "a": {
    // first
    "enabled": true
  },
  "b": {
    // second
    "enabled": false
  }
}"#;
        let parsed = parse(content);
        assert_eq!(parsed.comments.get("enabled"), Some("second"));
        assert_eq!(parsed.comments.len(), 1);
    }

    #[test]
    fn test_delimiter_lines_keep_comment_pending() {
        let content = "[\n  // describes the object\n  {\n    \"id\": 1\n  }\n]";
        let parsed = parse(content);
        assert_eq!(parsed.comments.get("id"), Some("describes the object"));
    }

    #[test]
    fn test_value_lines_drop_pending_comment() {
        let content = "{\n  \"list\": [\n    // stray\n    1,\n    2\n  ],\n  \"next\": 3\n}";
        let parsed = parse(content);
        assert!(parsed.comments.is_empty());
    }

    #[test]
    fn test_blank_line_drops_pending_comment() {
        let content = "{\n  // detached\n\n  \"key\": 1\n}";
        let parsed = parse(content);
        assert!(parsed.comments.is_empty());
    }

    #[test]
    fn test_trailing_commas_are_tolerated() {
        let parsed = parse("{\n  \"a\": [1, 2, 3,],\n  \"b\": {\"c\": 1,},\n}");
        let expected: ConfigValue = serde_json::from_str(r#"{"a": [1, 2, 3], "b": {"c": 1}}"#).unwrap();
        assert_eq!(parsed.values, expected);
    }

    #[test]
    fn test_failure_reports_original_location() {
        let content = "{\n  // note\n  \"a\": 1,\n  \"b\": oops\n}";
        let error = parse_json(content, &ParseOptions::default()).unwrap_err();
        assert!(matches!(error, ConfdocError::JsonParse { line: 4, .. }));
    }

    #[test]
    fn test_strip_keeps_line_numbers() {
        let cleaned = strip_comments("{\n  // gone\n  \"a\": [1,\n  ],\n}");
        assert_eq!(cleaned, "{\n\n  \"a\": [1\n  ]\n}");
    }

    #[test]
    fn test_unrecoverable_json_fails() {
        let error = parse_json("{\"a\": }", &ParseOptions::default()).unwrap_err();
        assert!(matches!(error, ConfdocError::JsonParse { line: 1, .. }));
        assert!(error.is_parse_failure());
    }

    #[test]
    fn test_comments_never_change_values() {
        let commented = "{\n  // one\n  \"a\": 1,\n  // two\n  \"b\": [true, false]\n}";
        let bare = "{\n  \"a\": 1,\n  \"b\": [true, false]\n}";
        assert_eq!(parse(commented).values, parse(bare).values);
    }

    #[test]
    fn test_stringify_is_pretty_and_comment_free() {
        let parsed = parse("{\n  // note\n  \"port\": 25565,\n  \"tags\": [\"a\"]\n}");
        let rendered = stringify_json(&parsed.values);
        assert_eq!(rendered, "{\n  \"port\": 25565,\n  \"tags\": [\n    \"a\"\n  ]\n}");
        assert!(!rendered.contains("note"));
    }

    #[test]
    fn test_stringify_preserves_key_order() {
        let parsed = parse(r#"{"z": 1, "a": 2, "m": 3}"#);
        let rendered = stringify_json(&parsed.values);
        let z = rendered.find("\"z\"").unwrap();
        let a = rendered.find("\"a\"").unwrap();
        let m = rendered.find("\"m\"").unwrap();
        assert!(z < a && a < m);
    }
}
