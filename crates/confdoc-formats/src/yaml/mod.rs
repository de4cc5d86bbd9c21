//! YAML parsing and serialization (block-style subset)
//!
//! Supported: block mappings, block sequences of scalars, single-line
//! bracketed arrays and `#` comments. Not supported: flow mappings, anchors
//! and aliases, tags, multi-document streams, block scalar content.

use confdoc_core::utils::{format_number, parse_number};
use confdoc_core::{CommentMap, ConfdocResult, ConfigValue, FormatTag, KeyPath, ParsedConfig};
use indexmap::IndexMap;
use tracing::trace;

use crate::comments::CommentTracker;
use crate::diagnostics::{DiagnosticSink, SkipReason};
use crate::options::{ParseOptions, ParseOutcome};
use crate::scan::{indent_width, split_array_items, split_inline_comment, unquote, unquote_key};

const INDENT_STEP: usize = 2;

/// Parse YAML text into a value tree and comment map
pub fn parse_yaml(content: &str, options: &ParseOptions) -> ConfdocResult<ParseOutcome> {
    let mut scanner = YamlScanner::new(options);
    for (index, line) in content.lines().enumerate() {
        scanner.feed(index + 1, line)?;
    }
    Ok(scanner.finish())
}

/// One open block mapping: the indent of its key line and its path
#[derive(Debug, Clone)]
struct Frame {
    indent: Option<usize>,
    path: KeyPath,
}

struct YamlScanner {
    root: ConfigValue,
    stack: Vec<Frame>,
    tracker: CommentTracker,
    comments: CommentMap,
    sink: DiagnosticSink,
}

impl YamlScanner {
    fn new(options: &ParseOptions) -> Self {
        Self {
            root: ConfigValue::object(),
            // The root frame has no indent and is never popped
            stack: vec![Frame {
                indent: None,
                path: KeyPath::root(),
            }],
            tracker: CommentTracker::new(),
            comments: CommentMap::new(),
            sink: DiagnosticSink::new(FormatTag::Yaml, options),
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) -> ConfdocResult<()> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            self.tracker.reset();
            return Ok(());
        }

        if let Some(comment) = trimmed.strip_prefix('#') {
            self.tracker.comment(comment);
            return Ok(());
        }

        if indent_width(line) == 0 && (trimmed == "---" || trimmed == "...") {
            self.tracker.reset();
            return Ok(());
        }

        let indent = indent_width(line);

        if let Some(item) = list_item(trimmed) {
            return self.push_item(line_no, trimmed, indent, item);
        }

        match split_key_value(trimmed) {
            Some(("", _)) => {
                self.tracker.reset();
                self.sink.skip(line_no, trimmed, SkipReason::EmptyKey)
            },
            Some((key, value)) => self.assign(line_no, trimmed, indent, key, value),
            None => {
                self.tracker.reset();
                self.sink.skip(line_no, trimmed, SkipReason::Unrecognized)
            },
        }
    }

    /// Close every block whose key line is indented at least `indent`
    /// (or strictly deeper than `indent` for `- item` lines)
    fn close_blocks(&mut self, indent: usize, inclusive: bool) {
        while let Some(Frame {
            indent: Some(open), ..
        }) = self.stack.last()
        {
            let closes = if inclusive { *open >= indent } else { *open > indent };
            if !closes {
                break;
            }
            self.stack.pop();
        }
    }

    fn current_path(&self) -> KeyPath {
        self.stack
            .last()
            .map(|frame| frame.path.clone())
            .unwrap_or_default()
    }

    fn assign(&mut self, line_no: usize, line: &str, indent: usize, key: &str, raw_value: &str) -> ConfdocResult<()> {
        self.close_blocks(indent, true);

        let key = unquote_key(key).to_string();
        let (value_text, inline_comment) = split_inline_comment(raw_value.trim(), true);
        if let Some(comment) = inline_comment {
            self.tracker.replace(comment);
        }

        let parent_path = self.current_path();
        let path = parent_path.key(key.clone());

        let Some(parent) = self.root.get_path_mut(&parent_path).and_then(ConfigValue::as_object_mut) else {
            self.tracker.reset();
            return self.sink.skip(line_no, line, SkipReason::NotAContainer);
        };

        self.tracker.attach(path.dotted(), &mut self.comments);

        if matches!(value_text, "" | "|" | ">") {
            parent.insert(key, ConfigValue::object());
            trace!(path = %path, "opened block");
            self.stack.push(Frame {
                indent: Some(indent),
                path,
            });
        } else {
            parent.insert(key, parse_yaml_value(value_text));
        }
        Ok(())
    }

    fn push_item(&mut self, line_no: usize, line: &str, indent: usize, raw_item: &str) -> ConfdocResult<()> {
        // `key:\n- a` lists sit at the key's own indent
        self.close_blocks(indent, false);

        let (value_text, inline_comment) = split_inline_comment(raw_item.trim(), true);
        if let Some(comment) = inline_comment {
            self.tracker.replace(comment);
        }

        let path = self.current_path();
        let slot = match self.root.get_path_mut(&path) {
            Some(slot) if !path.is_root() => slot,
            _ => {
                self.tracker.reset();
                return self.sink.skip(line_no, line, SkipReason::NotAContainer);
            },
        };

        let replaces_content = match slot {
            ConfigValue::Array(_) => false,
            ConfigValue::Object(map) => !map.is_empty(),
            _ => true,
        };
        if replaces_content {
            self.sink.skip(line_no, line, SkipReason::Overwritten)?;
        }

        let items = slot.make_array();
        items.push(parse_yaml_value(value_text));
        let item_path = path.index(items.len() - 1);
        self.tracker.attach(item_path.dotted(), &mut self.comments);
        Ok(())
    }

    fn finish(self) -> ParseOutcome {
        ParseOutcome {
            document: ParsedConfig::new(self.root, self.comments),
            diagnostics: self.sink.into_entries(),
        }
    }
}

fn list_item(trimmed: &str) -> Option<&str> {
    if trimmed == "-" {
        Some("")
    } else {
        trimmed.strip_prefix("- ")
    }
}

/// Split `key: value` at the first `:` that is followed by whitespace or the
/// end of the line, skipping over a quoted key
fn split_key_value(trimmed: &str) -> Option<(&str, &str)> {
    let search_from = match trimmed.chars().next() {
        Some(quote @ ('"' | '\'')) => trimmed[1..].find(quote).map(|close| close + 2)?,
        _ => 0,
    };

    let bytes = trimmed.as_bytes();
    let colon = trimmed[search_from..]
        .match_indices(':')
        .map(|(offset, _)| search_from + offset)
        .find(|&at| bytes.get(at + 1).map_or(true, |next| next.is_ascii_whitespace()))?;

    Some((trimmed[..colon].trim(), trimmed[colon + 1..].trim()))
}

/// Coerce a raw YAML scalar: YAML booleans and nulls, quoted strings,
/// `[...]` arrays, numbers, and the raw text as a last resort
pub fn parse_yaml_value(raw: &str) -> ConfigValue {
    let raw = raw.trim();

    match raw {
        "true" | "yes" | "on" => return ConfigValue::Bool(true),
        "false" | "no" | "off" => return ConfigValue::Bool(false),
        "null" | "~" | "" => return ConfigValue::Null,
        _ => {},
    }

    if let Some(inner) = unquote(raw) {
        return ConfigValue::String(inner.to_string());
    }

    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        return ConfigValue::Array(split_array_items(inner).map(parse_yaml_value).collect());
    }

    parse_number(raw)
        .map(ConfigValue::Number)
        .unwrap_or_else(|| ConfigValue::String(raw.to_string()))
}

/// Whether `s` must be quoted so that [`parse_yaml_value`] reads it back as
/// the same string
pub fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || matches!(
            s,
            "true" | "false" | "yes" | "no" | "on" | "off" | "null" | "~" | "|" | ">"
        )
        || s.contains(':')
        || s.contains('#')
        || parse_number(s).is_some()
        || s.trim() != s
        || (s.starts_with('[') && s.ends_with(']'))
        || unquote(s).is_some()
}

fn quote(s: &str) -> String {
    if s.contains('"') && !s.contains('\'') {
        format!("'{}'", s)
    } else {
        format!("\"{}\"", s)
    }
}

fn format_key(key: &str) -> String {
    let awkward = key.is_empty()
        || key.contains(':')
        || key.contains('#')
        || key.trim() != key
        || key.starts_with(['-', '[', '{', '"', '\'']);
    if awkward {
        quote(key)
    } else {
        key.to_string()
    }
}

/// Render a scalar, quoting strings that would otherwise change type on reparse
pub fn format_scalar(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Null => "null".to_string(),
        ConfigValue::Bool(b) => b.to_string(),
        ConfigValue::Number(n) => format_number(*n),
        ConfigValue::String(s) if needs_quotes(s) => quote(s),
        ConfigValue::String(s) => s.clone(),
        ConfigValue::Array(items) => {
            let rendered: Vec<String> = items.iter().map(format_scalar).collect();
            format!("[{}]", rendered.join(", "))
        },
        ConfigValue::Object(map) => {
            let rendered: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", format_key(key), format_scalar(value)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        },
    }
}

/// Serialize a value tree as block-style YAML. Comments are not re-emitted.
pub fn stringify_yaml(values: &ConfigValue) -> String {
    let mut out = String::new();
    match values {
        ConfigValue::Object(map) => write_mapping(map, 0, &mut out),
        ConfigValue::Array(items) => write_sequence(items, 0, &mut out),
        scalar => {
            out.push_str(&format_scalar(scalar));
            out.push('\n');
        },
    }
    out
}

fn write_mapping(map: &IndexMap<String, ConfigValue>, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    for (key, value) in map {
        let key = format_key(key);
        match value {
            ConfigValue::Object(child) => {
                out.push_str(&format!("{pad}{key}:\n"));
                write_mapping(child, indent + INDENT_STEP, out);
            },
            ConfigValue::Array(items) if items.is_empty() => {
                out.push_str(&format!("{pad}{key}: []\n"));
            },
            ConfigValue::Array(items) => {
                out.push_str(&format!("{pad}{key}:\n"));
                write_sequence(items, indent + INDENT_STEP, out);
            },
            scalar => {
                out.push_str(&format!("{pad}{key}: {}\n", format_scalar(scalar)));
            },
        }
    }
}

fn write_sequence(items: &[ConfigValue], indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    for item in items {
        match item {
            ConfigValue::Object(map) if !map.is_empty() => {
                out.push_str(&format!("{pad}-\n"));
                write_mapping(map, indent + INDENT_STEP, out);
            },
            other => {
                out.push_str(&format!("{pad}- {}\n", format_scalar(other)));
            },
        }
    }
}
