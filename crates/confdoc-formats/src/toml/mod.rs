//! TOML parsing and serialization
//!
//! A line-oriented subset: `[dotted.table]` headers, `key = value` pairs with
//! scalar or single-line array values, `#` comments. Anything else is skipped.

use confdoc_core::utils::{format_number, parse_number};
use confdoc_core::{CommentMap, ConfdocResult, ConfigValue, FormatTag, KeyPath, ParsedConfig};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::comments::CommentTracker;
use crate::diagnostics::{DiagnosticSink, SkipReason};
use crate::options::{ParseOptions, ParseOutcome};
use crate::scan::{split_array_items, split_inline_comment, unquote, unquote_key};

static TABLE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([^\]]+)\]$").expect("valid regex"));
static KEY_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^=]+?)\s*=\s*(.*)$").expect("valid regex"));

/// Parse TOML text into a value tree and comment map
pub fn parse_toml(content: &str, options: &ParseOptions) -> ConfdocResult<ParseOutcome> {
    let mut scanner = TomlScanner::new(options);
    for (index, line) in content.lines().enumerate() {
        scanner.feed(index + 1, line)?;
    }
    Ok(scanner.finish())
}

/// Scanner state: the tree built so far and the current table cursor
struct TomlScanner {
    root: IndexMap<String, ConfigValue>,
    section: Vec<String>,
    tracker: CommentTracker,
    comments: CommentMap,
    sink: DiagnosticSink,
}

impl TomlScanner {
    fn new(options: &ParseOptions) -> Self {
        Self {
            root: IndexMap::new(),
            section: Vec::new(),
            tracker: CommentTracker::new(),
            comments: CommentMap::new(),
            sink: DiagnosticSink::new(FormatTag::Toml, options),
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

        if let Some(captures) = TABLE_HEADER.captures(trimmed) {
            let header = captures.get(1).map_or("", |m| m.as_str());
            return self.enter_table(line_no, trimmed, header);
        }

        if let Some(captures) = KEY_VALUE.captures(trimmed) {
            let key = captures.get(1).map_or("", |m| m.as_str());
            let value = captures.get(2).map_or("", |m| m.as_str());
            return self.assign(line_no, trimmed, key, value);
        }

        self.tracker.reset();
        self.sink.skip(line_no, trimmed, SkipReason::Unrecognized)
    }

    fn enter_table(&mut self, line_no: usize, line: &str, header: &str) -> ConfdocResult<()> {
        let section: Vec<String> = header.split('.').map(|part| unquote_key(part).to_string()).collect();
        ensure_table(&mut self.root, &section, &mut self.sink, line_no, line)?;

        let path = KeyPath::from_keys(section.iter().cloned());
        self.tracker.attach(path.dotted(), &mut self.comments);
        trace!(section = %path.dotted(), "entered table");

        self.section = section;
        Ok(())
    }

    fn assign(&mut self, line_no: usize, line: &str, key: &str, raw_value: &str) -> ConfdocResult<()> {
        let key = unquote_key(key).to_string();
        let (value_text, inline_comment) = split_inline_comment(raw_value, false);
        if let Some(comment) = inline_comment {
            self.tracker.replace(comment);
        }

        let path = KeyPath::from_keys(self.section.iter().cloned()).key(key.clone());
        self.tracker.attach(path.dotted(), &mut self.comments);

        let table = ensure_table(&mut self.root, &self.section, &mut self.sink, line_no, line)?;
        table.insert(key, parse_toml_value(value_text));
        Ok(())
    }

    fn finish(self) -> ParseOutcome {
        ParseOutcome {
            document: ParsedConfig::new(ConfigValue::Object(self.root), self.comments),
            diagnostics: self.sink.into_entries(),
        }
    }
}

/// Walk to the table at `path`, creating missing tables along the way
fn ensure_table<'a>(
    root: &'a mut IndexMap<String, ConfigValue>,
    path: &[String],
    sink: &mut DiagnosticSink,
    line_no: usize,
    line: &str,
) -> ConfdocResult<&'a mut IndexMap<String, ConfigValue>> {
    let mut current = root;
    for part in path {
        let slot = current.entry(part.clone()).or_insert_with(ConfigValue::object);
        if !matches!(slot, ConfigValue::Object(_)) {
            sink.skip(line_no, line, SkipReason::Overwritten)?;
        }
        current = slot.make_object();
    }
    Ok(current)
}

/// Coerce a raw TOML value: booleans, quoted strings, `[...]` arrays, numbers,
/// and the raw text as a last resort
pub fn parse_toml_value(raw: &str) -> ConfigValue {
    let raw = raw.trim();

    match raw {
        "true" => return ConfigValue::Bool(true),
        "false" => return ConfigValue::Bool(false),
        _ => {},
    }

    if let Some(inner) = unquote(raw) {
        return ConfigValue::String(inner.to_string());
    }

    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        return ConfigValue::Array(split_array_items(inner).map(parse_toml_value).collect());
    }

    parse_number(raw)
        .map(ConfigValue::Number)
        .unwrap_or_else(|| ConfigValue::String(raw.to_string()))
}

/// Serialize a value tree as TOML: scalars first, then sub-tables depth-first
pub fn stringify_toml(values: &ConfigValue) -> String {
    let mut out = String::new();
    match values {
        ConfigValue::Object(map) => write_table(map, &mut Vec::new(), &mut out),
        other => debug!(kind = other.type_name(), "TOML root must be a table, nothing written"),
    }
    out.trim_start_matches('\n').to_string()
}

fn write_table(map: &IndexMap<String, ConfigValue>, path: &mut Vec<String>, out: &mut String) {
    for (key, value) in map {
        match value {
            ConfigValue::Object(_) => {},
            ConfigValue::Null => trace!(%key, "TOML has no null, entry omitted"),
            other => {
                out.push_str(&format_key(key));
                out.push_str(" = ");
                out.push_str(&format_toml_value(other));
                out.push('\n');
            },
        }
    }

    for (key, value) in map {
        if let ConfigValue::Object(child) = value {
            path.push(key.clone());
            let header: Vec<String> = path.iter().map(|part| format_key(part)).collect();
            out.push_str("\n[");
            out.push_str(&header.join("."));
            out.push_str("]\n");
            write_table(child, path, out);
            path.pop();
        }
    }
}

fn format_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        key.to_string()
    } else {
        format!("\"{}\"", key)
    }
}

fn quote_string(s: &str) -> String {
    if s.contains('"') && !s.contains('\'') {
        format!("'{}'", s)
    } else {
        format!("\"{}\"", s)
    }
}

fn format_toml_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Null => "\"\"".to_string(),
        ConfigValue::Bool(b) => b.to_string(),
        ConfigValue::Number(n) => format_number(*n),
        ConfigValue::String(s) => quote_string(s),
        ConfigValue::Array(items) => {
            let rendered: Vec<String> = items.iter().map(format_toml_value).collect();
            format!("[{}]", rendered.join(", "))
        },
        ConfigValue::Object(map) => {
            let rendered: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{} = {}", format_key(key), format_toml_value(value)))
                .collect();
            format!("{{ {} }}", rendered.join(", "))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confdoc_core::ConfdocError;

    fn parse(content: &str) -> ParseOutcome {
        parse_toml(content, &ParseOptions::default()).unwrap()
    }

    fn json(text: &str) -> ConfigValue {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_parse_server_scenario() {
        let outcome = parse("# Server settings\n[server]\nport = 25565\nmotd = \"Welcome\"\n");
        assert_eq!(outcome.document.values, json(r#"{"server": {"port": 25565, "motd": "Welcome"}}"#));
        assert_eq!(outcome.document.comments.get("server"), Some("Server settings"));
        assert_eq!(outcome.document.comments.len(), 1);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_parse_toml_value_scalars() {
        assert_eq!(parse_toml_value("not_a_number"), ConfigValue::from("not_a_number"));
        assert_eq!(parse_toml_value("3.14"), ConfigValue::Number(3.14));
        assert_eq!(parse_toml_value("true"), ConfigValue::Bool(true));
        assert_eq!(parse_toml_value("'single'"), ConfigValue::from("single"));
        assert_eq!(parse_toml_value("\"no \\t escapes\""), ConfigValue::from("no \\t escapes"));
    }

    #[test]
    fn test_parse_toml_value_reads_leading_number() {
        assert_eq!(parse_toml_value("1.5rc"), ConfigValue::Number(1.5));
        assert_eq!(parse_toml_value("1.2.3"), ConfigValue::Number(1.2));
        assert_eq!(parse_toml_value("Infinity"), ConfigValue::Number(f64::INFINITY));
        assert_eq!(parse_toml_value("\"1.5rc\""), ConfigValue::from("1.5rc"));
    }

    #[test]
    fn test_parse_toml_value_arrays() {
        assert_eq!(parse_toml_value("[1, 2, 3]"), json("[1, 2, 3]"));
        assert_eq!(parse_toml_value("[\"a\", 'b', true]"), json(r#"["a", "b", true]"#));
        assert_eq!(parse_toml_value("[]"), json("[]"));
        assert_eq!(parse_toml_value("[1, 2, ]"), json("[1, 2]"));
    }

    #[test]
    fn test_naive_array_split_breaks_quoted_commas() {
        assert_eq!(parse_toml_value("[\"a,b\"]"), json(r#"["\"a", "b\""]"#));
    }

    #[test]
    fn test_nested_table_headers() {
        let outcome = parse("[a.b]\nx = 1\n[a.c]\ny = 2\n");
        assert_eq!(outcome.document.values, json(r#"{"a": {"b": {"x": 1}, "c": {"y": 2}}}"#));
    }

    #[test]
    fn test_section_comments_use_full_path() {
        let outcome = parse("# Graphics\n# and shaders\n[client.video]\nvsync = true\n");
        assert_eq!(outcome.document.comments.get("client.video"), Some("Graphics and shaders"));
    }

    #[test]
    fn test_key_comments_use_full_path() {
        let outcome = parse("top = 1\n[server]\n# Port to bind\nport = 25565\n");
        assert_eq!(outcome.document.comments.get("server.port"), Some("Port to bind"));
        assert!(!outcome.document.comments.contains_key("port"));
    }

    #[test]
    fn test_inline_comment_attaches_to_key() {
        let outcome = parse("[server]\nport = 25565 # default port\nmotd = \"a # b\"\n");
        let comments = &outcome.document.comments;
        assert_eq!(comments.get("server.port"), Some("default port"));
        assert!(!comments.contains_key("server.motd"));
        assert_eq!(
            outcome.document.values.get_path(&"server.motd".parse().unwrap()),
            Some(&ConfigValue::from("a # b"))
        );
    }

    #[test]
    fn test_inline_comment_replaces_block_comment() {
        let outcome = parse("# block\nport = 1 # inline\n");
        assert_eq!(outcome.document.comments.get("port"), Some("inline"));
    }

    #[test]
    fn test_blank_line_resets_pending_comment() {
        let outcome = parse("# Detached\n\n[server]\nport = 1\n");
        assert!(outcome.document.comments.is_empty());
    }

    #[test]
    fn test_unrecognized_lines_are_skipped() {
        let outcome = parse("[[servers]]\nname = \"a\"\nlist = [\n  1,\n]\n");
        assert_eq!(outcome.document.values, json(r#"{"name": "a", "list": "["}"#));
        let skipped: Vec<_> = outcome.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(skipped, vec![1, 4, 5]);
    }

    #[test]
    fn test_strict_mode_rejects_unrecognized_lines() {
        let error = parse_toml("ok = 1\nnot a pair\n", &ParseOptions::strict()).unwrap_err();
        assert!(matches!(error, ConfdocError::SkippedLine { line: 2, .. }));
    }

    #[test]
    fn test_header_over_scalar_is_overwritten() {
        let outcome = parse("a = 1\n[a]\nb = 2\n");
        assert_eq!(outcome.document.values, json(r#"{"a": {"b": 2}}"#));
        assert_eq!(outcome.diagnostics[0].reason, SkipReason::Overwritten);
    }

    #[test]
    fn test_quoted_keys_are_unquoted() {
        let outcome = parse("\"player name\" = \"Steve\"\n");
        assert_eq!(outcome.document.values, json(r#"{"player name": "Steve"}"#));
    }

    #[test]
    fn test_stringify_scalars_before_subsections() {
        let value = json(r#"{"sub": {"x": 1, "deeper": {"y": [1, 2]}}, "title": "t", "on": true}"#);
        let rendered = stringify_toml(&value);
        assert_eq!(
            rendered,
            "title = \"t\"\non = true\n\n[sub]\nx = 1\n\n[sub.deeper]\ny = [1, 2]\n"
        );
    }

    #[test]
    fn test_stringify_drops_comments_and_nulls() {
        let outcome = parse("# note\nkey = 1\n");
        let mut values = outcome.document.values;
        values.as_object_mut().unwrap().insert("gone".to_string(), ConfigValue::Null);
        let rendered = stringify_toml(&values);
        assert_eq!(rendered, "key = 1\n");
    }

    #[test]
    fn test_mixed_quotes_and_hash_survive_round_trip() {
        let value = json(r#"{"k": "a\" # 'b", "list": ["x\" # 'y"]}"#);
        let rendered = stringify_toml(&value);
        assert_eq!(rendered, "k = \"a\" # 'b\"\nlist = [\"x\" # 'y\"]\n");

        let outcome = parse(&rendered);
        assert_eq!(outcome.document.values, value);
        assert!(outcome.document.comments.is_empty());
    }

    #[test]
    fn test_stringify_quotes_awkward_keys_and_strings() {
        let value = json(r#"{"player name": "say \"hi\"", "a.b": 1}"#);
        let rendered = stringify_toml(&value);
        assert_eq!(rendered, "\"player name\" = 'say \"hi\"'\n\"a.b\" = 1\n");
        let reparsed = parse(&rendered).document.values;
        assert_eq!(reparsed, value);
    }
}

#[cfg(all(test, feature = "property-tests"))]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_scalar() -> impl Strategy<Value = ConfigValue> {
        prop_oneof![
            any::<bool>().prop_map(ConfigValue::Bool),
            (-100_000i64..100_000).prop_map(ConfigValue::from),
            (-1000i64..1000).prop_map(|n| ConfigValue::Number(n as f64 / 8.0)),
            "[a-zA-Z0-9 _.:#/=-]{0,16}".prop_map(ConfigValue::String),
            prop::collection::vec((-50i64..50).prop_map(ConfigValue::from), 0..5).prop_map(ConfigValue::Array),
            prop::collection::vec("[a-zA-Z0-9 _.#-]{0,8}".prop_map(ConfigValue::String), 0..4)
                .prop_map(ConfigValue::Array),
        ]
    }

    fn arb_table(depth: u32) -> BoxedStrategy<IndexMap<String, ConfigValue>> {
        let scalars = prop::collection::vec(("[a-z][a-z0-9_]{0,6}", arb_scalar()), 0..5);
        if depth == 0 {
            scalars.prop_map(|entries| entries.into_iter().collect()).boxed()
        } else {
            (scalars, prop::collection::vec(("[a-z][a-z0-9_]{0,6}", arb_table(depth - 1)), 0..3))
                .prop_map(|(scalars, tables)| {
                    let mut map: IndexMap<String, ConfigValue> = IndexMap::new();
                    for (key, value) in scalars {
                        map.insert(key, value);
                    }
                    for (key, table) in tables {
                        map.insert(key, ConfigValue::Object(table));
                    }
                    map
                })
                .boxed()
        }
    }

    proptest! {
        /// Test parse(stringify(v)) == v for TOML-shaped trees
        #[test]
        fn toml_round_trip(table in arb_table(2)) {
            let value = ConfigValue::Object(table);
            let rendered = stringify_toml(&value);
            let reparsed = parse_toml(&rendered, &ParseOptions::strict()).unwrap();
            prop_assert_eq!(reparsed.document.values, value);
        }
    }
}
