//! Low-level line scanning helpers.

/// Number of leading whitespace characters
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Strip one pair of matching `"` or `'` quotes. No escape processing.
pub fn unquote(raw: &str) -> Option<&str> {
    if raw.len() < 2 {
        return None;
    }
    let first = raw.as_bytes()[0];
    let last = raw.as_bytes()[raw.len() - 1];
    if (first == b'"' || first == b'\'') && first == last {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

/// Strip quotes from a key if present
pub fn unquote_key(raw: &str) -> &str {
    let raw = raw.trim();
    unquote(raw).unwrap_or(raw)
}

/// Split a value from a trailing `#` comment that sits outside quotes.
///
/// A value that opens and closes with the same quote character, or with `[`
/// and `]`, is one scalar or flow array and carries no comment, whatever
/// quotes or `#` it holds inside.
/// With `needs_space`, the `#` only starts a comment when preceded by
/// whitespace (YAML rules); otherwise any unquoted `#` does (TOML rules).
pub fn split_inline_comment(value: &str, needs_space: bool) -> (&str, Option<&str>) {
    let whole = value.trim_end();
    if unquote(whole).is_some() || (whole.starts_with('[') && whole.ends_with(']')) {
        return (whole, None);
    }

    let mut quote: Option<char> = None;
    let mut previous: Option<char> = None;

    for (index, c) in value.char_indices() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {},
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '#' => {
                let delimited = !needs_space || previous.map_or(true, char::is_whitespace);
                if delimited {
                    return (value[..index].trim_end(), Some(value[index + 1..].trim()));
                }
            },
            None => {},
        }
        previous = Some(c);
    }

    (value, None)
}

/// Split the inside of a bracketed array on commas, dropping empty elements
pub fn split_array_items(inner: &str) -> impl Iterator<Item = &str> {
    inner.split(',').map(str::trim).filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_width() {
        assert_eq!(indent_width("    key: value"), 4);
        assert_eq!(indent_width("\tkey"), 1);
        assert_eq!(indent_width("key"), 0);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"Welcome\""), Some("Welcome"));
        assert_eq!(unquote("'a \\n b'"), Some("a \\n b"));
        assert_eq!(unquote("\"\""), Some(""));
        assert_eq!(unquote("\"mismatched'"), None);
        assert_eq!(unquote("\""), None);
        assert_eq!(unquote("plain"), None);
    }

    #[test]
    fn test_split_inline_comment_outside_quotes() {
        assert_eq!(split_inline_comment("25565 # default port", false), ("25565", Some("default port")));
        assert_eq!(split_inline_comment("\"a # b\" # c", false), ("\"a # b\"", Some("c")));
        assert_eq!(split_inline_comment("'x#y'", false), ("'x#y'", None));
        assert_eq!(split_inline_comment("1#tight", false), ("1", Some("tight")));
    }

    #[test]
    fn test_split_inline_comment_keeps_fully_quoted_values() {
        assert_eq!(split_inline_comment("\"a\" # 'b\"", false), ("\"a\" # 'b\"", None));
        assert_eq!(split_inline_comment("\"a\" # 'b\"  ", true), ("\"a\" # 'b\"", None));
        assert_eq!(split_inline_comment("'x' # y'", true), ("'x' # y'", None));
        assert_eq!(split_inline_comment("\"x\" # note", true), ("\"x\"", Some("note")));
        assert_eq!(split_inline_comment("[\"a\" # 'b\"]", false), ("[\"a\" # 'b\"]", None));
        assert_eq!(split_inline_comment("[1, 2] # pair", false), ("[1, 2]", Some("pair")));
    }

    #[test]
    fn test_split_inline_comment_yaml_needs_space() {
        assert_eq!(split_inline_comment("a#b", true), ("a#b", None));
        assert_eq!(split_inline_comment("a #b", true), ("a", Some("b")));
        assert_eq!(split_inline_comment("#only", true), ("", Some("only")));
    }

    #[test]
    fn test_split_array_items() {
        let items: Vec<_> = split_array_items(" 1, 2 ,, 3, ").collect();
        assert_eq!(items, vec!["1", "2", "3"]);
    }
}
