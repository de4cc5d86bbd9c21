//! Structural edits over a [`ConfigValue`] tree.
//!
//! Edits never touch the comment map. Comments are regenerated only by the
//! next parse.

pub mod kind;

pub use kind::{EditorKind, Slider};

use confdoc_core::utils::parse_decimal;
use confdoc_core::{ConfdocError, ConfdocResult, ConfigValue, KeyPath, PathSegment};
use std::mem;
use tracing::debug;

/// One mutation of a value tree
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Replace (or insert into an object) the value at `path`
    Set { path: KeyPath, value: ConfigValue },
    /// Replace a scalar with user text coerced to the scalar's current type
    Input { path: KeyPath, text: String },
    /// Flip a boolean
    Toggle { path: KeyPath },
    /// Append a default element shaped like the array's first element
    Append { path: KeyPath },
    /// Append a given element
    AppendValue { path: KeyPath, value: ConfigValue },
    /// Delete an object key or array element
    Remove { path: KeyPath },
}

impl Edit {
    pub fn path(&self) -> &KeyPath {
        match self {
            Edit::Set { path, .. }
            | Edit::Input { path, .. }
            | Edit::Toggle { path }
            | Edit::Append { path }
            | Edit::AppendValue { path, .. }
            | Edit::Remove { path } => path,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Edit::Set { .. } => "set",
            Edit::Input { .. } => "input",
            Edit::Toggle { .. } => "toggle",
            Edit::Append { .. } | Edit::AppendValue { .. } => "append",
            Edit::Remove { .. } => "remove",
        }
    }
}

/// What an applied edit changed
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    /// Path of the affected node (the new element for appends)
    pub path: KeyPath,
    /// Value that was replaced or removed, `None` for insertions
    pub previous: Option<ConfigValue>,
}

/// Apply one edit to `root`
pub fn apply_edit(root: &mut ConfigValue, edit: Edit) -> ConfdocResult<EditOutcome> {
    debug!(edit = edit.name(), path = %edit.path(), "applying edit");

    match edit {
        Edit::Set { path, value } => set_value(root, path, value),
        Edit::Input { path, text } => {
            let value = coerce_input(&path, lookup(root, &path)?, &text)?;
            set_value(root, path, value)
        },
        Edit::Toggle { path } => match lookup_mut(root, &path)? {
            ConfigValue::Bool(flag) => {
                let previous = *flag;
                *flag = !previous;
                Ok(EditOutcome {
                    path,
                    previous: Some(ConfigValue::Bool(previous)),
                })
            },
            other => Err(mismatch(&path, "boolean", other)),
        },
        Edit::Append { path } => {
            let items = array_at(root, &path)?;
            let value = default_like(items.first());
            push_item(items, path, value)
        },
        Edit::AppendValue { path, value } => {
            let items = array_at(root, &path)?;
            push_item(items, path, value)
        },
        Edit::Remove { path } => remove_value(root, path),
    }
}

/// Empty value of the same type as `sample`; an empty string without a sample
pub fn default_like(sample: Option<&ConfigValue>) -> ConfigValue {
    match sample {
        None | Some(ConfigValue::String(_)) => ConfigValue::String(String::new()),
        Some(ConfigValue::Bool(_)) => ConfigValue::Bool(false),
        Some(ConfigValue::Number(_)) => ConfigValue::Number(0.0),
        Some(ConfigValue::Array(_)) => ConfigValue::Array(Vec::new()),
        Some(ConfigValue::Object(_)) => ConfigValue::object(),
        Some(ConfigValue::Null) => ConfigValue::Null,
    }
}

/// Coerce user text to the type of `current`
pub fn coerce_input(path: &KeyPath, current: &ConfigValue, text: &str) -> ConfdocResult<ConfigValue> {
    let invalid = |reason: &str| ConfdocError::InvalidInput {
        path: path.to_string(),
        input: text.to_string(),
        reason: reason.to_string(),
    };

    match current {
        ConfigValue::Bool(_) => match text.trim() {
            "true" => Ok(ConfigValue::Bool(true)),
            "false" => Ok(ConfigValue::Bool(false)),
            _ => Err(invalid("expected true or false")),
        },
        ConfigValue::Number(_) => parse_decimal(text.trim())
            .map(ConfigValue::Number)
            .ok_or_else(|| invalid("expected a number")),
        ConfigValue::String(_) => Ok(ConfigValue::String(text.to_string())),
        ConfigValue::Null => Err(ConfdocError::ReadOnly {
            path: path.to_string(),
        }),
        other => Err(mismatch(path, "scalar", other)),
    }
}

fn mismatch(path: &KeyPath, expected: &str, found: &ConfigValue) -> ConfdocError {
    ConfdocError::TypeMismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

fn not_found(path: &KeyPath) -> ConfdocError {
    ConfdocError::PathNotFound {
        path: path.to_string(),
    }
}

fn lookup<'a>(root: &'a ConfigValue, path: &KeyPath) -> ConfdocResult<&'a ConfigValue> {
    root.get_path(path).ok_or_else(|| not_found(path))
}

fn lookup_mut<'a>(root: &'a mut ConfigValue, path: &KeyPath) -> ConfdocResult<&'a mut ConfigValue> {
    root.get_path_mut(path).ok_or_else(|| not_found(path))
}

fn array_at<'a>(root: &'a mut ConfigValue, path: &KeyPath) -> ConfdocResult<&'a mut Vec<ConfigValue>> {
    match lookup_mut(root, path)? {
        ConfigValue::Array(items) => Ok(items),
        other => Err(mismatch(path, "array", other)),
    }
}

fn push_item(items: &mut Vec<ConfigValue>, path: KeyPath, value: ConfigValue) -> ConfdocResult<EditOutcome> {
    items.push(value);
    Ok(EditOutcome {
        path: path.index(items.len() - 1),
        previous: None,
    })
}

fn set_value(root: &mut ConfigValue, path: KeyPath, value: ConfigValue) -> ConfdocResult<EditOutcome> {
    let Some((parent_path, last)) = path.split_last() else {
        let previous = mem::replace(root, value);
        return Ok(EditOutcome {
            path,
            previous: Some(previous),
        });
    };
    let last = last.clone();

    let previous = match (lookup_mut(root, &parent_path)?, &last) {
        (ConfigValue::Object(map), PathSegment::Key(key)) => map.insert(key.clone(), value),
        (ConfigValue::Array(items), PathSegment::Index(index)) => {
            let slot = items.get_mut(*index).ok_or_else(|| not_found(&path))?;
            Some(mem::replace(slot, value))
        },
        (other, PathSegment::Key(_)) => return Err(mismatch(&parent_path, "object", other)),
        (other, PathSegment::Index(_)) => return Err(mismatch(&parent_path, "array", other)),
    };

    Ok(EditOutcome { path, previous })
}

fn remove_value(root: &mut ConfigValue, path: KeyPath) -> ConfdocResult<EditOutcome> {
    let Some((parent_path, last)) = path.split_last() else {
        return Err(ConfdocError::InvalidPath {
            path: path.to_string(),
            reason: "the document root cannot be removed".to_string(),
        });
    };

    let previous = match (lookup_mut(root, &parent_path)?, last) {
        // shift_remove keeps sibling order stable
        (ConfigValue::Object(map), PathSegment::Key(key)) => map.shift_remove(key),
        (ConfigValue::Array(items), PathSegment::Index(index)) if *index < items.len() => {
            Some(items.remove(*index))
        },
        _ => None,
    };

    match previous {
        Some(previous) => Ok(EditOutcome {
            path,
            previous: Some(previous),
        }),
        None => Err(not_found(&path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> ConfigValue {
        serde_json::from_str(
            r#"{"server": {"port": 25565, "motd": "Welcome", "pvp": true, "seed": null},
                "mods": ["sodium", "lithium"], "ratios": [0.5], "empty": [], "nested": [[1]]}"#,
        )
        .unwrap()
    }

    fn path(text: &str) -> KeyPath {
        text.parse().unwrap()
    }

    fn get<'a>(value: &'a ConfigValue, text: &str) -> Option<&'a ConfigValue> {
        value.get_path(&path(text))
    }

    #[test]
    fn test_set_replaces_and_inserts() {
        let mut value = doc();
        let outcome = apply_edit(
            &mut value,
            Edit::Set {
                path: path("server.port"),
                value: ConfigValue::from(25566i64),
            },
        )
        .unwrap();
        assert_eq!(outcome.previous, Some(ConfigValue::Number(25565.0)));
        assert_eq!(get(&value, "server.port"), Some(&ConfigValue::Number(25566.0)));

        let outcome = apply_edit(
            &mut value,
            Edit::Set {
                path: path("server.difficulty"),
                value: ConfigValue::from("hard"),
            },
        )
        .unwrap();
        assert_eq!(outcome.previous, None);
        assert_eq!(get(&value, "server.difficulty"), Some(&ConfigValue::from("hard")));
    }

    #[test]
    fn test_set_keeps_key_position() {
        let mut value = doc();
        apply_edit(
            &mut value,
            Edit::Set {
                path: path("server.port"),
                value: ConfigValue::from(1i64),
            },
        )
        .unwrap();
        let keys: Vec<_> = get(&value, "server").unwrap().as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["port", "motd", "pvp", "seed"]);
    }

    #[test]
    fn test_set_array_index_must_exist() {
        let mut value = doc();
        apply_edit(
            &mut value,
            Edit::Set {
                path: path("mods[1]"),
                value: ConfigValue::from("iris"),
            },
        )
        .unwrap();
        assert_eq!(get(&value, "mods[1]"), Some(&ConfigValue::from("iris")));

        let error = apply_edit(
            &mut value,
            Edit::Set {
                path: path("mods[9]"),
                value: ConfigValue::from("x"),
            },
        )
        .unwrap_err();
        assert!(matches!(error, ConfdocError::PathNotFound { .. }));
    }

    #[test]
    fn test_set_into_scalar_parent_fails() {
        let mut value = doc();
        let error = apply_edit(
            &mut value,
            Edit::Set {
                path: path("server.port.inner"),
                value: ConfigValue::Null,
            },
        )
        .unwrap_err();
        assert!(matches!(error, ConfdocError::TypeMismatch { .. }));
    }

    #[test]
    fn test_input_is_coerced_by_existing_type() {
        let mut value = doc();
        apply_edit(
            &mut value,
            Edit::Input {
                path: path("server.port"),
                text: " 8080 ".to_string(),
            },
        )
        .unwrap();
        apply_edit(
            &mut value,
            Edit::Input {
                path: path("server.pvp"),
                text: "false".to_string(),
            },
        )
        .unwrap();
        apply_edit(
            &mut value,
            Edit::Input {
                path: path("server.motd"),
                text: "42".to_string(),
            },
        )
        .unwrap();

        assert_eq!(get(&value, "server.port"), Some(&ConfigValue::Number(8080.0)));
        assert_eq!(get(&value, "server.pvp"), Some(&ConfigValue::Bool(false)));
        assert_eq!(get(&value, "server.motd"), Some(&ConfigValue::from("42")));
    }

    #[test]
    fn test_input_rejects_bad_text() {
        let mut value = doc();
        let error = apply_edit(
            &mut value,
            Edit::Input {
                path: path("server.port"),
                text: "lots".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(error, ConfdocError::InvalidInput { .. }));

        let error = apply_edit(
            &mut value,
            Edit::Input {
                path: path("server.seed"),
                text: "1".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(error, ConfdocError::ReadOnly { .. }));

        let error = apply_edit(
            &mut value,
            Edit::Input {
                path: path("mods"),
                text: "x".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(error, ConfdocError::TypeMismatch { .. }));
    }

    #[test]
    fn test_toggle() {
        let mut value = doc();
        let outcome = apply_edit(&mut value, Edit::Toggle { path: path("server.pvp") }).unwrap();
        assert_eq!(outcome.previous, Some(ConfigValue::Bool(true)));
        assert_eq!(get(&value, "server.pvp"), Some(&ConfigValue::Bool(false)));

        let error = apply_edit(&mut value, Edit::Toggle { path: path("server.motd") }).unwrap_err();
        assert!(matches!(error, ConfdocError::TypeMismatch { .. }));
    }

    #[test]
    fn test_append_clones_first_element_type() {
        let mut value = doc();
        let outcome = apply_edit(&mut value, Edit::Append { path: path("mods") }).unwrap();
        assert_eq!(outcome.path, path("mods[2]"));
        assert_eq!(get(&value, "mods[2]"), Some(&ConfigValue::from("")));

        apply_edit(&mut value, Edit::Append { path: path("ratios") }).unwrap();
        assert_eq!(get(&value, "ratios[1]"), Some(&ConfigValue::Number(0.0)));

        apply_edit(&mut value, Edit::Append { path: path("nested") }).unwrap();
        assert_eq!(get(&value, "nested[1]"), Some(&ConfigValue::Array(vec![])));

        apply_edit(&mut value, Edit::Append { path: path("empty") }).unwrap();
        assert_eq!(get(&value, "empty[0]"), Some(&ConfigValue::from("")));
    }

    #[test]
    fn test_append_value_and_non_arrays() {
        let mut value = doc();
        apply_edit(
            &mut value,
            Edit::AppendValue {
                path: path("mods"),
                value: ConfigValue::from("iris"),
            },
        )
        .unwrap();
        assert_eq!(get(&value, "mods[2]"), Some(&ConfigValue::from("iris")));

        let error = apply_edit(&mut value, Edit::Append { path: path("server") }).unwrap_err();
        assert!(matches!(error, ConfdocError::TypeMismatch { .. }));
    }

    #[test]
    fn test_remove_splices_and_deletes() {
        let mut value = doc();
        let outcome = apply_edit(&mut value, Edit::Remove { path: path("mods[0]") }).unwrap();
        assert_eq!(outcome.previous, Some(ConfigValue::from("sodium")));
        assert_eq!(get(&value, "mods"), Some(&ConfigValue::Array(vec![ConfigValue::from("lithium")])));

        apply_edit(&mut value, Edit::Remove { path: path("server.motd") }).unwrap();
        let keys: Vec<_> = get(&value, "server").unwrap().as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["port", "pvp", "seed"]);

        let error = apply_edit(&mut value, Edit::Remove { path: path("server.motd") }).unwrap_err();
        assert!(matches!(error, ConfdocError::PathNotFound { .. }));
        let error = apply_edit(&mut value, Edit::Remove { path: KeyPath::root() }).unwrap_err();
        assert!(matches!(error, ConfdocError::InvalidPath { .. }));
    }

    #[test]
    fn test_default_like() {
        assert_eq!(default_like(None), ConfigValue::from(""));
        assert_eq!(default_like(Some(&ConfigValue::Bool(true))), ConfigValue::Bool(false));
        assert_eq!(default_like(Some(&ConfigValue::Number(9.0))), ConfigValue::Number(0.0));
        assert_eq!(default_like(Some(&ConfigValue::from("x"))), ConfigValue::from(""));
        assert_eq!(default_like(Some(&doc())), ConfigValue::object());
        assert_eq!(default_like(Some(&ConfigValue::Null)), ConfigValue::Null);
    }
}
