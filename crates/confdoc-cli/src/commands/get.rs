//! `confdoc get` command implementation.

use camino::Utf8Path;
use confdoc_core::{ConfdocError, ConfdocResult, ConfigValue};
use confdoc_formats::json::stringify_json;

use super::{parse_path, CommandContext};

/// Execute the `confdoc get` command
pub async fn execute(file: &Utf8Path, raw_path: &str, ctx: &CommandContext) -> ConfdocResult<String> {
    let path = parse_path(raw_path)?;
    let opened = ctx.open(file).await?;

    let value = opened
        .session
        .values()
        .get_path(&path)
        .ok_or_else(|| ConfdocError::PathNotFound {
            path: path.to_string(),
        })?;

    if let Some(comment) = opened.session.comment_for(&path) {
        ctx.output.info(&format!("# {}", comment));
    }

    let text = render_value(value);
    ctx.output.document(&text);
    Ok(text)
}

/// Strings print bare, other scalars in their display form, containers as JSON
pub fn render_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::String(s) => s.clone(),
        scalar if scalar.is_scalar() => scalar.display_scalar(),
        container => stringify_json(container),
    }
}
