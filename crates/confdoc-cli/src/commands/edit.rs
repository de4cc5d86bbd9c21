//! `confdoc set`, `toggle`, `append` and `remove` command implementations.
//!
//! All four open the file, apply one [`Edit`], then either print the result
//! (`--dry-run`) or write it back in the file's own format.

use camino::Utf8Path;
use confdoc_core::{ConfdocError, ConfdocResult, ConfigValue, KeyPath};
use confdoc_editor::{coerce_input, Edit, EditOutcome};

use super::{parse_path, CommandContext, OpenedFile};

/// Execute the `confdoc set` command
pub async fn set(
    file: &Utf8Path,
    raw_path: &str,
    value: &str,
    json: bool,
    dry_run: bool,
    ctx: &CommandContext,
) -> ConfdocResult<EditOutcome> {
    let path = parse_path(raw_path)?;
    let edit = if json {
        Edit::Set {
            value: parse_json_value(&path, value)?,
            path,
        }
    } else {
        Edit::Input {
            path,
            text: value.to_string(),
        }
    };

    let opened = ctx.open(file).await?;
    commit(opened, edit, dry_run, ctx).await
}

/// Execute the `confdoc toggle` command
pub async fn toggle(file: &Utf8Path, raw_path: &str, dry_run: bool, ctx: &CommandContext) -> ConfdocResult<EditOutcome> {
    let path = parse_path(raw_path)?;
    let opened = ctx.open(file).await?;
    commit(opened, Edit::Toggle { path }, dry_run, ctx).await
}

/// Execute the `confdoc append` command.
///
/// A plain-text VALUE is coerced to the type of the array's first element.
pub async fn append(
    file: &Utf8Path,
    raw_path: &str,
    value: Option<&str>,
    json: bool,
    dry_run: bool,
    ctx: &CommandContext,
) -> ConfdocResult<EditOutcome> {
    let path = parse_path(raw_path)?;
    let opened = ctx.open(file).await?;

    let edit = match value {
        None => Edit::Append { path },
        Some(raw) if json => Edit::AppendValue {
            value: parse_json_value(&path, raw)?,
            path,
        },
        Some(raw) => {
            let sample = opened
                .session
                .values()
                .get_path(&path)
                .and_then(ConfigValue::as_array)
                .and_then(|items| items.first());
            let value = match sample {
                Some(sample) if sample.is_scalar() && *sample != ConfigValue::Null => {
                    coerce_input(&path, sample, raw)?
                },
                _ => ConfigValue::from(raw),
            };
            Edit::AppendValue { path, value }
        },
    };

    commit(opened, edit, dry_run, ctx).await
}

/// Execute the `confdoc remove` command
pub async fn remove(file: &Utf8Path, raw_path: &str, dry_run: bool, ctx: &CommandContext) -> ConfdocResult<EditOutcome> {
    let path = parse_path(raw_path)?;
    let opened = ctx.open(file).await?;
    commit(opened, Edit::Remove { path }, dry_run, ctx).await
}

fn parse_json_value(path: &KeyPath, raw: &str) -> ConfdocResult<ConfigValue> {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(ConfigValue::from)
        .map_err(|e| ConfdocError::InvalidInput {
            path: path.to_string(),
            input: raw.to_string(),
            reason: e.to_string(),
        })
}

async fn commit(mut opened: OpenedFile, edit: Edit, dry_run: bool, ctx: &CommandContext) -> ConfdocResult<EditOutcome> {
    let outcome = opened.session.apply(edit)?;
    let rendered = opened.session.render();
    let summary = describe_change(&outcome, opened.session.values().get_path(&outcome.path), ctx);

    if dry_run {
        ctx.output.document(&rendered);
        ctx.output.info(&format!("dry run, {} not written: {}", opened.path, summary));
        return Ok(outcome);
    }

    ctx.write(&opened.path, &rendered).await?;
    opened.session.mark_saved();

    let dropped = opened.session.document().comments.len();
    if dropped > 0 {
        ctx.output.warn(&format!("{} comment(s) were not written back", dropped));
    }
    ctx.output.success(&summary);
    Ok(outcome)
}

fn describe_change(outcome: &EditOutcome, current: Option<&ConfigValue>, ctx: &CommandContext) -> String {
    let path = ctx.output.colors().cyan(&outcome.path.to_string());
    match (&outcome.previous, current) {
        (Some(previous), Some(current)) => format!("{}: {} -> {}", path, previous, current),
        (None, Some(current)) => format!("{}: added {}", path, current),
        (Some(previous), None) => format!("{}: removed {}", path, previous),
        (None, None) => path,
    }
}
