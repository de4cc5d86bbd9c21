//! `confdoc parse` command implementation.
//!
//! Prints the value tree as pretty JSON, optionally wrapped in a report with
//! the comment map and skipped-line diagnostics.

use camino::Utf8Path;
use confdoc_core::{CommentMap, ConfdocError, ConfdocResult, ConfigValue};
use confdoc_editor::EditSession;
use confdoc_formats::json::stringify_json;
use confdoc_formats::Diagnostic;
use serde::Serialize;

use super::CommandContext;

#[derive(Serialize)]
struct ParseReport<'a> {
    values: &'a ConfigValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    comments: Option<&'a CommentMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<&'a [Diagnostic]>,
}

/// Execute the `confdoc parse` command
pub async fn execute(file: &Utf8Path, comments: bool, diagnostics: bool, ctx: &CommandContext) -> ConfdocResult<String> {
    let opened = ctx.open(file).await?;
    let report = render_report(&opened.session, comments, diagnostics)?;
    ctx.output.document(&report);
    Ok(report)
}

pub fn render_report(session: &EditSession, comments: bool, diagnostics: bool) -> ConfdocResult<String> {
    if !comments && !diagnostics {
        return Ok(stringify_json(session.values()));
    }

    let report = ParseReport {
        values: session.values(),
        comments: comments.then_some(&session.document().comments),
        diagnostics: diagnostics.then_some(session.diagnostics()),
    };
    serde_json::to_string_pretty(&report).map_err(|e| ConfdocError::serialization(&e))
}
