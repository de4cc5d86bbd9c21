//! `confdoc fields` command implementation.

use camino::Utf8Path;
use confdoc_core::{ConfdocError, ConfdocResult};
use confdoc_editor::FieldRow;

use super::CommandContext;

/// Execute the `confdoc fields` command
pub async fn execute(file: &Utf8Path, json: bool, ctx: &CommandContext) -> ConfdocResult<Vec<FieldRow>> {
    let opened = ctx.open(file).await?;
    let rows = opened.session.fields();

    let text = if json {
        serde_json::to_string_pretty(&rows).map_err(|e| ConfdocError::serialization(&e))?
    } else {
        render_table(&rows)
    };
    ctx.output.document(&text);
    Ok(rows)
}

/// One line per field: path, editor kind, scalar value and comment
pub fn render_table(rows: &[FieldRow]) -> String {
    let paths: Vec<String> = rows.iter().map(|row| row.path.to_string()).collect();
    let width = paths.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for (row, path) in rows.iter().zip(&paths) {
        let mut line = format!("{:<width$}  {:<9}", path, row.kind.label(), width = width);
        if let Some(preview) = &row.preview {
            line.push_str("  ");
            line.push_str(preview);
        }
        if let Some(comment) = &row.comment {
            line.push_str("  # ");
            line.push_str(comment);
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
