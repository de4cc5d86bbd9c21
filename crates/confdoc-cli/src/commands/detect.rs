//! `confdoc detect` command implementation.

use camino::Utf8Path;
use confdoc_core::{ConfdocResult, FormatTag};
use confdoc_formats::supports_structured_edit;

use super::CommandContext;

/// Execute the `confdoc detect` command
pub async fn execute(file: &Utf8Path, ctx: &CommandContext) -> ConfdocResult<FormatTag> {
    let format = ctx.format_for(file);
    ctx.output.document(&describe(file, format));
    Ok(format)
}

pub fn describe(file: &Utf8Path, format: FormatTag) -> String {
    let editing = if supports_structured_edit(format) {
        "structured editing available"
    } else {
        "raw text only"
    };
    format!("{}: {} ({})", file, format, editing)
}
