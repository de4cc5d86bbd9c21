//! `confdoc fmt` command implementation.
//!
//! Normalizes a file by running it through parse and serialize. Comments are
//! dropped in the process.

use camino::Utf8Path;
use confdoc_core::ConfdocResult;

use super::CommandContext;

/// Execute the `confdoc fmt` command.
///
/// Returns `false` only when `check` is set and the file would change.
pub async fn execute(file: &Utf8Path, check: bool, ctx: &CommandContext) -> ConfdocResult<bool> {
    let opened = ctx.open(file).await?;
    let rendered = opened.session.render();

    if rendered == opened.text {
        ctx.output.success(&format!("{} is already formatted", file));
        return Ok(true);
    }

    if check {
        ctx.output.error(&format!("{} would be reformatted", file));
        return Ok(false);
    }

    ctx.write(&opened.path, &rendered).await?;
    ctx.output.success(&format!("Formatted {}", file));
    Ok(true)
}
