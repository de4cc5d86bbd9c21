//! `confdoc convert` command implementation.

use camino::{Utf8Path, Utf8PathBuf};
use confdoc_core::utils::with_extension;
use confdoc_core::{ConfdocError, ConfdocResult, FormatTag};
use confdoc_formats::stringify;

use super::CommandContext;

/// Execute the `confdoc convert` command
pub async fn execute(
    file: &Utf8Path,
    to: FormatTag,
    output: Option<&Utf8Path>,
    ctx: &CommandContext,
) -> ConfdocResult<String> {
    let opened = ctx.open(file).await?;
    let rendered = stringify(opened.session.values(), to);

    let dropped = opened.session.document().comments.len();
    if dropped > 0 {
        ctx.output.warn(&format!("{} comment(s) not carried over", dropped));
    }

    match output {
        Some(target) => {
            let target = ctx.resolve(target);
            ctx.write(&target, &rendered).await?;
            ctx.output.success(&format!(
                "Converted {} ({}) to {} ({})",
                file,
                opened.session.format(),
                target,
                to
            ));
        },
        None => ctx.output.document(&rendered),
    }

    Ok(rendered)
}

/// `file` renamed with the conventional extension of `to`
pub fn sibling_path(file: &Utf8Path, to: FormatTag) -> ConfdocResult<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(with_extension(file.as_std_path(), to.extension())).map_err(|path| {
        ConfdocError::io(
            format!("Output path is not valid UTF-8: {}", path.display()),
            std::io::Error::new(std::io::ErrorKind::InvalidData, "non UTF-8 path"),
        )
    })
}
