//! Path utilities for locating and naming configuration files.

use std::path::{Path, PathBuf};

/// Get the file extension as a lowercase string.
///
/// The text after the last `.` of the file name counts, so a dotfile such as
/// `.json` has the extension `json`.
pub fn get_extension(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let (_, ext) = name.rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_lowercase())
}

/// Same file name with its extension replaced
pub fn with_extension(path: &Path, extension: &str) -> PathBuf {
    let mut renamed = path.to_path_buf();
    renamed.set_extension(extension);
    renamed
}
