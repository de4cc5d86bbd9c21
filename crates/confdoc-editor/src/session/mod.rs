//! Editing sessions over one parsed document.
//!
//! An `EditSession` owns the [`ParsedConfig`] between a parse and the next
//! save. It holds no undo history.

use confdoc_core::{ConfdocError, ConfdocResult, ConfigValue, FormatTag, KeyPath, ParsedConfig, PathSegment};
use confdoc_formats::{parse_with, stringify, Diagnostic, ParseOptions};
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::edit::{apply_edit, Edit, EditOutcome, EditorKind};

/// One row of the flattened field listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRow {
    #[serde(serialize_with = "path_as_string")]
    pub path: KeyPath,
    #[serde(flatten)]
    pub kind: EditorKind,
    pub editable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Rendered value for scalars
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

fn path_as_string<S: Serializer>(path: &KeyPath, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(path)
}

/// A document opened for structured editing
#[derive(Debug, Clone)]
pub struct EditSession {
    format: FormatTag,
    options: ParseOptions,
    document: ParsedConfig,
    diagnostics: Vec<Diagnostic>,
    dirty: bool,
}

impl EditSession {
    /// Parse `text` leniently and open it for editing
    pub fn open(text: &str, format: FormatTag) -> ConfdocResult<Self> {
        Self::open_with(text, format, ParseOptions::default())
    }

    /// Open with explicit parse options.
    ///
    /// Fails for formats without structured editing and for unparseable
    /// text; callers then fall back to raw-text editing.
    pub fn open_with(text: &str, format: FormatTag, options: ParseOptions) -> ConfdocResult<Self> {
        if !format.supports_structured_edit() {
            return Err(ConfdocError::UnsupportedFormat {
                format: format.to_string(),
            });
        }

        let outcome = parse_with(text, format, &options)?;
        info!(format = %format, skipped = outcome.diagnostics.len(), "opened edit session");

        Ok(Self {
            format,
            options,
            document: outcome.document,
            diagnostics: outcome.diagnostics,
            dirty: false,
        })
    }

    pub fn format(&self) -> FormatTag {
        self.format
    }

    pub fn values(&self) -> &ConfigValue {
        &self.document.values
    }

    pub fn document(&self) -> &ParsedConfig {
        &self.document
    }

    /// Lines the last parse skipped
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply an edit to the value tree. The comment map is left untouched.
    pub fn apply(&mut self, edit: Edit) -> ConfdocResult<EditOutcome> {
        let outcome = apply_edit(&mut self.document.values, edit)?;
        self.dirty = true;
        Ok(outcome)
    }

    /// Comment shown next to the field at `path`.
    ///
    /// JSON comments are keyed by bare key name, so lookups there use the
    /// last key of the path and never match array elements.
    pub fn comment_for(&self, path: &KeyPath) -> Option<&str> {
        match self.format {
            FormatTag::Json => match path.last() {
                Some(PathSegment::Key(key)) => self.document.comments.get(key),
                _ => None,
            },
            _ => self.document.comments.get(&path.dotted()),
        }
    }

    /// Depth-first listing of every node below the root
    pub fn fields(&self) -> Vec<FieldRow> {
        let mut rows = Vec::new();
        self.collect_fields(&self.document.values, KeyPath::root(), &mut rows);
        rows
    }

    fn collect_fields(&self, value: &ConfigValue, path: KeyPath, rows: &mut Vec<FieldRow>) {
        let children: Vec<(KeyPath, &ConfigValue)> = match value {
            ConfigValue::Object(map) => map.iter().map(|(key, child)| (path.key(key.as_str()), child)).collect(),
            ConfigValue::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, child)| (path.index(index), child))
                .collect(),
            _ => return,
        };

        for (child_path, child) in children {
            let kind = EditorKind::for_value(child);
            rows.push(FieldRow {
                editable: kind.is_editable(),
                kind,
                comment: self.comment_for(&child_path).map(str::to_string),
                preview: child.is_scalar().then(|| child.display_scalar()),
                path: child_path.clone(),
            });
            self.collect_fields(child, child_path, rows);
        }
    }

    /// Serialize the current tree. Comments are not written back.
    pub fn render(&self) -> String {
        stringify(&self.document.values, self.format)
    }

    /// Forget pending changes after the rendered text has been persisted
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Re-parse after the file changed on disk. Comments are regenerated
    /// wholesale; on failure the session keeps its current document.
    pub fn reload(&mut self, text: &str) -> ConfdocResult<()> {
        let outcome = parse_with(text, self.format, &self.options)?;
        debug!(format = %self.format, discarded_changes = self.dirty, "reloaded edit session");
        self.document = outcome.document;
        self.diagnostics = outcome.diagnostics;
        self.dirty = false;
        Ok(())
    }

    pub fn into_document(self) -> ParsedConfig {
        self.document
    }
}
