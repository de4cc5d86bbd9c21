//! Skipped-line diagnostics collected during lenient parsing.

use confdoc_core::{ConfdocError, ConfdocResult, FormatTag};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::options::{ParseMode, ParseOptions};

/// Why a line did not contribute to the value tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The line matched none of the format's patterns
    Unrecognized,
    /// The line has a separator but no key before it
    EmptyKey,
    /// The value addressed by the line is not a container that can hold it
    NotAContainer,
    /// An existing value was replaced to make room for a table or list
    Overwritten,
    /// JSON only: comment stripping broke the document, so it was reparsed raw
    CommentStripFallback,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Unrecognized => "unrecognized line",
            SkipReason::EmptyKey => "empty key",
            SkipReason::NotAContainer => "parent is not a container",
            SkipReason::Overwritten => "existing value overwritten",
            SkipReason::CommentStripFallback => "comments dropped, raw text parsed",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One skipped or degraded input line (1-based; 0 for whole-document notes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub content: String,
    pub reason: SkipReason,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line, self.reason, self.content)
    }
}

/// Collects diagnostics and enforces the parse mode
#[derive(Debug)]
pub struct DiagnosticSink {
    format: FormatTag,
    mode: ParseMode,
    entries: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new(format: FormatTag, options: &ParseOptions) -> Self {
        Self {
            format,
            mode: options.mode,
            entries: Vec::new(),
        }
    }

    /// Record a skipped line; fails in strict mode
    pub fn skip(&mut self, line: usize, content: &str, reason: SkipReason) -> ConfdocResult<()> {
        debug!(format = %self.format, line, %reason, "skipping line");

        if self.mode == ParseMode::Strict {
            return Err(ConfdocError::SkippedLine {
                format: self.format.to_string(),
                line,
                content: content.to_string(),
                reason: reason.to_string(),
            });
        }

        self.entries.push(Diagnostic {
            line,
            content: content.to_string(),
            reason,
        });
        Ok(())
    }

    /// Record a degradation that never fails, regardless of mode
    pub fn note(&mut self, line: usize, content: &str, reason: SkipReason) {
        debug!(format = %self.format, line, %reason, "degraded parse");
        self.entries.push(Diagnostic {
            line,
            content: content.to_string(),
            reason,
        });
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
