//! Attach-to-next-key comment tracking shared by every format scanner.
//!
//! A run of comment lines becomes one pending comment (space-joined). The
//! pending comment is attached to the next key line and is dropped by blank
//! lines or by any other line that breaks the run.

use confdoc_core::CommentMap;
use tracing::trace;

/// Pending comment state threaded through a line scan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommentTracker {
    pending: Option<String>,
}

impl CommentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the text of one comment line (marker already removed)
    pub fn comment(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        match &mut self.pending {
            Some(pending) => {
                pending.push(' ');
                pending.push_str(text);
            },
            None => self.pending = Some(text.to_string()),
        }
    }

    /// Replace the pending comment outright (inline comments)
    pub fn replace(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.pending = Some(text.to_string());
        }
    }

    /// Drop the pending comment
    pub fn reset(&mut self) {
        if self.pending.take().is_some() {
            trace!("pending comment dropped");
        }
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Move the pending comment, if any, onto `key`
    pub fn attach(&mut self, key: impl Into<String>, comments: &mut CommentMap) {
        if let Some(comment) = self.pending.take() {
            let key = key.into();
            trace!(%key, "comment attached");
            comments.insert(key, comment);
        }
    }
}
