//! Generic tree editor for confdoc documents
//!
//! Edits operate on [`ConfigValue`](confdoc_core::ConfigValue) trees and are
//! independent of the source format. The editor kind of a node is chosen from
//! its runtime type, and [`EditSession`] ties a parsed document to its format
//! for the duration of an editing session.

pub mod edit;
pub mod session;

// Re-export main types
pub use edit::{apply_edit, coerce_input, default_like, Edit, EditOutcome, EditorKind, Slider};
pub use session::{EditSession, FieldRow};
